use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde_json::json;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use librarian::DocBrowser;
use librarian::inspect::{FileInfo, ProjectSummary};
use librarian::render::RenderMode;
use librarian::scan::{ContentSearch, DirectoryListing, NameSearch, relative_display};

const MAX_LISTED_FILES: usize = 20;

pub struct Output {
    json: bool,
}

pub fn spinner(visible: bool, message: &'static str) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit(&self, buffer: &[u8]) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(buffer)?;
        stdout.flush()?;
        Ok(())
    }

    fn emit_json<T: Serialize>(&self, value: &T) -> Result<()> {
        let mut buffer = serde_json::to_vec_pretty(value)?;
        buffer.push(b'\n');
        self.emit(&buffer)
    }

    pub fn listing(&self, browser: &DocBrowser, listing: &DirectoryListing) -> Result<()> {
        let location = browser.relative_current().to_string_lossy().replace('\\', "/");

        if self.json {
            return self.emit_json(&json!({
                "location": location,
                "dirs": listing.dirs,
                "files": listing.files,
                "read_error": listing.read_error,
            }));
        }

        let mut buffer = Vec::with_capacity(4 * 1024);
        let title = if location.is_empty() { "Root" } else { location.as_str() };

        writeln!(buffer)?;
        writeln!(buffer, "📁 {}", title)?;
        writeln!(buffer, "{}", "=".repeat(60))?;

        if let Some(error) = &listing.read_error {
            writeln!(buffer, "Error: {}", error)?;
        }

        if listing.is_empty() {
            writeln!(buffer, "(empty)")?;
            return self.emit(&buffer);
        }

        if !listing.dirs.is_empty() {
            writeln!(buffer)?;
            writeln!(buffer, "📂 Directories:")?;
            for dir in &listing.dirs {
                writeln!(buffer, "  > {}/", dir)?;
            }
        }

        if !listing.files.is_empty() {
            writeln!(buffer)?;
            writeln!(buffer, "📄 Files ({}):", listing.files.len())?;
            for file in listing.files.iter().take(MAX_LISTED_FILES) {
                writeln!(buffer, "  • {}", file)?;
            }
            if listing.files.len() > MAX_LISTED_FILES {
                writeln!(
                    buffer,
                    "  ... and {} more files",
                    listing.files.len() - MAX_LISTED_FILES
                )?;
            }
        }

        self.emit(&buffer)
    }

    pub fn projects(&self, projects: &[String]) -> Result<()> {
        if self.json {
            return self.emit_json(&projects);
        }

        let mut buffer = Vec::new();
        writeln!(buffer)?;
        writeln!(buffer, "📚 Available Documentation Projects ({}):", projects.len())?;
        for project in projects {
            writeln!(buffer, "  • {}", project)?;
        }
        self.emit(&buffer)
    }

    pub fn project(&self, summary: &ProjectSummary) -> Result<()> {
        if self.json {
            return self.emit_json(summary);
        }

        let index_file = summary.index_file.as_deref().unwrap_or("None");
        let rows = [
            ("html_files", summary.html_files.to_string()),
            ("markdown_files", summary.markdown_files.to_string()),
            ("other_files", summary.other_files.to_string()),
            ("total_size", summary.total_size.clone()),
            ("index_file", index_file.to_string()),
        ];

        let mut buffer = Vec::new();
        writeln!(buffer)?;
        writeln!(buffer, "📊 Project: {}", summary.project)?;
        for (key, value) in rows {
            writeln!(buffer, "  {}: {}", title_case(key), value)?;
        }
        self.emit(&buffer)
    }

    pub fn name_search(&self, root: &Path, pattern: &str, result: &NameSearch) -> Result<()> {
        let matches: Vec<String> = result
            .matches
            .iter()
            .map(|p| relative_display(root, p))
            .collect();

        if self.json {
            return self.emit_json(&json!({
                "pattern": pattern,
                "matches": matches,
                "limit": result.limit,
                "truncated": result.truncated,
            }));
        }

        let mut buffer = Vec::new();
        writeln!(buffer)?;
        writeln!(
            buffer,
            "🔍 Search results for '{}' ({} found):",
            pattern,
            matches.len()
        )?;
        for path in &matches {
            writeln!(buffer, "  • {}", path)?;
        }
        if result.truncated {
            writeln!(buffer, "  ... (limited to {} results)", result.limit)?;
        }
        self.emit(&buffer)
    }

    pub fn file_info(&self, requested: &str, info: &FileInfo) -> Result<()> {
        if self.json {
            return self.emit_json(info);
        }

        let mut buffer = Vec::new();
        writeln!(buffer)?;
        writeln!(buffer, "📋 File Info: {}", requested)?;
        writeln!(buffer, "  Path: {}", info.path)?;
        writeln!(buffer, "  Size: {}", info.size)?;
        writeln!(buffer, "  Type: {}", info.kind)?;
        if let Some(title) = &info.title {
            writeln!(buffer, "  Title: {}", title)?;
        }
        self.emit(&buffer)
    }

    pub fn rendered(&self, path: &str, mode: RenderMode, text: &str) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({
                "path": path,
                "mode": mode,
                "content": text,
            }));
        }

        let mut buffer = Vec::with_capacity(text.len() + 1);
        writeln!(buffer, "{}", text)?;
        self.emit(&buffer)
    }

    pub fn content_search(&self, result: &ContentSearch) -> Result<()> {
        if self.json {
            return self.emit_json(result);
        }

        let mut buffer = Vec::with_capacity(16 * 1024);

        for hit in &result.matches {
            writeln!(buffer, "{}:{}:{}", hit.path, hit.line, hit.text)?;
            for context in &hit.context {
                writeln!(buffer, "  {}: {}", context.line, context.text)?;
            }
        }

        if result.limit_reached {
            writeln!(buffer, "...Reached result limit of {}", result.limit)?;
        } else if result.matches.is_empty() {
            writeln!(buffer, "No matches found")?;
        }

        self.emit(&buffer)
    }
}

use regex::Regex;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use crate::browser::is_within;
use crate::error::{LibrarianError, LibrarianResult};
use crate::scan::walk;

const TITLE_SNIFF_BYTES: u64 = 2000;
const INDEX_CANDIDATES: &[&str] = &["index.html", "README.html", "index.md"];

static TITLE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("static regex"));
static H1_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h1[^>]*>([^<]+)</h1>").expect("static regex"));

#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: String,
    pub size: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    pub project: String,
    pub html_files: usize,
    pub markdown_files: usize,
    pub other_files: usize,
    pub total_size: String,
    pub index_file: Option<String>,
}

/// Human-readable size with binary prefixes and one decimal place.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
}

pub fn file_info(root: &Path, path: &Path) -> LibrarianResult<FileInfo> {
    let metadata = std::fs::metadata(path).map_err(|e| LibrarianError::from_io(path, e))?;
    let extension = extension_of(path);

    let title = match extension.as_deref() {
        Some("html") => html_title(path),
        _ => None,
    };

    Ok(FileInfo {
        path: path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/"),
        size: format_size(metadata.len()),
        kind: extension
            .map(|e| format!(".{}", e))
            .unwrap_or_else(|| "file".to_string()),
        title,
    })
}

/// Best-effort page title from the head of an HTML file: `<title>` first,
/// then the first `<h1>`.
pub fn html_title(path: &Path) -> Option<String> {
    let mut head = Vec::new();
    File::open(path)
        .ok()?
        .take(TITLE_SNIFF_BYTES)
        .read_to_end(&mut head)
        .ok()?;

    title_from_markup(&String::from_utf8_lossy(&head))
}

pub fn title_from_markup(markup: &str) -> Option<String> {
    [&*TITLE_TAG, &*H1_TAG].into_iter().find_map(|regex| {
        let captured = regex.captures(markup)?.get(1)?.as_str();
        let title = html_escape::decode_html_entities(captured).trim().to_string();
        (!title.is_empty()).then_some(title)
    })
}

pub fn project_summary(root: &Path, name: &str) -> LibrarianResult<ProjectSummary> {
    let project = root.join(name);

    if !project.is_dir() || !is_within(&project, root) {
        return Err(LibrarianError::ProjectNotFound(name.to_string()));
    }

    let mut summary = ProjectSummary {
        project: name.to_string(),
        html_files: 0,
        markdown_files: 0,
        other_files: 0,
        total_size: String::new(),
        index_file: None,
    };
    let mut total_bytes = 0u64;

    for file in walk::files(&project) {
        match extension_of(&file).as_deref() {
            Some("html") => summary.html_files += 1,
            Some("md") => summary.markdown_files += 1,
            _ => summary.other_files += 1,
        }
        total_bytes += std::fs::metadata(&file).map(|m| m.len()).unwrap_or(0);
    }

    summary.total_size = format_size(total_bytes);
    summary.index_file = INDEX_CANDIDATES
        .iter()
        .find(|candidate| project.join(candidate).exists())
        .map(|candidate| candidate.to_string());

    Ok(summary)
}

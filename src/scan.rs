mod grep;
pub mod walk;

use grep_regex::RegexMatcherBuilder;
use grep_searcher::SearcherBuilder;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{LibrarianError, LibrarianResult};
use crate::render::read_text_lossy;

pub use grep::{ContentMatch, ContextLine};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryListing {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_error: Option<String>,
}

impl DirectoryListing {
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NameSearch {
    pub matches: Vec<PathBuf>,
    pub limit: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContentSearch {
    pub matches: Vec<ContentMatch>,
    pub files_searched: usize,
    pub limit: usize,
    pub limit_reached: bool,
}

/// Lists one directory, split into subdirectories and files, both sorted.
///
/// An unreadable directory yields an empty listing carrying the error text.
pub fn list_entries(path: &Path) -> DirectoryListing {
    let entries = match std::fs::read_dir(path) {
        Ok(entries) => entries,
        Err(error) => {
            let error = LibrarianError::from_io(path, error);
            warn!(path = %path.display(), %error, "cannot list directory");
            return DirectoryListing {
                read_error: Some(error.to_string()),
                ..Default::default()
            };
        }
    };

    let mut listing = DirectoryListing::default();

    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.path().is_dir() {
            listing.dirs.push(name);
        } else {
            listing.files.push(name);
        }
    }

    listing.dirs.sort();
    listing.files.sort();
    listing
}

/// Case-insensitive regex match on file base names anywhere under `root`.
///
/// A pattern that does not compile is matched as literal text instead.
pub fn search_by_name(pattern: &str, root: &Path, max_results: usize) -> NameSearch {
    let regex = name_matcher(pattern);
    let mut matches = Vec::new();

    if max_results > 0 {
        for path in walk::files(root) {
            let hit = path
                .file_name()
                .is_some_and(|name| regex.is_match(&name.to_string_lossy()));
            if hit {
                matches.push(path);
                if matches.len() >= max_results {
                    break;
                }
            }
        }
    }

    matches.sort();

    NameSearch {
        truncated: matches.len() >= max_results,
        matches,
        limit: max_results,
    }
}

fn name_matcher(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|error| {
            debug!(pattern, %error, "name search: falling back to literal match");
            RegexBuilder::new(&regex::escape(pattern))
                .case_insensitive(true)
                .build()
                .expect("escaped pattern is a valid regex")
        })
}

/// Greps every file under `root`, reporting matches with up to
/// `context_lines` lines of context on each side.
pub fn search_content(
    pattern: &str,
    root: &Path,
    ignore_case: bool,
    max_results: usize,
    context_lines: usize,
) -> LibrarianResult<ContentSearch> {
    let matcher = RegexMatcherBuilder::new()
        .case_insensitive(ignore_case)
        .build(pattern)
        .map_err(|error| LibrarianError::InvalidPattern(error.to_string()))?;

    let mut searcher = SearcherBuilder::new().line_number(true).build();

    let mut matches: Vec<ContentMatch> = Vec::new();
    let mut files_searched = 0usize;

    for path in walk::files(root) {
        let remaining = max_results.saturating_sub(matches.len());
        if remaining == 0 {
            break;
        }

        files_searched += 1;
        let mut sink = grep::ContentSink::new(relative_display(root, &path), remaining);

        if let Err(error) = searcher.search_path(&matcher, &path, &mut sink) {
            debug!(path = %path.display(), %error, "grep: skipping file");
            continue;
        }

        if context_lines > 0 && !sink.matches.is_empty() {
            match read_text_lossy(&path) {
                Ok(text) => grep::attach_context(&mut sink.matches, &text, context_lines),
                Err(error) => debug!(path = %path.display(), %error, "grep: no context"),
            }
        }

        matches.extend(sink.matches);
    }

    Ok(ContentSearch {
        limit_reached: matches.len() >= max_results,
        matches,
        files_searched,
        limit: max_results,
    })
}

/// `path` relative to `root`, with forward slashes.
pub fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

mod extract;
pub mod markup;
mod read;

use serde::Serialize;
use std::path::Path;
use textwrap::{Options, WrapAlgorithm};

pub use extract::html_to_text;
pub use read::read_text_lossy;

pub const WRAP_WIDTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Raw,
    Markdown,
    Html,
}

impl RenderMode {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "html" | "htm" => RenderMode::Html,
            "md" => RenderMode::Markdown,
            _ => RenderMode::Raw,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(RenderMode::Raw)
    }
}

/// Renders a file for the terminal. Never fails: read errors come back as a
/// one-line message in place of the content.
pub fn render(path: &Path, raw: bool) -> String {
    let text = match read_text_lossy(path) {
        Ok(text) => text,
        Err(error) => return format!("[Error reading {}: {}]", path.display(), error),
    };

    let mode = if raw {
        RenderMode::Raw
    } else {
        RenderMode::from_path(path)
    };

    render_text(&text, mode)
}

pub fn render_text(text: &str, mode: RenderMode) -> String {
    match mode {
        RenderMode::Raw => text.to_string(),
        RenderMode::Markdown => text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n"),
        RenderMode::Html => reflow(&html_to_text(text), WRAP_WIDTH),
    }
}

/// Greedily wraps single-line paragraphs to `width`. Paragraphs that already
/// span several lines (lists, preformatted blocks) are kept as they are.
pub fn reflow(text: &str, width: usize) -> String {
    let options = Options::new(width).wrap_algorithm(WrapAlgorithm::FirstFit);

    text.split("\n\n")
        .map(|paragraph| {
            if paragraph.contains('\n') {
                paragraph.to_string()
            } else {
                textwrap::fill(paragraph, &options)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// First `lines` lines of `text`.
pub fn head(text: &str, lines: usize) -> &str {
    if lines == 0 {
        return "";
    }

    match memchr::memchr_iter(b'\n', text.as_bytes()).nth(lines - 1) {
        Some(end) => &text[..end],
        None => text.strip_suffix('\n').unwrap_or(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn mode_follows_extension_case_insensitively() {
        assert_eq!(RenderMode::from_path(Path::new("a/Index.HTML")), RenderMode::Html);
        assert_eq!(RenderMode::from_path(Path::new("page.htm")), RenderMode::Html);
        assert_eq!(RenderMode::from_path(Path::new("README.md")), RenderMode::Markdown);
        assert_eq!(RenderMode::from_path(Path::new("notes.txt")), RenderMode::Raw);
        assert_eq!(RenderMode::from_path(Path::new("Makefile")), RenderMode::Raw);
    }

    #[test]
    fn markdown_only_loses_trailing_whitespace() {
        let md = "# Title   \n\n*emph*\t\n  indented\n";
        assert_eq!(
            render_text(md, RenderMode::Markdown),
            "# Title\n\n*emph*\n  indented"
        );
    }

    #[test]
    fn raw_mode_returns_text_unchanged() {
        let html = "<p>x</p>  \n";
        assert_eq!(render_text(html, RenderMode::Raw), html);
    }

    #[test]
    fn long_paragraphs_wrap_at_width() {
        let words = ["documentation"; 20].join(" ");
        let html = format!("<p>{}</p>", words);
        let rendered = render_text(&html, RenderMode::Html);

        assert!(rendered.lines().count() > 1);
        assert!(rendered.lines().all(|l| l.len() <= WRAP_WIDTH));
        assert_eq!(rendered.split_whitespace().count(), 20);
    }

    #[test]
    fn greedy_wrap_fills_each_line() {
        assert_eq!(reflow("aa bb cc dd", 5), "aa bb\ncc dd");
        assert_eq!(reflow("aaa bb cc", 6), "aaa bb\ncc");
    }

    #[test]
    fn multi_line_paragraphs_pass_through() {
        let text = "short para\n\ncode line one\n    code line two\n\nnext";
        assert_eq!(reflow(text, 6), "short\npara\n\ncode line one\n    code line two\n\nnext");
    }

    #[test]
    fn head_keeps_first_lines() {
        let text = "a\nb\nc\n";
        assert_eq!(head(text, 0), "");
        assert_eq!(head(text, 2), "a\nb");
        assert_eq!(head(text, 3), "a\nb\nc");
        assert_eq!(head(text, 10), "a\nb\nc");
        assert_eq!(head("single", 1), "single");
    }

    #[test]
    fn rendering_twice_is_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(
            &path,
            "<html><body><h1>Widgets</h1><p>Some text about &quot;widgets&quot;.</p><pre>  code</pre></body></html>",
        )
        .unwrap();

        let first = render(&path, false);
        let second = render(&path, false);
        assert_eq!(first, second);
        assert!(first.starts_with("Widgets\n\nSome text about \"widgets\"."));
    }

    #[test]
    fn raw_flag_bypasses_html_rendering() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        fs::write(&path, "<p>x</p>").unwrap();
        assert_eq!(render(&path, true), "<p>x</p>");
    }

    #[test]
    fn unreadable_file_renders_an_error_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.html");
        let rendered = render(&path, false);
        assert!(rendered.starts_with("[Error reading "));
        assert!(rendered.contains("missing.html"));
    }
}

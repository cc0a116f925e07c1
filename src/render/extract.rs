use regex::Regex;
use std::sync::LazyLock;

use super::markup::{Token, Tokenizer};

const BLOCK_START_TAGS: &[&str] = &[
    "p", "div", "section", "header", "article", "h1", "h2", "h3", "h4", "h5", "h6", "li",
];

const BLOCK_END_TAGS: &[&str] = &[
    "p", "div", "section", "article", "header", "h1", "h2", "h3", "h4", "h5", "h6",
];

const HIDDEN_TAGS: &[&str] = &["script", "style"];

static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n+").expect("static regex"));

/// Converts an HTML document to plain text, keeping block structure and the
/// exact contents of `<pre>` regions.
pub fn html_to_text(html: &str) -> String {
    let mut extractor = Extractor::default();
    for token in Tokenizer::new(html) {
        extractor.feed(token);
    }
    extractor.finish()
}

struct Extractor {
    out: String,
    in_pre: bool,
    at_boundary: bool,
    hidden_depth: usize,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            out: String::new(),
            in_pre: false,
            at_boundary: true,
            hidden_depth: 0,
        }
    }
}

impl Extractor {
    fn feed(&mut self, token: Token<'_>) {
        match token {
            Token::Start(tag) => self.start_tag(&tag),
            Token::End(tag) => self.end_tag(&tag),
            Token::Text(data) => self.text(data),
        }
    }

    fn start_tag(&mut self, tag: &str) {
        if BLOCK_START_TAGS.contains(&tag) {
            if !self.at_boundary {
                self.out.push('\n');
            }
            self.at_boundary = true;
        } else if tag == "br" {
            self.out.push('\n');
        } else if tag == "pre" {
            self.in_pre = true;
        } else if HIDDEN_TAGS.contains(&tag) {
            self.hidden_depth += 1;
        }
    }

    fn end_tag(&mut self, tag: &str) {
        if tag == "pre" {
            self.in_pre = false;
        } else if HIDDEN_TAGS.contains(&tag) {
            self.hidden_depth = self.hidden_depth.saturating_sub(1);
        }

        if BLOCK_END_TAGS.contains(&tag) {
            self.out.push_str("\n\n");
            self.at_boundary = true;
        }
    }

    fn text(&mut self, data: &str) {
        if data.is_empty() || self.hidden_depth > 0 {
            return;
        }

        if self.in_pre {
            self.out.push_str(data);
            self.at_boundary = false;
            return;
        }

        let mut words = data.split_whitespace().peekable();
        if words.peek().is_none() {
            return;
        }

        if !self.out.is_empty() && !self.at_boundary {
            self.out.push(' ');
        }
        for (i, word) in words.enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            self.out.push_str(word);
        }
        self.at_boundary = false;
    }

    fn finish(self) -> String {
        let decoded = html_escape::decode_html_entities(&self.out);
        BLANK_LINE_RUN
            .replace_all(&decoded, "\n\n")
            .trim()
            .to_string()
    }
}

//! Tolerant HTML tokenizer producing start tag, end tag and text events.
//!
//! It does not build a tree and never fails: anything that does not look like
//! markup is passed through as text. Attributes are skipped, tag names are
//! lower-cased, and comments, doctypes and processing instructions are
//! dropped. The bodies of `script` and `style` are delivered as one text
//! event so their contents are never mistaken for tags.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Start(String),
    End(String),
    Text(&'a str),
}

const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    pending_end: Option<String>,
    raw_text: Option<String>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            pending_end: None,
            raw_text: None,
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn raw_text_body(&mut self, tag: &str) -> Option<Token<'a>> {
        let rest = self.rest();
        let end = find_closing_tag(rest, tag).unwrap_or(rest.len());
        self.pos += end;
        (end > 0).then(|| Token::Text(&rest[..end]))
    }

    fn text_run(&mut self) -> Token<'a> {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .skip(1)
            .find(|&(i, c)| c == '<' && starts_markup(&rest[i..]))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        self.pos += end;
        Token::Text(&rest[..end])
    }

    /// Consumes the markup at the cursor. `None` means it produced no event.
    fn markup(&mut self) -> Option<Token<'a>> {
        let rest = self.rest();
        let bytes = rest.as_bytes();

        if rest.starts_with("<!--") {
            self.pos += rest[4..].find("-->").map(|i| i + 7).unwrap_or(rest.len());
            return None;
        }

        if matches!(bytes.get(1), Some(b'!') | Some(b'?')) {
            self.pos += rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
            return None;
        }

        let closing = bytes.get(1) == Some(&b'/');
        let name_start = if closing { 2 } else { 1 };
        let name_len = rest[name_start..]
            .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
            .unwrap_or(rest.len() - name_start);
        let name = rest[name_start..name_start + name_len].to_ascii_lowercase();

        let (tag_len, self_closing) = scan_tag_end(&bytes[name_start + name_len..]);
        self.pos += name_start + name_len + tag_len;

        if closing {
            return Some(Token::End(name));
        }

        if self_closing {
            self.pending_end = Some(name.clone());
        } else if RAW_TEXT_TAGS.contains(&name.as_str()) {
            self.raw_text = Some(name.clone());
        }

        Some(Token::Start(name))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(name) = self.pending_end.take() {
            return Some(Token::End(name));
        }

        loop {
            if self.pos >= self.input.len() {
                return None;
            }

            if let Some(tag) = self.raw_text.take() {
                if let Some(token) = self.raw_text_body(&tag) {
                    return Some(token);
                }
                continue;
            }

            if starts_markup(self.rest()) {
                if let Some(token) = self.markup() {
                    return Some(token);
                }
                continue;
            }

            return Some(self.text_run());
        }
    }
}

fn starts_markup(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.first() != Some(&b'<') {
        return false;
    }
    match bytes.get(1) {
        Some(b'!') | Some(b'?') => true,
        Some(b'/') => bytes.get(2).is_some_and(u8::is_ascii_alphabetic),
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    }
}

/// Length up to and including the closing `>`, skipping quoted attribute
/// values, and whether the tag closes itself with `/>`.
fn scan_tag_end(bytes: &[u8]) -> (usize, bool) {
    let mut quote: Option<u8> = None;
    let mut last_significant = None;

    for (i, &b) in bytes.iter().enumerate() {
        if let Some(q) = quote {
            if b == q {
                quote = None;
            }
            last_significant = Some(b);
            continue;
        }

        match b {
            b'"' | b'\'' => {
                quote = Some(b);
                last_significant = Some(b);
            }
            b'>' => return (i + 1, last_significant == Some(b'/')),
            _ if b.is_ascii_whitespace() => {}
            _ => last_significant = Some(b),
        }
    }

    (bytes.len(), false)
}

fn find_closing_tag(haystack: &str, tag: &str) -> Option<usize> {
    let needle_len = tag.len() + 2;
    haystack
        .as_bytes()
        .windows(needle_len)
        .position(|w| w.starts_with(b"</") && w[2..].eq_ignore_ascii_case(tag.as_bytes()))
}

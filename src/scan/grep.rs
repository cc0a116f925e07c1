use grep_searcher::{Searcher, Sink, SinkMatch};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentMatch {
    pub path: String,
    pub line: usize,
    pub text: String,
    pub context: Vec<ContextLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextLine {
    pub line: usize,
    pub text: String,
}

/// Collects the matching lines of one file, stopping once `max_results`
/// matches are held. Context is attached afterwards by [`attach_context`].
pub(super) struct ContentSink {
    pub matches: Vec<ContentMatch>,
    max_results: usize,
    path: String,
}

impl ContentSink {
    pub fn new(path: String, max_results: usize) -> Self {
        Self {
            matches: Vec::new(),
            max_results,
            path,
        }
    }

    pub fn is_full(&self) -> bool {
        self.matches.len() >= self.max_results
    }
}

fn line_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}

impl Sink for ContentSink {
    type Error = std::io::Error;

    fn matched(&mut self, _searcher: &Searcher, mat: &SinkMatch<'_>) -> Result<bool, Self::Error> {
        if self.is_full() {
            return Ok(false);
        }

        self.matches.push(ContentMatch {
            path: self.path.clone(),
            line: mat.line_number().unwrap_or(0) as usize,
            text: line_text(mat.bytes()),
            context: Vec::new(),
        });

        Ok(!self.is_full())
    }
}

/// Fills in up to `context_lines` neighbours on each side of every match,
/// clamped to the file and never including the match line itself. A
/// neighbour that is also a match still counts as context.
pub(super) fn attach_context(matches: &mut [ContentMatch], text: &str, context_lines: usize) {
    if context_lines == 0 {
        return;
    }

    let lines: Vec<&str> = text.lines().collect();

    for hit in matches.iter_mut() {
        if hit.line == 0 {
            continue;
        }

        let first = hit.line.saturating_sub(context_lines).max(1);
        let last = (hit.line + context_lines).min(lines.len());

        hit.context = (first..=last)
            .filter(|&n| n != hit.line)
            .map(|n| ContextLine {
                line: n,
                text: lines[n - 1].trim_end().to_string(),
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(line: usize) -> ContentMatch {
        ContentMatch {
            path: "notes.txt".to_string(),
            line,
            text: String::new(),
            context: Vec::new(),
        }
    }

    fn context_of(hit: &ContentMatch) -> Vec<usize> {
        hit.context.iter().map(|c| c.line).collect()
    }

    #[test]
    fn adjacent_matches_see_each_other_as_context() {
        let text = "l1\nhit2\nl3\nhit4\nhit5\nl6\n";
        let mut matches = [hit(2), hit(4), hit(5)];
        attach_context(&mut matches, text, 1);

        assert_eq!(context_of(&matches[0]), vec![1, 3]);
        assert_eq!(context_of(&matches[1]), vec![3, 5]);
        assert_eq!(context_of(&matches[2]), vec![4, 6]);
        assert_eq!(matches[2].context[0].text, "hit4");
    }

    #[test]
    fn context_is_clamped_to_the_file() {
        let text = "first\nsecond\nthird";
        let mut matches = [hit(1), hit(3)];
        attach_context(&mut matches, text, 5);

        assert_eq!(context_of(&matches[0]), vec![2, 3]);
        assert_eq!(context_of(&matches[1]), vec![1, 2]);
    }

    #[test]
    fn zero_context_leaves_matches_bare() {
        let mut matches = [hit(2)];
        attach_context(&mut matches, "a\nb\nc\n", 0);
        assert!(matches[0].context.is_empty());
    }

    #[test]
    fn context_lines_lose_trailing_whitespace() {
        let mut matches = [hit(2)];
        attach_context(&mut matches, "before  \r\nmatch\nafter\t\n", 1);
        assert_eq!(matches[0].context[0].text, "before");
        assert_eq!(matches[0].context[1].text, "after");
    }
}

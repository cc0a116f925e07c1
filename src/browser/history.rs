use std::path::{Path, PathBuf};

/// Visited locations plus a cursor, with browser back/forward semantics.
///
/// Never empty: it is seeded with the starting location and the cursor always
/// points at a valid entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<PathBuf>,
    cursor: usize,
}

impl History {
    pub fn new(start: PathBuf) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Path {
        &self.entries[self.cursor]
    }

    /// Drops everything ahead of the cursor, then appends `location`.
    pub fn push(&mut self, location: PathBuf) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }

    pub fn back(&mut self) -> Option<&Path> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Path> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

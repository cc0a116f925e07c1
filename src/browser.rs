pub mod containment;
pub mod history;

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{LibrarianError, LibrarianResult};
use crate::scan::{self, DirectoryListing};

pub use containment::is_within;
pub use history::History;

/// Read-only view over a documentation tree, confined to its root.
pub struct DocBrowser {
    root: PathBuf,
    current: PathBuf,
    history: History,
}

impl DocBrowser {
    pub fn open(root: &Path) -> LibrarianResult<Self> {
        let root = root
            .canonicalize()
            .map_err(|_| LibrarianError::Unavailable(root.to_path_buf()))?;

        if !root.is_dir() {
            return Err(LibrarianError::Unavailable(root));
        }

        Ok(Self {
            current: root.clone(),
            history: History::new(root.clone()),
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    #[cfg(test)]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current location relative to the root; empty at the root itself.
    pub fn relative_current(&self) -> &Path {
        self.current.strip_prefix(&self.root).unwrap_or(Path::new(""))
    }

    pub fn at_root(&self) -> bool {
        self.current == self.root
    }

    pub fn enter(&mut self, segment: &str) -> LibrarianResult<()> {
        if segment == ".." {
            return self.up();
        }

        let Ok(target) = self.current.join(segment).canonicalize() else {
            debug!(segment, "enter: target does not resolve");
            return Err(LibrarianError::not_found(segment));
        };

        if !target.is_dir() || !is_within(&target, &self.root) {
            debug!(target = %target.display(), "enter: rejected");
            return Err(LibrarianError::not_found(segment));
        }

        self.move_to(target);
        Ok(())
    }

    pub fn up(&mut self) -> LibrarianResult<()> {
        if self.at_root() {
            return Err(LibrarianError::not_found(".."));
        }

        let parent = self
            .current
            .parent()
            .and_then(|p| p.canonicalize().ok())
            .filter(|p| is_within(p, &self.root))
            .ok_or_else(|| LibrarianError::not_found(".."))?;

        self.move_to(parent);
        Ok(())
    }

    pub fn back(&mut self) -> bool {
        match self.history.back() {
            Some(location) => {
                self.current = location.to_path_buf();
                true
            }
            None => false,
        }
    }

    pub fn forward(&mut self) -> bool {
        match self.history.forward() {
            Some(location) => {
                self.current = location.to_path_buf();
                true
            }
            None => false,
        }
    }

    pub fn list(&self) -> DirectoryListing {
        scan::list_entries(&self.current)
    }

    pub fn projects(&self) -> Vec<String> {
        scan::list_entries(&self.root).dirs
    }

    /// Resolves a user-supplied file argument, trying the current location
    /// before the root. The result must exist and stay inside the root.
    pub fn resolve_file(&self, arg: &str) -> LibrarianResult<PathBuf> {
        [&self.current, &self.root]
            .into_iter()
            .map(|base| base.join(arg))
            .find(|candidate| candidate.exists())
            .filter(|candidate| is_within(candidate, &self.root))
            .ok_or_else(|| LibrarianError::not_found(arg))
    }

    fn move_to(&mut self, location: PathBuf) {
        debug!(location = %location.display(), "navigated");
        self.current = location.clone();
        self.history.push(location);
    }
}

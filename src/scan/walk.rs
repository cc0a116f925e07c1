use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Every regular file under `root`, depth first, siblings in file-name order.
///
/// Hidden files are included and ignore files are not honoured: the tree is
/// documentation, not a source checkout. Symlinks are not followed.
pub fn files(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(error) => {
                debug!(%error, "walk: skipping unreadable entry");
                None
            }
        })
        .filter(is_file)
        .map(DirEntry::into_path)
}

fn is_file(entry: &DirEntry) -> bool {
    entry.file_type().map(|t| t.is_file()).unwrap_or(false)
}

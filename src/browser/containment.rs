use std::path::Path;

/// Returns true when `candidate` resolves to `root` or to a path nested under it.
///
/// Both paths are canonicalized first, so `..` segments and symlinks are
/// followed before comparing. Ancestry is checked component by component,
/// which keeps `/doc/gtk4-extra` out of `/doc/gtk4`. Anything that fails to
/// resolve is treated as outside.
pub fn is_within(candidate: &Path, root: &Path) -> bool {
    let Ok(root) = root.canonicalize() else {
        return false;
    };
    let Ok(candidate) = candidate.canonicalize() else {
        return false;
    };

    candidate.ancestors().any(|ancestor| ancestor == root)
}

/*!
 * Candidate workspace roots and display-path resolution
 */

use std::path::{Path, PathBuf};

/// Ordered snapshot of candidate root directories for one aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSet {
    roots: Vec<PathBuf>,
}

impl RootSet {
    /// Create a root set from candidate directories, preserving order
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// The primary root (the first candidate), if any
    pub fn primary(&self) -> Option<&Path> {
        self.roots.first().map(PathBuf::as_path)
    }

    /// Iterate over candidate roots in order
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }
}

impl From<&[PathBuf]> for RootSet {
    fn from(roots: &[PathBuf]) -> Self {
        Self::new(roots.to_vec())
    }
}

/// Find the most specific root containing `path`.
///
/// Containment is component-wise, so `/ws/barbaz` is not under root
/// `/ws/bar`. Among containing roots the one with the longest path wins;
/// ties keep the first encountered in iteration order.
pub fn resolve_root<'a>(path: &Path, roots: &'a RootSet) -> Option<&'a Path> {
    let mut best: Option<&Path> = None;
    for root in roots.iter() {
        if path.starts_with(root) {
            let longer = best.map_or(true, |b| root.as_os_str().len() > b.as_os_str().len());
            if longer {
                best = Some(root);
            }
        }
    }
    best
}

/// Display path for `path`: relative to `root` with forward-slash
/// separators and no leading slash, or the path unchanged when no root
/// applies.
pub fn format_path(path: &Path, root: Option<&Path>) -> String {
    match root.and_then(|r| path.strip_prefix(r).ok()) {
        Some(rel) => rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
        None => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roots(paths: &[&str]) -> RootSet {
        RootSet::new(paths.iter().map(PathBuf::from).collect())
    }

    #[test]
    fn single_containing_root_is_returned() {
        let set = roots(&["/ws"]);
        assert_eq!(
            resolve_root(Path::new("/ws/src/main.rs"), &set),
            Some(Path::new("/ws"))
        );
    }

    #[test]
    fn longest_containing_root_wins() {
        let set = roots(&["/ws", "/ws/vendor", "/other"]);
        assert_eq!(
            resolve_root(Path::new("/ws/vendor/lib.rs"), &set),
            Some(Path::new("/ws/vendor"))
        );
        assert_eq!(
            resolve_root(Path::new("/ws/src/lib.rs"), &set),
            Some(Path::new("/ws"))
        );
    }

    #[test]
    fn no_containing_root_yields_none() {
        let set = roots(&["/ws"]);
        assert_eq!(resolve_root(Path::new("/elsewhere/a.txt"), &set), None);
    }

    #[test]
    fn sibling_with_common_prefix_is_not_contained() {
        // /ws2 shares a string prefix with /ws but is a different directory
        let set = roots(&["/ws"]);
        assert_eq!(resolve_root(Path::new("/ws2/a.txt"), &set), None);
        assert_eq!(resolve_root(Path::new("/ws/barbaz"), &roots(&["/ws/bar"])), None);
    }

    #[test]
    fn tie_keeps_first_root_in_iteration_order() {
        // Two distinct roots of equal length both containing the path can
        // only happen with duplicates; the first one is kept.
        let set = roots(&["/ws", "/ws"]);
        assert_eq!(
            resolve_root(Path::new("/ws/a.txt"), &set),
            Some(Path::new("/ws"))
        );
    }

    #[test]
    fn relative_display_uses_forward_slashes() {
        assert_eq!(
            format_path(Path::new("/ws/sub/b.txt"), Some(Path::new("/ws"))),
            "sub/b.txt"
        );
        assert_eq!(
            format_path(Path::new("/ws/a.txt"), Some(Path::new("/ws"))),
            "a.txt"
        );
    }

    #[test]
    fn absolute_display_without_root() {
        assert_eq!(format_path(Path::new("/etc/hosts"), None), "/etc/hosts");
    }

    #[test]
    fn relative_path_round_trips_onto_root() {
        let root = Path::new("/ws");
        let file = Path::new("/ws/deep/nested/file.rs");
        let display = format_path(file, Some(root));
        assert_eq!(root.join(display), file);
    }
}

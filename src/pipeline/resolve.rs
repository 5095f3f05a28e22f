//! Path resolution: turn a raw reference target into an absolute candidate.
//!
//! ## The stripped-leading-slash problem
//!
//! Vault-style authoring tools (Obsidian and friends) write
//! `/attachments/img.png` meaning "relative to the vault root" — but the
//! document itself does not say where that root is. Treating the target as a
//! true filesystem-absolute path would point at `/attachments` on the host,
//! which is almost never what the author meant. Instead the resolver strips
//! the leading slash and walks a bounded number of ancestor directories of
//! the document, returning the first candidate that actually exists. When
//! the walk finds nothing the plain document-relative join is returned, so
//! resolution always produces *a* path and the caller judges existence.
//!
//! Existence checks go through the [`PathProbe`] capability so the search
//! logic unit-tests against an in-memory filesystem instead of real disk
//! state. Production code passes [`RealFs`].

use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Capability interface for "does this path exist?".
///
/// The upward search is the one place I/O leaks into otherwise pure
/// resolution; routing it through a trait keeps the algorithm testable.
pub trait PathProbe {
    fn exists(&self, path: &Path) -> bool;
}

/// [`PathProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl PathProbe for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Lexically normalize a path: collapse `.` components and fold `..` into
/// the preceding component, without touching the filesystem.
///
/// `..` at the start of a relative path is kept (there is nothing to fold it
/// into); `..` directly above the root is dropped.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(Component::ParentDir),
            },
            other => out.push(other),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve a raw reference target against the document's location.
///
/// Always returns a candidate path; existence and format checks belong to
/// the caller. `max_upward_levels` bounds the ancestor walk for
/// vault-rooted (single-leading-slash) targets.
pub fn resolve_target(
    raw_target: &str,
    document_path: &Path,
    probe: &dyn PathProbe,
    max_upward_levels: usize,
) -> PathBuf {
    // A single leading slash marks a vault-rooted target. A double slash is
    // left alone: it is not vault syntax, and on Unix it is simply an
    // absolute path.
    let vault_rooted = raw_target.starts_with('/') && !raw_target.starts_with("//");
    let target = if vault_rooted {
        raw_target.trim_start_matches('/')
    } else {
        raw_target
    };

    if Path::new(target).is_absolute() {
        return PathBuf::from(target);
    }

    let doc_dir = document_path.parent().unwrap_or_else(|| Path::new(""));

    if vault_rooted {
        let mut current = doc_dir.to_path_buf();
        for _ in 0..max_upward_levels {
            let candidate = normalize(&current.join(target));
            if probe.exists(&candidate) {
                debug!("resolved '{}' via upward search: {}", raw_target, candidate.display());
                return candidate;
            }
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                // Filesystem root reached.
                None => break,
            }
        }
    }

    normalize(&doc_dir.join(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// In-memory [`PathProbe`] stub.
    struct MemFs(HashSet<PathBuf>);

    impl MemFs {
        fn new<const N: usize>(paths: [&str; N]) -> Self {
            Self(paths.iter().map(PathBuf::from).collect())
        }
    }

    impl PathProbe for MemFs {
        fn exists(&self, path: &Path) -> bool {
            self.0.contains(path)
        }
    }

    fn empty() -> MemFs {
        MemFs(HashSet::new())
    }

    fn doc(path: &str) -> PathBuf {
        PathBuf::from(path)
    }

    #[test]
    fn normalize_collapses_dots() {
        assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("/a/b/../../c")), PathBuf::from("/c"));
        assert_eq!(normalize(Path::new("../a")), PathBuf::from("../a"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn document_relative_default() {
        let resolved = resolve_target("./img/a.png", &doc("/root/sub/doc.md"), &empty(), 5);
        assert_eq!(resolved, PathBuf::from("/root/sub/img/a.png"));
    }

    #[test]
    fn parent_traversal_is_normalized() {
        let resolved = resolve_target("../shared/a.png", &doc("/root/sub/doc.md"), &empty(), 5);
        assert_eq!(resolved, PathBuf::from("/root/shared/a.png"));
    }

    #[test]
    fn leading_slash_found_by_upward_search() {
        let fs = MemFs::new(["/root/assets/x.png"]);
        let resolved = resolve_target("/assets/x.png", &doc("/root/sub/doc.md"), &fs, 5);
        assert_eq!(resolved, PathBuf::from("/root/assets/x.png"));
    }

    #[test]
    fn upward_search_prefers_the_nearest_hit() {
        let fs = MemFs::new(["/root/sub/assets/x.png", "/root/assets/x.png"]);
        let resolved = resolve_target("/assets/x.png", &doc("/root/sub/doc.md"), &fs, 5);
        assert_eq!(resolved, PathBuf::from("/root/sub/assets/x.png"));
    }

    #[test]
    fn upward_search_is_bounded() {
        // Document six levels deep; the only copy of the file sits at the
        // sixth ancestor, one past the bound.
        let fs = MemFs::new(["/x.png"]);
        let resolved = resolve_target("/x.png", &doc("/l1/l2/l3/l4/l5/l6/doc.md"), &fs, 5);
        assert_eq!(resolved, PathBuf::from("/l1/l2/l3/l4/l5/l6/x.png"));
    }

    #[test]
    fn upward_search_stops_at_the_root() {
        // Shallow document: the walk runs out of parents before the bound.
        let resolved = resolve_target("/missing.png", &doc("/doc.md"), &empty(), 5);
        assert_eq!(resolved, PathBuf::from("/missing.png"));
    }

    #[test]
    fn double_slash_is_plain_absolute() {
        let resolved = resolve_target("//srv/img.png", &doc("/root/doc.md"), &empty(), 5);
        assert_eq!(resolved, PathBuf::from("//srv/img.png"));
    }

    #[test]
    fn upward_search_respects_the_configured_bound() {
        let fs = MemFs::new(["/a/x.png"]);
        // Bound of 1 probes only the document directory.
        let resolved = resolve_target("/x.png", &doc("/a/b/doc.md"), &fs, 1);
        assert_eq!(resolved, PathBuf::from("/a/b/x.png"));
        // Bound of 2 reaches the parent and finds the file.
        let resolved = resolve_target("/x.png", &doc("/a/b/doc.md"), &fs, 2);
        assert_eq!(resolved, PathBuf::from("/a/x.png"));
    }
}

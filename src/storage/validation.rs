//! Path validation
//!
//! Maps logical paths onto the storage root and rejects anything that
//! would leave it or name it.

use std::path::{Component, Path, PathBuf};

use crate::error::PathRejection;

/// Resolves a logical path against `base`.
///
/// `.` components are dropped. Parent, root and prefix components are
/// rejected, so the result always stays lexically under `base`. A
/// non-empty path made only of `.` components would name `base` itself and
/// is rejected too. An empty logical path resolves to `base`.
pub fn resolve_path(base: &Path, logical: &str) -> Result<PathBuf, PathRejection> {
    let mut resolved = base.to_path_buf();
    let mut named = false;

    for component in Path::new(logical).components() {
        match component {
            Component::Normal(part) => {
                resolved.push(part);
                named = true;
            }
            Component::CurDir => {}
            Component::ParentDir => return Err(PathRejection::ParentDir),
            Component::RootDir | Component::Prefix(_) => return Err(PathRejection::Absolute),
        }
    }

    if !named && !logical.is_empty() {
        return Err(PathRejection::StorageRoot);
    }

    Ok(resolved)
}

/// Whether a required name is present
pub fn is_present(name: &str) -> bool {
    !name.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_nested_path() {
        let base = Path::new(".data");
        assert_eq!(
            resolve_path(base, "ns1/sub/a.txt").unwrap(),
            PathBuf::from(".data/ns1/sub/a.txt")
        );
        assert_eq!(
            resolve_path(base, "./ns1//sub/").unwrap(),
            PathBuf::from(".data/ns1/sub")
        );
    }

    #[test]
    fn test_resolve_empty_is_base() {
        assert_eq!(
            resolve_path(Path::new("/srv/data"), "").unwrap(),
            PathBuf::from("/srv/data")
        );
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let base = Path::new(".data");
        assert_eq!(resolve_path(base, ".."), Err(PathRejection::ParentDir));
        assert_eq!(
            resolve_path(base, "ns1/../../etc"),
            Err(PathRejection::ParentDir)
        );
        assert_eq!(
            resolve_path(base, "/etc/passwd"),
            Err(PathRejection::Absolute)
        );
    }

    #[test]
    fn test_resolve_rejects_root_alias() {
        let base = Path::new(".data");
        for alias in [".", "./", "././", ".//."] {
            assert_eq!(resolve_path(base, alias), Err(PathRejection::StorageRoot));
        }
        assert_eq!(resolve_path(base, "ns/.."), Err(PathRejection::ParentDir));
    }

    #[test]
    fn test_is_present() {
        assert!(is_present("ns"));
        assert!(!is_present(""));
    }
}

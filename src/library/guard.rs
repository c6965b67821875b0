//! Relative path handling and root containment.

use std::path::{Component, Path, PathBuf};

/// Normalize a request path into a clean relative path using `/` separators.
///
/// Leading separators are stripped, `.` segments dropped and `..` collapsed
/// against the preceding segment. A `..` with nothing left to collapse is
/// kept, so an escaping path stays visibly escaping and is rejected by
/// [`is_within_root`] instead of being clamped to the root.
pub fn clean_relative(rel: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    for segment in rel.split(is_separator) {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    segments.join("/")
}

/// Parent of a clean relative path ("" for top-level paths)
pub fn parent_of(rel: &str) -> String {
    match rel.rsplit_once('/') {
        Some((parent, _)) if !parent.starts_with("..") => parent.to_string(),
        _ => String::new(),
    }
}

/// Returns true when `candidate` lies inside `root` (or is the root itself).
/// Both paths are made absolute and normalized lexically before comparing.
pub fn is_within_root(root: &Path, candidate: &Path) -> bool {
    let (Some(root), Some(candidate)) = (absolute(root), absolute(candidate)) else {
        return false;
    };

    match candidate.strip_prefix(&root) {
        Ok(rest) => !matches!(rest.components().next(), Some(Component::ParentDir)),
        Err(_) => false,
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || std::path::is_separator(c)
}

fn absolute(path: &Path) -> Option<PathBuf> {
    let path = std::path::absolute(path).ok()?;
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    Some(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_relative() {
        assert_eq!(clean_relative(""), "");
        assert_eq!(clean_relative("."), "");
        assert_eq!(clean_relative("/"), "");
        assert_eq!(clean_relative("//a/b/"), "a/b");
        assert_eq!(clean_relative("a/./b"), "a/b");
        assert_eq!(clean_relative("a/b/../c"), "a/c");
        assert_eq!(clean_relative("a/../.."), "..");
        assert_eq!(clean_relative("/../etc"), "../etc");
        assert_eq!(clean_relative("../../etc"), "../../etc");
    }

    #[test]
    fn test_parent_of() {
        assert_eq!(parent_of(""), "");
        assert_eq!(parent_of("a"), "");
        assert_eq!(parent_of("a/b"), "a");
        assert_eq!(parent_of("a/b/c"), "a/b");
        assert_eq!(parent_of("../x"), "");
    }

    #[test]
    fn test_is_within_root() {
        let root = Path::new("/srv/videos");
        assert!(is_within_root(root, Path::new("/srv/videos")));
        assert!(is_within_root(root, Path::new("/srv/videos/a/b")));
        assert!(is_within_root(root, Path::new("/srv/videos/a/../b")));
        assert!(is_within_root(root, Path::new("/srv/videos/..hidden")));
        assert!(!is_within_root(root, Path::new("/srv/videos/..")));
        assert!(!is_within_root(root, Path::new("/srv/videos/../../etc")));
        assert!(!is_within_root(root, Path::new("/srv/videos-other")));
        assert!(!is_within_root(root, Path::new("/etc")));
    }

    #[test]
    fn test_relative_root_is_made_absolute() {
        assert!(is_within_root(Path::new("videos"), Path::new("videos/a")));
        assert!(!is_within_root(Path::new("videos"), Path::new("videos/../other")));
    }
}

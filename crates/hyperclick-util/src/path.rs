//! Lexical path helpers.
//!
//! None of these touch the filesystem: `..` is collapsed textually and
//! symlinks are left alone.

use std::path::{Component, Path, PathBuf};

/// Collapse `.` and `..` components without consulting the filesystem.
///
/// `..` above the root of an absolute path is dropped; above the start of a
/// relative path it is kept. An empty result becomes `.`.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => {
                out.push(part);
                depth += 1;
            }
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Resolve `path` against `base`: absolute paths win, relative ones are joined.
///
/// The result is normalized.
#[must_use]
pub fn resolve(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    normalize(&base.join(path))
}

/// Directory portion of a file path, `.` when the path has no parent.
#[must_use]
pub fn dirname(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None => path.to_path_buf(),
    }
}

/// Whether the last `/`-separated segment of `spec` carries an extension.
///
/// Leading dots do not count (`.eslintrc` and `..` have none); a trailing
/// dot does (`foo.`).
#[must_use]
pub fn has_extension(spec: &str) -> bool {
    let base = spec.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(spec);
    let stem_start = base.len() - base.trim_start_matches('.').len();
    if stem_start == base.len() {
        return false;
    }
    base[stem_start..].contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_dots() {
        assert_eq!(normalize(Path::new("/a/b/../c/./d")), PathBuf::from("/a/c/d"));
    }

    #[test]
    fn test_normalize_stops_at_root() {
        assert_eq!(normalize(Path::new("/../../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_normalize_relative_keeps_leading_parent() {
        assert_eq!(normalize(Path::new("../a/../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
    }

    #[test]
    fn test_resolve_absolute_wins() {
        assert_eq!(resolve(Path::new("/base"), "/abs/dir"), PathBuf::from("/abs/dir"));
        assert_eq!(resolve(Path::new("/base"), "src/../lib"), PathBuf::from("/base/lib"));
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname(Path::new("/a/b/file.js")), PathBuf::from("/a/b"));
        assert_eq!(dirname(Path::new("file.js")), PathBuf::from("."));
        assert_eq!(dirname(Path::new("/")), PathBuf::from("/"));
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("./foo.js"));
        assert!(has_extension("../lib/foo.test.ts"));
        assert!(has_extension("foo."));
        assert!(!has_extension("./foo"));
        assert!(!has_extension("./.eslintrc"));
        assert!(!has_extension(".."));
        assert!(!has_extension("./dir.d/foo"));
    }
}

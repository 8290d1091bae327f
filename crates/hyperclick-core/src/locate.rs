//! Ancestor search for configuration files.

use hyperclick_util::fs::is_accessible;
use hyperclick_util::path::normalize;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Find `file_name` in `start_dir` or the nearest ancestor that has it.
///
/// `file_name` may contain subpath segments (`webpack/config.js`). Only
/// existence is checked; an entry that cannot be stat'ed counts as absent and
/// the walk moves on. Returns `None` once the filesystem root has been tried.
#[must_use]
pub fn find_config_file(start_dir: &Path, file_name: &str) -> Option<PathBuf> {
    let mut current = normalize(start_dir);

    loop {
        let candidate = current.join(file_name);
        if is_accessible(&candidate) {
            trace!(path = %candidate.display(), "config file found");
            return Some(normalize(&candidate));
        }

        match current.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && parent != current => {
                current = parent.to_path_buf();
            }
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_finds_in_start_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();

        let found = find_config_file(dir.path(), "package.json");
        assert_eq!(found, Some(dir.path().join("package.json")));
    }

    #[test]
    fn test_finds_nearest_ancestor() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("a").join("package.json"), "{}").unwrap();

        let found = find_config_file(&nested, "package.json");
        assert_eq!(found, Some(dir.path().join("a").join("package.json")));
    }

    #[test]
    fn test_subpath_file_name() {
        let dir = tempdir().unwrap();
        let webpack = dir.path().join("webpack");
        fs::create_dir(&webpack).unwrap();
        fs::write(webpack.join("config.js"), "module.exports = {}").unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();

        let found = find_config_file(&src, "webpack/config.js");
        assert_eq!(found, Some(webpack.join("config.js")));
    }

    #[test]
    fn test_terminates_at_root() {
        let dir = tempdir().unwrap();
        let name = "hyperclick-no-such-config-6f1d2c.json";

        assert_eq!(find_config_file(dir.path(), name), None);
        assert_eq!(find_config_file(Path::new("/"), name), None);
    }
}

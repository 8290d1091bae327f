//! Custom module roots declared in `package.json`.
//!
//! ```json
//! { "moduleRoots": ["src/lib", "shared"] }
//! ```
//!
//! A single string is accepted in place of the array.

use crate::error::Error;
use crate::locate::find_config_file;
use hyperclick_util::fs::read_to_string_lossy;
use hyperclick_util::path::{dirname, resolve};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project descriptor file name.
pub const PACKAGE_JSON: &str = "package.json";

/// Field listing extra module roots.
pub const MODULE_ROOTS_FIELD: &str = "moduleRoots";

/// `moduleRoots` in either of its accepted shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ModuleRoots {
    One(String),
    Many(Vec<String>),
}

impl ModuleRoots {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(root) => vec![root],
            Self::Many(roots) => roots,
        }
    }
}

/// Load `moduleRoots` from the nearest `package.json` at or above `basedir`.
///
/// Returns `Ok(None)` when there is no descriptor or it declares no roots.
/// Each root is resolved against the descriptor's directory.
///
/// # Errors
/// Fails when the descriptor cannot be read, is not valid JSON, or declares
/// `moduleRoots` with an unsupported shape.
pub fn load_module_roots(basedir: &Path) -> Result<Option<Vec<PathBuf>>, Error> {
    let Some(package_path) = find_config_file(basedir, PACKAGE_JSON) else {
        return Ok(None);
    };

    let content = read_to_string_lossy(&package_path).map_err(|source| Error::DescriptorRead {
        path: package_path.clone(),
        source,
    })?;
    let config: Value =
        serde_json::from_str(&content).map_err(|source| Error::DescriptorParse {
            path: package_path.clone(),
            source,
        })?;

    let Some(raw) = config.get(MODULE_ROOTS_FIELD).filter(|v| is_declared(v)) else {
        return Ok(None);
    };

    let roots = ModuleRoots::deserialize(raw)
        .map_err(|source| Error::InvalidModuleRoots {
            path: package_path.clone(),
            source,
        })?
        .into_vec();

    let package_dir = dirname(&package_path);
    let roots: Vec<PathBuf> = roots.iter().map(|r| resolve(&package_dir, r)).collect();
    debug!(
        package = %package_path.display(),
        count = roots.len(),
        "loaded moduleRoots"
    );
    Ok(Some(roots))
}

/// `null`, `false` and `""` mean "no roots declared".
fn is_declared(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_nearest_package_json_from_nested_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"moduleRoots": "lib"}"#).unwrap();
        let nested = dir.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let roots = load_module_roots(&nested).unwrap();
        assert_eq!(roots, Some(vec![dir.path().join("lib")]));
    }

    #[test]
    fn test_array_roots() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"name": "app", "moduleRoots": ["src/lib", "../shared"]}"#,
        )
        .unwrap();
        let nested = dir.path().join("src").join("views");
        fs::create_dir_all(&nested).unwrap();

        let roots = load_module_roots(&nested).unwrap().unwrap();
        assert_eq!(
            roots,
            vec![
                dir.path().join("src").join("lib"),
                hyperclick_util::path::normalize(&dir.path().join("..").join("shared")),
            ]
        );
    }

    #[test]
    fn test_string_root() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"moduleRoots": "src"}"#).unwrap();

        let roots = load_module_roots(dir.path()).unwrap().unwrap();
        assert_eq!(roots, vec![dir.path().join("src")]);
    }

    #[test]
    fn test_without_module_roots() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"name": "app"}"#).unwrap();

        assert!(load_module_roots(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_falsy_module_roots() {
        let dir = tempdir().unwrap();
        for raw in [r#"{"moduleRoots": null}"#, r#"{"moduleRoots": ""}"#, r#"{"moduleRoots": false}"#] {
            fs::write(dir.path().join("package.json"), raw).unwrap();
            assert!(load_module_roots(dir.path()).unwrap().is_none(), "{raw}");
        }
    }

    #[test]
    fn test_non_object_document() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "null").unwrap();

        assert!(load_module_roots(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), "{ \"moduleRoots\": [").unwrap();

        let err = load_module_roots(dir.path()).unwrap_err();
        assert!(matches!(err, Error::DescriptorParse { .. }));
        assert_eq!(err.path(), dir.path().join("package.json"));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"moduleRoots": 42}"#).unwrap();

        let err = load_module_roots(dir.path()).unwrap_err();
        assert!(matches!(err, Error::InvalidModuleRoots { .. }));
    }
}

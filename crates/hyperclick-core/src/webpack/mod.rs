//! Module roots declared by webpack configs.
//!
//! Configs are found by ancestor search for each of [`WEBPACK_CONFIG_FILES`]
//! and read through a [`WebpackConfigLoader`]. The default
//! [`StaticConfigLoader`] never executes the file; see [`parse`].

pub mod parse;

use crate::locate::find_config_file;
use hyperclick_util::fs::read_to_string_lossy;
use hyperclick_util::path::{dirname, resolve};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Config file candidates, in priority order.
pub const WEBPACK_CONFIG_FILES: &[&str] = &[
    "webpack.config.js",
    "webpack/webpack.config.js",
    "webpack/config.js",
    "webpack/app.config.js",
];

/// `resolve.modules` entries already covered by Node resolution.
pub const IGNORED_MODULES: &[&str] = &["node_modules"];

/// The two fields read from a webpack config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebpackConfig {
    /// Absolute base directory (`context`).
    pub context: PathBuf,
    /// Raw `resolve.modules` entries.
    pub modules: Vec<String>,
}

/// Reads `context` and `resolve.modules` from a webpack config file.
///
/// Returning `None` means the file contributes no roots; loaders never fail
/// the surrounding resolution.
pub trait WebpackConfigLoader: Send + Sync + std::fmt::Debug {
    fn load(&self, path: &Path) -> Option<WebpackConfig>;
}

/// Loader that parses the exported object literal without running any code.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticConfigLoader;

impl WebpackConfigLoader for StaticConfigLoader {
    fn load(&self, path: &Path) -> Option<WebpackConfig> {
        let source = match read_to_string_lossy(path) {
            Ok(source) => source,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "webpack config unreadable");
                return None;
            }
        };

        let config_dir = dirname(path);
        let value = match parse::parse_config_source(&source, &config_dir) {
            Ok(value) => value,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "webpack config not statically readable");
                return None;
            }
        };

        let context = value.get("context").and_then(Value::as_str)?;
        let modules = value.pointer("/resolve/modules").and_then(Value::as_array)?;

        Some(WebpackConfig {
            context: resolve(&config_dir, context),
            modules: modules
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Extract absolute module roots from one webpack config.
///
/// `None` input (config not found) yields `None` without touching the loader.
/// Empty and ignored entries are dropped; the rest resolve against `context`.
pub fn get_webpack_context_with(
    loader: &dyn WebpackConfigLoader,
    config_file: Option<&Path>,
) -> Option<Vec<PathBuf>> {
    let config_file = config_file?;
    let config = loader.load(config_file)?;

    Some(
        config
            .modules
            .iter()
            .filter(|m| !m.is_empty() && !IGNORED_MODULES.contains(&m.as_str()))
            .map(|m| resolve(&config.context, m))
            .collect(),
    )
}

/// [`get_webpack_context_with`] using the [`StaticConfigLoader`].
#[must_use]
pub fn get_webpack_context(config_file: Option<&Path>) -> Option<Vec<PathBuf>> {
    get_webpack_context_with(&StaticConfigLoader, config_file)
}

/// Roots from every webpack config candidate found above `basedir`,
/// concatenated in candidate order.
pub fn load_webpack_roots_with(loader: &dyn WebpackConfigLoader, basedir: &Path) -> Vec<PathBuf> {
    let mut roots = Vec::new();

    for file_name in WEBPACK_CONFIG_FILES {
        let config_file = find_config_file(basedir, file_name);
        match get_webpack_context_with(loader, config_file.as_deref()) {
            Some(found) => {
                debug!(
                    config = %config_file.as_deref().unwrap_or(Path::new("")).display(),
                    count = found.len(),
                    "webpack roots loaded"
                );
                roots.extend(found);
            }
            None => trace!(candidate = file_name, "no webpack roots"),
        }
    }

    roots
}

/// [`load_webpack_roots_with`] using the [`StaticConfigLoader`].
#[must_use]
pub fn load_webpack_roots(basedir: &Path) -> Vec<PathBuf> {
    load_webpack_roots_with(&StaticConfigLoader, basedir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_none() {
        assert_eq!(get_webpack_context(None), None);
    }

    #[test]
    fn test_none_input_never_calls_loader() {
        #[derive(Debug, Default)]
        struct Recording(Mutex<Vec<PathBuf>>);

        impl WebpackConfigLoader for Recording {
            fn load(&self, path: &Path) -> Option<WebpackConfig> {
                self.0.lock().unwrap().push(path.to_path_buf());
                None
            }
        }

        let loader = Recording::default();
        assert_eq!(get_webpack_context_with(&loader, None), None);
        assert!(loader.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_ignored_modules_are_removed() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("webpack.config.js");
        fs::write(
            &config,
            r"module.exports = {
                context: __dirname,
                resolve: { modules: ['src', 'node_modules', '', 'lib/shared'] },
            };",
        )
        .unwrap();

        let roots = get_webpack_context(Some(&config)).unwrap();
        assert_eq!(
            roots,
            vec![dir.path().join("src"), dir.path().join("lib").join("shared")]
        );
    }

    #[test]
    fn test_relative_context_is_anchored_at_config_dir() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("webpack.config.js");
        fs::write(
            &config,
            "module.exports = { context: 'app', resolve: { modules: ['components', '/abs/root'] } };",
        )
        .unwrap();

        let roots = get_webpack_context(Some(&config)).unwrap();
        assert_eq!(
            roots,
            vec![dir.path().join("app").join("components"), PathBuf::from("/abs/root")]
        );
    }

    #[test]
    fn test_escaped_backslash_before_comment() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("webpack.config.js");
        fs::write(
            &config,
            "module.exports = { sep: '\\\\', // a comment\n context: __dirname, resolve: { modules: ['src'] } };",
        )
        .unwrap();

        let roots = get_webpack_context(Some(&config)).unwrap();
        assert_eq!(roots, vec![dir.path().join("src")]);
    }

    #[test]
    fn test_missing_fields_yield_none() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("webpack.config.js");

        fs::write(&config, "module.exports = { resolve: { modules: ['src'] } };").unwrap();
        assert_eq!(get_webpack_context(Some(&config)), None);

        fs::write(&config, "module.exports = { context: __dirname };").unwrap();
        assert_eq!(get_webpack_context(Some(&config)), None);
    }

    #[test]
    fn test_malformed_config_yields_none() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("webpack.config.js");
        fs::write(&config, "module.exports = { context: ").unwrap();

        assert_eq!(get_webpack_context(Some(&config)), None);
    }

    #[test]
    fn test_roots_follow_candidate_order() {
        let dir = tempdir().unwrap();
        let webpack = dir.path().join("webpack");
        fs::create_dir(&webpack).unwrap();
        fs::write(
            webpack.join("app.config.js"),
            "module.exports = { context: __dirname, resolve: { modules: ['last'] } };",
        )
        .unwrap();
        fs::write(
            dir.path().join("webpack.config.js"),
            "module.exports = { context: __dirname, resolve: { modules: ['first'] } };",
        )
        .unwrap();
        fs::write(
            webpack.join("config.js"),
            "module.exports = { context: __dirname, resolve: { modules: ['middle'] } };",
        )
        .unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();

        let roots = load_webpack_roots(&src);
        assert_eq!(
            roots,
            vec![
                dir.path().join("first"),
                webpack.join("middle"),
                webpack.join("last"),
            ]
        );
    }

    #[test]
    fn test_unreadable_candidate_contributes_nothing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("webpack.config.js"), "module.exports = () => ({});").unwrap();

        assert!(load_webpack_roots(dir.path()).is_empty());
    }
}

//! The resolution engine.
//!
//! Strategies, in order:
//! 1. Node resolution from the referencing file's directory. Core modules
//!    become documentation links.
//! 2. The `atom` host API, when Node resolution fails.
//! 3. Relative specifiers: a synthesized path, whether or not it exists.
//! 4. Bare specifiers: each webpack root, then each `moduleRoots` entry.

use crate::config::ResolveOptions;
use crate::error::Error;
use crate::package::load_module_roots;
use crate::resolver::{is_core_module, resolve_node, ResolveContext};
use crate::special::{builtin_docs_url, is_host_api, ATOM_API_DOCS_URL};
use crate::webpack::{load_webpack_roots_with, StaticConfigLoader, WebpackConfigLoader};
use hyperclick_util::path::{dirname, has_extension, normalize};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Extension appended to relative specifiers that name a file yet to be created.
pub const DEFAULT_SOURCE_EXTENSION: &str = ".js";

/// Where a specifier points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Resolved {
    /// Documentation for a core module or the host API.
    Url { url: String },
    /// A file on disk, or `None` when every strategy failed.
    File { filename: Option<PathBuf> },
}

impl Resolved {
    /// The file path, if this is a resolved file.
    #[must_use]
    pub fn filename(&self) -> Option<&Path> {
        match self {
            Self::File { filename } => filename.as_deref(),
            Self::Url { .. } => None,
        }
    }

    /// The link, if this is a documentation URL.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url { url } => Some(url.as_str()),
            Self::File { .. } => None,
        }
    }
}

/// Resolver bound to a set of options and a webpack config loader.
///
/// Holds no state between calls: every call re-reads configuration from disk.
#[derive(Debug, Clone, Default)]
pub struct ModuleResolver<L = StaticConfigLoader> {
    options: ResolveOptions,
    loader: L,
}

impl ModuleResolver<StaticConfigLoader> {
    /// Create a resolver using the static webpack config loader.
    #[must_use]
    pub fn new(options: ResolveOptions) -> Self {
        Self {
            options,
            loader: StaticConfigLoader,
        }
    }
}

impl<L: WebpackConfigLoader> ModuleResolver<L> {
    /// Create a resolver with a custom webpack config loader.
    #[must_use]
    pub fn with_loader(options: ResolveOptions, loader: L) -> Self {
        Self { options, loader }
    }

    /// Options used by this resolver.
    #[must_use]
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolve `specifier` as written in `file_path`.
    ///
    /// # Errors
    /// Only a broken `package.json` (unreadable, invalid JSON, or malformed
    /// `moduleRoots`) is an error, and only when custom roots are consulted.
    pub fn resolve(&self, file_path: &Path, specifier: &str) -> Result<Resolved, Error> {
        let basedir = absolute(&dirname(file_path));
        let ctx = ResolveContext::new(&basedir, &self.options);

        let result = resolve_node(&ctx, specifier);
        // An absolute path to an existing file also maps to itself.
        if result.is_identity(specifier) && is_core_module(specifier) {
            debug!(specifier, "core module");
            return Ok(Resolved::Url {
                url: builtin_docs_url(specifier),
            });
        }
        if let Some(filename) = result.resolved {
            debug!(specifier, file = %filename.display(), "resolved from basedir");
            return Ok(Resolved::File {
                filename: Some(filename),
            });
        }

        trace!(
            specifier,
            reason = ?result.reason,
            tried = result.tried.len(),
            "standard resolution failed"
        );

        if is_host_api(specifier) {
            return Ok(Resolved::Url {
                url: ATOM_API_DOCS_URL.to_string(),
            });
        }

        let filename = if specifier.starts_with('.') {
            Some(synthesize_relative(&basedir, specifier))
        } else {
            self.resolve_with_custom_roots(&basedir, specifier)?
        };

        Ok(Resolved::File { filename })
    }

    /// Webpack roots (candidate order) followed by `moduleRoots`.
    ///
    /// # Errors
    /// Propagates a broken `package.json`.
    pub fn module_roots(&self, basedir: &Path) -> Result<Vec<PathBuf>, Error> {
        let package_roots = load_module_roots(basedir)?.unwrap_or_default();

        let mut roots = load_webpack_roots_with(&self.loader, basedir);
        roots.extend(package_roots);
        Ok(roots)
    }

    /// Try `./<specifier>` from each custom root; the first hit wins.
    fn resolve_with_custom_roots(
        &self,
        basedir: &Path,
        specifier: &str,
    ) -> Result<Option<PathBuf>, Error> {
        let roots = self.module_roots(basedir)?;
        let module_name = format!("./{specifier}");

        for root in &roots {
            let ctx = ResolveContext::new(root, &self.options);
            let result = resolve_node(&ctx, &module_name);
            if let Some(filename) = result.resolved {
                debug!(
                    specifier,
                    root = %root.display(),
                    file = %filename.display(),
                    "resolved from custom root"
                );
                return Ok(Some(filename));
            }
            trace!(specifier, root = %root.display(), "not in custom root");
        }

        debug!(specifier, roots = roots.len(), "unresolved");
        Ok(None)
    }
}

/// Resolve `specifier` as written in `file_path` with the default loader.
///
/// # Errors
/// See [`ModuleResolver::resolve`].
pub fn resolve_module(
    file_path: &Path,
    specifier: &str,
    options: &ResolveOptions,
) -> Result<Resolved, Error> {
    ModuleResolver::new(options.clone()).resolve(file_path, specifier)
}

/// Combined custom roots for `basedir` with the default loader.
///
/// # Errors
/// Propagates a broken `package.json`.
pub fn module_roots(basedir: &Path) -> Result<Vec<PathBuf>, Error> {
    ModuleResolver::new(ResolveOptions::default()).module_roots(&absolute(basedir))
}

/// Path for a relative specifier whose target may not exist yet.
fn synthesize_relative(basedir: &Path, specifier: &str) -> PathBuf {
    let mut module_name = specifier.to_string();
    if !has_extension(&module_name) {
        module_name.push_str(DEFAULT_SOURCE_EXTENSION);
    }
    normalize(&basedir.join(module_name))
}

/// Anchor a relative directory at the process working directory.
fn absolute(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return normalize(dir);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(dir)),
        Err(_) => normalize(dir),
    }
}

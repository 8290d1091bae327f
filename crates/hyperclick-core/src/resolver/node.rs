//! Standard resolution of a single specifier from a single base directory.

use super::builtins::is_core_module;
use crate::config::ResolveOptions;
use hyperclick_util::path::{normalize, resolve};
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Maximum number of tried paths to record.
const MAX_TRIED_PATHS: usize = 20;

/// Context for resolution.
#[derive(Debug, Clone)]
pub struct ResolveContext<'a> {
    /// Directory the specifier is resolved from.
    pub parent: PathBuf,
    /// Resolution options (extension list).
    pub config: &'a ResolveOptions,
}

impl<'a> ResolveContext<'a> {
    /// Create a context resolving from `parent`.
    #[must_use]
    pub fn new(parent: impl Into<PathBuf>, config: &'a ResolveOptions) -> Self {
        Self {
            parent: parent.into(),
            config,
        }
    }
}

/// Resolution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStatus {
    Resolved,
    Unresolved,
}

/// Reason codes for unresolved specifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveReasonCode {
    SpecifierInvalid,
    NotFound,
    IsDirectory,
    NodeModulesNotFound,
}

impl std::fmt::Display for ResolveReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SpecifierInvalid => "SPECIFIER_INVALID",
            Self::NotFound => "NOT_FOUND",
            Self::IsDirectory => "IS_DIRECTORY",
            Self::NodeModulesNotFound => "NODE_MODULES_NOT_FOUND",
        };
        write!(f, "{s}")
    }
}

/// Resolution result.
///
/// Core modules resolve to themselves: `resolved` holds the specifier text
/// unchanged rather than a filesystem path.
#[derive(Debug, Clone)]
pub struct ResolveResult {
    /// Resolved absolute path, or the specifier itself for core modules.
    pub resolved: Option<PathBuf>,
    /// Status.
    pub status: ResolveStatus,
    /// Reason code if unresolved.
    pub reason: Option<ResolveReasonCode>,
    /// Candidate paths tried (capped).
    pub tried: Vec<PathBuf>,
}

impl ResolveResult {
    fn resolved(path: PathBuf, tried: Vec<PathBuf>) -> Self {
        Self {
            resolved: Some(path),
            status: ResolveStatus::Resolved,
            reason: None,
            tried,
        }
    }

    fn unresolved(reason: ResolveReasonCode, tried: Vec<PathBuf>) -> Self {
        Self {
            resolved: None,
            status: ResolveStatus::Unresolved,
            reason: Some(reason),
            tried,
        }
    }

    /// Whether resolution succeeded.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == ResolveStatus::Resolved
    }

    /// Whether the result is the identity mapping `spec -> spec`.
    #[must_use]
    pub fn is_identity(&self, spec: &str) -> bool {
        self.resolved
            .as_deref()
            .is_some_and(|p| p.as_os_str() == spec)
    }
}

/// Resolve a specifier from `ctx.parent`.
#[must_use]
pub fn resolve_node(ctx: &ResolveContext<'_>, spec: &str) -> ResolveResult {
    let mut tried = Vec::new();

    if spec.is_empty() {
        return ResolveResult::unresolved(ResolveReasonCode::SpecifierInvalid, tried);
    }

    if is_relative_or_absolute(spec) {
        let base = resolve(&ctx.parent, spec);
        if is_directory_only(spec) {
            return resolve_directory_only(ctx, &base, &mut tried);
        }
        return resolve_path(ctx, &base, &mut tried);
    }

    if is_core_module(spec) {
        return ResolveResult::resolved(PathBuf::from(spec), tried);
    }

    resolve_bare(ctx, spec, &mut tried)
}

/// `./x`, `../x`, `.`, `..`, or an absolute filesystem path.
fn is_relative_or_absolute(spec: &str) -> bool {
    if spec == "." || spec == ".." || spec.starts_with("./") || spec.starts_with("../") {
        return true;
    }
    is_absolute_path(spec)
}

/// `.`, `..`, and anything ending in `/` name a directory, never a file.
fn is_directory_only(spec: &str) -> bool {
    spec == "." || spec == ".." || spec.ends_with('/')
}

/// Check if a specifier is an absolute path.
fn is_absolute_path(spec: &str) -> bool {
    // Unix absolute
    if spec.starts_with('/') {
        return true;
    }

    // Windows absolute: C:\, D:\, etc.
    let bytes = spec.as_bytes();
    if bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
    {
        return true;
    }

    // UNC path: \\server\share
    spec.starts_with("\\\\")
}

/// Resolve a path as a file, then as a directory.
fn resolve_path(ctx: &ResolveContext<'_>, base: &Path, tried: &mut Vec<PathBuf>) -> ResolveResult {
    if let Some(file) = load_as_file(ctx, base, tried) {
        return ResolveResult::resolved(file, tried.clone());
    }

    resolve_directory_only(ctx, base, tried)
}

/// Resolve a path as a directory only.
fn resolve_directory_only(
    ctx: &ResolveContext<'_>,
    base: &Path,
    tried: &mut Vec<PathBuf>,
) -> ResolveResult {
    if let Some(file) = load_as_directory(ctx, base, tried, &mut Vec::new()) {
        return ResolveResult::resolved(file, tried.clone());
    }

    if base.is_dir() {
        return ResolveResult::unresolved(ResolveReasonCode::IsDirectory, tried.clone());
    }

    ResolveResult::unresolved(ResolveReasonCode::NotFound, tried.clone())
}

/// Try the exact path, then the path with each extension appended.
fn load_as_file(ctx: &ResolveContext<'_>, base: &Path, tried: &mut Vec<PathBuf>) -> Option<PathBuf> {
    add_tried(tried, base);
    if base.is_file() {
        return Some(base.to_path_buf());
    }

    for ext in &ctx.config.extensions {
        let with_ext = append_extension(base, ext);
        add_tried(tried, &with_ext);

        if with_ext.is_file() {
            return Some(with_ext);
        }
    }

    None
}

/// Resolve a directory (package.json main > index.*).
///
/// `visited` holds the directories already entered through `main`; a
/// directory seen twice yields `None` so `main` cycles terminate.
fn load_as_directory(
    ctx: &ResolveContext<'_>,
    dir: &Path,
    tried: &mut Vec<PathBuf>,
    visited: &mut Vec<PathBuf>,
) -> Option<PathBuf> {
    let dir = normalize(dir);
    if visited.contains(&dir) {
        return None;
    }
    visited.push(dir.clone());

    let pkg_json_path = dir.join("package.json");

    if pkg_json_path.is_file() {
        add_tried(tried, &pkg_json_path);

        if let Some(main) = read_main_field(&pkg_json_path) {
            let main = if main == "." || main == "./" {
                "index".to_string()
            } else {
                main
            };
            let main_path = resolve(&dir, &main);

            if let Some(file) = load_as_file(ctx, &main_path, tried) {
                return Some(file);
            }

            if let Some(file) = load_as_directory(ctx, &main_path, tried, visited) {
                return Some(file);
            }
        }
    }

    load_as_file(ctx, &dir.join("index"), tried)
}

/// Read `main` from a package.json, ignoring unreadable or malformed files.
fn read_main_field(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let value: Value = serde_json::from_str(&content).ok()?;
    value
        .get("main")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Resolve a bare specifier via `node_modules` in `parent` and its ancestors.
fn resolve_bare(ctx: &ResolveContext<'_>, spec: &str, tried: &mut Vec<PathBuf>) -> ResolveResult {
    let mut found_node_modules = false;
    let start = normalize(&ctx.parent);
    let mut current = Some(start.as_path());

    while let Some(dir) = current {
        // `node_modules/node_modules` is never searched.
        if dir.file_name().is_some_and(|name| name == "node_modules") {
            current = dir.parent();
            continue;
        }

        let node_modules = dir.join("node_modules");
        if node_modules.is_dir() {
            found_node_modules = true;

            let result = resolve_path(ctx, &normalize(&node_modules.join(spec)), tried);
            if result.is_resolved() {
                return result;
            }
        }

        current = dir.parent();
    }

    if found_node_modules {
        ResolveResult::unresolved(ResolveReasonCode::NotFound, tried.clone())
    } else {
        ResolveResult::unresolved(ResolveReasonCode::NodeModulesNotFound, tried.clone())
    }
}

/// `foo.test` + `.js` -> `foo.test.js`; the existing extension is kept.
fn append_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(ext);
    PathBuf::from(name)
}

/// Add a path to tried list (with cap).
fn add_tried(tried: &mut Vec<PathBuf>, path: &Path) {
    if tried.len() < MAX_TRIED_PATHS {
        tried.push(path.to_path_buf());
    }
}

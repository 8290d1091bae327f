use hyperclick_core::ResolveOptions;
use std::path::{Path, PathBuf};

/// Runtime configuration for the hyperclick CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory relative paths are resolved against.
    pub cwd: PathBuf,

    /// Whether to emit JSON output and JSON logs.
    pub json: bool,

    /// Verbosity level (0 = WARN, 1 = DEBUG, 2+ = TRACE).
    pub verbosity: u8,

    /// Options passed to every resolution.
    pub resolve: ResolveOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            json: false,
            verbosity: 0,
            resolve: ResolveOptions::default(),
        }
    }
}

impl Config {
    /// Create a new config with the given working directory.
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            ..Default::default()
        }
    }

    /// Set verbosity level.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set JSON output.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Override the extension list; an empty list keeps the defaults.
    #[must_use]
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        if !extensions.is_empty() {
            self.resolve = self.resolve.with_extensions(extensions);
        }
        self
    }

    /// Anchor `path` at the working directory unless it is already absolute.
    #[must_use]
    pub fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

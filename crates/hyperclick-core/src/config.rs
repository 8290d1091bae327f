use serde::{Deserialize, Serialize};

/// Extensions tried when a filename has none. Mirrors Node's `require.extensions`.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".json", ".node"];

/// Options for a single resolution call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Extensions to probe (in order).
    pub extensions: Vec<String>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

impl ResolveOptions {
    /// Create options with the default extension list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the extension list.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

//! Specifiers that map to documentation instead of files.

use crate::resolver::builtins::NODE_SCHEME;

/// Specifier naming the host editor's own API.
pub const HOST_API_SENTINEL: &str = "atom";

/// Base URL for Node core module documentation.
pub const NODE_API_DOCS_BASE: &str = "http://nodejs.org/api/";

/// Documentation for the host editor API.
pub const ATOM_API_DOCS_URL: &str = "https://atom.io/docs/api/latest/";

/// Documentation URL for a Node core module.
///
/// `node:`-prefixed names share the page of the bare name.
#[must_use]
pub fn builtin_docs_url(name: &str) -> String {
    let name = name.strip_prefix(NODE_SCHEME).unwrap_or(name);
    format!("{NODE_API_DOCS_BASE}{name}.html")
}

/// Exact, case-sensitive match against [`HOST_API_SENTINEL`].
#[must_use]
pub fn is_host_api(spec: &str) -> bool {
    spec == HOST_API_SENTINEL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_docs_url() {
        assert_eq!(builtin_docs_url("path"), "http://nodejs.org/api/path.html");
        assert_eq!(
            builtin_docs_url("fs/promises"),
            "http://nodejs.org/api/fs/promises.html"
        );
        assert_eq!(
            builtin_docs_url("node:crypto"),
            "http://nodejs.org/api/crypto.html"
        );
    }

    #[test]
    fn test_host_api_is_case_sensitive() {
        assert!(is_host_api("atom"));
        assert!(!is_host_api("Atom"));
        assert!(!is_host_api("atom/lib"));
    }
}

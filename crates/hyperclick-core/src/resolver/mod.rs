//! Node-style module resolution.
//!
//! Follows the classic CommonJS algorithm used by the `resolve` package:
//! core modules, relative and absolute paths with extension probing,
//! directory `main`/`index` entries, and ancestor `node_modules` lookup.
//! Package `exports` maps are not consulted.

pub mod builtins;
mod node;

pub use builtins::{is_core_module, NODE_BUILTINS};
pub use node::{resolve_node, ResolveContext, ResolveReasonCode, ResolveResult, ResolveStatus};

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::return_self_not_must_use)]

//! Resolve module specifiers for editor jump-to-definition.
//!
//! Given the file a specifier appears in, [`resolve_module`] returns either a
//! documentation link (Node core modules, the `atom` host API) or a path on
//! disk. Bare specifiers that Node resolution cannot find are retried against
//! webpack `resolve.modules` roots and `package.json` `moduleRoots`.

pub mod config;
pub mod engine;
pub mod error;
pub mod locate;
pub mod package;
pub mod resolver;
pub mod special;
pub mod version;
pub mod webpack;

pub use config::{ResolveOptions, DEFAULT_EXTENSIONS};
pub use engine::{
    module_roots, resolve_module, ModuleResolver, Resolved, DEFAULT_SOURCE_EXTENSION,
};
pub use error::Error;
pub use locate::find_config_file;
pub use package::load_module_roots;
pub use resolver::{resolve_node, ResolveContext, ResolveReasonCode, ResolveResult, ResolveStatus};
pub use special::{ATOM_API_DOCS_URL, HOST_API_SENTINEL, NODE_API_DOCS_BASE};
pub use version::VERSION;
pub use webpack::{
    get_webpack_context, load_webpack_roots, StaticConfigLoader, WebpackConfig,
    WebpackConfigLoader,
};

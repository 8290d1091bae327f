//! Node core module names.

/// Core modules that Node resolves to themselves instead of a file.
pub const NODE_BUILTINS: &[&str] = &[
    "assert",
    "assert/strict",
    "async_hooks",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "diagnostics_channel",
    "dns",
    "dns/promises",
    "domain",
    "events",
    "fs",
    "fs/promises",
    "http",
    "http2",
    "https",
    "inspector",
    "module",
    "net",
    "os",
    "path",
    "path/posix",
    "path/win32",
    "perf_hooks",
    "process",
    "punycode",
    "querystring",
    "readline",
    "readline/promises",
    "repl",
    "stream",
    "stream/consumers",
    "stream/promises",
    "stream/web",
    "string_decoder",
    "sys",
    "timers",
    "timers/promises",
    "tls",
    "trace_events",
    "tty",
    "url",
    "util",
    "util/types",
    "v8",
    "vm",
    "wasi",
    "worker_threads",
    "zlib",
];

/// Scheme prefix accepted in front of core module names.
pub const NODE_SCHEME: &str = "node:";

/// Whether `spec` names a Node core module, with or without the `node:` scheme.
#[must_use]
pub fn is_core_module(spec: &str) -> bool {
    let name = spec.strip_prefix(NODE_SCHEME).unwrap_or(spec);
    NODE_BUILTINS.contains(&name)
}

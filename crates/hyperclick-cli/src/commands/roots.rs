//! `hyperclick roots` command implementation.

use crate::config::Config;
use hyperclick_core::ModuleResolver;
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct RootsOutput {
    roots: Vec<PathBuf>,
}

/// Run the roots command.
///
/// Lists webpack roots first, then `package.json` `moduleRoots`, in the order
/// the resolver tries them.
pub fn run(config: &Config, dir: Option<&Path>) -> Result<()> {
    let dir = dir.map_or_else(|| config.cwd.clone(), |d| config.absolute(d));
    let resolver = ModuleResolver::new(config.resolve.clone());

    let roots = resolver
        .module_roots(&dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to load module roots for {}", dir.display()))?;

    if config.json {
        let output = RootsOutput { roots };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).into_diagnostic()?
        );
    } else if roots.is_empty() {
        println!("no module roots");
    } else {
        for root in &roots {
            println!("{}", root.display());
        }
    }

    Ok(())
}

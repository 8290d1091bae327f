//! `hyperclick resolve` command implementation.

use crate::config::Config;
use hyperclick_core::{ModuleResolver, Resolved};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::Path;

/// Run the resolve command.
///
/// Prints the link or file the editor would jump to. An unresolvable
/// specifier is a normal outcome, not an error.
pub fn run(config: &Config, file: &Path, specifier: &str) -> Result<()> {
    let file = config.absolute(file);
    let resolver = ModuleResolver::new(config.resolve.clone());

    let resolved = resolver
        .resolve(&file, specifier)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to resolve '{specifier}' from {}", file.display()))?;

    if config.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&resolved).into_diagnostic()?
        );
    } else {
        print_human(&resolved);
    }

    Ok(())
}

fn print_human(resolved: &Resolved) {
    match resolved {
        Resolved::Url { url } => println!("url  {url}"),
        Resolved::File {
            filename: Some(filename),
        } => println!("file {}", filename.display()),
        Resolved::File { filename: None } => println!("no target found"),
    }
}

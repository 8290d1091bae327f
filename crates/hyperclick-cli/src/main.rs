#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod config;
mod logging;

use clap::Parser;
use config::Config;
use miette::Result;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hyperclick")]
#[command(author, version, about = "Resolve module specifiers to files or documentation", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v for DEBUG, -vv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (stable, machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Resolve a specifier as written in a source file
    Resolve {
        /// File containing the specifier
        file: PathBuf,

        /// The specifier text (e.g. "./util", "lodash", "path")
        specifier: String,

        /// Extension to probe, in order (repeatable; defaults to .js, .json, .node)
        #[arg(
            long = "extension",
            short = 'e',
            value_name = "EXT",
            env = "HYPERCLICK_EXTENSIONS",
            value_delimiter = ','
        )]
        extensions: Vec<String>,
    },

    /// List the custom module roots consulted for bare specifiers
    Roots {
        /// Directory to search from (defaults to the working directory)
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine working directory
    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut config = Config::new(cwd)
        .with_verbosity(cli.verbose)
        .with_json(cli.json);

    logging::init(config.verbosity, config.json);

    match cli.command {
        Some(Commands::Version) | None => commands::version::run(),
        Some(Commands::Resolve {
            file,
            specifier,
            extensions,
        }) => {
            config = config.with_extensions(extensions);
            commands::resolve::run(&config, &file, &specifier)
        }
        Some(Commands::Roots { dir }) => commands::roots::run(&config, dir.as_deref()),
    }
}

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for hyperclick operations.
///
/// Only a broken project descriptor surfaces here. Missing files, unreadable
/// webpack configs and failed lookups are absorbed by the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read package.json at {path}: {source}")]
    DescriptorRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse package.json at {path}: {source}")]
    DescriptorParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid `moduleRoots` in {path}: {source}")]
    InvalidModuleRoots {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Path of the descriptor that caused the error.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::DescriptorRead { path, .. }
            | Self::DescriptorParse { path, .. }
            | Self::InvalidModuleRoots { path, .. } => path,
        }
    }
}

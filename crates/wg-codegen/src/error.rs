use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EntryPointError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error creating {}: {source}", path.display())]
    DirCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error creating {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to render application entry point: {0}")]
    Template(#[from] minijinja::Error),

    #[error("invalid layout: {0}")]
    Config(#[from] ConfigError),
}

impl EntryPointError {
    /// The underlying I/O failure, if this error came from the filesystem.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Read { source, .. }
            | Self::Stat { source, .. }
            | Self::DirCreate { source, .. }
            | Self::Write { source, .. } => Some(source),
            Self::Template(_) | Self::Config(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("{field} must be a relative path inside the project directory, got {value:?}")]
    InvalidLayout { field: &'static str, value: String },
}

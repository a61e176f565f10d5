//! CLI error type.

use registrar_core::CatalogError;
use std::io;
use thiserror::Error;

/// Errors raised while running a session.
#[derive(Debug, Error)]
pub enum CliError {
    /// The store rejected the command.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The command line could not be parsed.
    #[error("{0}")]
    Parse(String),

    /// A referenced record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Reading the script or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Returns true for errors caused by a single command, after which the
    /// session can carry on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::Parse(_) | Self::NotFound(_))
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> Self {
        Self::Parse(err.render().to_string().trim_end().to_owned())
    }
}

//! Error handling for the command-line tool

use thiserror::Error;

use jwkgen_jwk::JwkError;
use jwkgen_key::KeyError;

/// Errors surfaced by a keygen run
#[derive(Debug, Error)]
pub enum CliError {
    /// Key generation, naming or file output failed
    #[error(transparent)]
    Key(#[from] KeyError),

    /// JWK construction or rendering failed
    #[error(transparent)]
    Jwk(#[from] JwkError),

    /// Writing to the console failed
    #[error("can't write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

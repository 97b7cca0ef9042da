//! Immutable run configuration built from command-line arguments

use std::path::PathBuf;

use jwkgen_key::{KeySize, KeyUse};

/// Where the key id comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeyIdSource {
    /// No key id: documents are printed, not written
    #[default]
    None,
    /// Caller-supplied key id, validated before generation
    Explicit(String),
    /// Random key id drawn from the run's entropy source
    Random,
}

/// Output shaping
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputOptions {
    /// Directory receiving artifacts; empty means the working directory
    pub directory: PathBuf,
    /// Indent JSON with four spaces
    pub pretty: bool,
    /// Also emit single-key JWK sets
    pub emit_jwks: bool,
    /// Also emit PEM blocks
    pub emit_pem: bool,
}

/// One key generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeygenRequest {
    /// Intended key use
    pub key_use: KeyUse,
    /// Algorithm identifier, checked against `key_use` by the generator
    pub algorithm: String,
    /// Requested key size
    pub size: KeySize,
    /// Key id source
    pub key_id: KeyIdSource,
    /// Output shaping
    pub output: OutputOptions,
}

//! Error handling for key generation and artifact output

use std::path::PathBuf;
use thiserror::Error;

use crate::algorithm::KeyUse;

/// Key-specific errors
#[derive(Debug, Error)]
pub enum KeyError {
    /// Algorithm identifier is not recognised for the requested use
    #[error("unknown `alg` {algorithm:?} for `use` = `{key_use}`")]
    UnknownAlgorithm {
        /// Use the identifier was parsed under
        key_use: KeyUse,
        /// Identifier as supplied by the caller
        algorithm: String,
    },

    /// Algorithm is bound to a fixed key size and the request asked for another
    #[error("`{algorithm}` does not support arbitrary key length: requested {requested} bits, requires {required}")]
    UnsupportedKeySize {
        /// Algorithm identifier
        algorithm: String,
        /// Requested size in bits
        requested: u32,
        /// The only size the algorithm accepts
        required: u32,
    },

    /// RSA modulus below the accepted minimum
    #[error("too short key for RSA `{algorithm}`: {requested} bits, {minimum}+ is required")]
    KeyTooShort {
        /// Algorithm identifier
        algorithm: String,
        /// Requested modulus size in bits
        requested: u32,
        /// Minimum modulus size in bits
        minimum: u32,
    },

    /// ECDH request named a curve size that does not exist
    #[error("unknown elliptic curve bit length {requested} for `{algorithm}`, use one of 256, 384, 521")]
    UnsupportedCurveSize {
        /// Algorithm identifier
        algorithm: String,
        /// Requested curve size in bits
        requested: u32,
    },

    /// A freshly generated key failed its own consistency checks
    #[error("invalid keys were generated: {0}")]
    InvalidGeneratedKey(String),

    /// Caller-supplied key id cannot be used for output naming
    #[error("invalid key id {key_id:?}: {reason}")]
    InvalidKeyId {
        /// Rejected key id
        key_id: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Refused to overwrite an existing artifact
    #[error("file already exists: {}", path.display())]
    FileAlreadyExists {
        /// Target path
        path: PathBuf,
    },

    /// Fewer bytes reached the file than the payload holds
    #[error("short write to {}: {written} of {expected} bytes", path.display())]
    ShortWrite {
        /// Target path
        path: PathBuf,
        /// Bytes actually written
        written: usize,
        /// Payload length
        expected: usize,
    },

    /// Secure random source could not be seeded or produced unusable output
    #[error("secure random source failure: {0}")]
    RandomSourceFailure(String),

    /// Underlying key generation primitive failed
    #[error("key generation error: {0}")]
    KeyGeneration(String),

    /// DER / PEM encoding failed
    #[error("key encoding error: {0}")]
    Encoding(String),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KeyError {
    /// Create an `InvalidGeneratedKey` error
    pub fn invalid_generated(msg: impl Into<String>) -> Self {
        Self::InvalidGeneratedKey(msg.into())
    }

    /// Create an encoding error
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

/// Result type for key operations
pub type Result<T> = std::result::Result<T, KeyError>;

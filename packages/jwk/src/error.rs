//! Error handling for JWK documents

use thiserror::Error;

use jwkgen_key::KeyError;

/// JWK document errors
#[derive(Debug, Error)]
pub enum JwkError {
    /// Key material error, including rejected key pairs
    #[error(transparent)]
    Key(#[from] KeyError),

    /// A member required for the key type is absent
    #[error("`{kty}` key is missing member `{member}`")]
    MissingMember {
        /// Key type
        kty: &'static str,
        /// Missing member name
        member: &'static str,
    },

    /// Structurally invalid document
    #[error("invalid JWK: {0}")]
    Invalid(String),

    /// Member is not valid unpadded base64url
    #[error("member `{member}` is not base64url: {source}")]
    Base64 {
        /// Member name
        member: &'static str,
        /// Decoder error
        #[source]
        source: base64::DecodeError,
    },

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl JwkError {
    /// Create an `Invalid` error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Result type for JWK operations
pub type Result<T> = std::result::Result<T, JwkError>;

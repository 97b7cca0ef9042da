//! JSON rendering

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::document::Jwk;
use crate::error::Result;
use crate::set::JwkSet;

const PRETTY_INDENT: &[u8] = b"    ";

/// Serialize `value` compactly, or with four-space indentation when `pretty`
///
/// # Errors
///
/// Returns [`crate::JwkError::Json`] if serialization fails.
pub fn render<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<Vec<u8>> {
    if !pretty {
        return Ok(serde_json::to_vec(value)?);
    }

    let mut out = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(PRETTY_INDENT));
    value.serialize(&mut serializer)?;
    Ok(out)
}

impl Jwk {
    /// Render this key as JSON
    ///
    /// # Errors
    ///
    /// Returns [`crate::JwkError::Json`] if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<Vec<u8>> {
        render(self, pretty)
    }
}

impl JwkSet {
    /// Render this set as JSON
    ///
    /// # Errors
    ///
    /// Returns [`crate::JwkError::Json`] if serialization fails.
    pub fn to_json(&self, pretty: bool) -> Result<Vec<u8>> {
        render(self, pretty)
    }
}

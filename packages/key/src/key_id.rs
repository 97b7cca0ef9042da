//! Key identifier types
//!
//! A key id only names output artifacts. It is supplied by the caller or drawn
//! at random and is never derived from key material: JWK thumbprints have no
//! canonical representation across serializers.

use std::fmt;

use data_encoding::BASE32_NOPAD;

use crate::entropy::EntropySource;
use crate::store::naming::PUBLIC_SUFFIX;
use crate::{KeyError, Result};

/// Number of random bytes behind a generated key id
pub const RANDOM_KEY_ID_BYTES: usize = 5;

/// Validated key identifier, safe to embed in a file name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyId(String);

impl KeyId {
    /// Validate a caller-supplied key id
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKeyId`] if the id is empty, contains a path
    /// separator or NUL, or ends with the public-artifact suffix.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let reason = if id.is_empty() {
            Some("must not be empty")
        } else if id.contains(['/', '\\']) {
            Some("must not contain path separators")
        } else if id.contains('\0') {
            Some("must not contain NUL")
        } else if id.ends_with(PUBLIC_SUFFIX) {
            Some("must not end with the public key suffix `-pub`")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(KeyError::InvalidKeyId { key_id: id, reason }),
            None => Ok(Self(id)),
        }
    }

    /// Draw a random key id: five random bytes as eight base-32 characters
    pub fn random(entropy: &mut EntropySource) -> Self {
        let mut raw = [0u8; RANDOM_KEY_ID_BYTES];
        entropy.fill(&mut raw);
        Self(BASE32_NOPAD.encode(&raw))
    }

    /// The identifier text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_key_id_is_unpadded_base32() {
        let mut entropy = EntropySource::from_seed([7u8; 32]);
        let kid = KeyId::random(&mut entropy);
        assert_eq!(kid.as_str().len(), 8);
        assert!(!kid.as_str().contains('='));

        let raw = BASE32_NOPAD.decode(kid.as_str().as_bytes()).unwrap();
        assert_eq!(raw.len(), RANDOM_KEY_ID_BYTES);
    }

    #[test]
    fn test_random_key_id_encodes_drawn_bytes() {
        let mut drawn = [0u8; RANDOM_KEY_ID_BYTES];
        EntropySource::from_seed([8u8; 32]).fill(&mut drawn);

        let kid = KeyId::random(&mut EntropySource::from_seed([8u8; 32]));
        assert_eq!(kid.as_str(), BASE32_NOPAD.encode(&drawn));
    }
}

//! Key sets and public/private document pairs

use serde::{Deserialize, Serialize};

use jwkgen_key::{KeyError, KeyId, KeyPair};

use crate::document::Jwk;
use crate::error::Result;

/// JSON Web Key Set
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JwkSet {
    /// Member keys
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Set holding a single key
    #[must_use]
    pub fn single(key: Jwk) -> Self {
        Self { keys: vec![key] }
    }
}

/// Public and private documents for one key pair
#[derive(Debug, Clone)]
pub struct JwkPair {
    /// Public-only document
    pub public: Jwk,
    /// Document carrying the private members
    pub private: Jwk,
}

impl JwkPair {
    /// Build and cross-check both documents for `pair`
    ///
    /// The pair is rejected if the private document carries no private
    /// members, the public document carries any, or either fails
    /// [`Jwk::validate`].
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidGeneratedKey`] (wrapped in
    /// [`crate::JwkError::Key`]) for a rejected pair, or the key crate's
    /// encoding error if the key material cannot be read.
    pub fn from_key_pair(pair: &KeyPair, kid: Option<&KeyId>) -> Result<Self> {
        let algorithm = pair.algorithm();
        let public = Jwk::from_public(pair.public_key(), algorithm, kid)?;
        let private = Jwk::from_private(pair.private_key(), algorithm, kid)?;

        if private.is_public() {
            return Err(KeyError::invalid_generated("private JWK carries no private members").into());
        }
        if !public.is_public() {
            return Err(KeyError::invalid_generated("public JWK carries private members").into());
        }
        for (role, document) in [("public", &public), ("private", &private)] {
            document.validate().map_err(|e| {
                KeyError::invalid_generated(format!("{role} JWK failed validation: {e}"))
            })?;
        }

        log::debug!("Built JWK pair for {algorithm} ({})", public.kty.as_str());
        Ok(Self { public, private })
    }

    /// Wrap each document in a single-key set
    #[must_use]
    pub fn to_sets(&self) -> (JwkSet, JwkSet) {
        (
            JwkSet::single(self.public.clone()),
            JwkSet::single(self.private.clone()),
        )
    }
}

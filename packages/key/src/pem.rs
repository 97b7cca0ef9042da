//! PEM block construction
//!
//! Private keys keep their family's traditional container (PKCS#1 for RSA,
//! SEC1 for EC); Ed25519 has no traditional form and uses PKCS#8. Public keys
//! of every family are exported as SubjectPublicKeyInfo.

use ::pem::{EncodeConfig, LineEnding, Pem};
use ed25519_dalek::pkcs8::{EncodePrivateKey, EncodePublicKey};
use rsa::pkcs1::EncodeRsaPrivateKey;

use crate::key_pair::{PrivateKey, PublicKey};
use crate::{KeyError, Result};

/// PEM label for an RSA PKCS#1 private key
pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
/// PEM label for a SEC1 EC private key
pub const EC_PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
/// PEM label for a PKCS#8 private key
pub const PKCS8_PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
/// PEM label for a SubjectPublicKeyInfo
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

impl PrivateKey {
    /// PEM label used by [`PrivateKey::to_pem_block`]
    #[must_use]
    pub const fn pem_label(&self) -> &'static str {
        match self {
            PrivateKey::Rsa(_) => RSA_PRIVATE_KEY_LABEL,
            PrivateKey::Ec(_) => EC_PRIVATE_KEY_LABEL,
            PrivateKey::Ed25519(_) => PKCS8_PRIVATE_KEY_LABEL,
        }
    }

    /// Build the PEM block for this key
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if DER serialization fails.
    pub fn to_pem_block(&self) -> Result<Pem> {
        let der = match self {
            PrivateKey::Rsa(k) => EncodeRsaPrivateKey::to_pkcs1_der(k)
                .map_err(|e| KeyError::encoding(format!("Private key encoding failed: {e}")))?
                .as_bytes()
                .to_vec(),
            PrivateKey::Ec(k) => k.to_sec1_der()?.to_vec(),
            PrivateKey::Ed25519(k) => k
                .to_pkcs8_der()
                .map_err(|e| KeyError::encoding(format!("Ed25519 key encoding failed: {e}")))?
                .as_bytes()
                .to_vec(),
        };
        Ok(Pem::new(self.pem_label(), der))
    }

    /// PEM text with LF line endings
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if DER serialization fails.
    pub fn to_pem(&self) -> Result<String> {
        self.to_pem_block().map(|block| encode(&block))
    }
}

impl PublicKey {
    /// Build the SubjectPublicKeyInfo PEM block for this key
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if DER serialization fails.
    pub fn to_pem_block(&self) -> Result<Pem> {
        let der = match self {
            PublicKey::Rsa(k) => rsa::pkcs8::EncodePublicKey::to_public_key_der(k)
                .map_err(|e| KeyError::encoding(format!("Public key encoding failed: {e}")))?
                .as_bytes()
                .to_vec(),
            PublicKey::Ec(k) => k.to_spki_der()?,
            PublicKey::Ed25519(k) => k
                .to_public_key_der()
                .map_err(|e| KeyError::encoding(format!("Ed25519 key encoding failed: {e}")))?
                .as_bytes()
                .to_vec(),
        };
        Ok(Pem::new(PUBLIC_KEY_LABEL, der))
    }

    /// PEM text with LF line endings
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if DER serialization fails.
    pub fn to_pem(&self) -> Result<String> {
        self.to_pem_block().map(|block| encode(&block))
    }
}

fn encode(block: &Pem) -> String {
    ::pem::encode_config(block, EncodeConfig::new().set_line_ending(LineEnding::LF))
}

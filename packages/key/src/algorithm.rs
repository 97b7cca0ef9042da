//! JOSE algorithm identifiers and intended key use
//!
//! Identifiers are partitioned into a signature family and an encryption
//! family. Each identifier parses only under the matching [`KeyUse`].

use std::fmt;
use std::str::FromStr;

use crate::{KeyError, Result};

/// Intended use of a key (`use` member of a JWK)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyUse {
    /// `sig`
    Signature,
    /// `enc`
    Encryption,
}

impl KeyUse {
    /// Literal JOSE value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            KeyUse::Signature => "sig",
            KeyUse::Encryption => "enc",
        }
    }
}

impl fmt::Display for KeyUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyUse {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "sig" => Ok(KeyUse::Signature),
            "enc" => Ok(KeyUse::Encryption),
            other => Err(format!("unknown key use {other:?}, expected `sig` or `enc`")),
        }
    }
}

/// Signature algorithms (`use` = `sig`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// ECDSA using P-256 and SHA-256
    ES256,
    /// ECDSA using P-384 and SHA-384
    ES384,
    /// ECDSA using P-521 and SHA-512
    ES512,
    /// Edwards-curve signatures (Ed25519)
    EdDSA,
    /// RSASSA-PKCS1-v1_5 using SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 using SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 using SHA-512
    RS512,
    /// RSASSA-PSS using SHA-256
    PS256,
    /// RSASSA-PSS using SHA-384
    PS384,
    /// RSASSA-PSS using SHA-512
    PS512,
}

impl SignatureAlgorithm {
    /// Every signature algorithm
    pub const ALL: [SignatureAlgorithm; 10] = [
        SignatureAlgorithm::ES256,
        SignatureAlgorithm::ES384,
        SignatureAlgorithm::ES512,
        SignatureAlgorithm::EdDSA,
        SignatureAlgorithm::RS256,
        SignatureAlgorithm::RS384,
        SignatureAlgorithm::RS512,
        SignatureAlgorithm::PS256,
        SignatureAlgorithm::PS384,
        SignatureAlgorithm::PS512,
    ];

    /// Literal JOSE identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SignatureAlgorithm::ES256 => "ES256",
            SignatureAlgorithm::ES384 => "ES384",
            SignatureAlgorithm::ES512 => "ES512",
            SignatureAlgorithm::EdDSA => "EdDSA",
            SignatureAlgorithm::RS256 => "RS256",
            SignatureAlgorithm::RS384 => "RS384",
            SignatureAlgorithm::RS512 => "RS512",
            SignatureAlgorithm::PS256 => "PS256",
            SignatureAlgorithm::PS384 => "PS384",
            SignatureAlgorithm::PS512 => "PS512",
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| KeyError::UnknownAlgorithm {
                key_use: KeyUse::Signature,
                algorithm: s.to_string(),
            })
    }
}

/// Key management algorithms (`use` = `enc`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptionAlgorithm {
    /// RSAES-PKCS1-v1_5
    Rsa1_5,
    /// RSAES OAEP using default parameters
    RsaOaep,
    /// RSAES OAEP using SHA-256 and MGF1 with SHA-256
    RsaOaep256,
    /// ECDH-ES direct key agreement
    EcdhEs,
    /// ECDH-ES with A128KW key wrapping
    EcdhEsA128Kw,
    /// ECDH-ES with A192KW key wrapping
    EcdhEsA192Kw,
    /// ECDH-ES with A256KW key wrapping
    EcdhEsA256Kw,
}

impl EncryptionAlgorithm {
    /// Every encryption algorithm
    pub const ALL: [EncryptionAlgorithm; 7] = [
        EncryptionAlgorithm::Rsa1_5,
        EncryptionAlgorithm::RsaOaep,
        EncryptionAlgorithm::RsaOaep256,
        EncryptionAlgorithm::EcdhEs,
        EncryptionAlgorithm::EcdhEsA128Kw,
        EncryptionAlgorithm::EcdhEsA192Kw,
        EncryptionAlgorithm::EcdhEsA256Kw,
    ];

    /// Literal JOSE identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EncryptionAlgorithm::Rsa1_5 => "RSA1_5",
            EncryptionAlgorithm::RsaOaep => "RSA-OAEP",
            EncryptionAlgorithm::RsaOaep256 => "RSA-OAEP-256",
            EncryptionAlgorithm::EcdhEs => "ECDH-ES",
            EncryptionAlgorithm::EcdhEsA128Kw => "ECDH-ES+A128KW",
            EncryptionAlgorithm::EcdhEsA192Kw => "ECDH-ES+A192KW",
            EncryptionAlgorithm::EcdhEsA256Kw => "ECDH-ES+A256KW",
        }
    }
}

impl FromStr for EncryptionAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| KeyError::UnknownAlgorithm {
                key_use: KeyUse::Encryption,
                algorithm: s.to_string(),
            })
    }
}

/// An algorithm identifier bound to its family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Signature family
    Signature(SignatureAlgorithm),
    /// Encryption family
    Encryption(EncryptionAlgorithm),
}

impl Algorithm {
    /// Parse an identifier under the given use
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnknownAlgorithm`] when the identifier does not belong
    /// to the family selected by `key_use`.
    pub fn parse(key_use: KeyUse, identifier: &str) -> Result<Self> {
        match key_use {
            KeyUse::Signature => identifier.parse().map(Algorithm::Signature),
            KeyUse::Encryption => identifier.parse().map(Algorithm::Encryption),
        }
    }

    /// The use this identifier is valid under
    #[must_use]
    pub const fn key_use(self) -> KeyUse {
        match self {
            Algorithm::Signature(_) => KeyUse::Signature,
            Algorithm::Encryption(_) => KeyUse::Encryption,
        }
    }

    /// Literal JOSE identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Algorithm::Signature(alg) => alg.as_str(),
            Algorithm::Encryption(alg) => alg.as_str(),
        }
    }

    /// Every identifier of both families, signature family first
    pub fn identifiers() -> impl Iterator<Item = &'static str> {
        SignatureAlgorithm::ALL
            .into_iter()
            .map(SignatureAlgorithm::as_str)
            .chain(EncryptionAlgorithm::ALL.into_iter().map(EncryptionAlgorithm::as_str))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SignatureAlgorithm> for Algorithm {
    fn from(alg: SignatureAlgorithm) -> Self {
        Algorithm::Signature(alg)
    }
}

impl From<EncryptionAlgorithm> for Algorithm {
    fn from(alg: EncryptionAlgorithm) -> Self {
        Algorithm::Encryption(alg)
    }
}

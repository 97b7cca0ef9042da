//! JSON Web Key document model

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use jwkgen_key::{Algorithm, KeyId, PrivateKey, PublicKey, Result as KeyResult};

use crate::error::{JwkError, Result};

/// `crv` value of Ed25519 OKP keys
pub const ED25519_CURVE: &str = "Ed25519";

/// JWK `kty`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// RSA
    #[serde(rename = "RSA")]
    Rsa,
    /// NIST elliptic curve
    #[serde(rename = "EC")]
    Ec,
    /// Octet key pair (Ed25519)
    #[serde(rename = "OKP")]
    Okp,
}

impl KeyType {
    /// Literal `kty` value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            KeyType::Rsa => "RSA",
            KeyType::Ec => "EC",
            KeyType::Okp => "OKP",
        }
    }
}

/// A single JSON Web Key
///
/// Binary members hold unpadded base64url text. Private members are wiped
/// when the document is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Intended use, `sig` or `enc`
    #[serde(rename = "use")]
    pub key_use: String,
    /// Key type
    pub kty: KeyType,
    /// Key id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Curve name (EC and OKP)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crv: Option<String>,
    /// Algorithm identifier
    pub alg: String,
    /// RSA modulus
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    /// RSA public exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
    /// EC x coordinate or OKP public key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// EC y coordinate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    /// Private exponent, scalar or seed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d: Option<String>,
    /// RSA first prime factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    /// RSA second prime factor
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// RSA first CRT exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dp: Option<String>,
    /// RSA second CRT exponent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dq: Option<String>,
    /// RSA CRT coefficient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qi: Option<String>,
}

impl Jwk {
    fn empty(kty: KeyType, algorithm: Algorithm, kid: Option<&KeyId>) -> Self {
        Self {
            key_use: algorithm.key_use().as_str().to_string(),
            kty,
            kid: kid.map(|k| k.as_str().to_string()),
            crv: None,
            alg: algorithm.as_str().to_string(),
            n: None,
            e: None,
            x: None,
            y: None,
            d: None,
            p: None,
            q: None,
            dp: None,
            dq: None,
            qi: None,
        }
    }

    /// Public document for `key`
    ///
    /// # Errors
    ///
    /// Returns the key crate's encoding error if RSA integers cannot be extracted.
    pub fn from_public(key: &PublicKey, algorithm: Algorithm, kid: Option<&KeyId>) -> KeyResult<Self> {
        let jwk = match key {
            PublicKey::Rsa(_) => {
                let mut jwk = Self::empty(KeyType::Rsa, algorithm, kid);
                if let Some(parts) = key.rsa_parts()? {
                    jwk.n = Some(encode(&parts.n));
                    jwk.e = Some(encode(&parts.e));
                }
                jwk
            }
            PublicKey::Ec(point) => {
                let mut jwk = Self::empty(KeyType::Ec, algorithm, kid);
                let (x, y) = point.coordinates();
                jwk.crv = Some(point.curve().jwk_name().to_string());
                jwk.x = Some(encode(&x));
                jwk.y = Some(encode(&y));
                jwk
            }
            PublicKey::Ed25519(verifying) => {
                let mut jwk = Self::empty(KeyType::Okp, algorithm, kid);
                jwk.crv = Some(ED25519_CURVE.to_string());
                jwk.x = Some(encode(verifying.as_bytes()));
                jwk
            }
        };
        Ok(jwk)
    }

    /// Private document for `key`, carrying its public members too
    ///
    /// # Errors
    ///
    /// Returns the key crate's encoding error if RSA integers cannot be extracted.
    pub fn from_private(
        key: &PrivateKey,
        algorithm: Algorithm,
        kid: Option<&KeyId>,
    ) -> KeyResult<Self> {
        let mut jwk = Self::from_public(&key.public_key(), algorithm, kid)?;
        match key {
            PrivateKey::Rsa(_) => {
                if let Some(parts) = key.rsa_parts()? {
                    jwk.d = Some(encode(&parts.d));
                    jwk.p = Some(encode(&parts.p));
                    jwk.q = Some(encode(&parts.q));
                    jwk.dp = Some(encode(&parts.dp));
                    jwk.dq = Some(encode(&parts.dq));
                    jwk.qi = Some(encode(&parts.qi));
                }
            }
            PrivateKey::Ec(scalar) => jwk.d = Some(encode(&scalar.scalar_bytes())),
            PrivateKey::Ed25519(signing) => {
                let seed = Zeroizing::new(signing.to_bytes());
                jwk.d = Some(encode(&*seed));
            }
        }
        Ok(jwk)
    }

    /// Parse a document from JSON
    ///
    /// # Errors
    ///
    /// Returns [`JwkError::Json`] if the text is not a JWK object.
    pub fn from_json(text: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(text)?)
    }

    /// True iff no private member is present
    #[must_use]
    pub fn is_public(&self) -> bool {
        self.private_members().iter().all(|(_, value)| value.is_none())
    }

    pub(crate) fn private_members(&self) -> [(&'static str, &Option<String>); 6] {
        [
            ("d", &self.d),
            ("p", &self.p),
            ("q", &self.q),
            ("dp", &self.dp),
            ("dq", &self.dq),
            ("qi", &self.qi),
        ]
    }
}

impl Drop for Jwk {
    fn drop(&mut self) {
        for member in [
            &mut self.d,
            &mut self.p,
            &mut self.q,
            &mut self.dp,
            &mut self.dq,
            &mut self.qi,
        ] {
            member.zeroize();
        }
    }
}

fn encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a present member, wiping the buffer on drop
pub(crate) fn decode_member(member: &'static str, value: &str) -> Result<Zeroizing<Vec<u8>>> {
    URL_SAFE_NO_PAD
        .decode(value)
        .map(Zeroizing::new)
        .map_err(|source| JwkError::Base64 { member, source })
}

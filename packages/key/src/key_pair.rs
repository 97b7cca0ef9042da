//! Key material
//!
//! The set of key families is closed by the policy table, so keys are modelled
//! as sum types with one variant per family and matched exhaustively.

use ed25519_dalek::{SigningKey as Ed25519SigningKey, VerifyingKey as Ed25519VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rsa::pkcs1::der::Decode;
use rsa::pkcs1::{EncodeRsaPrivateKey, EncodeRsaPublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::algorithm::Algorithm;
use crate::policy::{EcCurve, KeySpec};
use crate::{KeyError, Result};

/// Private elliptic-curve key
#[derive(Debug, Clone)]
pub enum EcPrivateKey {
    /// P-256 scalar
    P256(p256::SecretKey),
    /// P-384 scalar
    P384(p384::SecretKey),
    /// P-521 scalar
    P521(p521::SecretKey),
}

impl EcPrivateKey {
    /// Parse a big-endian scalar of exactly the curve's field size
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if the length is wrong or the scalar is
    /// zero or not below the curve order.
    pub fn from_scalar(curve: EcCurve, scalar: &[u8]) -> Result<Self> {
        if scalar.len() != curve.field_size() {
            return Err(KeyError::encoding(format!(
                "{} scalar must be {} bytes, got {}",
                curve.jwk_name(),
                curve.field_size(),
                scalar.len()
            )));
        }

        let invalid = |e: p256::elliptic_curve::Error| {
            KeyError::encoding(format!("invalid {} scalar: {e}", curve.jwk_name()))
        };
        Ok(match curve {
            EcCurve::P256 => EcPrivateKey::P256(p256::SecretKey::from_slice(scalar).map_err(invalid)?),
            EcCurve::P384 => EcPrivateKey::P384(p384::SecretKey::from_slice(scalar).map_err(invalid)?),
            EcCurve::P521 => EcPrivateKey::P521(p521::SecretKey::from_slice(scalar).map_err(invalid)?),
        })
    }

    /// Curve this key lives on
    #[must_use]
    pub const fn curve(&self) -> EcCurve {
        match self {
            EcPrivateKey::P256(_) => EcCurve::P256,
            EcPrivateKey::P384(_) => EcCurve::P384,
            EcPrivateKey::P521(_) => EcCurve::P521,
        }
    }

    /// Big-endian scalar, left-padded to the field size
    #[must_use]
    pub fn scalar_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(match self {
            EcPrivateKey::P256(k) => k.to_bytes().to_vec(),
            EcPrivateKey::P384(k) => k.to_bytes().to_vec(),
            EcPrivateKey::P521(k) => k.to_bytes().to_vec(),
        })
    }

    /// Derive the public point
    #[must_use]
    pub fn public_key(&self) -> EcPublicKey {
        match self {
            EcPrivateKey::P256(k) => EcPublicKey::P256(k.public_key()),
            EcPrivateKey::P384(k) => EcPublicKey::P384(k.public_key()),
            EcPrivateKey::P521(k) => EcPublicKey::P521(k.public_key()),
        }
    }

    /// SEC1 `ECPrivateKey` DER encoding
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if DER serialization fails.
    pub fn to_sec1_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        let encoded = match self {
            EcPrivateKey::P256(k) => k.to_sec1_der(),
            EcPrivateKey::P384(k) => k.to_sec1_der(),
            EcPrivateKey::P521(k) => k.to_sec1_der(),
        };
        encoded.map_err(|e| KeyError::encoding(format!("EC private key encoding failed: {e}")))
    }
}

/// Public elliptic-curve key
#[derive(Debug, Clone, PartialEq)]
pub enum EcPublicKey {
    /// P-256 point
    P256(p256::PublicKey),
    /// P-384 point
    P384(p384::PublicKey),
    /// P-521 point
    P521(p521::PublicKey),
}

impl EcPublicKey {
    /// Decode a SEC1 point, rejecting points not on `curve`
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if the bytes are not a valid point on the curve.
    pub fn from_sec1(curve: EcCurve, point: &[u8]) -> Result<Self> {
        let invalid = |e: p256::elliptic_curve::Error| {
            KeyError::encoding(format!("invalid {} point: {e}", curve.jwk_name()))
        };
        Ok(match curve {
            EcCurve::P256 => EcPublicKey::P256(p256::PublicKey::from_sec1_bytes(point).map_err(invalid)?),
            EcCurve::P384 => EcPublicKey::P384(p384::PublicKey::from_sec1_bytes(point).map_err(invalid)?),
            EcCurve::P521 => EcPublicKey::P521(p521::PublicKey::from_sec1_bytes(point).map_err(invalid)?),
        })
    }

    /// Decode affine coordinates, each exactly the curve's field size
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] on a length mismatch or an off-curve point.
    pub fn from_coordinates(curve: EcCurve, x: &[u8], y: &[u8]) -> Result<Self> {
        let size = curve.field_size();
        if x.len() != size || y.len() != size {
            return Err(KeyError::encoding(format!(
                "{} coordinates must be {size} bytes each",
                curve.jwk_name()
            )));
        }
        let mut point = Vec::with_capacity(1 + 2 * size);
        point.push(0x04);
        point.extend_from_slice(x);
        point.extend_from_slice(y);
        Self::from_sec1(curve, &point)
    }

    /// Curve this point lives on
    #[must_use]
    pub const fn curve(&self) -> EcCurve {
        match self {
            EcPublicKey::P256(_) => EcCurve::P256,
            EcPublicKey::P384(_) => EcCurve::P384,
            EcPublicKey::P521(_) => EcCurve::P521,
        }
    }

    /// Uncompressed SEC1 encoding (`0x04 || x || y`)
    #[must_use]
    pub fn to_sec1_uncompressed(&self) -> Vec<u8> {
        match self {
            EcPublicKey::P256(k) => k.to_encoded_point(false).as_bytes().to_vec(),
            EcPublicKey::P384(k) => k.to_encoded_point(false).as_bytes().to_vec(),
            EcPublicKey::P521(k) => k.to_encoded_point(false).as_bytes().to_vec(),
        }
    }

    /// Affine `(x, y)`, each left-padded to the field size
    #[must_use]
    pub fn coordinates(&self) -> (Vec<u8>, Vec<u8>) {
        let point = self.to_sec1_uncompressed();
        let size = self.curve().field_size();
        (point[1..=size].to_vec(), point[1 + size..].to_vec())
    }

    /// SubjectPublicKeyInfo DER encoding
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if DER serialization fails.
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        use p256::pkcs8::EncodePublicKey;

        let encoded = match self {
            EcPublicKey::P256(k) => k.to_public_key_der(),
            EcPublicKey::P384(k) => k.to_public_key_der(),
            EcPublicKey::P521(k) => k.to_public_key_der(),
        };
        encoded
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| KeyError::encoding(format!("EC public key encoding failed: {e}")))
    }
}

/// Public RSA integers, minimal big-endian
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaPublicParts {
    /// Modulus
    pub n: Vec<u8>,
    /// Public exponent
    pub e: Vec<u8>,
}

impl RsaPublicParts {
    /// Modulus size in bits
    #[must_use]
    pub fn modulus_bits(&self) -> usize {
        match self.n.iter().position(|&b| b != 0) {
            Some(first) => (self.n.len() - first) * 8 - self.n[first].leading_zeros() as usize,
            None => 0,
        }
    }
}

/// Private RSA integers (two-prime CRT form), minimal big-endian
#[derive(Debug, Clone)]
pub struct RsaPrivateParts {
    /// Public half
    pub public: RsaPublicParts,
    /// Private exponent
    pub d: Zeroizing<Vec<u8>>,
    /// First prime factor
    pub p: Zeroizing<Vec<u8>>,
    /// Second prime factor
    pub q: Zeroizing<Vec<u8>>,
    /// `d mod (p - 1)`
    pub dp: Zeroizing<Vec<u8>>,
    /// `d mod (q - 1)`
    pub dq: Zeroizing<Vec<u8>>,
    /// `q^-1 mod p`
    pub qi: Zeroizing<Vec<u8>>,
}

fn rsa_public_parts(key: &RsaPublicKey) -> Result<RsaPublicParts> {
    let der = EncodeRsaPublicKey::to_pkcs1_der(key)
        .map_err(|e| KeyError::encoding(format!("Public key encoding failed: {e}")))?;
    let parsed = rsa::pkcs1::RsaPublicKey::from_der(der.as_bytes())
        .map_err(|e| KeyError::encoding(format!("Public key decoding failed: {e}")))?;

    Ok(RsaPublicParts {
        n: parsed.modulus.as_bytes().to_vec(),
        e: parsed.public_exponent.as_bytes().to_vec(),
    })
}

fn rsa_private_parts(key: &RsaPrivateKey) -> Result<RsaPrivateParts> {
    let der = EncodeRsaPrivateKey::to_pkcs1_der(key)
        .map_err(|e| KeyError::encoding(format!("Private key encoding failed: {e}")))?;
    let parsed = rsa::pkcs1::RsaPrivateKey::from_der(der.as_bytes())
        .map_err(|e| KeyError::encoding(format!("Private key decoding failed: {e}")))?;

    let secret = |value: &[u8]| Zeroizing::new(value.to_vec());
    Ok(RsaPrivateParts {
        public: RsaPublicParts {
            n: parsed.modulus.as_bytes().to_vec(),
            e: parsed.public_exponent.as_bytes().to_vec(),
        },
        d: secret(parsed.private_exponent.as_bytes()),
        p: secret(parsed.prime1.as_bytes()),
        q: secret(parsed.prime2.as_bytes()),
        dp: secret(parsed.exponent1.as_bytes()),
        dq: secret(parsed.exponent2.as_bytes()),
        qi: secret(parsed.coefficient.as_bytes()),
    })
}

/// Private key of any supported family
#[derive(Debug, Clone)]
pub enum PrivateKey {
    /// RSA private key
    Rsa(RsaPrivateKey),
    /// Elliptic-curve private key
    Ec(EcPrivateKey),
    /// Ed25519 signing key
    Ed25519(Ed25519SigningKey),
}

impl PrivateKey {
    /// Derive the matching public key
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        match self {
            PrivateKey::Rsa(k) => PublicKey::Rsa(RsaPublicKey::from(k)),
            PrivateKey::Ec(k) => PublicKey::Ec(k.public_key()),
            PrivateKey::Ed25519(k) => PublicKey::Ed25519(k.verifying_key()),
        }
    }

    /// RSA integers, if this is an RSA key
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if the key cannot be round-tripped through PKCS#1.
    pub fn rsa_parts(&self) -> Result<Option<RsaPrivateParts>> {
        match self {
            PrivateKey::Rsa(k) => rsa_private_parts(k).map(Some),
            PrivateKey::Ec(_) | PrivateKey::Ed25519(_) => Ok(None),
        }
    }

    /// Short family name for diagnostics
    #[must_use]
    pub const fn family(&self) -> &'static str {
        match self {
            PrivateKey::Rsa(_) => "RSA",
            PrivateKey::Ec(_) => "EC",
            PrivateKey::Ed25519(_) => "Ed25519",
        }
    }
}

/// Public key of any supported family
#[derive(Debug, Clone, PartialEq)]
pub enum PublicKey {
    /// RSA public key
    Rsa(RsaPublicKey),
    /// Elliptic-curve public point
    Ec(EcPublicKey),
    /// Ed25519 verifying key
    Ed25519(Ed25519VerifyingKey),
}

impl PublicKey {
    /// Canonical byte encoding of the public component
    ///
    /// PKCS#1 DER for RSA, uncompressed SEC1 for EC, the raw 32 bytes for Ed25519.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if RSA DER serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        match self {
            PublicKey::Rsa(k) => EncodeRsaPublicKey::to_pkcs1_der(k)
                .map(|doc| doc.as_bytes().to_vec())
                .map_err(|e| KeyError::encoding(format!("Public key encoding failed: {e}"))),
            PublicKey::Ec(k) => Ok(k.to_sec1_uncompressed()),
            PublicKey::Ed25519(k) => Ok(k.to_bytes().to_vec()),
        }
    }

    /// RSA integers, if this is an RSA key
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Encoding`] if the key cannot be round-tripped through PKCS#1.
    pub fn rsa_parts(&self) -> Result<Option<RsaPublicParts>> {
        match self {
            PublicKey::Rsa(k) => rsa_public_parts(k).map(Some),
            PublicKey::Ec(_) | PublicKey::Ed25519(_) => Ok(None),
        }
    }

    /// Short family name for diagnostics
    #[must_use]
    pub const fn family(&self) -> &'static str {
        match self {
            PublicKey::Rsa(_) => "RSA",
            PublicKey::Ec(_) => "EC",
            PublicKey::Ed25519(_) => "Ed25519",
        }
    }
}

/// Validated public/private key pair for one algorithm
///
/// Only the key generator builds these; the public half is always derived
/// from the private half.
#[derive(Debug, Clone)]
pub struct KeyPair {
    algorithm: Algorithm,
    spec: KeySpec,
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    /// Pair a private key with its derived public key and check consistency
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidGeneratedKey`] if the key does not match `spec`
    /// or fails structural validation.
    pub(crate) fn from_private(
        algorithm: Algorithm,
        spec: KeySpec,
        private: PrivateKey,
    ) -> Result<Self> {
        let public = private.public_key();
        let pair = Self {
            algorithm,
            spec,
            public,
            private,
        };
        pair.verify()?;
        Ok(pair)
    }

    /// Algorithm the pair was generated for
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Resolved key requirement
    #[must_use]
    pub const fn spec(&self) -> KeySpec {
        self.spec
    }

    /// Public half
    #[must_use]
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Private half
    #[must_use]
    pub const fn private_key(&self) -> &PrivateKey {
        &self.private
    }

    /// Structural and round-trip validation of both halves
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidGeneratedKey`] describing the first failed check.
    pub fn verify(&self) -> Result<()> {
        let invalid = |e: KeyError| KeyError::invalid_generated(e.to_string());

        match (&self.private, &self.public, self.spec) {
            (PrivateKey::Rsa(private), PublicKey::Rsa(public), KeySpec::Rsa { bits }) => {
                private.validate().map_err(|e| {
                    KeyError::invalid_generated(format!("RSA private key failed validation: {e}"))
                })?;
                let derived = rsa_public_parts(&RsaPublicKey::from(private)).map_err(invalid)?;
                let returned = rsa_public_parts(public).map_err(invalid)?;
                if derived != returned {
                    return Err(KeyError::invalid_generated(
                        "RSA public key does not match private key",
                    ));
                }
                if returned.modulus_bits() != bits as usize {
                    return Err(KeyError::invalid_generated(format!(
                        "RSA modulus is {} bits, expected {bits}",
                        returned.modulus_bits()
                    )));
                }
            }
            (PrivateKey::Ec(private), PublicKey::Ec(public), KeySpec::Ec(curve)) => {
                if private.curve() != curve || public.curve() != curve {
                    return Err(KeyError::invalid_generated(format!(
                        "EC key is not on {}",
                        curve.jwk_name()
                    )));
                }
                let point = public.to_sec1_uncompressed();
                EcPublicKey::from_sec1(curve, &point).map_err(invalid)?;
                if private.public_key().to_sec1_uncompressed() != point {
                    return Err(KeyError::invalid_generated(
                        "EC public point does not match private scalar",
                    ));
                }
            }
            (PrivateKey::Ed25519(private), PublicKey::Ed25519(public), KeySpec::Ed25519) => {
                Ed25519VerifyingKey::from_bytes(public.as_bytes()).map_err(|e| {
                    KeyError::invalid_generated(format!("Ed25519 public key is invalid: {e}"))
                })?;
                if private.verifying_key().as_bytes() != public.as_bytes() {
                    return Err(KeyError::invalid_generated(
                        "Ed25519 public key does not match private key",
                    ));
                }
            }
            (private, public, spec) => {
                return Err(KeyError::invalid_generated(format!(
                    "key family mismatch: private {}, public {}, required {spec:?}",
                    private.family(),
                    public.family()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::SignatureAlgorithm;

    fn ec_key(curve: EcCurve, fill: u8) -> EcPrivateKey {
        EcPrivateKey::from_scalar(curve, &vec![fill; curve.field_size()]).unwrap()
    }

    fn pair(spec: KeySpec, public: PublicKey, private: PrivateKey) -> KeyPair {
        KeyPair {
            algorithm: Algorithm::Signature(SignatureAlgorithm::ES256),
            spec,
            public,
            private,
        }
    }

    #[test]
    fn test_matching_pair_verifies() {
        let private = PrivateKey::Ec(ec_key(EcCurve::P256, 1));
        let pair = pair(KeySpec::Ec(EcCurve::P256), private.public_key(), private);
        pair.verify().unwrap();
    }

    #[test]
    fn test_mismatched_public_point_is_rejected() {
        let private = PrivateKey::Ec(ec_key(EcCurve::P256, 1));
        let foreign = PrivateKey::Ec(ec_key(EcCurve::P256, 2)).public_key();
        let pair = pair(KeySpec::Ec(EcCurve::P256), foreign, private);
        assert!(matches!(pair.verify(), Err(KeyError::InvalidGeneratedKey(_))));
    }

    #[test]
    fn test_wrong_curve_is_rejected() {
        let private = PrivateKey::Ec(ec_key(EcCurve::P384, 3));
        let pair = pair(KeySpec::Ec(EcCurve::P256), private.public_key(), private);
        assert!(matches!(pair.verify(), Err(KeyError::InvalidGeneratedKey(_))));
    }

    #[test]
    fn test_family_mismatch_is_rejected() {
        let private = PrivateKey::Ed25519(Ed25519SigningKey::from_bytes(&[4u8; 32]));
        let public = PrivateKey::Ec(ec_key(EcCurve::P256, 5)).public_key();
        let pair = pair(KeySpec::Ed25519, public, private);
        assert!(matches!(pair.verify(), Err(KeyError::InvalidGeneratedKey(_))));
    }

    #[test]
    fn test_mismatched_ed25519_key_is_rejected() {
        let private = PrivateKey::Ed25519(Ed25519SigningKey::from_bytes(&[6u8; 32]));
        let other = PrivateKey::Ed25519(Ed25519SigningKey::from_bytes(&[7u8; 32])).public_key();
        let pair = pair(KeySpec::Ed25519, other, private);
        assert!(matches!(pair.verify(), Err(KeyError::InvalidGeneratedKey(_))));
    }
}

//! Algorithm policy table
//!
//! Maps every algorithm identifier to the key family it requires and to the
//! size rule applied to a caller's request. Resolution is pure and
//! deterministic: the same `(algorithm, size)` always resolves, or fails, the
//! same way.

use crate::algorithm::{Algorithm, EncryptionAlgorithm, SignatureAlgorithm};
use crate::{KeyError, Result};

/// Smallest RSA modulus accepted for any RSA-based algorithm
pub const RSA_MIN_BITS: u32 = 2048;

/// Modulus used when the caller does not request one
pub const RSA_DEFAULT_BITS: u32 = 2048;

/// Requested key size
///
/// `0` and "omitted" are the same request: both select the algorithm default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeySize {
    /// Use the algorithm's default size
    #[default]
    Default,
    /// Explicit size in bits; `Bits(0)` resolves exactly like `Default`
    Bits(u32),
}

impl KeySize {
    /// Requested bits, `0` for the default
    #[must_use]
    pub const fn requested_bits(self) -> u32 {
        match self {
            KeySize::Default => 0,
            KeySize::Bits(bits) => bits,
        }
    }

    /// Collapse `Bits(0)` into `Default`
    #[must_use]
    pub const fn normalized(self) -> Self {
        match self {
            KeySize::Bits(0) => KeySize::Default,
            other => other,
        }
    }
}

impl From<u32> for KeySize {
    fn from(bits: u32) -> Self {
        match bits {
            0 => KeySize::Default,
            bits => KeySize::Bits(bits),
        }
    }
}

/// NIST prime curves used for ECDSA and ECDH-ES keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    /// secp256r1
    P256,
    /// secp384r1
    P384,
    /// secp521r1
    P521,
}

impl EcCurve {
    /// Curve size in bits
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            EcCurve::P256 => 256,
            EcCurve::P384 => 384,
            EcCurve::P521 => 521,
        }
    }

    /// Length in bytes of a coordinate or scalar on this curve
    #[must_use]
    pub const fn field_size(self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }

    /// JWK `crv` value
    #[must_use]
    pub const fn jwk_name(self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    /// Look up a curve by its JWK `crv` value
    #[must_use]
    pub fn from_jwk_name(name: &str) -> Option<Self> {
        match name {
            "P-256" => Some(EcCurve::P256),
            "P-384" => Some(EcCurve::P384),
            "P-521" => Some(EcCurve::P521),
            _ => None,
        }
    }
}

/// Fully resolved key requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySpec {
    /// Elliptic-curve key on the given curve
    Ec(EcCurve),
    /// Ed25519 key (256 bits)
    Ed25519,
    /// RSA key with the given modulus size
    Rsa {
        /// Modulus size in bits
        bits: u32,
    },
}

impl KeySpec {
    /// Key size in bits
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            KeySpec::Ec(curve) => curve.bits(),
            KeySpec::Ed25519 => 256,
            KeySpec::Rsa { bits } => bits,
        }
    }
}

/// Size rule attached to an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePolicy {
    /// Exactly one key shape; only that size (or the default) is accepted
    Fixed(KeySpec),
    /// RSA modulus with a default and a floor
    RsaModulus {
        /// Size used for [`KeySize::Default`]
        default: u32,
        /// Smallest accepted size
        minimum: u32,
    },
    /// ECDH: the requested size picks the curve, P-256 by default
    CurveBySize,
}

impl SignatureAlgorithm {
    /// Size rule for this algorithm
    #[must_use]
    pub const fn size_policy(self) -> SizePolicy {
        match self {
            SignatureAlgorithm::ES256 => SizePolicy::Fixed(KeySpec::Ec(EcCurve::P256)),
            SignatureAlgorithm::ES384 => SizePolicy::Fixed(KeySpec::Ec(EcCurve::P384)),
            // "512" names the SHA-512 digest; the curve is P-521
            SignatureAlgorithm::ES512 => SizePolicy::Fixed(KeySpec::Ec(EcCurve::P521)),
            SignatureAlgorithm::EdDSA => SizePolicy::Fixed(KeySpec::Ed25519),
            SignatureAlgorithm::RS256
            | SignatureAlgorithm::RS384
            | SignatureAlgorithm::RS512
            | SignatureAlgorithm::PS256
            | SignatureAlgorithm::PS384
            | SignatureAlgorithm::PS512 => SizePolicy::RsaModulus {
                default: RSA_DEFAULT_BITS,
                minimum: RSA_MIN_BITS,
            },
        }
    }
}

impl EncryptionAlgorithm {
    /// Size rule for this algorithm
    #[must_use]
    pub const fn size_policy(self) -> SizePolicy {
        match self {
            EncryptionAlgorithm::Rsa1_5
            | EncryptionAlgorithm::RsaOaep
            | EncryptionAlgorithm::RsaOaep256 => SizePolicy::RsaModulus {
                default: RSA_DEFAULT_BITS,
                minimum: RSA_MIN_BITS,
            },
            EncryptionAlgorithm::EcdhEs
            | EncryptionAlgorithm::EcdhEsA128Kw
            | EncryptionAlgorithm::EcdhEsA192Kw
            | EncryptionAlgorithm::EcdhEsA256Kw => SizePolicy::CurveBySize,
        }
    }
}

impl Algorithm {
    /// Size rule for this algorithm
    #[must_use]
    pub const fn size_policy(self) -> SizePolicy {
        match self {
            Algorithm::Signature(alg) => alg.size_policy(),
            Algorithm::Encryption(alg) => alg.size_policy(),
        }
    }

    /// Resolve a size request against this algorithm's policy
    ///
    /// # Errors
    ///
    /// - [`KeyError::UnsupportedKeySize`] for a fixed-size algorithm asked for another size
    /// - [`KeyError::KeyTooShort`] for an RSA modulus below [`RSA_MIN_BITS`]
    /// - [`KeyError::UnsupportedCurveSize`] for an ECDH size other than 256, 384 or 521
    pub fn resolve(self, size: KeySize) -> Result<KeySpec> {
        self.size_policy().resolve(self, size)
    }
}

impl SizePolicy {
    /// Apply this rule to a size request made for `algorithm`
    ///
    /// # Errors
    ///
    /// See [`Algorithm::resolve`].
    pub fn resolve(self, algorithm: Algorithm, size: KeySize) -> Result<KeySpec> {
        match (self, size.normalized()) {
            (SizePolicy::Fixed(spec), KeySize::Default) => Ok(spec),
            (SizePolicy::Fixed(spec), KeySize::Bits(bits)) => {
                if bits == spec.bits() {
                    Ok(spec)
                } else {
                    Err(KeyError::UnsupportedKeySize {
                        algorithm: algorithm.to_string(),
                        requested: bits,
                        required: spec.bits(),
                    })
                }
            }
            (SizePolicy::RsaModulus { default, .. }, KeySize::Default) => {
                Ok(KeySpec::Rsa { bits: default })
            }
            (SizePolicy::RsaModulus { minimum, .. }, KeySize::Bits(bits)) => {
                if bits < minimum {
                    Err(KeyError::KeyTooShort {
                        algorithm: algorithm.to_string(),
                        requested: bits,
                        minimum,
                    })
                } else {
                    Ok(KeySpec::Rsa { bits })
                }
            }
            (SizePolicy::CurveBySize, KeySize::Default | KeySize::Bits(256)) => {
                Ok(KeySpec::Ec(EcCurve::P256))
            }
            (SizePolicy::CurveBySize, KeySize::Bits(384)) => Ok(KeySpec::Ec(EcCurve::P384)),
            (SizePolicy::CurveBySize, KeySize::Bits(521)) => Ok(KeySpec::Ec(EcCurve::P521)),
            (SizePolicy::CurveBySize, KeySize::Bits(bits)) => Err(KeyError::UnsupportedCurveSize {
                algorithm: algorithm.to_string(),
                requested: bits,
            }),
        }
    }
}

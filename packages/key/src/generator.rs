//! Key generation dispatch
//!
//! Every request is first resolved against the policy table, then the key is
//! built with the family's standard construction using randomness drawn only
//! from the caller's [`EntropySource`]. A key pair leaves this module only
//! after passing [`KeyPair::verify`].

use ed25519_dalek::SigningKey as Ed25519SigningKey;
use jwkgen_common::LoggingTransformer;
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use crate::algorithm::{Algorithm, EncryptionAlgorithm, KeyUse, SignatureAlgorithm};
use crate::entropy::EntropySource;
use crate::key_pair::{EcPrivateKey, KeyPair, PrivateKey};
use crate::policy::{EcCurve, KeySize, KeySpec};
use crate::{KeyError, Result};

/// Rejection-sampling budget for EC scalars
///
/// A uniformly random candidate is rejected with probability below 2^-32 on
/// every supported curve, so exhausting this budget means the source is broken.
const MAX_SCALAR_ATTEMPTS: usize = 64;

/// Generates key pairs for JOSE algorithms
pub struct KeyGenerator<'a> {
    entropy: &'a mut EntropySource,
}

impl<'a> KeyGenerator<'a> {
    /// Create a generator drawing from `entropy`
    pub fn new(entropy: &'a mut EntropySource) -> Self {
        Self { entropy }
    }

    /// Generate a key pair for a signature algorithm
    ///
    /// # Errors
    ///
    /// - [`KeyError::UnsupportedKeySize`] if a fixed-size algorithm is asked for another size
    /// - [`KeyError::KeyTooShort`] if an RSA modulus below 2048 bits is requested
    /// - [`KeyError::KeyGeneration`], [`KeyError::RandomSourceFailure`] or
    ///   [`KeyError::InvalidGeneratedKey`] if construction fails
    pub fn generate_for_signature(
        &mut self,
        algorithm: SignatureAlgorithm,
        size: KeySize,
    ) -> Result<KeyPair> {
        self.generate_for(Algorithm::Signature(algorithm), size)
    }

    /// Generate a key pair for a key management (encryption) algorithm
    ///
    /// # Errors
    ///
    /// - [`KeyError::KeyTooShort`] if an RSA modulus below 2048 bits is requested
    /// - [`KeyError::UnsupportedCurveSize`] if an ECDH size is not 256, 384 or 521
    /// - [`KeyError::KeyGeneration`], [`KeyError::RandomSourceFailure`] or
    ///   [`KeyError::InvalidGeneratedKey`] if construction fails
    pub fn generate_for_encryption(
        &mut self,
        algorithm: EncryptionAlgorithm,
        size: KeySize,
    ) -> Result<KeyPair> {
        self.generate_for(Algorithm::Encryption(algorithm), size)
    }

    /// Parse `identifier` under `key_use` and dispatch to the matching entry point
    ///
    /// # Errors
    ///
    /// [`KeyError::UnknownAlgorithm`] if the identifier is not valid for `key_use`,
    /// otherwise as for the typed entry points.
    pub fn generate(&mut self, key_use: KeyUse, identifier: &str, size: KeySize) -> Result<KeyPair> {
        match Algorithm::parse(key_use, identifier)? {
            Algorithm::Signature(alg) => self.generate_for_signature(alg, size),
            Algorithm::Encryption(alg) => self.generate_for_encryption(alg, size),
        }
    }

    fn generate_for(&mut self, algorithm: Algorithm, size: KeySize) -> Result<KeyPair> {
        let key_use = algorithm.key_use();
        let result = algorithm.resolve(size).and_then(|spec| {
            log::debug!(
                "Resolved {algorithm} (requested {} bits) to {spec:?}",
                size.requested_bits()
            );
            let private = self.generate_private(spec)?;
            KeyPair::from_private(algorithm, spec, private)
        });

        match &result {
            Ok(pair) => LoggingTransformer::log_key_generated(
                key_use.as_str(),
                algorithm.as_str(),
                pair.spec().bits() as usize,
            ),
            Err(e) => LoggingTransformer::log_key_rejected(key_use.as_str(), algorithm.as_str(), e),
        }
        result
    }

    fn generate_private(&mut self, spec: KeySpec) -> Result<PrivateKey> {
        match spec {
            KeySpec::Ec(curve) => self.generate_ec(curve).map(PrivateKey::Ec),
            KeySpec::Ed25519 => {
                let mut seed = Zeroizing::new([0u8; 32]);
                self.entropy.fill(&mut *seed);
                Ok(PrivateKey::Ed25519(Ed25519SigningKey::from_bytes(&seed)))
            }
            KeySpec::Rsa { bits } => {
                let key = RsaPrivateKey::new(self.entropy.rng(), bits as usize).map_err(|e| {
                    KeyError::KeyGeneration(format!("RSA key generation failed: {e}"))
                })?;
                Ok(PrivateKey::Rsa(key))
            }
        }
    }

    /// Draw a scalar in `[1, n)` by rejection sampling
    fn generate_ec(&mut self, curve: EcCurve) -> Result<EcPrivateKey> {
        // Clear the bits above the curve size so P-521 candidates are not
        // rejected most of the time.
        let excess_bits = curve.field_size() * 8 - curve.bits() as usize;
        let top_mask = 0xffu8 >> excess_bits;

        for _ in 0..MAX_SCALAR_ATTEMPTS {
            let mut candidate = self.entropy.bytes(curve.field_size());
            candidate[0] &= top_mask;
            if let Ok(key) = EcPrivateKey::from_scalar(curve, &candidate) {
                return Ok(key);
            }
        }

        Err(KeyError::RandomSourceFailure(format!(
            "no valid {} scalar after {MAX_SCALAR_ATTEMPTS} draws",
            curve.jwk_name()
        )))
    }
}

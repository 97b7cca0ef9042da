//! Secure random source
//!
//! A single [`EntropySource`] is created at the boundary and lent to every
//! operation that needs randomness (key generation, random key ids). The
//! library never reaches for process-global random state.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use zeroize::Zeroizing;

use crate::{KeyError, Result};

/// Cryptographically secure random source seeded from the operating system
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    /// Seed a new source from the operating system
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::RandomSourceFailure`] if the OS random source is unavailable.
    pub fn from_os() -> Result<Self> {
        let rng = StdRng::try_from_os_rng()
            .map_err(|e| KeyError::RandomSourceFailure(format!("can't seed from OS: {e}")))?;
        log::debug!("Entropy source seeded from OS");
        Ok(Self { rng })
    }

    /// Deterministic source for reproducible tests and fixtures
    ///
    /// Never use this for real keys.
    #[must_use]
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            rng: StdRng::from_seed(seed),
        }
    }

    /// Fill `dest` with random bytes
    pub fn fill(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }

    /// Draw `len` random bytes into a buffer wiped on drop
    pub fn bytes(&mut self, len: usize) -> Zeroizing<Vec<u8>> {
        let mut bytes = Zeroizing::new(vec![0u8; len]);
        self.rng.fill_bytes(&mut bytes);
        bytes
    }

    /// Borrow the underlying generator for primitives that drive their own sampling
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl std::fmt::Debug for EntropySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropySource").finish_non_exhaustive()
    }
}

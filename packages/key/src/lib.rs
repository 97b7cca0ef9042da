//! # JWK Key Generation
//!
//! Algorithm-driven asymmetric key generation for JOSE.
//!
//! ## Features
//!
//! - **Policy Table**: every JOSE identifier maps to exactly one key family and size rule
//! - **Key Generation**: RSA, NIST P-curves and Ed25519 from an injected entropy source
//! - **Self-Verification**: no key pair leaves the generator without passing consistency checks
//! - **Artifact Output**: deterministic naming and exclusive, permission-restricted file creation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jwkgen_key::{EntropySource, KeyGenerator, KeySize, KeyUse};
//!
//! # fn main() -> jwkgen_key::Result<()> {
//! let mut entropy = EntropySource::from_os()?;
//! let pair = KeyGenerator::new(&mut entropy).generate(KeyUse::Signature, "ES256", KeySize::Default)?;
//! assert_eq!(pair.spec().bits(), 256);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod algorithm;
pub mod entropy;
pub mod error;
pub mod generator;
pub mod key_id;
pub mod key_pair;
pub mod pem;
pub mod policy;
pub mod store;

// Re-export core types
pub use algorithm::{Algorithm, EncryptionAlgorithm, KeyUse, SignatureAlgorithm};
pub use entropy::EntropySource;
pub use error::{KeyError, Result};
pub use generator::KeyGenerator;
pub use key_id::KeyId;
pub use key_pair::{
    EcPrivateKey, EcPublicKey, KeyPair, PrivateKey, PublicKey, RsaPrivateParts, RsaPublicParts,
};
pub use policy::{EcCurve, KeySize, KeySpec, SizePolicy, RSA_DEFAULT_BITS, RSA_MIN_BITS};
pub use store::{Artifact, ArtifactKind, ArtifactName, Visibility};

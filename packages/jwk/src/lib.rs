//! # JWK Documents
//!
//! Serializes generated key pairs as JSON Web Keys and single-key JWK sets,
//! and checks that the public and private documents describe the same key in
//! the right roles before anything is written.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod document;
pub mod error;
pub mod render;
pub mod set;
mod validate;

pub use document::{Jwk, KeyType};
pub use error::{JwkError, Result};
pub use render::render;
pub use set::{JwkPair, JwkSet};

//! # jwk-keygen
//!
//! Command-line front end: parses arguments into a [`KeygenRequest`], then
//! generates a key pair and prints or writes its JWK, JWKS and PEM forms.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod run;

pub use cli::Cli;
pub use config::{KeyIdSource, KeygenRequest, OutputOptions};
pub use error::{CliError, Result};
pub use run::run;

//! Command-line definition

use clap::builder::PossibleValuesParser;
use clap::Parser;
use std::path::PathBuf;

use jwkgen_key::{Algorithm, KeySize, KeyUse};

use crate::config::{KeyIdSource, KeygenRequest, OutputOptions};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "jwk-keygen")]
#[command(version)]
#[command(about = "Generate a JWK key pair for a JOSE algorithm")]
pub struct Cli {
    /// Intended key use: `sig` or `enc`
    #[arg(long = "use", value_name = "USE")]
    pub key_use: KeyUse,

    /// Algorithm identifier
    #[arg(long, value_name = "ALG", value_parser = PossibleValuesParser::new(Algorithm::identifiers()))]
    pub alg: String,

    /// Key size in bits; 0 selects the algorithm default
    #[arg(long, default_value_t = 0)]
    pub bits: u32,

    /// Key id; when non-empty, keys are written to files instead of printed
    #[arg(long, conflicts_with = "kid_rand")]
    pub kid: Option<String>,

    /// Generate a random key id
    #[arg(long)]
    pub kid_rand: bool,

    /// Also output the keys as single-key JWK sets
    #[arg(long)]
    pub jwks: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub format: bool,

    /// Also output the keys as PEM blocks
    #[arg(long)]
    pub pem: bool,

    /// Directory for written files (default: working directory)
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

impl Cli {
    /// Convert parsed arguments into a request
    #[must_use]
    pub fn into_request(self) -> KeygenRequest {
        // An empty `--kid` is the same as no key id
        let kid = self.kid.filter(|kid| !kid.is_empty());
        let key_id = match (kid, self.kid_rand) {
            (Some(kid), _) => KeyIdSource::Explicit(kid),
            (None, true) => KeyIdSource::Random,
            (None, false) => KeyIdSource::None,
        };

        KeygenRequest {
            key_use: self.key_use,
            algorithm: self.alg,
            size: KeySize::from(self.bits),
            key_id,
            output: OutputOptions {
                directory: self.out_dir.unwrap_or_default(),
                pretty: self.format,
                emit_jwks: self.jwks,
                emit_pem: self.pem,
            },
        }
    }
}

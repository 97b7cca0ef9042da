//! Main entry point for the jwk-keygen CLI

use std::io;
use std::process::ExitCode;

use clap::Parser;
use jwkgen::{Cli, CliError};
use jwkgen_common::LoggingTransformer;
use jwkgen_key::EntropySource;

fn main() -> ExitCode {
    // Initialize structured logging
    LoggingTransformer::init();

    let request = Cli::parse().into_request();
    let result = EntropySource::from_os()
        .map_err(CliError::from)
        .and_then(|mut entropy| jwkgen::run(request, &mut entropy, &mut io::stdout().lock()));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Key generation failed: {e}");
            eprintln!("jwk-keygen: error: {e}");
            ExitCode::FAILURE
        }
    }
}

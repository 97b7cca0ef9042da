//! Structured logging bootstrap
//!
//! Provides env_logger-based logging and a handful of event helpers so that
//! every crate reports key generation and file output the same way. Key
//! material never passes through these helpers.

use log::{debug, info, warn};
use std::path::Path;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging infrastructure using `env_logger`
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (call once at application startup)
    ///
    /// Configure levels via the `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - policy resolution and entropy draws
    /// - `RUST_LOG=info` - generated keys and written artifacts
    /// - `RUST_LOG=jwkgen_key=debug` - module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            debug!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; only the first call installs the logger.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log the outcome of a key generation request
    pub fn log_key_generated(key_use: &str, algorithm: &str, bits: usize) {
        info!("Generated {algorithm} key for use={key_use} ({bits} bits)");
    }

    /// Log a rejected key generation request
    pub fn log_key_rejected(key_use: &str, algorithm: &str, error: &dyn std::error::Error) {
        warn!("Rejected {algorithm} key request for use={key_use}: {error}");
    }

    /// Log an artifact written to disk together with its permission bits
    pub fn log_artifact_written(path: &Path, mode: u32) {
        info!("Wrote {} (mode {mode:04o})", path.display());
    }

    /// Log a refused or failed artifact write
    pub fn log_artifact_failed(path: &Path, error: &dyn std::error::Error) {
        warn!("Failed to write {}: {error}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_logging_operations() {
        LoggingTransformer::init_test();

        // These should not panic and should produce log output
        LoggingTransformer::log_key_generated("sig", "ES256", 256);
        LoggingTransformer::log_key_rejected(
            "sig",
            "RS256",
            &io::Error::other("too short key for RSA"),
        );
        LoggingTransformer::log_artifact_written(Path::new("jwk_sig_ES256_a-pub.json"), 0o444);
        LoggingTransformer::log_artifact_failed(
            Path::new("jwk_sig_ES256_a.json"),
            &io::Error::from(io::ErrorKind::AlreadyExists),
        );
    }

    #[test]
    fn test_init_test_is_repeatable() {
        LoggingTransformer::init_test();
        LoggingTransformer::init_test();
    }
}

//! Common infrastructure shared by the jwkgen crates
//!
//! Currently this is the logging bootstrap: every crate logs through the `log`
//! facade and the binary installs `env_logger` once at startup.

pub mod logging;

pub use logging::LoggingTransformer;

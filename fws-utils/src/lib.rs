//! fws-utils: Common utilities shared across fws crates
//!
//! This crate provides:
//! - Unified error types ([`FwsError`], [`Result`])
//! - Logging infrastructure ([`init_logging_with_config`], [`LogConfig`])
//! - Configuration loading ([`FwsConfig`], [`ConfigLoader`])
//! - XDG-compliant path utilities ([`paths`] module)

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

// Re-export main types at crate root for convenience
pub use config::{ConfigLoader, FwsConfig, LoggingConfig, TransportConfig};
pub use error::{FwsError, Result};
pub use logging::{init_logging_with_config, LogConfig, LogOutput};

// Re-export commonly used path functions
pub use paths::{config_dir, config_file, log_dir, socket_path, state_dir};

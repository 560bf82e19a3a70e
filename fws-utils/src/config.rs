//! Configuration file loading
//!
//! ```toml
//! [transport]
//! socket_path = "/run/user/1000/fws.sock"
//! max_frame_size = 16777216
//!
//! [logging]
//! filter = "fws_protocol=trace,info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fws_protocol::{MessageKind, DEFAULT_MAX_FRAME_SIZE};

use crate::{config_file, paths, FwsError, Result};

/// Largest frame size the configuration may allow (1 GiB)
pub const MAX_FRAME_SIZE_LIMIT: usize = 1024 * 1024 * 1024;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FwsConfig {
    pub transport: TransportConfig,
    pub logging: LoggingConfig,
}

/// Socket and framing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Overrides the default socket path; `$FWS_SOCKET` still wins
    pub socket_path: Option<PathBuf>,
    /// Largest accepted frame on a stream socket, in bytes
    pub max_frame_size: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            socket_path: None,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
        }
    }
}

impl TransportConfig {
    /// Socket path after applying the environment override
    pub fn socket_path(&self) -> PathBuf {
        paths::resolve_socket_path(
            std::env::var_os(paths::SOCKET_ENV),
            self.socket_path.as_deref(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `$FWS_LOG`
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".into(),
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from default location
    pub fn load() -> Result<FwsConfig> {
        let path = config_file();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            Ok(FwsConfig::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<FwsConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| FwsError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parse configuration from string
    pub fn parse(content: &str, path: &Path) -> Result<FwsConfig> {
        toml::from_str(content).map_err(|e| FwsError::ConfigInvalid {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Validate configuration
    pub fn validate(config: &FwsConfig) -> Result<()> {
        // Must fit at least the smallest frame (tag + window id)
        let min = 1 + MessageKind::Ack.fixed_payload_len();
        let size = config.transport.max_frame_size;
        if size < min || size > MAX_FRAME_SIZE_LIMIT {
            return Err(FwsError::config(format!(
                "max_frame_size must be between {} and {} bytes, got {}",
                min, MAX_FRAME_SIZE_LIMIT, size
            )));
        }

        if config.logging.filter.trim().is_empty() {
            return Err(FwsError::config("logging.filter must not be empty"));
        }

        Ok(())
    }

    /// Load and validate
    pub fn load_and_validate() -> Result<FwsConfig> {
        let config = Self::load()?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load and validate from an explicit path
    pub fn load_and_validate_from(path: &Path) -> Result<FwsConfig> {
        let config = Self::load_from_path(path)?;
        Self::validate(&config)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

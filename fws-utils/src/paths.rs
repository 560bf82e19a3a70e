//! Path utilities for fws
//!
//! Handles XDG Base Directory specification compliance for config and
//! state directories, and resolution of the server socket path.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use fws_protocol::DEFAULT_SOCKET_PATH;

/// Application identifier for XDG directories
const APP_NAME: &str = "fws";

/// Environment variable overriding the socket path
pub const SOCKET_ENV: &str = "FWS_SOCKET";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME)
}

/// Get the Unix socket path for client-server communication
///
/// `$FWS_SOCKET` if set, otherwise [`DEFAULT_SOCKET_PATH`].
pub fn socket_path() -> PathBuf {
    resolve_socket_path(std::env::var_os(SOCKET_ENV), None)
}

/// Pick the socket path: environment first, then configuration, then
/// the well-known default
pub fn resolve_socket_path(env: Option<OsString>, configured: Option<&Path>) -> PathBuf {
    match (env, configured) {
        (Some(path), _) if !path.is_empty() => PathBuf::from(path),
        (_, Some(path)) => path.to_path_buf(),
        _ => PathBuf::from(DEFAULT_SOCKET_PATH),
    }
}

/// Get the configuration directory
///
/// Location: `$XDG_CONFIG_HOME/fws` or `~/.config/fws`
pub fn config_dir() -> PathBuf {
    project_dirs()
        .map(|p| p.config_dir().to_path_buf())
        .unwrap_or_else(fallback_config_dir)
}

/// Get the main configuration file path
///
/// Location: `$XDG_CONFIG_HOME/fws/config.toml`
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the state directory
///
/// Location: `$XDG_STATE_HOME/fws` or `~/.local/state/fws`
pub fn state_dir() -> PathBuf {
    project_dirs()
        .and_then(|p| p.state_dir().map(|d| d.to_path_buf()))
        .unwrap_or_else(fallback_state_dir)
}

/// Get the log directory
///
/// Location: `$XDG_STATE_HOME/fws/log` or `~/.local/state/fws/log`
pub fn log_dir() -> PathBuf {
    state_dir().join("log")
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

// Fallback implementations when ProjectDirs is unavailable

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

fn fallback_config_dir() -> PathBuf {
    home_dir().join(".config").join(APP_NAME)
}

fn fallback_state_dir() -> PathBuf {
    home_dir().join(".local").join("state").join(APP_NAME)
}

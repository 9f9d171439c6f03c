//! Configuration management for the track recommendation client.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use thiserror::Error;

/// Name of the directory below the platform local data directory.
pub const APP_DIR: &str = "trackrec";

const DEFAULT_CALLBACK_ADDRESS: &str = "127.0.0.1:5173";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid URL: {value}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("cannot prepare config directory: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file is looked up in:
/// - Linux: `~/.local/share/trackrec/.env`
/// - macOS: `~/Library/Application Support/trackrec/.env`
/// - Windows: `%LOCALAPPDATA%/trackrec/.env`
///
/// A missing `.env` file is fine, values may come from the process
/// environment alone. Variables already set in the environment win.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        if let Err(e) = dotenv::from_path(&path) {
            crate::warning!("Ignoring unreadable {}: {}", path.display(), e);
        }
    }
    Ok(())
}

/// Returns the base URL of the token-issuing / recommendation backend.
///
/// Read from `TRACKREC_BACKEND_URL`, e.g. `http://localhost:8888`. A trailing
/// slash is removed so endpoint paths can be appended directly.
///
/// # Errors
///
/// Fails if the variable is unset or does not start with `http://` or `https://`.
pub fn backend_url() -> Result<String, ConfigError> {
    let value = env::var("TRACKREC_BACKEND_URL")
        .map_err(|_| ConfigError::Missing("TRACKREC_BACKEND_URL"))?;
    normalize_base_url("TRACKREC_BACKEND_URL", &value)
}

/// Returns the address the login callback listener binds to.
///
/// Read from `TRACKREC_CALLBACK_ADDRESS`, defaulting to `127.0.0.1:5173`.
/// The backend must be configured to redirect to this address after login.
pub fn callback_addr() -> String {
    env::var("TRACKREC_CALLBACK_ADDRESS").unwrap_or_else(|_| DEFAULT_CALLBACK_ADDRESS.to_string())
}

/// Returns the path of the persistent key-value file holding credentials.
///
/// Read from `TRACKREC_STORE_PATH`, defaulting to `<data dir>/trackrec/store.json`.
pub fn store_path() -> PathBuf {
    match env::var("TRACKREC_STORE_PATH") {
        Ok(p) if !p.trim().is_empty() => PathBuf::from(p),
        _ => data_dir().join("store.json"),
    }
}

/// Whether diagnostic output of the `debug!` macro is enabled.
pub fn debug_enabled() -> bool {
    env::var("TRACKREC_DEBUG")
        .map(|v| !v.is_empty() && v != "0")
        .unwrap_or(false)
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Validates a base URL and strips trailing slashes.
pub fn normalize_base_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

//! Runtime configuration from environment variables.
//!
//! `ENGAGE_API_URL`, `ENGAGE_HTTP_TIMEOUT_SECS`, and `ENGAGE_DATA_DIR`
//! override the defaults; anything unset or unparseable falls back.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::ApiOptions;
use crate::storage::Storage;

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiOptions,
    pub storage_path: PathBuf,
}

impl Config {
    /// Read configuration from the environment.
    pub fn from_env() -> Self {
        let defaults = ApiOptions::default();

        let base_url = std::env::var("ENGAGE_API_URL").unwrap_or(defaults.base_url);

        let timeout = std::env::var("ENGAGE_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);

        let storage_path = std::env::var("ENGAGE_DATA_DIR")
            .map(|dir| PathBuf::from(dir).join("session.json"))
            .unwrap_or_else(|_| Storage::default_path());

        Self {
            api: ApiOptions { base_url, timeout },
            storage_path,
        }
    }
}

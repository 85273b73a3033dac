//! Runtime settings, read from the process environment.
//!
//! A `.env` file in the working directory is loaded first when present, so
//! `TORN_API_KEY=...` can live there instead of the shell profile.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};

pub const API_KEY_VAR: &str = "TORN_API_KEY";
pub const BASE_URL_VAR: &str = "TORN_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "TORN_REQUEST_TIMEOUT_SECS";
pub const SKIP_FAILED_VAR: &str = "TORN_SKIP_FAILED_ITEMS";
pub const WATCH_LIST_VAR: &str = "TORN_WATCH_LIST";

pub const DEFAULT_BASE_URL: &str = "https://api.torn.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// What to do when fetching a single item fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the whole run on the first failed item. No report is produced.
    Abort,
    /// Log the failed item and leave it out of the report.
    SkipItem,
}

#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub failure_policy: FailurePolicy,
    pub watch_list_path: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from the environment, after applying any `.env` file.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok(); // a missing .env is fine
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get(API_KEY_VAR)
            .ok_or_else(|| Error::Config(format!("{} environment variable not set", API_KEY_VAR)))?;

        let base_url = get(BASE_URL_VAR)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match get(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(Error::Config(format!(
                        "{} must be a positive number of seconds, got {:?}",
                        TIMEOUT_VAR, raw
                    )))
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        let skip_failed = match get(SKIP_FAILED_VAR) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                Error::Config(format!(
                    "{} must be true or false, got {:?}",
                    SKIP_FAILED_VAR, raw
                ))
            })?,
            None => false,
        };
        let failure_policy = if skip_failed {
            FailurePolicy::SkipItem
        } else {
            FailurePolicy::Abort
        };

        Ok(Settings {
            api_key,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            failure_policy,
            watch_list_path: get(WATCH_LIST_VAR).map(PathBuf::from),
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

// The key must never reach the logs.
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("failure_policy", &self.failure_policy)
            .field("watch_list_path", &self.watch_list_path)
            .finish()
    }
}

//! Start-up configuration read from the environment.

use crate::models::{DEFAULT_MATCH_DURATION_MINUTES, MAX_MATCH_DURATION_MINUTES};
use std::env;
use std::time::Duration;

/// Where the console listens and which backend it drives.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsoleConfig {
    /// `HOST`, default `0.0.0.0` so the console is reachable on a LAN.
    pub host: String,
    /// `PORT`, default 8080.
    pub port: u16,
    /// `BACKEND_URL`, default `http://127.0.0.1:5000`.
    pub backend_url: String,
    /// `BACKEND_TIMEOUT_MS`, default 10 s.
    pub backend_timeout: Duration,
    /// `STATIC_DIR`: pre-built front end to serve under `/static`, if any.
    pub static_dir: Option<String>,
    /// `MATCH_DURATION_MINUTES`: regulation time used until the backend settings load.
    pub match_duration_minutes: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            backend_url: "http://127.0.0.1:5000".to_string(),
            backend_timeout: Duration::from_millis(10_000),
            static_dir: None,
            match_duration_minutes: DEFAULT_MATCH_DURATION_MINUTES,
        }
    }
}

impl ConsoleConfig {
    /// Read the process environment, falling back to defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ConsoleConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parsed("PORT")
                .and_then(|p| u16::try_from(p).ok())
                .unwrap_or(defaults.port),
            backend_url: lookup("BACKEND_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.backend_url),
            backend_timeout: parsed("BACKEND_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.backend_timeout),
            static_dir: lookup("STATIC_DIR").filter(|d| !d.trim().is_empty()),
            match_duration_minutes: parsed("MATCH_DURATION_MINUTES")
                .and_then(|m| u32::try_from(m).ok())
                .filter(|m| (1..=MAX_MATCH_DURATION_MINUTES).contains(m))
                .unwrap_or(defaults.match_duration_minutes),
        }
    }
}

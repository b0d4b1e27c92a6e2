//! Configuration constants and profile loading for qline
//!
//! Profiles live in an INI file, one section per profile:
//!
//! ```ini
//! [default]
//! server = http://127.0.0.1:5000
//! endpoint = /api/execute
//! timeout = 30
//! shots = 100
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use ini::Ini;

/// Default profile file path for qline
pub const DEFAULT_PROFILE_PATH: &str = "~/.qline/profile";

/// Environment variable name for overriding the profile path
pub const PROFILE_PATH_ENV_VAR: &str = "QLINE_PROFILE_PATH";

/// Environment variable holding the tracing filter directive
pub const LOG_FILTER_ENV_VAR: &str = "QLINE_LOG";

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000";
pub const DEFAULT_ENDPOINT: &str = "/api/execute";
pub const DEFAULT_SHOTS: u32 = 1;

/// Get the profile file path, checking environment variable first, then falling back to default
pub fn get_profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Connection and execution settings of one profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleProfile {
    /// Base URL of the execution server
    pub server: String,
    /// Path of the execute endpoint on the server
    pub endpoint: String,
    /// Client-side request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
    /// Default shot count for batch runs
    pub shots: u32,
}

impl Default for ConsoleProfile {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
            shots: DEFAULT_SHOTS,
        }
    }
}

impl ConsoleProfile {
    /// Full URL of the execute endpoint
    pub fn execute_url(&self) -> String {
        format!(
            "{}/{}",
            self.server.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    /// Load profile `name` from the INI file at `path`
    ///
    /// A missing file or section yields the default profile.
    pub fn load(name: &str, path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).into_owned();
        tracing::debug!("Loading profile '{}' from '{}'", name, expanded);

        if !Path::new(&expanded).exists() {
            tracing::debug!("Profile file '{}' not found, using defaults", expanded);
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(&expanded)
            .with_context(|| format!("failed to read profile file '{expanded}'"))?;

        match ini.section(Some(name)) {
            Some(section) => {
                let profile = Self::from_pairs(section.iter())
                    .with_context(|| format!("invalid profile '{name}' in '{expanded}'"))?;
                tracing::debug!("Profile loaded successfully, server: {}", profile.server);
                Ok(profile)
            }
            None => {
                tracing::debug!("Profile '{}' not found, using defaults", name);
                Ok(Self::default())
            }
        }
    }

    /// Build a profile from key/value pairs, defaulting absent keys
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut profile = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            match key.trim() {
                "server" => profile.server = value.to_string(),
                "endpoint" => profile.endpoint = value.to_string(),
                "timeout" => {
                    let secs: u64 = value
                        .parse()
                        .map_err(|e| anyhow!("timeout must be whole seconds: {e}"))?;
                    profile.timeout = (secs > 0).then(|| Duration::from_secs(secs));
                }
                "shots" => {
                    let shots: u32 = value
                        .parse()
                        .map_err(|e| anyhow!("shots must be a positive integer: {e}"))?;
                    if shots == 0 {
                        return Err(anyhow!("shots must be at least 1"));
                    }
                    profile.shots = shots;
                }
                other => tracing::warn!("Ignoring unknown profile key '{}'", other),
            }
        }
        Ok(profile)
    }
}

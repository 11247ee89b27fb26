use std::path::PathBuf;
use std::time::Duration;

use qms_client::FileTokenStore;

/// Console configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local backend.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Base URL of the backend API, without the `/management` prefix.
    pub api_base_url: String,
    /// Per-request timeout in seconds (default: `10`).
    pub request_timeout_secs: u64,
    /// File holding the persisted bearer token.
    pub token_file: PathBuf,
    /// Directory exported workbooks are written to (default: `.`).
    pub export_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("No config directory on this platform; set QMS_TOKEN_FILE")]
    NoTokenPath,
}

impl ConsoleConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                                          |
    /// |----------------------------|--------------------------------------------------|
    /// | `QMS_API_BASE_URL`         | `http://localhost:8080/api`                      |
    /// | `QMS_REQUEST_TIMEOUT_SECS` | `10`                                             |
    /// | `QMS_TOKEN_FILE`           | `<config dir>/qms-console/authentication_token`  |
    /// | `QMS_EXPORT_DIR`           | `.`                                              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = lookup("QMS_API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "http://localhost:8080/api".into());

        let request_timeout_secs = match lookup("QMS_REQUEST_TIMEOUT_SECS") {
            None => 10,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: "QMS_REQUEST_TIMEOUT_SECS",
                        expected: "a positive number of seconds",
                        value: raw,
                    })
                }
            },
        };

        let token_file = match lookup("QMS_TOKEN_FILE").filter(|v| !v.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => FileTokenStore::default_path().ok_or(ConfigError::NoTokenPath)?,
        };

        let export_dir = lookup("QMS_EXPORT_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            api_base_url,
            request_timeout_secs,
            token_file,
            export_dir,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

//! Runtime configuration.
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file. Only the API base URL matters to the console itself; the payment key
//! and chat widget id are carried for the surfaces that need them.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::DATA_DIR_NAME;
use crate::error::ConfigError;

pub const ENV_API_BASE_URL: &str = "API_BASE_URL";
pub const ENV_PAYMENT_KEY: &str = "STRIPE_PUBLISHABLE_KEY";
pub const ENV_CHAT_APP_ID: &str = "CHAT_WIDGET_APP_ID";
pub const ENV_TIMEOUT: &str = "API_TIMEOUT_SECS";
pub const ENV_UPGRADE_URL: &str = "APICONSOLE_UPGRADE_URL";
pub const ENV_DATA_DIR: &str = "APICONSOLE_DATA_DIR";

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Base URL of the backend. Absent means relative endpoint URLs are sent as-is.
    pub api_base_url: Option<String>,
    pub payment_publishable_key: Option<String>,
    pub chat_widget_app_id: Option<String>,
    /// Explicit transport timeout; `None` keeps reqwest's defaults
    pub request_timeout: Option<Duration>,
    pub upgrade_url: Option<String>,
    pub data_dir: PathBuf,
}

impl Config {
    /// Load `.env` (if any) and read configuration from the environment
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenv::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let request_timeout = match read(ENV_TIMEOUT) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: ENV_TIMEOUT,
                        value: raw,
                    })
                }
            },
            None => None,
        };

        let data_dir = read(ENV_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Ok(Config {
            api_base_url: read(ENV_API_BASE_URL),
            payment_publishable_key: read(ENV_PAYMENT_KEY),
            chat_widget_app_id: read(ENV_CHAT_APP_ID),
            request_timeout,
            upgrade_url: read(ENV_UPGRADE_URL),
            data_dir,
        })
    }

    /// Directory holding user-supplied collection files
    pub fn collections_dir(&self) -> PathBuf {
        self.data_dir.join("collections")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}

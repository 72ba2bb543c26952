use std::{
    net::{SocketAddr, ToSocketAddrs},
    path::PathBuf,
};

use serde::{Deserialize, Deserializer};

use super::{enums::log_level::LogLevel, errors::StartupError};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
pub const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Clone, Deserialize)]
pub struct Envy {
    #[serde(default = "default_app_env")]
    pub app_env: String,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub max_body_bytes: Option<usize>,

    #[serde(default, deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "default_log_file_level", deserialize_with = "deserialize_log_level")]
    pub log_file_level: LogLevel,
    pub log_dir: Option<String>,

    pub sonarr_api_key: String,
    pub sonarr_url: String,
}

fn default_app_env() -> String {
    "development".to_string()
}

fn default_log_file_level() -> LogLevel {
    LogLevel::Debug
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

impl Envy {
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_vars(std::env::vars())
    }

    /// Builds the configuration from explicit `(NAME, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, StartupError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Envy = envy::from_iter(vars)?;

        // present but blank is treated the same as unset
        if config.sonarr_api_key.trim().is_empty() {
            return Err(StartupError::ConfigurationMissing(
                "SONARR_API_KEY".to_string(),
            ));
        }
        if config.sonarr_url.trim().is_empty() {
            return Err(StartupError::ConfigurationMissing("SONARR_URL".to_string()));
        }

        Ok(config)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, StartupError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.port.unwrap_or(DEFAULT_PORT);

        (host, port)
            .to_socket_addrs()
            .map_err(|e| StartupError::InvalidAddress(format!("{}:{} ({})", host, port, e)))?
            .next()
            .ok_or_else(|| StartupError::InvalidAddress(format!("{}:{}", host, port)))
    }

    pub fn body_limit(&self) -> usize {
        self.max_body_bytes.unwrap_or(DEFAULT_MAX_BODY_BYTES)
    }

    /// Directory for the rolling log file; a blank `LOG_DIR` disables it.
    pub fn log_dir(&self) -> Option<PathBuf> {
        match self.log_dir.as_deref() {
            None => Some(PathBuf::from(DEFAULT_LOG_DIR)),
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
        }
    }

    /// API key with everything but the last four characters hidden.
    pub fn masked_api_key(&self) -> String {
        let chars: Vec<char> = self.sonarr_api_key.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }

        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

#[cfg(test)]
pub(crate) fn test_envy() -> Envy {
    Envy {
        app_env: "test".to_string(),
        host: None,
        port: None,
        max_body_bytes: None,
        log_level: LogLevel::Debug,
        log_file_level: LogLevel::Debug,
        log_dir: Some(String::new()),
        sonarr_api_key: "0123456789abcdef".to_string(),
        sonarr_url: "http://sonarr.local:8989".to_string(),
    }
}

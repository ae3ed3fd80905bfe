use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/client.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the socket.io server.
    pub server_url: String,
    pub reconnect_delay_ms: u64,
    /// Consecutive failed connection attempts before giving up. 0 retries forever.
    pub reconnect_attempts: u32,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000".to_string(),
            reconnect_delay_ms: 1000,
            reconnect_attempts: 0,
            window_title: "Rust Socket Chat".to_string(),
        }
    }
}

impl AppConfig {
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

/// Reads the JSON config at `path`. A missing file is seeded with the
/// defaults; an unreadable or invalid one falls back to them.
pub fn load_config(path: &str) -> AppConfig {
    let file = Path::new(path);
    match fs::read_to_string(file) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", file.display());
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let config = AppConfig::default();
            match save_config(path, &config) {
                Ok(()) => log::info!("Config file {path} not found; wrote defaults"),
                Err(err) => log::warn!("Unable to create {path}: {err}"),
            }
            config
        }
        Err(err) => {
            log::warn!(
                "Failed to read config file {} ({err}); using defaults",
                file.display()
            );
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}

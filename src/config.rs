use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/safety_chat.json";

const ENV_BASE_URL: &str = "SAFETY_CHAT_BASE_URL";
const ENV_POLL_MS: &str = "SAFETY_CHAT_POLL_MS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the message service, without the `/api/messages` suffix.
    pub base_url: String,
    pub poll_interval_ms: u64,
    /// Maximum number of remembered message hashes; 0 keeps every hash.
    pub dedup_capacity: usize,
    /// Author tag the safety monitor submits text under.
    pub monitor_author: String,
    pub alert_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5123".to_string(),
            poll_interval_ms: 1000,
            dedup_capacity: 10_000,
            monitor_author: "extension".to_string(),
            alert_ttl_secs: 5,
        }
    }
}

impl AppConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub fn alert_ttl(&self) -> Duration {
        Duration::from_secs(self.alert_ttl_secs)
    }

    pub fn dedup_limit(&self) -> Option<usize> {
        (self.dedup_capacity > 0).then_some(self.dedup_capacity)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|url| !url.trim().is_empty()) {
            log::info!("{ENV_BASE_URL} overrides base_url");
            self.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(ENV_POLL_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => self.poll_interval_ms = ms,
                Err(err) => log::warn!("Ignoring {ENV_POLL_MS}={raw:?}: {err}"),
            }
        }
    }
}

/// Effective settings: the JSON file at `path` (defaults when absent or
/// unreadable) with `SAFETY_CHAT_*` variables applied on top.
pub fn load_config(path: &str) -> AppConfig {
    load_config_with(path, |key| std::env::var(key).ok())
}

fn load_config_with(path: &str, lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let mut config = read_config_file(Path::new(path));
    config.apply_overrides(lookup);
    config
}

fn read_config_file(path: &Path) -> AppConfig {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::info!("No settings at {}; using built-in defaults", path.display());
            return AppConfig::default();
        }
        Err(err) => {
            log::warn!(
                "Cannot read settings {}: {err}; using built-in defaults",
                path.display()
            );
            return AppConfig::default();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|err| {
        log::warn!(
            "Settings {} are not valid safety_chat JSON ({err}); using built-in defaults",
            path.display()
        );
        AppConfig::default()
    })
}

/// Writes `config` as pretty JSON, creating missing parent directories.
pub fn save_config(path: &str, config: &AppConfig) -> std::io::Result<()> {
    let path = Path::new(path);
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)?,
        _ => {}
    }

    let mut bytes = serde_json::to_vec_pretty(config)?;
    bytes.push(b'\n');
    fs::write(path, bytes)?;
    log::debug!("Saved settings for {} to {}", config.base_url, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let config = load_config_with(path.to_str().unwrap(), no_env);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "base_url": "https://chat.example", "dedup_capacity": 0 }"#)
            .unwrap();

        let config = load_config_with(path.to_str().unwrap(), no_env);
        assert_eq!(config.base_url, "https://chat.example");
        assert_eq!(config.dedup_limit(), None);
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.monitor_author, "extension");
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(load_config_with(path.to_str().unwrap(), no_env), AppConfig::default());
    }

    #[test]
    fn save_then_load_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/config.json");
        let path = path.to_str().unwrap();

        let config = AppConfig {
            poll_interval_ms: 250,
            ..AppConfig::default()
        };
        save_config(path, &config).unwrap();

        assert_eq!(load_config_with(path, no_env), config);
        assert!(fs::read_to_string(path).unwrap().ends_with("}\n"));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| match key {
            ENV_BASE_URL => Some(" http://10.0.0.2:8080 ".to_string()),
            ENV_POLL_MS => Some("500".to_string()),
            _ => None,
        });

        assert_eq!(config.base_url, "http://10.0.0.2:8080");
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn env_overrides_apply_to_loaded_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "base_url": "https://chat.example", "poll_interval_ms": 2000 }"#)
            .unwrap();

        let config = load_config_with(path.to_str().unwrap(), |key| {
            (key == ENV_POLL_MS).then(|| "250".to_string())
        });
        assert_eq!(config.base_url, "https://chat.example");
        assert_eq!(config.poll_interval_ms, 250);
    }

    #[test]
    fn invalid_poll_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == ENV_POLL_MS).then(|| "soon".to_string()));
        assert_eq!(config.poll_interval_ms, 1000);
    }

    #[test]
    fn zero_poll_interval_is_clamped() {
        let config = AppConfig {
            poll_interval_ms: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_millis(1));
    }
}

use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Keys a complete configuration file carries.
pub const CONFIG_KEYS: &[&str] = &[
    "api_base_url",
    "api_key",
    "store_code",
    "journal",
    "request_timeout_secs",
    "log_filter",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root of the kiosk HTTP API, e.g. `https://api.example.com/v1`.
    #[serde(default)]
    pub api_base_url: String,
    /// Bearer token sent with every kiosk call.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Store resolved automatically when the kiosk starts.
    #[serde(default)]
    pub store_code: Option<String>,
    #[serde(default = "default_journal")]
    pub journal: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_journal() -> String {
    Config::journal_file().to_string_lossy().to_string()
}
fn default_timeout() -> u64 {
    10
}
fn default_log_filter() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            api_key: None,
            store_code: None,
            journal: default_journal(),
            request_timeout_secs: default_timeout(),
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// `~/.punchkiosk`, or the working directory when no home is known.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".punchkiosk")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("punchkiosk.conf")
    }

    pub fn journal_file() -> PathBuf {
        Self::config_dir().join("punchkiosk.sqlite")
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn write_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }

        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Keys absent from the file at `path`. Defaults fill them at load time,
    /// this only reports what an operator may want to set explicitly.
    pub fn missing_fields(path: &Path) -> AppResult<Vec<&'static str>> {
        if !path.exists() {
            return Err(AppError::ConfigMissing(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)?;
        let Some(map) = value.as_mapping() else {
            return Ok(CONFIG_KEYS.to_vec());
        };

        Ok(CONFIG_KEYS
            .iter()
            .copied()
            .filter(|key| !map.contains_key(*key))
            .collect())
    }

    /// The API root, or an error naming the missing setting.
    pub fn require_api_url(&self) -> AppResult<&str> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(AppError::Config(
                "api_base_url is not set (use `config --edit` or --api-url)".into(),
            ));
        }
        Ok(url)
    }

    pub fn journal_path(&self) -> PathBuf {
        expand_tilde(&self.journal)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Preconfigured store code, if it is not blank.
    pub fn store_code(&self) -> Option<&str> {
        self.store_code
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// API key for logs and error text redaction.
    pub fn secrets(&self) -> Vec<&str> {
        self.api_key.as_deref().into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_takes_defaults() {
        let cfg: Config = serde_yaml::from_str("api_base_url: https://api.test\n").unwrap();
        assert_eq!(cfg.api_base_url, "https://api.test");
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.log_filter, "warn");
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn blank_store_code_counts_as_unset() {
        let cfg = Config {
            store_code: Some("  ".into()),
            ..Config::default()
        };
        assert_eq!(cfg.store_code(), None);
    }

    #[test]
    fn missing_api_url_is_reported() {
        let cfg = Config::default();
        assert!(matches!(cfg.require_api_url(), Err(AppError::Config(_))));
    }
}

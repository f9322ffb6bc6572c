use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    /// Path to the per-profile user-data database.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/freesaurus.sqlite")
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.freesaurus.app".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Where the auth session file lives: next to the database.
    pub fn session_path(&self) -> PathBuf {
        self.db.path.with_file_name("session.json")
    }
}

/// Load configuration from a TOML file. A missing file is not an error:
/// the defaults make the CLI usable with zero setup.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.api.base_url.trim().is_empty() {
        anyhow::bail!("api.base_url must not be empty");
    }

    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs must be >= 1");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config(Path::new("./does-not-exist.toml")).unwrap();
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.db.path, PathBuf::from("./data/freesaurus.sqlite"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("[db]\npath = \"/tmp/x.sqlite\"\n").unwrap();
        assert_eq!(config.db.path, PathBuf::from("/tmp/x.sqlite"));
        assert_eq!(config.api.base_url, "https://api.freesaurus.app");
    }

    #[test]
    fn session_file_sits_next_to_database() {
        let config: Config = toml::from_str("[db]\npath = \"/data/app/words.sqlite\"\n").unwrap();
        assert_eq!(config.session_path(), PathBuf::from("/data/app/session.json"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("freesaurus.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 0\n").unwrap();
        assert!(load_config(&path).is_err());
    }
}

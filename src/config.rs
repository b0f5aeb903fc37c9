use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Used when there is no user config directory.
const LOCAL_CONFIG_PATH: &str = "blockfall.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Time between two frames, in milliseconds.
    pub frame_millis: u64,
    /// Seed for the piece sequence. A random one is picked when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Drawn for every block. Two columns wide keeps the cells square.
    pub block: String,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_millis: 16,
            seed: None,
            block: "[]".to_string(),
            log_file: PathBuf::from("blockfall.log"),
        }
    }
}

impl Config {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_millis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_millis == 0 {
            return Err(ConfigError::Invalid("frame_millis must be at least 1".into()));
        }
        if self.block.is_empty() {
            return Err(ConfigError::Invalid("block must not be empty".into()));
        }
        Ok(())
    }
}

/// `<config dir>/blockfall/config.toml`, or `./blockfall.toml` without one.
pub fn default_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("blockfall").join("config.toml"),
        None => PathBuf::from(LOCAL_CONFIG_PATH),
    }
}

/// Reads the config at `path`, writing the defaults there first if the file is missing.
///
/// The flag is `true` when the file was created by this call.
pub fn load(path: &Path) -> Result<(Config, bool), ConfigError> {
    if !path.exists() {
        let config = Config::default();
        save(&config, path)?;
        return Ok((config, true));
    }

    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    config.validate()?;
    Ok((config, false))
}

pub fn save(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, toml::to_string_pretty(config)?)?;
    Ok(())
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config file: {e}"),
            ConfigError::Parse(e) => write!(f, "config syntax: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialization: {e}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Serialize(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("config.toml");

        let (config, created) = load(&path).expect("default config");
        assert!(created);
        assert_eq!(Config::default(), config);
        assert!(path.exists());

        let (reloaded, created) = load(&path).expect("reload");
        assert!(!created);
        assert_eq!(config, reloaded);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "seed = 42\nblock = \"##\"\n").expect("write");

        let (config, created) = load(&path).expect("config");
        assert!(!created);
        assert_eq!(Some(42), config.seed);
        assert_eq!("##", config.block);
        assert_eq!(16, config.frame_millis);
        assert_eq!(Duration::from_millis(16), config.frame_interval());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        let config = Config {
            frame_millis: 33,
            seed: Some(7),
            block: "██".to_string(),
            log_file: PathBuf::from("/tmp/blockfall-test.log"),
        };
        save(&config, &path).expect("save");
        assert_eq!((config, false), load(&path).expect("load"));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "invalid toml content ! @ #").expect("write");

        match load(&path) {
            Err(ConfigError::Parse(_)) => {}
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_frame_interval_is_rejected() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "frame_millis = 0\n").expect("write");

        let err = load(&path).expect_err("zero interval");
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("frame_millis"));
    }
}

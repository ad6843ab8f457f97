//! Runtime settings for the binaries, stored as JSON

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::display::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    /// Window pixels per buffer pixel
    pub scale: u32,
    /// Demo shown at start-up
    pub demo: String,
    pub title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            vsync: true,
            scale: 1,
            demo: "basic".to_string(),
            title: "finch".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Load `path`, falling back to defaults when it does not exist.
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        debug!("saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FinchError;
    use test_log::test;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = Config::from_json(r#"{"width": 320, "demo": "fern"}"#).unwrap();
        assert_eq!(config.width, 320);
        assert_eq!(config.height, 600);
        assert_eq!(config.demo, "fern");
        assert!(config.vsync);
        assert_eq!(config.scale, 1);
        assert_eq!(config.title, "finch");
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(Config::from_json("{width: 1"), Err(FinchError::Json(_))));
        assert!(matches!(
            Config::from_json(r#"{"width": -4}"#),
            Err(FinchError::Json(_))
        ));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("finch-config-{}.json", std::process::id()));
        let config = Config {
            width: 160,
            height: 120,
            vsync: false,
            scale: 4,
            demo: "bounce".into(),
            title: "test".into(),
        };
        config.save(&path).unwrap();
        let loaded = Config::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("finch-config-does-not-exist.json");
        assert_eq!(Config::load_or_default(&path).unwrap(), Config::default());
        assert!(matches!(Config::load(&path), Err(FinchError::Io(_))));
    }
}

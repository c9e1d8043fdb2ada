use crate::config::EffectMode;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// User settings from `config.toml`. Every field is optional; the CLI
/// overrides whatever is set here.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub play: PlaySettings,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaySettings {
    pub mode: Option<EffectMode>,
    pub fps: Option<u32>,
    pub aspect: Option<f64>,
    pub scheme: Option<u8>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "invalid settings, using defaults");
                Self::default()
            }),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "unreadable settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("termeyes")
            .join("config.toml")
    }
}

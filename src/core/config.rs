use crate::core::quality::Quality;
use crate::error::{Result, XvdlError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DESTINATION: &str = "descargas_twitter";
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "%(uploader)s_%(id)s.%(ext)s";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub default_destination: PathBuf,
    pub default_quality: String,
    pub output_template: String,
    pub ytdlp_path: Option<PathBuf>,
    pub python: Option<PathBuf>,
    pub auto_install: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_destination: PathBuf::from(DEFAULT_DESTINATION),
            default_quality: Quality::Best.as_str().to_string(),
            output_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
            ytdlp_path: None,
            python: None,
            auto_install: true,
        }
    }
}

impl Config {
    /// Loads `~/.xvdl/config.json` and applies environment overrides.
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;
        Self::load_with_env(&config_path, |key| std::env::var(key).ok())
    }

    /// Loads `path` without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_env(path, |_| None)
    }

    /// Reads `path`, applies overrides from `lookup`, then validates the
    /// combined result.
    pub fn load_with_env<F>(path: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::read(path)?;
        config.apply_env(lookup);
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.output_template.contains("%(") {
            return Err(XvdlError::config_error(format!(
                "output_template '{}' has no %(field)s placeholder",
                self.output_template
            )));
        }
        if self.default_destination.as_os_str().is_empty() {
            return Err(XvdlError::config_error("default_destination is empty"));
        }
        if let Some(path) = &self.ytdlp_path {
            if path.is_dir() {
                return Err(XvdlError::config_error(format!(
                    "ytdlp_path '{}' is a directory",
                    path.display()
                )));
            }
        }
        Ok(())
    }

    /// `XVDL_YTDLP` overrides the yt-dlp path, `XVDL_DEST` the destination.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("XVDL_YTDLP").filter(|v| !v.is_empty()) {
            self.ytdlp_path = Some(PathBuf::from(path));
        }
        if let Some(dest) = lookup("XVDL_DEST").filter(|v| !v.is_empty()) {
            self.default_destination = PathBuf::from(dest);
        }
    }

    pub fn quality(&self) -> Quality {
        Quality::parse(&self.default_quality)
    }
}

fn get_xvdl_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".xvdl"))
        .ok_or(XvdlError::HomeDirectoryNotFound)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_xvdl_dir()?.join("config.json"))
}

use md2ml_engine::{FsImageResolver, ParseOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory image references resolve against. Defaults to the
    /// directory of the converted document.
    pub image_dir: Option<PathBuf>,
    /// Pass `http(s)://` image references through to the sink.
    pub allow_remote_images: bool,
    /// Separator placed between soft-wrapped paragraph lines.
    pub soft_break: String,
    /// Drop blank lines instead of emitting empty paragraphs.
    pub skip_blank_lines: bool,
    /// `<title>` of rendered HTML pages. Defaults to the file name.
    pub html_title: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_dir: None,
            allow_remote_images: true,
            soft_break: String::new(),
            skip_blank_lines: false,
            html_title: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the image directory
        config.image_dir = config
            .image_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/md2ml");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Engine options carried by this config.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            soft_break: self.soft_break.clone(),
            skip_blank_lines: self.skip_blank_lines,
        }
    }

    /// Image resolver for `document`: the configured image directory if set,
    /// otherwise the document's own directory.
    pub fn image_resolver(&self, document: &Path) -> FsImageResolver {
        let resolver = match &self.image_dir {
            Some(dir) => FsImageResolver::with_base_dir(dir),
            None => FsImageResolver::for_document(document),
        };
        resolver.allow_remote(self.allow_remote_images)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

//! Site configuration management

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "mdrelink.json";

/// Errors raised while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Directory holding Markdown sources and assets
    pub source: PathBuf,
    /// Directory receiving rendered output
    pub destination: PathBuf,
    /// Markdown extensions
    pub markdown: MarkdownOptions,
    /// File and directory names skipped during discovery
    pub exclude: Vec<String>,
    /// Page layout settings
    pub layout: LayoutConfig,
    /// Maximum directory depth to descend into
    pub max_depth: usize,
}

/// Markdown extensions passed to the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub tasklists: bool,
    pub smart_punctuation: bool,
    pub heading_attributes: bool,
}

/// Page layout settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Wrap rendered bodies in a full HTML document
    pub wrap: bool,
    /// Stylesheet href linked from every page
    pub stylesheet: Option<String>,
    /// Value of the `lang` attribute
    pub lang: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            destination: PathBuf::from("_site"),
            markdown: MarkdownOptions::default(),
            exclude: vec![
                "node_modules".to_string(),
                "target".to_string(),
                "_site".to_string(),
            ],
            layout: LayoutConfig::default(),
            max_depth: 32,
        }
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            tasklists: true,
            smart_punctuation: false,
            heading_attributes: false,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wrap: true,
            stylesheet: None,
            lang: "en".to_string(),
        }
    }
}

impl SiteConfig {
    /// Per-user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "mdrelink", "mdrelink")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `mdrelink.json` in the
    /// working directory wins over the per-user file; defaults apply when
    /// neither is present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load_from(path);
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load_from(&local);
        }

        match Self::user_config_path() {
            Some(user) if user.is_file() => Self::load_from(&user),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Override source and destination directories
    pub fn with_dirs(mut self, source: Option<PathBuf>, destination: Option<PathBuf>) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        if let Some(destination) = destination {
            self.destination = destination;
        }
        self
    }

    /// Destination directory, resolved against the source when relative
    pub fn output_dir(&self) -> PathBuf {
        if self.destination.is_absolute() {
            self.destination.clone()
        } else {
            self.source.join(&self.destination)
        }
    }
}

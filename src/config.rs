use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::options::Options;

/// Render defaults read from a JSON config file.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    #[serde(alias = "color")]
    pub colour: Option<bool>,
    pub tabstop: Option<String>,
    pub max_depth: Option<usize>,
    pub max_length: Option<usize>,
    pub root_name: Option<String>,
}

impl FileConfig {
    /// `<config dir>/grok/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("grok").join("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|error| Error::ConfigRead {
            path: path.to_path_buf(),
            error,
        })?;
        let config = serde_json::from_str(&content).map_err(|error| Error::ConfigParse {
            path: path.to_path_buf(),
            error,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads the default config file; a missing file yields the defaults.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Applies the values that are set on top of `options`.
    pub fn apply(&self, mut options: Options) -> Options {
        if let Some(colour) = self.colour {
            options = options.colour(colour);
        }
        if let Some(tabstop) = &self.tabstop {
            options = options.tabstop(tabstop.clone());
        }
        if let Some(max_depth) = self.max_depth {
            options = options.max_depth(max_depth);
        }
        if let Some(max_length) = self.max_length {
            options = options.max_length(max_length);
        }
        if let Some(root_name) = &self.root_name {
            options = options.root_name(root_name.clone());
        }
        options
    }
}

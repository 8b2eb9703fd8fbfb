//! User-adjustable editor settings stored as JSON

use crate::catalog::DEFAULT_IMMUTABLE_KEYS;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Default cap for sanitized first/last names
pub const DEFAULT_NAME_MAX_LEN: usize = 15;

/// Editor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Fields a player swap leaves in place
    pub immutable_keys: BTreeSet<String>,
    /// Maximum length of a sanitized name
    pub name_max_len: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            immutable_keys: DEFAULT_IMMUTABLE_KEYS.iter().map(|k| k.to_string()).collect(),
            name_max_len: DEFAULT_NAME_MAX_LEN,
        }
    }
}

impl EditorConfig {
    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source: e,
        })?;
        let config: EditorConfig = serde_json::from_str(&content)?;
        if config.name_max_len == 0 {
            return Err(Error::Config("name_max_len must be at least 1".to_string()));
        }
        Ok(config)
    }

    /// Load settings if the file exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().is_file() {
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save settings to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

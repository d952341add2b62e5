use std::path::Path;

use fos_dict::{DictionaryFile, DEFAULT_FILE_NAME};
use serde::{Deserialize, Serialize};

use crate::error::{StateError, StateResult};

/// Configuration for a state store and its state file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StateConfig {
    /// Log a warning when `set_active` finds the required type missing.
    pub warn_on_inactive: bool,
    /// Log a warning when a flat property is written under the reserved
    /// results key.
    pub warn_on_reserved_key: bool,
    /// File name of the state dictionary inside a time directory.
    pub file_name: String,
    /// Pretty-print the state file on save.
    pub pretty: bool,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            warn_on_inactive: true,
            warn_on_reserved_key: true,
            file_name: DEFAULT_FILE_NAME.to_string(),
            pretty: true,
        }
    }
}

impl StateConfig {
    /// Parse a TOML configuration. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> StateResult<Self> {
        toml::from_str(text).map_err(|e| StateError::Config(e.to_string()))
    }

    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> StateResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| StateError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// The state file inside `dir`, honouring `file_name` and `pretty`.
    pub fn state_file(&self, dir: &Path) -> DictionaryFile {
        DictionaryFile::new(dir.join(&self.file_name)).with_pretty(self.pretty)
    }
}

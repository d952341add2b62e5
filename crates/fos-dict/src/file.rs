//! JSON persistence for state dictionaries.
//!
//! Hosts load the state document when a run starts and save it at their own
//! checkpoints. Saves are atomic: the document is written to a sibling
//! temporary file and then renamed over the target.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::dictionary::Dictionary;
use crate::error::{DictError, DictResult};
use crate::shared::SharedDictionary;

/// Conventional file name for a state dictionary.
pub const DEFAULT_FILE_NAME: &str = "functionObjectProperties";

/// A state dictionary file on disk.
#[derive(Clone, Debug)]
pub struct DictionaryFile {
    path: PathBuf,
    pretty: bool,
}

impl DictionaryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// The default file name inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    /// Whether saves are pretty-printed (default: `true`).
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the dictionary. A missing file is an empty dictionary.
    pub fn load(&self) -> DictResult<Dictionary> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "no state file, starting empty");
                return Ok(Dictionary::new());
            }
            Err(e) => return Err(e.into()),
        };
        let dict: Dictionary = serde_json::from_slice(&data)
            .map_err(|e| DictError::Serialization(e.to_string()))?;
        debug!(path = ?self.path, entries = dict.len(), "state file loaded");
        Ok(dict)
    }

    /// Write the dictionary atomically, creating parent directories.
    pub fn save(&self, dict: &Dictionary) -> DictResult<()> {
        let data = if self.pretty {
            serde_json::to_vec_pretty(dict)
        } else {
            serde_json::to_vec(dict)
        }
        .map_err(|e| DictError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.temp_path();
        fs::write(&tmp, &data)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = ?self.path, bytes = data.len(), "state file saved");
        Ok(())
    }

    /// Load into an existing shared handle, replacing its contents.
    pub fn load_into(&self, shared: &SharedDictionary) -> DictResult<()> {
        let dict = self.load()?;
        shared.replace(dict);
        Ok(())
    }

    /// Save the current contents of a shared handle.
    pub fn save_from(&self, shared: &SharedDictionary) -> DictResult<()> {
        let snapshot = shared.snapshot();
        self.save(&snapshot)
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
        self.path.with_file_name(format!(".{name}.tmp"))
    }
}

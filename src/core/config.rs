//! Run settings and the config file loader.
//!
//! The loader reads one JSON document and extracts the replacement identifier
//! from a single key. Every failure is fatal and raised before any scanning.

use crate::defaults;
use crate::error::{Error, Result};
use crate::utils::io;
use serde_json::Value;
use std::path::{Path, PathBuf};

// ============================================================================
// Settings
// ============================================================================

/// Everything a run needs, resolved once before the pipeline starts.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory tree to scan.
    pub root: PathBuf,
    /// JSON file holding the replacement identifier.
    pub config_path: PathBuf,
    /// Key read from the config file.
    pub config_key: String,
    /// Literal searched for and replaced.
    pub old_identifier: String,
    /// Directory names pruned from the walk at any depth.
    pub excluded_dirs: Vec<String>,
}

impl Settings {
    /// Defaults rooted at `root`: config file at `<root>/.infisical.json`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config_path = root.join(defaults::CONFIG_FILE);
        Self {
            root,
            config_path,
            config_key: defaults::CONFIG_KEY.to_string(),
            old_identifier: defaults::OLD_IDENTIFIER.to_string(),
            excluded_dirs: defaults::excluded_dirs(),
        }
    }

    /// Add directory names to the excluded set, ignoring duplicates.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if !self.excluded_dirs.contains(&name) {
                self.excluded_dirs.push(name);
            }
        }
        self
    }
}

// ============================================================================
// Loader
// ============================================================================

/// Read the replacement identifier stored under `key` in the JSON file at `path`.
///
/// The value must be a non-empty string. All other fields are ignored.
pub fn load_replacement(path: &Path, key: &str) -> Result<String> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(Error::config_not_found(display));
    }

    let raw = io::read_file(path, &format!("read {}", display))?;
    let document: Value =
        serde_json::from_str(&raw).map_err(|e| Error::config_invalid_json(&display, e))?;

    let Value::Object(fields) = document else {
        return Err(Error::config_not_object(display));
    };

    match fields.get(key) {
        None | Some(Value::Null) => Err(Error::config_missing_key(key, Some(display))),
        Some(Value::String(value)) if value.is_empty() => {
            Err(Error::config_missing_key(key, Some(display)))
        }
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(Error::config_invalid_value(
            key,
            Some(other.to_string()),
            "expected a string",
        )),
    }
}

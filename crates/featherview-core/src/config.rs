//! Persisted window geometry.
//!
//! Stored as a JSON object in `<config dir>/FeatherView/config`. Keys this
//! version does not know are kept and written back untouched.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::consts::{DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE};
use crate::error::{Result, ViewerError};

const APP_DIR: &str = "FeatherView";
const CONFIG_FILE: &str = "config";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Inner window size `[width, height]` in logical points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[u32; 2]>,
    #[serde(default)]
    pub maximized: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl WindowConfig {
    /// Parse a config document. Anything unusable yields the defaults, and a
    /// malformed key only resets that key.
    pub fn from_json_str(text: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                debug!("ignoring malformed config: {e}");
                return Self::default();
            }
        };
        let serde_json::Value::Object(mut map) = value else {
            debug!("ignoring config that is not a JSON object");
            return Self::default();
        };

        let size = map
            .remove("size")
            .and_then(|v| serde_json::from_value::<[u32; 2]>(v).ok());
        let maximized = map
            .remove("maximized")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        Self {
            size,
            maximized,
            extra: map.into_iter().collect(),
        }
    }

    /// Serialize with two-space indentation and sorted keys.
    pub fn to_json_string(&self) -> Result<String> {
        // Re-collect into a BTreeMap so the flattened extras sort together
        // with the known keys.
        let sorted: BTreeMap<String, serde_json::Value> =
            serde_json::from_value(serde_json::to_value(self)?)?;
        Ok(serde_json::to_string_pretty(&sorted)?)
    }

    /// Read the config at `path`. Missing or unreadable files give defaults.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_json_str(&text),
            Err(e) => {
                debug!(path = %path.display(), "no config loaded: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_string()?)?;
        info!(path = %path.display(), "window geometry saved");
        Ok(())
    }

    /// Persisted size when it is large enough to be usable.
    pub fn window_size(&self) -> Option<[u32; 2]> {
        self.size
            .filter(|[w, h]| *w >= MIN_WINDOW_SIZE[0] && *h >= MIN_WINDOW_SIZE[1])
    }

    /// Size to open the window with.
    pub fn initial_size(&self) -> [u32; 2] {
        self.window_size().unwrap_or(DEFAULT_WINDOW_SIZE)
    }
}

/// Default location of the config file.
pub fn config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ViewerError::NoConfigDir)?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE))
}

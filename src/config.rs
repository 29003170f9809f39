//! Registry configuration

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Marker placed between an event name and the node identity token
pub const DEFAULT_SEPARATOR: &str = "__EVENT_EMITTER__";

/// Settings for a [`crate::events::Registry`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Literal that joins an event name to the node identity token in a
    /// registration key. Must not appear inside event or namespace names.
    pub separator: String,

    /// Resolve `... #id` selectors with a direct id lookup instead of a
    /// general query
    pub id_fast_path: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            id_fast_path: true,
        }
    }
}

impl Config {
    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the separator cannot collide with event names
    pub fn validate(&self) -> Result<()> {
        if self.separator.is_empty() {
            return Err(Error::Config("separator must not be empty".into()));
        }
        if self
            .separator
            .chars()
            .any(|c| c == '.' || c.is_whitespace())
        {
            return Err(Error::Config(format!(
                "separator {:?} must not contain '.' or whitespace",
                self.separator
            )));
        }
        Ok(())
    }
}

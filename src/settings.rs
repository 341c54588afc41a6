use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What a view does to itself at the end of its own cleanup, after its
/// subviews have been cleaned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupPolicy {
    #[default]
    Keep,
    StopListening,
    /// Stop listening and leave the parent's subview table.
    Detach,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Policy for views that do not declare their own.
    pub cleanup: CleanupPolicy,
    /// Speed handed to the animator for `Removal::Animated`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_speed_ms: Option<u64>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cleanup: CleanupPolicy::Keep,
            animation_speed_ms: None,
            log_filter: "subviews=info".to_string(),
        }
    }
}

impl Settings {
    pub fn from_json(data: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(data)?)
    }
}

pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    let data = std::fs::read_to_string(path)?;
    Settings::from_json(&data)
}

/// Writes the default settings to `path` unless the file already exists.
pub fn ensure_settings_file(path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&Settings::default())?;
        std::fs::write(path, content)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

/// Cosmetic options from the settings panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSettings {
    pub use_osrs_background: bool,
    /// Sound effect volume, `0.0` (muted) to `1.0`.
    pub volume: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            use_osrs_background: false,
            volume: 1.0,
        }
    }
}

impl UiSettings {
    fn sanitized(mut self) -> Self {
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserSettings {
    #[serde(default)]
    ui: UiSettings,
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring unreadable settings at {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn ui(&self) -> UiSettings {
        self.data
            .read()
            .map(|guard| guard.ui.clone())
            .unwrap_or_default()
    }

    pub fn update_ui(&self, settings: UiSettings) -> Result<UiSettings> {
        let settings = settings.sanitized();
        let mut guard = self
            .data
            .write()
            .map_err(|_| anyhow!("settings lock poisoned"))?;
        guard.ui = settings.clone();
        self.persist(&guard)?;
        Ok(settings)
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.ui(), UiSettings::default());
    }

    #[test]
    fn update_persists_and_clamps_volume() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let store = SettingsStore::new(path.clone()).unwrap();

        let saved = store
            .update_ui(UiSettings {
                use_osrs_background: true,
                volume: 3.0,
            })
            .unwrap();
        assert_eq!(saved.volume, 1.0);

        let reopened = SettingsStore::new(path).unwrap();
        assert_eq!(
            reopened.ui(),
            UiSettings {
                use_osrs_background: true,
                volume: 1.0
            }
        );
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();
        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.ui(), UiSettings::default());
    }
}

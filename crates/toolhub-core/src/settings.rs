//! User settings and display preferences persisted as plain strings
//!
//! Values are stored exactly as the browser stored them in local storage:
//! two scalar flags and one JSON settings blob, with no schema version.

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const VIBE_MODE_KEY: &str = "vibeMode";
pub const PARTICLES_KEY: &str = "particlesEnabled";
pub const USER_SETTINGS_KEY: &str = "user_settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub newsletter: bool,
    pub theme: String,
    pub language: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            newsletter: false,
            theme: "dark".to_string(),
            language: "en".to_string(),
        }
    }
}

impl UserSettings {
    /// Parse a stored blob; anything unreadable yields the defaults
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw {
            None => Self::default(),
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
                warn!("Discarding unreadable settings blob: {}", e);
                Self::default()
            }),
        }
    }

    pub fn to_stored(&self) -> String {
        // Plain struct of strings and bools; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPreferences {
    pub vibe_mode: bool,
    pub particles_enabled: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            vibe_mode: false,
            particles_enabled: true,
        }
    }
}

impl DisplayPreferences {
    /// Vibe mode is on only for the exact string `"true"`; particles are off
    /// only for the exact string `"false"`.
    pub fn from_stored(vibe_mode: Option<&str>, particles: Option<&str>) -> Self {
        Self {
            vibe_mode: vibe_mode == Some("true"),
            particles_enabled: particles != Some("false"),
        }
    }

    pub fn stored_vibe_mode(&self) -> String {
        self.vibe_mode.to_string()
    }

    pub fn stored_particles(&self) -> String {
        self.particles_enabled.to_string()
    }
}

/// Partial update from the preferences endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub vibe_mode: Option<bool>,
    #[serde(default)]
    pub particles_enabled: Option<bool>,
}

impl DisplayPreferences {
    pub fn apply(&mut self, update: PreferencesUpdate) {
        if let Some(v) = update.vibe_mode {
            self.vibe_mode = v;
        }
        if let Some(p) = update.particles_enabled {
            self.particles_enabled = p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_parsing_is_asymmetric() {
        let prefs = DisplayPreferences::from_stored(None, None);
        assert!(!prefs.vibe_mode);
        assert!(prefs.particles_enabled);

        let prefs = DisplayPreferences::from_stored(Some("TRUE"), Some("no"));
        assert!(!prefs.vibe_mode);
        assert!(prefs.particles_enabled);

        let prefs = DisplayPreferences::from_stored(Some("true"), Some("false"));
        assert!(prefs.vibe_mode);
        assert!(!prefs.particles_enabled);
    }

    #[test]
    fn test_settings_blob_fallbacks() {
        assert_eq!(UserSettings::from_stored(None), UserSettings::default());
        assert_eq!(UserSettings::from_stored(Some("{not json")), UserSettings::default());

        let partial = UserSettings::from_stored(Some(r#"{"theme":"light"}"#));
        assert_eq!(partial.theme, "light");
        assert!(partial.email_notifications);
    }

    #[test]
    fn test_settings_blob_roundtrip() {
        let settings = UserSettings {
            newsletter: true,
            language: "hi".to_string(),
            ..Default::default()
        };
        assert_eq!(UserSettings::from_stored(Some(&settings.to_stored())), settings);
    }

    #[test]
    fn test_partial_update() {
        let mut prefs = DisplayPreferences::default();
        prefs.apply(PreferencesUpdate {
            vibe_mode: Some(true),
            particles_enabled: None,
        });
        assert!(prefs.vibe_mode);
        assert!(prefs.particles_enabled);
    }
}

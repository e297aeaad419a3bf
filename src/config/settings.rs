//! Passive settings store.
//!
//! A typed settings tree loaded once at startup from a YAML file and passed
//! explicitly into whatever needs it; there is no global singleton. Every
//! key has a default, so a missing or unreadable settings file degrades to
//! defaults instead of failing.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub tree: TreeSettings,
    pub game: GameSettings,
    pub search: SearchSettings,
    pub colors: ColorSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Cap on roots shown in the default ("recent players") forest view.
    pub default_display_nodes: usize,
    pub font_size: String,
    pub date_format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    pub node_radius: u32,
    pub vertical_spacing: u32,
    pub horizontal_spacing: u32,
    pub zoom_enabled: bool,
    pub pan_enabled: bool,
    pub initial_depth: u32,
    pub collapse_depth: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub default_rounds: u32,
    pub default_bet: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub debounce_ms: u64,
    pub min_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub node_default: String,
    pub node_selected: String,
    pub node_hover: String,
    pub edge_color: String,
    pub background: String,
    pub text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            default_display_nodes: 20,
            font_size: "14px".into(),
            date_format: "dd/MM/yyyy".into(),
        }
    }
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            node_radius: 20,
            vertical_spacing: 100,
            horizontal_spacing: 150,
            zoom_enabled: true,
            pan_enabled: true,
            initial_depth: 3,
            collapse_depth: 2,
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            default_rounds: 10,
            default_bet: 0,
        }
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            min_chars: 0,
        }
    }
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            node_default: "#00ff00".into(),
            node_selected: "#ffff00".into(),
            node_hover: "#00ffff".into(),
            edge_color: "#00ff00".into(),
            background: "#0a0e27".into(),
            text: "#00ff00".into(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file, falling back to defaults when the
    /// file is missing or malformed. Unknown keys are ignored; absent keys
    /// take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_yaml::from_str(&text) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(path = %path.display(), %err, "settings file malformed, using defaults");
                    Self::default()
                }
            },
            Err(err) => {
                warn!(path = %path.display(), %err, "settings file unreadable, using defaults");
                Self::default()
            }
        }
    }

    /// Numeric lookup by dotted path (e.g. `"game.default_rounds"`), for
    /// display-layer consumers that address settings by key. `None` for
    /// unknown paths or non-numeric values.
    pub fn get_number(&self, dotted_path: &str) -> Option<f64> {
        let mut value = serde_json::to_value(self).ok()?;
        for key in dotted_path.split('.') {
            value = value.get(key)?.clone();
        }
        value.as_f64()
    }
}

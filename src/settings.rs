//! Game settings and tuning
//!
//! Persisted as JSON in LocalStorage. Missing fields fall back to defaults so
//! older saves keep loading after new knobs are added.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player speed and slowest oncoming speed (pixels per frame)
    pub speed: f32,
    /// Car width in pixels (height is half)
    pub car_size: f32,
    /// Viewport pixels per oncoming car
    pub spawn_spacing: f32,
    /// Player spawn x
    pub player_start_x: f32,
    /// Canvas size relative to the viewport, in (0, 1]
    pub canvas_fraction: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed: SPEED,
            car_size: CAR_SIZE,
            spawn_spacing: SPAWN_SPACING,
            player_start_x: PLAYER_START_X,
            canvas_fraction: CANVAS_FRACTION,
        }
    }
}

impl Tuning {
    /// Replace unusable values with defaults and clamp the rest into range
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };

        let player_start_x = if self.player_start_x.is_finite() && self.player_start_x >= 0.0 {
            self.player_start_x
        } else {
            defaults.player_start_x
        };

        Self {
            speed: positive(self.speed, defaults.speed).min(MAX_SPEED),
            car_size: positive(self.car_size, defaults.car_size).min(MAX_CAR_SIZE),
            spawn_spacing: positive(self.spawn_spacing, defaults.spawn_spacing)
                .max(MIN_SPAWN_SPACING),
            player_start_x: player_start_x.min(MAX_PLAYER_START_X),
            canvas_fraction: positive(self.canvas_fraction, defaults.canvas_fraction).min(1.0),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Diagnostics ===
    /// Log level name ("error", "warn", "info", "debug", "trace")
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            show_fps: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "car_avoidance_settings";

    /// Parse settings JSON, falling back to defaults on error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(mut settings) => {
                settings.tuning = settings.tuning.sanitized();
                settings
            }
            Err(e) => {
                log::warn!("Ignoring unreadable settings: {}", e);
                Self::default()
            }
        }
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Option<String> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("Could not serialize settings: {}", e);
                None
            }
        }
    }

    /// Configured log level, Info if the name is not recognised
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::from_json(&json);
            }
        }

        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Some(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        if let Some(json) = self.to_json() {
            log::debug!("Settings (not persisted on native): {}", json);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let tuning = Tuning::default();
        assert_eq!(tuning.speed, 5.0);
        assert_eq!(tuning.car_size, 60.0);
        assert_eq!(tuning.spawn_spacing, 80.0);
        assert_eq!(tuning.player_start_x, 20.0);
        assert_eq!(tuning.canvas_fraction, 0.75);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"show_fps": true, "tuning": {"speed": 7.5}}"#);
        assert!(settings.show_fps);
        assert_eq!(settings.tuning.speed, 7.5);
        assert_eq!(settings.tuning.car_size, CAR_SIZE);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_garbage_json_falls_back() {
        assert_eq!(Settings::from_json("not json"), Settings::default());
    }

    #[test]
    fn test_sanitize_rejects_bad_values() {
        let tuning = Tuning {
            speed: -1.0,
            car_size: f32::NAN,
            spawn_spacing: 0.0,
            player_start_x: f32::INFINITY,
            canvas_fraction: 3.0,
        }
        .sanitized();
        assert_eq!(tuning.speed, SPEED);
        assert_eq!(tuning.car_size, CAR_SIZE);
        assert_eq!(tuning.spawn_spacing, SPAWN_SPACING);
        assert_eq!(tuning.player_start_x, PLAYER_START_X);
        assert_eq!(tuning.canvas_fraction, 1.0);
    }

    #[test]
    fn test_sanitize_clamps_extreme_values() {
        let settings = Settings::from_json(
            r#"{"tuning": {"speed": 3e38, "car_size": 1e20, "spawn_spacing": 1e-30,
                "player_start_x": 1e12}}"#,
        );
        assert_eq!(settings.tuning.speed, MAX_SPEED);
        assert_eq!(settings.tuning.car_size, MAX_CAR_SIZE);
        assert_eq!(settings.tuning.spawn_spacing, MIN_SPAWN_SPACING);
        assert_eq!(settings.tuning.player_start_x, MAX_PLAYER_START_X);
        assert!((-2.0 * settings.tuning.speed).is_finite());
    }

    #[test]
    fn test_saved_json_loads_back() {
        let mut settings = Settings::default();
        settings.show_fps = true;
        settings.tuning.speed = 6.5;
        let json = settings.to_json().unwrap();
        assert!(json.contains("\"show_fps\":true"));
        assert_eq!(Settings::from_json(&json), settings);
    }

    #[test]
    fn test_log_level_parse() {
        let mut settings = Settings::default();
        assert_eq!(settings.log_level(), log::Level::Info);
        settings.log_level = "debug".to_string();
        assert_eq!(settings.log_level(), log::Level::Debug);
        settings.log_level = "loud".to_string();
        assert_eq!(settings.log_level(), log::Level::Info);
    }
}

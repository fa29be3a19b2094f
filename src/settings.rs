//! Game settings
//!
//! Gameplay tuning and camera placement. Read as JSON from LocalStorage on
//! the web build; native runs use the defaults.

use serde::{Deserialize, Serialize};

/// Gameplay and camera configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Footprint of the base block, and the sweep bound on either side
    pub box_size: f32,
    /// Sweep distance per step
    pub speed: f32,

    // === Visual Effects ===
    /// Spawn falling fragments for trimmed-off pieces
    pub overhangs: bool,
    /// Fall acceleration of fragments (units per step²)
    pub overhang_gravity: f32,

    // === Camera ===
    /// Vertical field of view
    pub camera_fov_degrees: f32,
    pub camera_eye: [f32; 3],
    pub camera_target: [f32; 3],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            box_size: 3.0,
            speed: 0.04,

            overhangs: true,
            overhang_gravity: 0.01,

            camera_fov_degrees: 75.0,
            camera_eye: [4.0, 10.0, 10.0],
            camera_target: [0.0, 0.0, 0.0],
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Replace unusable values with defaults
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if !(self.box_size.is_finite() && self.box_size > 0.0) {
            log::warn!("Invalid box_size {}, using {}", self.box_size, defaults.box_size);
            self.box_size = defaults.box_size;
        }
        if !(self.speed.is_finite() && self.speed != 0.0) {
            log::warn!("Invalid speed {}, using {}", self.speed, defaults.speed);
            self.speed = defaults.speed;
        }
        if !(self.overhang_gravity.is_finite() && self.overhang_gravity >= 0.0) {
            log::warn!(
                "Invalid overhang_gravity {}, using {}",
                self.overhang_gravity,
                defaults.overhang_gravity
            );
            self.overhang_gravity = defaults.overhang_gravity;
        }
        if !(self.camera_fov_degrees > 1.0 && self.camera_fov_degrees < 179.0) {
            log::warn!(
                "Invalid camera_fov_degrees {}, using {}",
                self.camera_fov_degrees,
                defaults.camera_fov_degrees
            );
            self.camera_fov_degrees = defaults.camera_fov_degrees;
        }
        let finite = |v: &[f32; 3]| v.iter().all(|c| c.is_finite());
        if !(finite(&self.camera_eye) && finite(&self.camera_target))
            || self.camera_eye == self.camera_target
        {
            log::warn!("Invalid camera placement, using defaults");
            self.camera_eye = defaults.camera_eye;
            self.camera_target = defaults.camera_target;
        }

        self
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "stack_tower_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings.validated();
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"speed": 0.08}"#).unwrap();
        assert_eq!(settings.speed, 0.08);
        assert_eq!(settings.box_size, 3.0);
        assert!(settings.overhangs);
    }

    #[test]
    fn test_json_roundtrip() {
        let settings = Settings {
            box_size: 4.0,
            overhangs: false,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{not json").is_err());
    }

    #[test]
    fn test_validated_replaces_bad_values() {
        let settings = Settings {
            box_size: -1.0,
            speed: 0.0,
            overhang_gravity: f32::NAN,
            camera_fov_degrees: 500.0,
            camera_eye: [0.0, 0.0, 0.0],
            ..Settings::default()
        }
        .validated();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_validated_rejects_non_finite_target() {
        let settings = Settings {
            camera_eye: [1.0, 2.0, 3.0],
            camera_target: [0.0, f32::NAN, 0.0],
            ..Settings::default()
        }
        .validated();
        assert_eq!(settings.camera_eye, Settings::default().camera_eye);
        assert_eq!(settings.camera_target, Settings::default().camera_target);
    }

    #[test]
    fn test_validated_allows_negative_speed() {
        let settings = Settings {
            speed: -0.05,
            ..Settings::default()
        }
        .validated();
        assert_eq!(settings.speed, -0.05);
    }
}

//! Player preferences
//!
//! Persisted in LocalStorage. Game progress is never saved.

use serde::{Deserialize, Serialize};

/// When to show the touch joystick and buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MobileControls {
    /// Show on touch devices and narrow screens
    #[default]
    Auto,
    On,
    Off,
}

impl MobileControls {
    pub fn as_str(&self) -> &'static str {
        match self {
            MobileControls::Auto => "Auto",
            MobileControls::On => "On",
            MobileControls::Off => "Off",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(MobileControls::Auto),
            "on" | "yes" => Some(MobileControls::On),
            "off" | "no" => Some(MobileControls::Off),
            _ => None,
        }
    }

    /// Resolve against what the browser reports
    pub fn enabled(&self, looks_mobile: bool) -> bool {
        match self {
            MobileControls::Auto => looks_mobile,
            MobileControls::On => true,
            MobileControls::Off => false,
        }
    }
}

/// Screens at or below this width count as mobile in `Auto` mode
pub const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Best-effort mobile detection from the user agent and viewport width
pub fn looks_mobile(user_agent: &str, viewport_width: f64) -> bool {
    const MARKERS: [&str; 7] = ["android", "webos", "iphone", "ipad", "ipod", "blackberry", "iemobile"];
    let ua = user_agent.to_lowercase();
    MARKERS.iter().any(|m| ua.contains(m)) || ua.contains("opera mini") || viewport_width <= MOBILE_MAX_WIDTH
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show FPS counter
    pub show_fps: bool,
    /// Touch controls visibility
    pub mobile_controls: MobileControls,
    /// Ease the camera instead of snapping it behind the player
    pub camera_smoothing: bool,
    /// Reduced motion (no fear vignette, no pulsing badges)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_fps: false,
            mobile_controls: MobileControls::Auto,
            camera_smoothing: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective vignette (respects reduced_motion)
    pub fn effective_vignette(&self) -> bool {
        !self.reduced_motion
    }

    /// Parse from JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "nightmare_escape_settings";

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
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
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
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"show_fps": true}"#).unwrap();
        assert!(settings.show_fps);
        assert_eq!(settings.mobile_controls, MobileControls::Auto);
        assert!(settings.camera_smoothing);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let settings = Settings::from_json(r#"{"master_volume": 3.5, "reduced_motion": true}"#).unwrap();
        assert!(settings.reduced_motion);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(Settings::from_json("not json").is_err());
    }

    #[test]
    fn test_mobile_controls() {
        assert_eq!(MobileControls::parse("OFF"), Some(MobileControls::Off));
        assert_eq!(MobileControls::parse("sideways"), None);
        assert!(MobileControls::Auto.enabled(true));
        assert!(!MobileControls::Auto.enabled(false));
        assert!(MobileControls::On.enabled(false));
        assert_eq!(MobileControls::On.as_str(), "On");
    }

    #[test]
    fn test_looks_mobile() {
        assert!(looks_mobile("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", 1200.0));
        assert!(looks_mobile("Mozilla/5.0 (X11; Linux x86_64)", 640.0));
        assert!(!looks_mobile("Mozilla/5.0 (X11; Linux x86_64)", 1920.0));
    }

    #[test]
    fn test_reduced_motion_disables_vignette() {
        let settings = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        assert!(!settings.effective_vignette());
    }
}

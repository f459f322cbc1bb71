//! Game options and tuning
//!
//! Everything here is fixed at engine construction; only the fall speed
//! changes at runtime. Persisted to LocalStorage so a reload keeps the
//! player's setup.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts;

/// Encoding for a dot's fixed horizontal position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XPlacement {
    /// Absolute pixel coordinate, resolved once at spawn
    #[default]
    Absolute,
    /// Fraction of board width, re-resolved every render (adapts to resize)
    Fraction,
}

impl XPlacement {
    pub fn as_str(&self) -> &'static str {
        match self {
            XPlacement::Absolute => "Absolute",
            XPlacement::Fraction => "Fraction",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "absolute" | "abs" | "pixel" => Some(XPlacement::Absolute),
            "fraction" | "percent" => Some(XPlacement::Fraction),
            _ => None,
        }
    }
}

/// Invalid configuration, detected at engine construction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("diameter range {min}..={max} leaves no valid radius")]
    DiameterRange { min: u32, max: u32 },
    #[error("frames_per_second must be at least 1")]
    ZeroFrameRate,
    #[error("spawn_interval_ms must be at least 1")]
    ZeroSpawnInterval,
    #[error("board width {width}px cannot fit a {required}px dot span")]
    BoardTooNarrow { width: f32, required: f32 },
}

/// Game options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameOptions {
    /// Tick cadence; frame interval = 1000 / frames_per_second ms
    pub frames_per_second: u32,
    /// Smallest spawnable dot diameter (pixels)
    pub min_diameter: u32,
    /// Largest spawnable dot diameter (pixels)
    pub max_diameter: u32,
    /// Fixed period between automatic spawns (ms)
    pub spawn_interval_ms: u32,
    /// Delay after a scored hit before the replacement dot appears (ms)
    pub respawn_delay_ms: u32,
    /// Outline width around each dot
    pub stroke_width: f32,
    /// Keeps spawned dots clear of the left/right board edges
    pub padding: f32,
    /// One pointer event scores every dot under it, not just the topmost
    pub propagate_hits: bool,
    /// Encoding for dot x positions
    pub x_placement: XPlacement,
    /// Fall speed at game start (pixels per second)
    pub start_speed: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            frames_per_second: consts::FRAMES_PER_SECOND,
            min_diameter: consts::MIN_DIAMETER,
            max_diameter: consts::MAX_DIAMETER,
            spawn_interval_ms: consts::SPAWN_INTERVAL_MS,
            respawn_delay_ms: consts::RESPAWN_DELAY_MS,
            stroke_width: consts::STROKE_WIDTH,
            padding: consts::PADDING,
            propagate_hits: false,
            x_placement: XPlacement::Absolute,
            start_speed: consts::START_SPEED,
        }
    }
}

impl GameOptions {
    /// Inclusive radius bounds derived from the diameter bounds
    pub fn radius_range(&self) -> (u32, u32) {
        (self.min_diameter / 2, self.max_diameter / 2)
    }

    /// Frame interval in milliseconds
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.frames_per_second as f64
    }

    /// Widest horizontal span a dot can occupy, outline and padding included
    pub fn max_dot_span(&self) -> f32 {
        self.max_diameter as f32 + 2.0 * (self.stroke_width + self.padding)
    }

    /// Check the invariants that don't need board geometry
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (r_min, r_max) = self.radius_range();
        if r_min == 0 || r_min > r_max {
            return Err(ConfigError::DiameterRange {
                min: self.min_diameter,
                max: self.max_diameter,
            });
        }
        if self.frames_per_second == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        Ok(())
    }

    /// Check against actual board geometry; fails fast instead of clamping
    /// the spawn range
    pub fn validate_board(&self, board_width: f32) -> Result<(), ConfigError> {
        let required = self.max_dot_span();
        if board_width < required {
            return Err(ConfigError::BoardTooNarrow {
                width: board_width,
                required,
            });
        }
        Ok(())
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dot_drop_options";

    /// Load options from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(options) = serde_json::from_str(&json) {
                    log::info!("Loaded options from LocalStorage");
                    return options;
                }
            }
        }

        log::info!("Using default options");
        Self::default()
    }

    /// Save options to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Options saved");
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
    fn test_defaults_validate() {
        let opts = GameOptions::default();
        assert!(opts.validate().is_ok());
        assert!(opts.validate_board(400.0).is_ok());
    }

    #[test]
    fn test_inverted_diameter_range_rejected() {
        let opts = GameOptions {
            min_diameter: 100,
            max_diameter: 10,
            ..GameOptions::default()
        };
        assert_eq!(
            opts.validate(),
            Err(ConfigError::DiameterRange { min: 100, max: 10 })
        );
    }

    #[test]
    fn test_sub_pixel_min_diameter_rejected() {
        let opts = GameOptions {
            min_diameter: 1,
            ..GameOptions::default()
        };
        // radius would round down to zero
        assert!(matches!(
            opts.validate(),
            Err(ConfigError::DiameterRange { .. })
        ));
    }

    #[test]
    fn test_zero_frame_rate_rejected() {
        let opts = GameOptions {
            frames_per_second: 0,
            ..GameOptions::default()
        };
        assert_eq!(opts.validate(), Err(ConfigError::ZeroFrameRate));
    }

    #[test]
    fn test_narrow_board_rejected() {
        let opts = GameOptions::default();
        // default span: 100 + 2 * (1 + 10) = 122
        assert!((opts.max_dot_span() - 122.0).abs() < 0.001);
        assert!(opts.validate_board(121.0).is_err());
        assert!(opts.validate_board(122.0).is_ok());
    }

    #[test]
    fn test_x_placement_round_trip() {
        assert_eq!(XPlacement::from_str("absolute"), Some(XPlacement::Absolute));
        assert_eq!(XPlacement::from_str("percent"), Some(XPlacement::Fraction));
        assert_eq!(XPlacement::from_str("nope"), None);
        assert_eq!(XPlacement::Fraction.as_str(), "Fraction");
    }
}

//! Dot Drop - a falling-dots reaction game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, falling, hit-testing, scoring)
//! - `surface`: Boundary traits for the rendering surface and score display
//! - `settings`: Data-driven game options with browser persistence

pub mod settings;
pub mod sim;
pub mod surface;

pub use settings::{ConfigError, GameOptions, XPlacement};
pub use surface::{DrawSurface, HeadlessSurface, ScoreDisplay, ScoreProbe, Viewport};

/// Game configuration constants
pub mod consts {
    /// Tick cadence; frame interval = 1000 / FRAMES_PER_SECOND ms
    pub const FRAMES_PER_SECOND: u32 = 60;
    /// Maximum timer catch-up events per poll to prevent spiral of death
    pub const MAX_TIMER_CATCHUP: u32 = 8;

    /// Dot diameter bounds (pixels)
    pub const MIN_DIAMETER: u32 = 10;
    pub const MAX_DIAMETER: u32 = 100;

    /// Fixed period between automatic dot spawns
    pub const SPAWN_INTERVAL_MS: u32 = 1000;
    /// Delay after a scored hit before the replacement dot appears
    pub const RESPAWN_DELAY_MS: u32 = 1000;

    /// Outline width drawn around each dot
    pub const STROKE_WIDTH: f32 = 1.0;
    /// Keeps spawned dots clear of the left/right board edges
    pub const PADDING: f32 = 10.0;

    /// Fall speed at game start (pixels per second)
    pub const START_SPEED: u32 = 60;
}

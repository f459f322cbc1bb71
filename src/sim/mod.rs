//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - Seeded RNG only
//! - Caller-supplied clock (no platform time)
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the `DrawSurface` trait

pub mod dot;
pub mod engine;
pub mod hit;
pub mod state;
pub mod tick;
pub mod timers;

pub use dot::{Dot, DrawnCircle};
pub use engine::Engine;
pub use hit::{HitOutcome, calculate_score, handle_pointer};
pub use state::{Board, GameState};
pub use tick::{expire_dots, tick};
pub use timers::{TimerEvent, Timers};

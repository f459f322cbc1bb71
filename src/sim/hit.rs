//! Pointer hit-testing and scoring
//!
//! Containment is evaluated against each dot's last-drawn circle,
//! re-defined on the surface so the exact geometry that was rendered
//! answers the hit test. The tested position can trail the true position
//! by up to one frame; that is the intended behavior, not a bug.

use std::f32::consts::TAU;

use glam::Vec2;

use super::dot::Dot;
use super::state::GameState;
use crate::settings::GameOptions;
use crate::surface::DrawSurface;

/// What one pointer event did to the dot collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitOutcome {
    /// Points added to the score
    pub points: u64,
    /// Dots removed; one replacement is scheduled per removal
    pub removed: usize,
}

/// Score of a single dot: smaller dots are worth more
///
/// `round(max_diameter / (2 * radius))`, rounding half away from zero. A
/// dot at the maximum diameter scores 1; one at the minimum scores
/// `round(max_diameter / min_diameter)`.
pub fn calculate_score(radius: f32, max_diameter: u32) -> u64 {
    (max_diameter as f64 / (2.0 * radius as f64)).round() as u64
}

/// Handle a pointer-down at board-local coordinates
///
/// With `propagate_hits` every dot under the pointer scores in one pass;
/// otherwise only the most recently spawned one does (it renders on top).
/// Suppressing the input event's default handling is the caller's job.
pub fn handle_pointer(
    state: &mut GameState,
    opts: &GameOptions,
    surface: &mut dyn DrawSurface,
    point: Vec2,
) -> HitOutcome {
    let mut outcome = HitOutcome::default();

    if opts.propagate_hits {
        let mut i = 0;
        while i < state.dots.len() {
            if dot_contains(surface, &state.dots[i], point) {
                let dot = state.dots.remove(i);
                outcome.points += calculate_score(dot.radius, opts.max_diameter);
                outcome.removed += 1;
            } else {
                i += 1;
            }
        }
    } else {
        for i in (0..state.dots.len()).rev() {
            if dot_contains(surface, &state.dots[i], point) {
                let dot = state.dots.remove(i);
                outcome.points += calculate_score(dot.radius, opts.max_diameter);
                outcome.removed = 1;
                break;
            }
        }
    }

    if outcome.removed > 0 {
        state.score += outcome.points;
        log::debug!(
            "scored {} point(s) from {} dot(s), total {}",
            outcome.points,
            outcome.removed,
            state.score
        );
    }
    outcome
}

/// Point-in-filled-circle test against the dot's last-drawn geometry
fn dot_contains(surface: &mut dyn DrawSurface, dot: &Dot, point: Vec2) -> bool {
    let Some(drawn) = dot.drawn else {
        // spawned but never rendered
        return false;
    };
    surface.begin_shape();
    surface.circle(drawn.x, drawn.y, drawn.radius, 0.0, TAU);
    surface.end_shape();
    surface.contains_point(point.x, point.y)
}

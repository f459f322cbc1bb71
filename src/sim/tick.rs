//! Per-frame advance, draw, and expiry
//!
//! One tick: clear, apply any deferred resize, move every dot by
//! `speed / frames_per_second`, redraw in spawn order, drop the expired
//! prefix. Pointer handling happens between ticks and sees the collection
//! exactly as the previous tick left it.

use std::f32::consts::TAU;

use super::dot::DrawnCircle;
use super::state::{Board, GameState};
use crate::settings::GameOptions;
use crate::surface::DrawSurface;

/// Advance the simulation by one frame and redraw every dot
pub fn tick(state: &mut GameState, opts: &GameOptions, surface: &mut dyn DrawSurface) {
    surface.clear(state.board.width, state.board.height);

    // Resize is applied here, never inline from the notification, so board
    // coordinates can't change mid-hit-test.
    if state.resize_pending {
        let prev = state.board;
        state.board = Board::from_viewport(surface.viewport());
        state.resize_pending = false;
        if state.board != prev {
            log::info!(
                "board resized {}x{} -> {}x{}",
                prev.width,
                prev.height,
                state.board.width,
                state.board.height
            );
        }
    }

    // Speed 0 leaves dots stationary; they are still drawn and expired.
    let dy = state.speed as f32 / opts.frames_per_second as f32;

    let placement = opts.x_placement;
    let board_width = state.board.width;
    for dot in &mut state.dots {
        dot.y += dy;
        let px = dot.resolve_x(placement, board_width);
        draw_dot(surface, px, dot.y, dot.radius, opts.stroke_width);
        dot.drawn = Some(DrawnCircle {
            x: px,
            y: dot.y,
            radius: dot.radius,
        });
    }

    expire_dots(state, opts);
}

/// Define, fill, and stroke one dot on the surface
fn draw_dot(surface: &mut dyn DrawSurface, x: f32, y: f32, radius: f32, stroke_width: f32) {
    surface.begin_shape();
    surface.circle(x, y, radius, 0.0, TAU);
    surface.end_shape();
    surface.fill();
    surface.stroke(stroke_width);
}

/// Remove dots whose leading (bottom) edge has passed the bottom boundary
///
/// Spawn y is `-(radius + stroke)`, so the expiry tick is radius
/// independent and expired dots are always a prefix of the spawn-ordered
/// collection while every dot shares the same speed. A full `retain` is
/// the fallback if per-dot speeds ever appear.
pub fn expire_dots(state: &mut GameState, opts: &GameOptions) {
    let expired = state
        .dots
        .iter()
        .take_while(|dot| dot.expired(opts.stroke_width, state.board.height))
        .count();
    if expired > 0 {
        state.dots.drain(..expired);
        log::debug!("expired {} dot(s), {} live", expired, state.dots.len());
    }
}

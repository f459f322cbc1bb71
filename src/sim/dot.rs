//! Dot entity and spawn geometry
//!
//! A dot's radius and horizontal slot are rolled once at spawn and never
//! change; only `y` moves. The `drawn` field is the circle most recently
//! handed to the draw step - hit tests run against it, so a dot that has
//! not been rendered yet cannot be hit, and between a move and the next
//! render the tested position trails the true one by up to a frame.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::settings::{GameOptions, XPlacement};

/// Circle geometry as last handed to the draw step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawnCircle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

/// A falling circular target
#[derive(Debug, Clone)]
pub struct Dot {
    /// Fixed at creation, integer-valued
    pub radius: f32,
    /// Horizontal position; pixels or fraction of board width per `XPlacement`
    pub x: f32,
    /// Fall-axis position, advanced every tick
    pub y: f32,
    /// Most recently rendered geometry (None until first drawn)
    pub drawn: Option<DrawnCircle>,
}

impl Dot {
    /// Roll a new dot fully above the visible area
    ///
    /// Radius is a uniform integer in `[min_diameter/2, max_diameter/2]`;
    /// the horizontal slot keeps the whole outline, stroke and padding
    /// included, inside `[0, board_width]`.
    pub fn spawn(rng: &mut Pcg32, opts: &GameOptions, board_width: f32) -> Self {
        let (r_min, r_max) = opts.radius_range();
        let radius = rng.random_range(r_min..=r_max) as f32;

        let margin = radius + opts.stroke_width + opts.padding;
        // Board width is validated at startup, but a later resize can
        // shrink below the span; a degenerate range pins spawns to center.
        let hi = board_width - margin;
        let pixel_x = if hi > margin {
            rng.random_range(margin..=hi)
        } else {
            board_width / 2.0
        };
        let x = match opts.x_placement {
            XPlacement::Absolute => pixel_x,
            XPlacement::Fraction => pixel_x / board_width,
        };

        Self {
            radius,
            x,
            y: -(radius + opts.stroke_width),
            drawn: None,
        }
    }

    /// Resolve the stored x to a pixel coordinate for the given board width
    ///
    /// The two encodings stay distinct on purpose: `Absolute` ignores
    /// resize, `Fraction` follows it.
    pub fn resolve_x(&self, placement: XPlacement, board_width: f32) -> f32 {
        match placement {
            XPlacement::Absolute => self.x,
            XPlacement::Fraction => self.x * board_width,
        }
    }

    /// True once the leading (bottom) edge has passed the bottom boundary
    pub fn expired(&self, stroke_width: f32, board_height: f32) -> bool {
        self.y + self.radius + stroke_width > board_height
    }
}

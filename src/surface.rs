//! Boundary contracts for the out-of-scope collaborators
//!
//! The engine draws and hit-tests through `DrawSurface` and reports scores
//! through `ScoreDisplay`. Drivers adapt a real canvas and DOM on wasm, or
//! the headless implementation below for native runs and tests.

use glam::Vec2;

/// Pixel geometry of the play surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Screen-space offset of the surface origin, for pointer translation
    pub offset: Vec2,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
        }
    }
}

/// Rendering surface contract
///
/// `begin_shape`/`circle`/`end_shape` bracket a shape definition; `fill`
/// and `stroke` paint it; `contains_point` evaluates against the most
/// recently defined shape.
pub trait DrawSurface {
    fn viewport(&self) -> Viewport;
    fn clear(&mut self, width: f32, height: f32);
    fn begin_shape(&mut self);
    fn circle(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
    );
    fn end_shape(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self, width: f32);
    fn contains_point(&self, x: f32, y: f32) -> bool;
}

/// Text target for the current score
pub trait ScoreDisplay {
    fn show(&mut self, score: u64);
}

/// Records the last score shown; the native driver's and tests' display
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreProbe {
    pub last: Option<u64>,
}

impl ScoreDisplay for ScoreProbe {
    fn show(&mut self, score: u64) {
        self.last = Some(score);
    }
}

/// Math-backed surface for native runs and tests
///
/// Tracks the current shape definition and answers `contains_point` with a
/// point-in-circle test over the filled area, boundary inclusive, matching
/// canvas `isPointInPath` on a full-turn arc.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    viewport: Viewport,
    shape: Option<(f32, f32, f32)>,
    pub clears: u32,
    pub fills: u32,
    pub strokes: u32,
}

impl HeadlessSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            shape: None,
            clears: 0,
            fills: 0,
            strokes: 0,
        }
    }

    /// Change the reported viewport, simulating a window resize
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

impl DrawSurface for HeadlessSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self, _width: f32, _height: f32) {
        self.clears += 1;
    }

    fn begin_shape(&mut self) {
        self.shape = None;
    }

    fn circle(
        &mut self,
        center_x: f32,
        center_y: f32,
        radius: f32,
        _start_angle: f32,
        _end_angle: f32,
    ) {
        self.shape = Some((center_x, center_y, radius));
    }

    fn end_shape(&mut self) {}

    fn fill(&mut self) {
        self.fills += 1;
    }

    fn stroke(&mut self, _width: f32) {
        self.strokes += 1;
    }

    fn contains_point(&self, x: f32, y: f32) -> bool {
        let Some((cx, cy, r)) = self.shape else {
            return false;
        };
        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= r * r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_point_boundary_inclusive() {
        let mut surface = HeadlessSurface::new(400.0, 600.0);
        surface.begin_shape();
        surface.circle(100.0, 100.0, 10.0, 0.0, std::f32::consts::TAU);
        surface.end_shape();

        assert!(surface.contains_point(100.0, 100.0));
        assert!(surface.contains_point(110.0, 100.0)); // on the boundary
        assert!(!surface.contains_point(110.5, 100.0));
    }

    #[test]
    fn test_begin_shape_resets_path() {
        let mut surface = HeadlessSurface::new(400.0, 600.0);
        surface.begin_shape();
        surface.circle(50.0, 50.0, 10.0, 0.0, std::f32::consts::TAU);
        surface.end_shape();
        assert!(surface.contains_point(50.0, 50.0));

        surface.begin_shape();
        assert!(!surface.contains_point(50.0, 50.0));
    }

    #[test]
    fn test_score_probe_records_latest() {
        let mut probe = ScoreProbe::default();
        assert_eq!(probe.last, None);
        probe.show(3);
        probe.show(7);
        assert_eq!(probe.last, Some(7));
    }
}

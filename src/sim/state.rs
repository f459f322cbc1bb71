//! Game state and board geometry
//!
//! One `GameState` per session, owned exclusively by the engine. All
//! randomness flows through the seeded RNG so a run is reproducible from
//! its seed.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::dot::Dot;
use crate::surface::Viewport;

/// Geometry of the play surface, captured at start and on deferred resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Board {
    pub width: f32,
    pub height: f32,
    /// Screen-space offset of the board origin
    pub offset: Vec2,
}

impl Board {
    pub fn from_viewport(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            offset: viewport.offset,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawn randomness
    pub rng: Pcg32,
    /// Score accumulator; monotone except at restart
    pub score: u64,
    /// Fall speed in pixels per second; settable at any time, read by the
    /// next tick with no smoothing
    pub speed: u32,
    /// Play surface geometry
    pub board: Board,
    /// Live dots, insertion order = spawn order
    pub dots: Vec<Dot>,
    /// Set by resize notifications; applied at the start of the next tick
    pub resize_pending: bool,
}

impl GameState {
    pub fn new(seed: u64, board: Board, start_speed: u32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            speed: start_speed,
            board,
            dots: Vec::new(),
            resize_pending: false,
        }
    }

    /// Reset for a fresh run on the same board, reseeding the RNG
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.score = 0;
        self.dots.clear();
        self.resize_pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Viewport;

    #[test]
    fn test_new_state_is_empty() {
        let board = Board::from_viewport(Viewport::new(400.0, 600.0));
        let state = GameState::new(42, board, 60);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, 60);
        assert!(state.dots.is_empty());
        assert!(!state.resize_pending);
    }

    #[test]
    fn test_restart_clears_score_and_dots() {
        let board = Board::from_viewport(Viewport::new(400.0, 600.0));
        let mut state = GameState::new(42, board, 60);
        state.score = 17;
        state.dots.push(crate::sim::Dot {
            radius: 10.0,
            x: 50.0,
            y: 100.0,
            drawn: None,
        });

        state.restart(43);
        assert_eq!(state.seed, 43);
        assert_eq!(state.score, 0);
        assert!(state.dots.is_empty());
    }

    #[test]
    fn test_same_seed_same_rolls() {
        use rand::Rng;
        let board = Board::from_viewport(Viewport::new(400.0, 600.0));
        let mut a = GameState::new(9, board, 60);
        let mut b = GameState::new(9, board, 60);
        let ra: u32 = a.rng.random_range(0..1000);
        let rb: u32 = b.rng.random_range(0..1000);
        assert_eq!(ra, rb);
    }
}

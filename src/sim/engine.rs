//! The game engine: owns all state and drives it from polled timers
//!
//! Single-threaded by construction. Drivers call `pump` and
//! `handle_pointer` from one logical thread, so a pointer event observes
//! the dot collection exactly as the previous tick left it. A build that
//! moved the engine across real threads would need a mutex or actor
//! boundary around it.

use glam::Vec2;

use super::dot::Dot;
use super::hit::{self, HitOutcome};
use super::state::{Board, GameState};
use super::tick;
use super::timers::{TimerEvent, Timers};
use crate::settings::{ConfigError, GameOptions};
use crate::surface::{DrawSurface, ScoreDisplay};

/// Owns the dot collection, score, speed, and lifecycle timers
#[derive(Debug)]
pub struct Engine {
    opts: GameOptions,
    state: GameState,
    timers: Timers,
}

impl Engine {
    /// Validate options against the board and build the engine
    ///
    /// Fails fast on degenerate geometry instead of clamping the spawn
    /// range.
    pub fn new(
        opts: GameOptions,
        surface: &dyn DrawSurface,
        seed: u64,
        now_ms: f64,
    ) -> Result<Self, ConfigError> {
        opts.validate()?;
        let board = Board::from_viewport(surface.viewport());
        opts.validate_board(board.width)?;

        log::info!(
            "engine start: board {}x{}, seed {}, speed {}",
            board.width,
            board.height,
            seed,
            opts.start_speed
        );
        let timers = Timers::new(&opts, now_ms);
        let state = GameState::new(seed, board, opts.start_speed);
        Ok(Self {
            opts,
            state,
            timers,
        })
    }

    /// Spawn the first dot and render the first frame
    pub fn start(&mut self, surface: &mut dyn DrawSurface) {
        self.spawn_dot();
        tick::tick(&mut self.state, &self.opts, surface);
    }

    /// Run every timer due at `now_ms`
    pub fn pump(&mut self, now_ms: f64, surface: &mut dyn DrawSurface) {
        for event in self.timers.poll(now_ms) {
            match event {
                TimerEvent::Tick => tick::tick(&mut self.state, &self.opts, surface),
                TimerEvent::Spawn | TimerEvent::Respawn => self.spawn_dot(),
            }
        }
    }

    /// Append one freshly rolled dot
    pub fn spawn_dot(&mut self) {
        let dot = Dot::spawn(&mut self.state.rng, &self.opts, self.state.board.width);
        log::debug!("spawned dot r={} x={:.1}", dot.radius, dot.x);
        self.state.dots.push(dot);
    }

    /// Handle a pointer-down at board-local coordinates
    ///
    /// The caller has already translated screen coordinates and suppressed
    /// the event's default handling. Every scored dot updates the display
    /// immediately and schedules exactly one replacement, independent of
    /// the regular spawn timer.
    pub fn handle_pointer(
        &mut self,
        point: Vec2,
        now_ms: f64,
        surface: &mut dyn DrawSurface,
        score_out: &mut dyn ScoreDisplay,
    ) -> HitOutcome {
        let outcome = hit::handle_pointer(&mut self.state, &self.opts, surface, point);
        if outcome.removed > 0 {
            score_out.show(self.state.score);
            for _ in 0..outcome.removed {
                self.timers.schedule_respawn(now_ms);
            }
        }
        outcome
    }

    /// Update speed from raw control input
    ///
    /// Non-numeric input and negative values both land on 0 so a bad
    /// control value never reaches the tick loop.
    pub fn set_speed_input(&mut self, raw: &str) {
        self.state.speed = match raw.trim().parse::<i64>() {
            Ok(v) if v >= 0 => v.min(u32::MAX as i64) as u32,
            Ok(v) => {
                log::warn!("negative speed {v} clamped to 0");
                0
            }
            Err(_) => {
                log::warn!("unparsable speed input {raw:?}, using 0");
                0
            }
        };
    }

    /// Flag a resize; geometry is recomputed at the start of the next tick
    pub fn notify_resized(&mut self) {
        self.state.resize_pending = true;
    }

    /// Cancel pending one-shot timers; call before dropping the session
    pub fn teardown(&mut self) -> usize {
        let flushed = self.timers.cancel_pending();
        if flushed > 0 {
            log::info!("teardown: flushed {flushed} pending respawn(s)");
        }
        flushed
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn speed(&self) -> u32 {
        self.state.speed
    }

    pub fn board(&self) -> Board {
        self.state.board
    }

    pub fn options(&self) -> &GameOptions {
        &self.opts
    }

    /// Direct state access for drivers and tests
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ConfigError;
    use crate::surface::{HeadlessSurface, ScoreProbe};

    fn engine_on(surface: &HeadlessSurface) -> Engine {
        Engine::new(GameOptions::default(), surface, 7, 0.0).expect("valid configuration")
    }

    #[test]
    fn test_new_rejects_narrow_board() {
        let surface = HeadlessSurface::new(100.0, 600.0);
        let err = Engine::new(GameOptions::default(), &surface, 7, 0.0).unwrap_err();
        assert!(matches!(err, ConfigError::BoardTooNarrow { .. }));
    }

    #[test]
    fn test_start_spawns_and_renders_one_dot() {
        let mut surface = HeadlessSurface::new(400.0, 600.0);
        let mut engine = engine_on(&surface);
        engine.start(&mut surface);

        assert_eq!(engine.state().dots.len(), 1);
        assert!(engine.state().dots[0].drawn.is_some());
        assert_eq!(surface.clears, 1);
    }

    #[test]
    fn test_pump_spawns_on_interval() {
        let mut surface = HeadlessSurface::new(400.0, 600.0);
        let mut engine = engine_on(&surface);
        engine.start(&mut surface);

        engine.pump(1000.0, &mut surface);
        // initial dot plus the first interval spawn
        assert_eq!(engine.state().dots.len(), 2);
    }

    #[test]
    fn test_hit_schedules_replacement_after_delay() {
        let mut surface = HeadlessSurface::new(400.0, 600.0);
        let mut probe = ScoreProbe::default();
        let mut engine = engine_on(&surface);
        engine.start(&mut surface);

        let drawn = engine.state().dots[0].drawn.expect("rendered at start");
        let outcome = engine.handle_pointer(
            Vec2::new(drawn.x, drawn.y),
            100.0,
            &mut surface,
            &mut probe,
        );
        assert_eq!(outcome.removed, 1);
        assert!(outcome.points >= 1);
        assert_eq!(probe.last, Some(engine.score()));
        assert_eq!(engine.state().dots.len(), 0);

        // hit at 100 ms: the replacement is due at 1100, after the
        // regular 1000 ms interval spawn
        engine.pump(1050.0, &mut surface);
        assert_eq!(engine.state().dots.len(), 1);
        engine.pump(1150.0, &mut surface);
        assert_eq!(engine.state().dots.len(), 2);
    }

    #[test]
    fn test_miss_updates_nothing() {
        let mut surface = HeadlessSurface::new(400.0, 600.0);
        let mut probe = ScoreProbe::default();
        let mut engine = engine_on(&surface);
        engine.start(&mut surface);

        // far corner: spawn geometry keeps dots off the board edge
        let outcome =
            engine.handle_pointer(Vec2::new(399.9, 599.9), 100.0, &mut surface, &mut probe);
        assert_eq!(outcome.removed, 0);
        assert_eq!(probe.last, None);
    }

    #[test]
    fn test_speed_input_parsing() {
        let surface = HeadlessSurface::new(400.0, 600.0);
        let mut engine = engine_on(&surface);

        engine.set_speed_input("42");
        assert_eq!(engine.speed(), 42);
        engine.set_speed_input(" 7 ");
        assert_eq!(engine.speed(), 7);
        engine.set_speed_input("-5");
        assert_eq!(engine.speed(), 0);
        engine.set_speed_input("fast");
        assert_eq!(engine.speed(), 0);
        engine.set_speed_input("0");
        assert_eq!(engine.speed(), 0);
    }

    #[test]
    fn test_teardown_flushes_pending_respawns() {
        let mut surface = HeadlessSurface::new(400.0, 600.0);
        let mut probe = ScoreProbe::default();
        let mut engine = engine_on(&surface);
        engine.start(&mut surface);

        let drawn = engine.state().dots[0].drawn.expect("rendered at start");
        engine.handle_pointer(Vec2::new(drawn.x, drawn.y), 100.0, &mut surface, &mut probe);

        assert_eq!(engine.teardown(), 1);
        // nothing left to flush
        assert_eq!(engine.teardown(), 0);
    }

    #[test]
    fn test_resize_applies_on_next_tick() {
        let mut surface = HeadlessSurface::new(400.0, 600.0);
        let mut engine = engine_on(&surface);
        engine.start(&mut surface);

        surface.set_viewport(crate::surface::Viewport::new(900.0, 700.0));
        engine.notify_resized();
        assert_eq!(engine.board().width, 400.0);

        engine.pump(17.0, &mut surface);
        assert_eq!(engine.board().width, 900.0);
        assert_eq!(engine.board().height, 700.0);
    }
}

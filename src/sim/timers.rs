//! Lifecycle timers: tick cadence, spawn cadence, one-shot respawns
//!
//! Driven by a caller-supplied clock so the whole lifecycle is testable
//! without a real event loop. Respawn one-shots live in a cancellable set;
//! teardown flushes them so nothing ever fires into a dead session.

use crate::consts::MAX_TIMER_CATCHUP;
use crate::settings::GameOptions;

/// A timer due at `poll`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Advance and redraw
    Tick,
    /// Periodic automatic spawn
    Spawn,
    /// One-shot replacement spawn scheduled from a scored hit
    Respawn,
}

/// Cooperative timer set for one game session
#[derive(Debug, Clone)]
pub struct Timers {
    frame_interval_ms: f64,
    spawn_interval_ms: f64,
    respawn_delay_ms: f64,
    next_tick_ms: f64,
    next_spawn_ms: f64,
    respawns: Vec<f64>,
}

impl Timers {
    pub fn new(opts: &GameOptions, now_ms: f64) -> Self {
        let frame_interval_ms = opts.frame_interval_ms();
        let spawn_interval_ms = opts.spawn_interval_ms as f64;
        Self {
            frame_interval_ms,
            spawn_interval_ms,
            respawn_delay_ms: opts.respawn_delay_ms as f64,
            next_tick_ms: now_ms + frame_interval_ms,
            next_spawn_ms: now_ms + spawn_interval_ms,
            respawns: Vec::new(),
        }
    }

    /// Collect every event due at `now_ms`, in chronological order
    ///
    /// Periodic catch-up is capped at `MAX_TIMER_CATCHUP` per timer; the
    /// remainder is dropped by resyncing past the current time, so a
    /// backgrounded page doesn't replay its backlog in one burst.
    pub fn poll(&mut self, now_ms: f64) -> Vec<TimerEvent> {
        let mut due: Vec<(f64, TimerEvent)> = Vec::new();

        let mut ticks = 0;
        while self.next_tick_ms <= now_ms && ticks < MAX_TIMER_CATCHUP {
            due.push((self.next_tick_ms, TimerEvent::Tick));
            self.next_tick_ms += self.frame_interval_ms;
            ticks += 1;
        }
        if self.next_tick_ms <= now_ms {
            let dropped =
                ((now_ms - self.next_tick_ms) / self.frame_interval_ms) as u32 + 1;
            log::debug!("dropped {dropped} missed frame(s)");
            self.next_tick_ms = now_ms + self.frame_interval_ms;
        }

        let mut spawns = 0;
        while self.next_spawn_ms <= now_ms && spawns < MAX_TIMER_CATCHUP {
            due.push((self.next_spawn_ms, TimerEvent::Spawn));
            self.next_spawn_ms += self.spawn_interval_ms;
            spawns += 1;
        }
        if self.next_spawn_ms <= now_ms {
            self.next_spawn_ms = now_ms + self.spawn_interval_ms;
        }

        self.respawns.retain(|&due_at| {
            if due_at <= now_ms {
                due.push((due_at, TimerEvent::Respawn));
                false
            } else {
                true
            }
        });

        due.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        due.into_iter().map(|(_, event)| event).collect()
    }

    /// Queue one replacement spawn `respawn_delay_ms` from now
    pub fn schedule_respawn(&mut self, now_ms: f64) {
        self.respawns.push(now_ms + self.respawn_delay_ms);
    }

    /// Pending one-shot respawns
    pub fn pending_respawns(&self) -> usize {
        self.respawns.len()
    }

    /// Drop every pending one-shot; returns how many were flushed
    pub fn cancel_pending(&mut self) -> usize {
        let flushed = self.respawns.len();
        self.respawns.clear();
        flushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timers() -> Timers {
        // 60 fps, spawn every 1000 ms, respawn after 1000 ms
        Timers::new(&GameOptions::default(), 0.0)
    }

    #[test]
    fn test_nothing_due_before_first_interval() {
        let mut t = timers();
        assert!(t.poll(10.0).is_empty());
    }

    #[test]
    fn test_tick_fires_each_frame_interval() {
        let mut t = timers();
        let events = t.poll(17.0);
        assert_eq!(events, vec![TimerEvent::Tick]);
        // next frame not due yet
        assert!(t.poll(20.0).is_empty());
        assert_eq!(t.poll(34.0), vec![TimerEvent::Tick]);
    }

    #[test]
    fn test_spawn_fires_on_its_own_cadence() {
        let mut t = timers();
        let events = t.poll(1000.0);
        assert!(events.contains(&TimerEvent::Spawn));
        assert_eq!(
            events.iter().filter(|e| **e == TimerEvent::Spawn).count(),
            1
        );
    }

    #[test]
    fn test_catchup_is_capped_and_resyncs() {
        let mut t = timers();
        // ten seconds of backlog: at most MAX_TIMER_CATCHUP ticks fire
        let events = t.poll(10_000.0);
        let ticks = events.iter().filter(|e| **e == TimerEvent::Tick).count();
        assert_eq!(ticks, crate::consts::MAX_TIMER_CATCHUP as usize);
        // backlog dropped, not replayed on the next poll
        assert!(t.poll(10_001.0).is_empty());
    }

    #[test]
    fn test_respawn_due_after_delay() {
        let mut t = timers();
        t.schedule_respawn(100.0);
        assert_eq!(t.pending_respawns(), 1);

        assert!(!t.poll(1099.0).contains(&TimerEvent::Respawn));
        assert!(t.poll(1100.0).contains(&TimerEvent::Respawn));
        assert_eq!(t.pending_respawns(), 0);
    }

    #[test]
    fn test_events_come_out_in_chronological_order() {
        let mut t = timers();
        t.schedule_respawn(0.0); // due at 1000.0
        let events = t.poll(1020.0);
        // ticks before the 1000 ms marks, then spawn/respawn, then later ticks
        let respawn_pos = events
            .iter()
            .position(|e| *e == TimerEvent::Respawn)
            .expect("respawn due");
        let first_tick = events
            .iter()
            .position(|e| *e == TimerEvent::Tick)
            .expect("ticks due");
        assert!(first_tick < respawn_pos);
    }

    #[test]
    fn test_cancel_pending_flushes_everything() {
        let mut t = timers();
        t.schedule_respawn(0.0);
        t.schedule_respawn(5.0);
        t.schedule_respawn(10.0);
        assert_eq!(t.cancel_pending(), 3);
        assert_eq!(t.pending_respawns(), 0);
        assert!(!t.poll(10_000.0).contains(&TimerEvent::Respawn));
    }
}

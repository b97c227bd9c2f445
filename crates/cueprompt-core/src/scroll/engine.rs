//! Per-surface scroll position integrator.

use std::time::Instant;

/// Continuous-time scroll integrator, one per display surface.
///
/// Driven by a shared external tick (~30 ms). The logical `offset` keeps
/// accumulating past the surface's visible end on purpose: the surface
/// clamps the position it applies, but percentage-based restore stays
/// meaningful only if the engine never clamps its own state.
#[derive(Debug, Clone)]
pub struct ScrollEngine {
    offset: f64,
    /// Pixels per second, from the control-value mapping
    speed: f64,
    running: bool,
    last_tick: Option<Instant>,
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self {
            offset: 0.0,
            speed: 0.0,
            running: false,
            last_tick: None,
        }
    }
}

impl ScrollEngine {
    pub fn new(speed: f64) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Unclamped logical offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Position the hosting surface should display.
    pub fn applied_position(&self) -> f64 {
        self.offset.round()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Takes effect on the next tick; no ramping.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Overwrite the logical offset (restore path).
    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset.max(0.0);
    }

    /// Begin integrating from `now`. No-op if already running.
    pub fn start(&mut self, now: Instant) {
        if !self.running {
            self.running = true;
            self.last_tick = Some(now);
        }
    }

    /// Stop integrating; idempotent.
    pub fn stop(&mut self) {
        self.running = false;
        self.last_tick = None;
    }

    /// Jump back to the top. A running engine keeps running from a fresh
    /// time reference; reset never implicitly pauses.
    pub fn reset(&mut self, now: Instant) {
        self.offset = 0.0;
        if self.running {
            self.last_tick = Some(now);
        }
    }

    /// Advance by the elapsed time since the previous tick. Returns the new
    /// applied position while running, None while stopped.
    pub fn on_tick(&mut self, now: Instant) -> Option<f64> {
        if !self.running {
            return None;
        }
        let delta_seconds = match self.last_tick {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => 0.0,
        };
        self.offset += self.speed * delta_seconds;
        self.last_tick = Some(now);
        Some(self.applied_position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_tick_advances_by_speed_times_delta() {
        let t0 = Instant::now();
        let mut engine = ScrollEngine::new(100.0);
        engine.start(t0);

        let pos = engine.on_tick(t0 + Duration::from_millis(30)).unwrap();
        assert!((engine.offset() - 3.0).abs() < 1e-9);
        assert_eq!(pos, 3.0);

        engine.on_tick(t0 + Duration::from_millis(90));
        assert!((engine.offset() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_stopped_engine_ignores_ticks() {
        let t0 = Instant::now();
        let mut engine = ScrollEngine::new(100.0);
        assert_eq!(engine.on_tick(t0), None);
        assert_eq!(engine.offset(), 0.0);
    }

    #[test]
    fn test_stop_start_does_not_count_paused_time() {
        let t0 = Instant::now();
        let mut engine = ScrollEngine::new(100.0);
        engine.start(t0);
        engine.on_tick(t0 + Duration::from_secs(1));
        engine.stop();

        // A minute passes while paused
        let t1 = t0 + Duration::from_secs(61);
        engine.start(t1);
        engine.on_tick(t1 + Duration::from_secs(1));
        assert!((engine.offset() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_reset_keeps_running() {
        let t0 = Instant::now();
        let mut engine = ScrollEngine::new(100.0);
        engine.start(t0);
        engine.on_tick(t0 + Duration::from_secs(2));

        engine.reset(t0 + Duration::from_secs(2));
        assert!(engine.is_running());
        assert_eq!(engine.offset(), 0.0);

        engine.on_tick(t0 + Duration::from_secs(3));
        assert!((engine.offset() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_accumulates_past_any_extent() {
        let t0 = Instant::now();
        let mut engine = ScrollEngine::new(1000.0);
        engine.start(t0);
        engine.on_tick(t0 + Duration::from_secs(3600));
        // The engine itself never clamps; the surface does
        assert!(engine.offset() > 1_000_000.0);
    }

    #[test]
    fn test_speed_change_applies_from_next_tick() {
        let t0 = Instant::now();
        let mut engine = ScrollEngine::new(100.0);
        engine.start(t0);
        engine.on_tick(t0 + Duration::from_secs(1));
        engine.set_speed(10.0);
        engine.on_tick(t0 + Duration::from_secs(2));
        assert!((engine.offset() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_applied_position_rounds() {
        let mut engine = ScrollEngine::new(0.0);
        engine.set_offset(10.6);
        assert_eq!(engine.applied_position(), 11.0);
    }
}

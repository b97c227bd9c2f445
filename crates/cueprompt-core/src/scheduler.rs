//! Pausable auto-advance countdown.
//!
//! The scheduler never waits on its own: every operation takes the caller's
//! `now` and the host drives `poll` from its tick loop, so tests can move
//! time without sleeping. Arming is modeled as a deadline plus a generation
//! number; a fire delivered for an older generation is stale and ignored.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::TimeControlMode;

#[derive(Debug, Clone, Copy)]
struct Armed {
    deadline: Instant,
    generation: u64,
}

/// Countdown state machine selecting when to jump to the next paragraph.
#[derive(Debug)]
pub struct AutoAdvanceScheduler {
    playing: bool,
    /// Captured time left from the last stop; zero means "arm the full
    /// configured duration on the next start"
    remaining: Duration,
    armed: Option<Armed>,
    generation: u64,
    mode: TimeControlMode,
    global_duration: Duration,
    overrides: HashMap<usize, u32>,
}

impl AutoAdvanceScheduler {
    pub fn new(mode: TimeControlMode, global_duration_secs: u32) -> Self {
        Self {
            playing: false,
            remaining: Duration::ZERO,
            armed: None,
            generation: 0,
            mode,
            global_duration: Duration::from_secs(u64::from(global_duration_secs)),
            overrides: HashMap::new(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn mode(&self) -> TimeControlMode {
        self.mode
    }

    pub fn global_duration_secs(&self) -> u32 {
        self.global_duration.as_secs() as u32
    }

    /// Generation of the most recently armed countdown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replace the per-paragraph overrides (produced by segmentation).
    pub fn set_overrides(&mut self, overrides: HashMap<usize, u32>) {
        self.overrides = overrides;
    }

    /// Change the global paragraph duration. Positive values only; the
    /// caller is expected to restart the countdown afterwards.
    pub fn set_global_duration(&mut self, secs: u32) {
        if secs > 0 {
            self.global_duration = Duration::from_secs(u64::from(secs));
        }
    }

    pub fn set_mode(&mut self, mode: TimeControlMode) {
        self.mode = mode;
    }

    /// Configured stay duration for a paragraph, honoring the mode.
    pub fn duration_for(&self, index: usize) -> Duration {
        if self.mode == TimeControlMode::Local {
            if let Some(&secs) = self.overrides.get(&index) {
                return Duration::from_secs(u64::from(secs));
            }
        }
        self.global_duration
    }

    /// Begin (or resume) the countdown for the given paragraph.
    ///
    /// A nonzero remaining value from an earlier stop resumes exactly from
    /// there; otherwise the full configured duration is armed.
    pub fn start(&mut self, now: Instant, index: usize) {
        self.playing = true;
        let duration = if self.remaining > Duration::ZERO {
            self.remaining
        } else {
            self.duration_for(index)
        };
        self.arm(now, duration);
        debug!(index, ?duration, "auto-advance started");
    }

    /// Pause the countdown, capturing the exact time left so a later start
    /// resumes without drift. Idempotent.
    pub fn stop(&mut self, now: Instant) {
        if let Some(armed) = self.armed.take() {
            self.remaining = armed.deadline.saturating_duration_since(now);
            self.generation = self.generation.wrapping_add(1);
            debug!(remaining = ?self.remaining, "auto-advance paused");
        }
        self.playing = false;
    }

    /// Discard any captured remainder and, if playing, re-arm the full
    /// duration for `index`. Called on navigation and config changes.
    pub fn restart(&mut self, now: Instant, index: usize) {
        self.remaining = Duration::ZERO;
        if self.playing {
            let duration = self.duration_for(index);
            self.arm(now, duration);
            debug!(index, ?duration, "auto-advance restarted");
        } else if self.armed.take().is_some() {
            self.generation = self.generation.wrapping_add(1);
        }
    }

    /// Fire the countdown if its deadline has passed. Returns true exactly
    /// once per armed deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        let generation = self.generation;
        self.try_fire(generation, now)
    }

    /// Fire a specific countdown instance. A `generation` older than the
    /// last armed one identifies a stale timer and is ignored.
    pub fn try_fire(&mut self, generation: u64, now: Instant) -> bool {
        match self.armed {
            Some(armed) if armed.generation == generation && now >= armed.deadline => {
                self.armed = None;
                self.generation = self.generation.wrapping_add(1);
                true
            }
            _ => false,
        }
    }

    /// Time until the next fire: the armed deadline if playing, otherwise
    /// the captured remainder.
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.armed {
            Some(armed) => armed.deadline.saturating_duration_since(now),
            None => self.remaining,
        }
    }

    fn arm(&mut self, now: Instant, duration: Duration) {
        self.generation = self.generation.wrapping_add(1);
        self.armed = Some(Armed {
            deadline: now + duration,
            generation: self.generation,
        });
    }
}

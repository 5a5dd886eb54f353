//! Cooperative animation clock.
//!
//! Three independent behaviors advance on the host's tick: the liquid wave
//! phase, a breathing scale factor and a self-expiring blink. All state
//! changes happen inside [`AnimationClock::advance`].

use std::f64::consts::TAU;
use std::time::{Duration, Instant};

/// Phase increment per tick, in radians.
pub const WAVE_STEP: f64 = 0.1;
/// Breathing amplitude around a scale of 1.0.
pub const BREATH_AMPLITUDE: f64 = 0.02;
/// Breathing angular speed, in radians per second.
pub const BREATH_SPEED: f64 = 4.0;
/// Time between blink triggers.
pub const BLINK_PERIOD: Duration = Duration::from_millis(5000);
/// How long a blink keeps the eyes closed.
pub const BLINK_DURATION: Duration = Duration::from_millis(200);

/// Snapshot of the animation, read-only for renderers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    /// Wave phase in `[0, 2π)`.
    pub wave_phase: f64,
    pub blinking: bool,
    /// Breathing scale in `[0.98, 1.02]`.
    pub scale_factor: f64,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            wave_phase: 0.0,
            blinking: false,
            scale_factor: 1.0,
        }
    }
}

/// A pending blink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkEvent {
    pub trigger_at: Instant,
    pub expire_at: Instant,
}

/// Drives wave, breathing and blink from a single tick loop.
#[derive(Debug)]
pub struct AnimationClock {
    origin: Instant,
    running: bool,
    wave_phase: f64,
    scale_factor: f64,
    blink: Option<BlinkEvent>,
    next_blink_at: Instant,
}

impl AnimationClock {
    /// A running clock whose first automatic blink is one period after `origin`.
    pub fn new(origin: Instant) -> Self {
        Self {
            origin,
            running: true,
            wave_phase: 0.0,
            scale_factor: 1.0,
            blink: None,
            next_blink_at: origin + BLINK_PERIOD,
        }
    }

    /// Advance all behaviors to `now` and return the resulting state.
    ///
    /// A stopped clock returns its frozen state unchanged.
    pub fn advance(&mut self, now: Instant) -> AnimationState {
        if !self.running {
            return self.state();
        }

        self.wave_phase = next_wave_phase(self.wave_phase);
        self.scale_factor = breathing_scale(now.saturating_duration_since(self.origin).as_secs_f64());

        if let Some(blink) = self.blink {
            if now >= blink.expire_at {
                self.blink = None;
            }
        }

        if now >= self.next_blink_at {
            self.trigger_blink(now);
            self.next_blink_at = now + BLINK_PERIOD;
        }

        self.state()
    }

    /// Start a blink at `now`.
    ///
    /// Returns `false` and leaves the pending blink untouched if one is
    /// already in progress.
    pub fn trigger_blink(&mut self, now: Instant) -> bool {
        if self.blink.is_some() {
            return false;
        }

        log::debug!("Blink triggered");
        self.blink = Some(BlinkEvent {
            trigger_at: now,
            expire_at: now + BLINK_DURATION,
        });
        true
    }

    /// Resume ticking. The blink schedule restarts from `now`.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            return;
        }
        self.running = true;
        self.next_blink_at = now + BLINK_PERIOD;
    }

    /// Stop ticking. Stopping a stopped clock is a no-op.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pending_blink(&self) -> Option<BlinkEvent> {
        self.blink
    }

    pub fn state(&self) -> AnimationState {
        AnimationState {
            wave_phase: self.wave_phase,
            blinking: self.blink.is_some(),
            scale_factor: self.scale_factor,
        }
    }
}

/// The phase after one tick, wrapped to 0 on reaching 2π.
pub fn next_wave_phase(phase: f64) -> f64 {
    let next = phase + WAVE_STEP;
    if next >= TAU || !next.is_finite() {
        0.0
    } else {
        next
    }
}

/// Breathing scale as a function of wall-clock seconds.
pub fn breathing_scale(seconds: f64) -> f64 {
    1.0 + BREATH_AMPLITUDE * (seconds * BREATH_SPEED).sin()
}

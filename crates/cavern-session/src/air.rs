//! Air supply with a once-per-second drain countdown.

/// Upper bound of the air gauge.
pub const MAX_AIR: f32 = 100.0;

/// Seconds between drain steps.
pub const DRAIN_INTERVAL_SECS: f32 = 1.0;

/// Air gauge clamped to `[0, MAX_AIR]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Air {
    value: f32,
    countdown: f32,
}

impl Air {
    /// Gauge filled to `initial`, clamped.
    pub fn new(initial: f32) -> Self {
        Self {
            value: clamp_air(initial),
            countdown: DRAIN_INTERVAL_SECS,
        }
    }

    /// Current air.
    pub fn air(&self) -> f32 {
        self.value
    }

    /// Whether the gauge is empty.
    pub fn is_empty(&self) -> bool {
        self.value <= 0.0
    }

    /// Add `amount`. Negative amounts are treated as zero.
    pub fn add_air(&mut self, amount: f32) {
        self.value = clamp_air(self.value + non_negative(amount));
    }

    /// Remove `amount`. Negative amounts are treated as zero.
    pub fn deplete_air(&mut self, amount: f32) {
        self.value = clamp_air(self.value - non_negative(amount));
    }

    /// Refill to `value` and restart the drain countdown.
    pub fn reset(&mut self, value: f32) {
        *self = Self::new(value);
    }

    /// Advance the drain countdown by `dt` seconds, removing `per_step` each
    /// time it elapses. Returns the number of drain steps taken.
    pub fn tick(&mut self, dt: f32, per_step: f32) -> u32 {
        if !dt.is_finite() {
            return 0;
        }
        self.countdown -= dt.max(0.0);
        if self.countdown > 0.0 {
            return 0;
        }
        let overdue = -self.countdown;
        let steps = (overdue / DRAIN_INTERVAL_SECS).floor() + 1.0;
        self.countdown = DRAIN_INTERVAL_SECS - overdue.rem_euclid(DRAIN_INTERVAL_SECS);
        self.deplete_air(non_negative(per_step) * steps);
        // saturating cast
        steps as u32
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.max(0.0) }
}

fn clamp_air(v: f32) -> f32 {
    non_negative(v).min(MAX_AIR)
}

//! Life counter.

/// Remaining lives, clamped to `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lives {
    current: u32,
    max: u32,
}

impl Lives {
    /// Full counter with `max` lives.
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    /// Lives remaining.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Lives granted at start and on reset.
    pub fn max_lives(&self) -> u32 {
        self.max
    }

    /// Remove one life, never going below zero. Returns the lives remaining.
    pub fn lose_life(&mut self) -> u32 {
        self.current = self.current.saturating_sub(1);
        self.current
    }

    /// `false` exactly when no lives remain.
    pub fn has_lives_remaining(&self) -> bool {
        self.current > 0
    }

    /// Restore to the maximum.
    pub fn reset_lives(&mut self) {
        self.current = self.max;
    }
}

impl Default for Lives {
    fn default() -> Self {
        Self::new(3)
    }
}

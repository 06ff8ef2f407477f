//! Player volume
//!
//! Levels are percentages. Anything above 100 is clamped rather than
//! rejected, so front ends can pass raw user input straight through.

/// Highest accepted level
pub const MAX_LEVEL: u8 = 100;

/// Volume level with a mute flag that keeps the level intact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Volume {
    level: u8,
    muted: bool,
}

impl Volume {
    pub fn new(level: u8) -> Self {
        Self {
            level: level.min(MAX_LEVEL),
            muted: false,
        }
    }

    pub fn set_level(&mut self, level: u8) {
        self.level = level.min(MAX_LEVEL);
    }

    /// Configured level, unaffected by mute
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Level actually heard: zero while muted
    pub fn effective_level(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.level
        }
    }

    /// Raise by `step`, saturating at the maximum
    pub fn raise(&mut self, step: u8) {
        self.set_level(self.level.saturating_add(step));
    }

    /// Lower by `step`, saturating at zero
    pub fn lower(&mut self, step: u8) {
        self.level = self.level.saturating_sub(step);
    }

    pub fn mute(&mut self) {
        self.muted = true;
    }

    pub fn unmute(&mut self) {
        self.muted = false;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(80)
    }
}

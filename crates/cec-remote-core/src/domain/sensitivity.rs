//! Adjustable magnitude of one relative pointer step.
//!
//! The sensitivity is an index into a short ordered list of presets rather
//! than a free integer.  Stepping past either end saturates: there is no
//! wraparound, so mashing "forward" can never jump back to the slowest speed.

/// Pointer step sizes, slowest first.
pub const SENSITIVITY_PRESETS: [u32; 4] = [10, 40, 100, 200];

/// Bounded counter over [`SENSITIVITY_PRESETS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sensitivity {
    index: usize,
}

impl Sensitivity {
    /// Starts at the slowest preset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step magnitude in pointer units.
    pub fn value(&self) -> u32 {
        SENSITIVITY_PRESETS[self.index]
    }

    /// Position in the preset list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves one preset up. Returns `false` when already at the fastest.
    pub fn increase(&mut self) -> bool {
        if self.index + 1 < SENSITIVITY_PRESETS.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Moves one preset down. Returns `false` when already at the slowest.
    pub fn decrease(&mut self) -> bool {
        match self.index.checked_sub(1) {
            Some(lower) => {
                self.index = lower;
                true
            }
            None => false,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

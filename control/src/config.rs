//! Calibration of the counter.

/// Maximum number of edges counted per channel.
pub const CAPACITY: u32 = 40;

/// Number of edges needed to advance the progress by one step.
pub const COUNTS_PER_STEP: u32 = 8;

/// Percentage added to the progress with each step.
pub const PERCENT_PER_STEP: u8 = 20;

/// Progress of a saturated channel.
pub const MAX_STEP: u8 = 100;

/// Default debounce window in microseconds.
pub const DEFAULT_DEBOUNCE_WINDOW: u32 = 3000;

/// Configuration of the counter.
///
/// This is meant to be built in `const` context, so the counter holding it
/// can be placed in a `static` shared by interrupts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Edges arriving within this many microseconds after the previously
    /// accepted edge of the same channel are ignored.
    pub debounce_window: u32,
}

impl Config {
    pub const DEFAULT: Self = Self {
        debounce_window: DEFAULT_DEBOUNCE_WINDOW,
    };

    #[must_use]
    pub const fn with_debounce_window(debounce_window: u32) -> Self {
        Self { debounce_window }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//! Timestamps of a wrapping microsecond clock.

/// Reading of a free running 32-bit microsecond clock.
///
/// The clock overflows roughly every 71 minutes. Distances between two ticks
/// are calculated with modular arithmetic, so they stay correct across the
/// overflow as long as the real distance is below 2^32 microseconds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick(pub u32);

impl Tick {
    #[must_use]
    pub const fn from_micros(micros: u32) -> Self {
        Self(micros)
    }

    #[must_use]
    pub const fn as_micros(self) -> u32 {
        self.0
    }

    /// Microseconds passed since `earlier`.
    #[must_use]
    pub const fn elapsed_since(self, earlier: Tick) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }
}

impl From<u32> for Tick {
    fn from(micros: u32) -> Self {
        Self(micros)
    }
}

//! Quantization of raw counts into coarse progress.

use crate::config::{CAPACITY, COUNTS_PER_STEP, MAX_STEP, PERCENT_PER_STEP};

/// Translate count of accepted edges into a progress step.
///
/// The result is one of 0, 20, 40, 60, 80 and 100. Intermediate steps advance
/// every 8 counts, while 100 is reached only once the channel is saturated.
/// Counts 32 to 39 therefore all stay on 80.
#[must_use]
pub fn bucket(count: u32) -> u8 {
    if count == 0 {
        return 0;
    }
    if count >= CAPACITY {
        return MAX_STEP;
    }
    let steps = (count / COUNTS_PER_STEP).min(5) as u8;
    steps * PERCENT_PER_STEP
}

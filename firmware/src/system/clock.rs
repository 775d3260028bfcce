//! Free running microsecond clock used to timestamp edges.

use edgetally_control::Tick;

use super::hal::pac::TIM2;
use super::hal::prelude::*;
use super::hal::rcc::{rec, CoreClocks};
use super::hal::timer::Timer;

/// TIM2 is 32 bits wide. Ticking at 1 MHz, it wraps around after 2^32 us,
/// roughly every 71 minutes.
pub struct Clock {
    timer: Timer<TIM2>,
}

impl Clock {
    #[must_use]
    pub fn new(tim2: TIM2, prec: rec::Tim2, clocks: &CoreClocks) -> Self {
        let timer = tim2.tick_timer(1.MHz(), prec, clocks);
        Self { timer }
    }

    #[must_use]
    pub fn now(&self) -> Tick {
        Tick(self.timer.counter())
    }
}

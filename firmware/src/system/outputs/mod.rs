mod leds;

use self::leds::Leds;
pub use self::leds::Pins as LedsPins;

pub struct Outputs {
    pub leds: Leds,
}

pub struct Config {
    pub leds: LedsPins,
}

impl Outputs {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            leds: Leds::new(config.leds),
        }
    }

    /// Render the desired state of the display, as produced by the control
    /// package's `Display::leds`.
    pub fn set(&mut self, display: [bool; 8]) {
        self.leds.set_display_config(display);
    }
}

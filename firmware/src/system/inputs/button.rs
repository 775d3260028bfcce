use super::debounced::Debounced;
use crate::system::hal::gpio;

/// Reset button, pulled up and shorted to ground when pressed.
pub struct DebouncedButton {
    pin: Pin,
    debounced: Debounced<4>,
}

pub type Pin = gpio::gpiog::PG14<gpio::Input>;

impl DebouncedButton {
    pub fn new(pin: Pin) -> Self {
        Self {
            pin,
            debounced: Debounced::new(),
        }
    }

    /// Returns whether the button is held down.
    pub fn sample(&mut self) -> bool {
        self.debounced.update(self.pin.is_low())
    }
}

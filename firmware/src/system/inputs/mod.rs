//! Abstraction of user inputs.
//!
//! Sensors are kept outside of this abstraction, since they are not sampled
//! but trigger interrupts.

mod button;
mod debounced;

use edgetally_control::Button;

use button::DebouncedButton;
pub use button::Pin as ButtonPin;

pub struct Inputs {
    /// Click detection of the reset button. Read it after `sample`.
    pub button: Button,
    button_pin: DebouncedButton,
}

pub struct Config {
    pub button: ButtonPin,
}

impl Inputs {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            button: Button::default(),
            button_pin: DebouncedButton::new(config.button),
        }
    }

    pub fn sample(&mut self) {
        let down = self.button_pin.sample();
        self.button.update(down);
    }
}

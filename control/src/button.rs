//! Manage state of the reset button.

/// Use this to hold state of an already debounced button over time.
///
/// Like a button of a graphical interface, a click is reported only once the
/// button gets released. Holding it down for a long time and then releasing
/// it still counts as a click.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pub pressed: bool,
    pub clicked: bool,
    pub held: u32,
}

impl Button {
    pub fn update(&mut self, down: bool) {
        let was_pressed = self.pressed;
        self.pressed = down;
        self.clicked = was_pressed && !self.pressed;
        self.held = if self.pressed {
            self.held.saturating_add(1)
        } else {
            0
        };
    }
}

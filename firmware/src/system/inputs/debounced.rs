/// Contact debouncing through a history of samples.
///
/// The state flips only once the last `N` samples agree on the new value.
/// Anything in between keeps the previous state.
#[derive(Debug, Eq, PartialEq, defmt::Format)]
pub struct Debounced<const N: u32> {
    history: u32,
    active: bool,
}

impl<const N: u32> Debounced<N> {
    const MASK: u32 = if N >= 32 { u32::MAX } else { (1 << N) - 1 };

    pub fn new() -> Self {
        Self {
            history: 0,
            active: false,
        }
    }

    pub fn update(&mut self, value: bool) -> bool {
        self.history = (self.history << 1) | u32::from(value);
        let recent = self.history & Self::MASK;
        if recent == Self::MASK {
            self.active = true;
        } else if recent == 0 {
            self.active = false;
        }
        self.active
    }
}

//! Presentation of progress of both channels.

use core::fmt::Write;

use heapless::String;

use crate::channel::Channel;
use crate::config::{CAPACITY, MAX_STEP, PERCENT_PER_STEP};
use crate::counter::{Counter, Snapshot};
use crate::mailbox::StepChanged;

/// Number of cycles of `tick` a blinking LED stays on, and then off.
const BLINK_CYCLES: u32 = 500;

/// LEDs available for each channel's bar.
const BAR_LEDS: usize = 4;

/// Text describing state of a single channel.
pub type Label = String<40>;

/// State machine of 8 display LEDs and textual labels.
///
/// This holds the progress as it was last received from the counter. It is
/// meant to be owned by the control loop, fed by notifications received from
/// the mailbox, and `tick`ed on every cycle of the loop to drive animations.
///
/// LEDs 0 to 3 show progress of channel A, 4 to 7 of channel B. Each lit LED
/// stands for 20 %. A saturated channel blinks its whole bar.
#[derive(Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Display {
    channels: [Snapshot; 2],
    failed: bool,
    cycles: u32,
}

impl Display {
    pub fn apply(&mut self, change: StepChanged) {
        self.channels[change.channel.index()] = Snapshot {
            count: change.count.min(CAPACITY),
            step: change.step,
        };
    }

    /// Overwrite the channel with state read directly from the counter.
    ///
    /// Use this to catch up when notifications were lost.
    pub fn sync(&mut self, channel: Channel, snapshot: Snapshot) {
        self.channels[channel.index()] = Snapshot {
            count: snapshot.count.min(CAPACITY),
            step: snapshot.step,
        };
    }

    /// Take over state of both channels from the counter.
    ///
    /// The counter is authoritative. Call this whenever notifications might
    /// have been dropped, e.g. after they overflowed or were discarded on
    /// reset while an edge was being accepted.
    pub fn resync(&mut self, counter: &Counter) {
        for channel in Channel::ALL {
            self.sync(channel, counter.snapshot(channel));
        }
    }

    pub fn reset(&mut self) {
        self.channels = [Snapshot::default(); 2];
        self.failed = false;
    }

    /// Show that the edge source could not be initialized.
    pub fn fail(&mut self) {
        self.failed = true;
    }

    #[must_use]
    pub fn failed(&self) -> bool {
        self.failed
    }

    #[must_use]
    pub fn channel(&self, channel: Channel) -> Snapshot {
        self.channels[channel.index()]
    }

    pub fn tick(&mut self) {
        self.cycles = self.cycles.wrapping_add(1);
    }

    #[must_use]
    pub fn label(&self, channel: Channel) -> Label {
        let mut label = Label::new();
        // The capacity fits the longest possible text.
        let _ = if self.failed {
            write!(label, "Sensor {}: edge source init FAILED", channel.name())
        } else {
            let snapshot = self.channel(channel);
            write!(
                label,
                "Sensor {}: {} / {} ({}%)",
                channel.name(),
                snapshot.count,
                CAPACITY,
                snapshot.step
            )
        };
        label
    }

    #[must_use]
    pub fn leds(&self) -> [bool; 8] {
        let mut leds = [false; 8];
        let blink_on = (self.cycles / BLINK_CYCLES) % 2 == 0;

        if self.failed {
            let lit_half = if blink_on { 0..BAR_LEDS } else { BAR_LEDS..8 };
            for led in &mut leds[lit_half] {
                *led = true;
            }
            return leds;
        }

        for channel in Channel::ALL {
            let offset = channel.index() * BAR_LEDS;
            let bar = &mut leds[offset..offset + BAR_LEDS];
            let step = self.channels[channel.index()].step;
            if step >= MAX_STEP {
                bar.iter_mut().for_each(|led| *led = blink_on);
            } else {
                let lit = usize::from(step / PERCENT_PER_STEP).min(BAR_LEDS);
                bar[..lit].iter_mut().for_each(|led| *led = true);
            }
        }

        leds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailbox::Mailbox;
    use crate::tick::Tick;

    fn change(channel: Channel, count: u32) -> StepChanged {
        StepChanged {
            channel,
            step: crate::bucket(count),
            count,
        }
    }

    #[test]
    fn when_initialized_it_shows_empty_progress() {
        let display = Display::default();
        assert_eq!(display.label(Channel::A).as_str(), "Sensor A: 0 / 40 (0%)");
        assert_eq!(display.label(Channel::B).as_str(), "Sensor B: 0 / 40 (0%)");
        assert_eq!(display.leds(), [false; 8]);
    }

    #[test]
    fn when_change_is_applied_label_reflects_it() {
        let mut display = Display::default();
        display.apply(change(Channel::A, 3));
        display.apply(change(Channel::B, 17));
        assert_eq!(display.label(Channel::A).as_str(), "Sensor A: 3 / 40 (0%)");
        assert_eq!(display.label(Channel::B).as_str(), "Sensor B: 17 / 40 (40%)");
    }

    #[test]
    fn when_change_carries_count_over_capacity_it_is_clamped() {
        let mut display = Display::default();
        display.apply(StepChanged {
            channel: Channel::A,
            step: 100,
            count: 57,
        });
        assert_eq!(display.label(Channel::A).as_str(), "Sensor A: 40 / 40 (100%)");
    }

    #[test]
    fn when_progress_grows_leds_of_the_channel_fill_up() {
        let mut display = Display::default();

        display.apply(change(Channel::A, 8));
        assert_eq!(
            display.leds(),
            [true, false, false, false, false, false, false, false]
        );

        display.apply(change(Channel::A, 32));
        display.apply(change(Channel::B, 16));
        assert_eq!(
            display.leds(),
            [true, true, true, true, true, true, false, false]
        );
    }

    #[test]
    fn when_channel_is_saturated_its_bar_blinks() {
        let mut display = Display::default();
        display.apply(change(Channel::B, 40));

        assert_eq!(display.leds()[4..], [true; 4]);
        for _ in 0..BLINK_CYCLES {
            display.tick();
        }
        assert_eq!(display.leds()[4..], [false; 4]);
        for _ in 0..BLINK_CYCLES {
            display.tick();
        }
        assert_eq!(display.leds()[4..], [true; 4]);
        assert_eq!(display.leds()[..4], [false; 4]);
    }

    #[test]
    fn when_source_failed_it_says_so_and_alternates_halves() {
        let mut display = Display::default();
        display.fail();

        assert!(display.failed());
        assert_eq!(
            display.label(Channel::A).as_str(),
            "Sensor A: edge source init FAILED"
        );
        assert_eq!(
            display.leds(),
            [true, true, true, true, false, false, false, false]
        );
        for _ in 0..BLINK_CYCLES {
            display.tick();
        }
        assert_eq!(
            display.leds(),
            [false, false, false, false, true, true, true, true]
        );
    }

    #[test]
    fn when_reset_it_returns_to_empty_progress() {
        let mut display = Display::default();
        display.apply(change(Channel::A, 20));
        display.apply(change(Channel::B, 40));

        display.reset();

        for channel in Channel::ALL {
            assert_eq!(display.channel(channel), Snapshot::default());
        }
        assert_eq!(display.leds(), [false; 8]);
    }

    #[test]
    fn when_edge_is_accepted_between_reset_and_discard_resync_recovers_it() {
        let counter = Counter::default();
        let mut mailbox: Mailbox<4> = Mailbox::new();
        let (mut outbox_a, _outbox_b, mut inbox) = mailbox.split();
        let mut display = Display::default();

        counter.reset();
        let change = counter.on_rising_edge(Channel::A, Tick(100_000)).unwrap();
        outbox_a.post(change).unwrap();
        inbox.discard();
        display.reset();
        display.resync(&counter);
        while let Some(change) = inbox.receive() {
            display.apply(change);
        }

        assert_eq!(display.channel(Channel::A), counter.snapshot(Channel::A));
        assert_eq!(display.channel(Channel::A).count, 1);
        assert_eq!(display.channel(Channel::B), Snapshot::default());
    }

    #[test]
    fn when_resynced_it_matches_the_counter() {
        let counter = Counter::default();
        for i in 0..9 {
            counter.on_rising_edge(Channel::B, Tick(i * 4000));
        }
        let mut display = Display::default();

        display.resync(&counter);

        assert_eq!(display.channel(Channel::A), Snapshot::default());
        assert_eq!(display.channel(Channel::B), Snapshot { count: 9, step: 20 });
    }

    #[test]
    fn when_synced_it_takes_over_counter_state() {
        let mut display = Display::default();
        display.sync(Channel::B, Snapshot { count: 9, step: 20 });
        assert_eq!(display.label(Channel::B).as_str(), "Sensor B: 9 / 40 (20%)");
    }
}

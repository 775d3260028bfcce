//! Debounced counting of rising edges.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::bucket::bucket;
use crate::channel::Channel;
use crate::config::{Config, CAPACITY};
use crate::edge::{EdgeEvent, Level};
use crate::log;
use crate::mailbox::StepChanged;
use crate::tick::Tick;

/// Counter of rising edges on both channels.
///
/// Each channel is kept in its own set of atomics and it is expected that
/// each channel has a single writer, e.g. an interrupt bound to the sensor
/// line. Both channels can be fed concurrently without any locking. `reset`
/// and `snapshot` may be called from any other context.
///
/// Edges are accepted only if they arrive later than the debounce window
/// after the previously accepted edge of the same channel, and only until
/// the channel is saturated at 40 edges.
#[derive(Debug)]
pub struct Counter {
    config: Config,
    channels: [ChannelState; 2],
}

/// Current state of a single channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub count: u32,
    pub step: u8,
}

#[derive(Debug)]
struct ChannelState {
    count: AtomicU32,
    last_accepted: AtomicU32,
}

impl Counter {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            channels: [ChannelState::new(), ChannelState::new()],
        }
    }

    #[must_use]
    pub fn config(&self) -> Config {
        self.config
    }

    /// Register a rising edge observed on the given channel.
    ///
    /// Returns the change to be passed to the display if the edge was
    /// accepted, `None` if it was debounced or the channel is saturated.
    pub fn on_rising_edge(&self, channel: Channel, tick: Tick) -> Option<StepChanged> {
        let count = self.channels[channel.index()].accept(tick, self.config.debounce_window)?;
        let step = bucket(count);
        log::debug!("Channel {} accepted edge {}, step {}", channel, count, step);
        Some(StepChanged {
            channel,
            step,
            count,
        })
    }

    /// Register any edge reported by the source, only rising ones are counted.
    pub fn on_edge(&self, event: EdgeEvent) -> Option<StepChanged> {
        if !event.level.is_rising() {
            return None;
        }
        self.on_rising_edge(event.channel, event.tick)
    }

    /// Register an edge as reported by a GPIO callback.
    ///
    /// Events of unknown channels are discarded.
    pub fn on_raw_edge(&self, raw_channel: u8, raw_level: u32, tick: u32) -> Option<StepChanged> {
        let channel = Channel::try_from(raw_channel).ok()?;
        self.on_edge(EdgeEvent {
            channel,
            level: Level::from_raw(raw_level),
            tick: Tick(tick),
        })
    }

    /// Return both channels to their initial state.
    pub fn reset(&self) {
        for channel in &self.channels {
            channel.reset();
        }
        log::info!("Counter reset");
    }

    #[must_use]
    pub fn snapshot(&self, channel: Channel) -> Snapshot {
        let count = self.channels[channel.index()].count();
        Snapshot {
            count,
            step: bucket(count),
        }
    }

    #[must_use]
    pub fn is_saturated(&self, channel: Channel) -> bool {
        self.channels[channel.index()].count() >= CAPACITY
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(Config::DEFAULT)
    }
}

impl ChannelState {
    const fn new() -> Self {
        Self {
            count: AtomicU32::new(0),
            last_accepted: AtomicU32::new(0),
        }
    }

    fn count(&self) -> u32 {
        self.count.load(Ordering::Acquire)
    }

    // Only a single context may call this for a given channel.
    fn accept(&self, tick: Tick, debounce_window: u32) -> Option<u32> {
        let count = self.count.load(Ordering::Acquire);

        // Nothing was accepted since start or reset, there is nothing to
        // debounce against.
        if count > 0 {
            let last = Tick(self.last_accepted.load(Ordering::Relaxed));
            if tick.elapsed_since(last) <= debounce_window {
                return None;
            }
        }

        if count >= CAPACITY {
            return None;
        }

        self.last_accepted.store(tick.as_micros(), Ordering::Relaxed);
        let count = count + 1;
        self.count.store(count, Ordering::Release);
        Some(count)
    }

    fn reset(&self) {
        self.last_accepted.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Release);
    }
}

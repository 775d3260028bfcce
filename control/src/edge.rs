//! Raw events reported by the edge source.

use crate::channel::Channel;
use crate::tick::Tick;

/// Level of the line reported together with an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
    /// The source reported no change, e.g. a watchdog timeout.
    NoChange,
}

impl Level {
    /// Interpret levels the way GPIO daemons report them: 0 is low, 1 is
    /// high and anything else means there was no transition.
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Low,
            1 => Self::High,
            _ => Self::NoChange,
        }
    }

    #[must_use]
    pub fn is_rising(self) -> bool {
        self == Self::High
    }
}

/// A transition observed on one of the sensor lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent {
    pub channel: Channel,
    pub level: Level,
    pub tick: Tick,
}

impl EdgeEvent {
    #[must_use]
    pub fn rising(channel: Channel, tick: Tick) -> Self {
        Self {
            channel,
            level: Level::High,
            tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_raw_level_is_one_it_is_rising() {
        assert!(Level::from_raw(1).is_rising());
        assert!(!Level::from_raw(0).is_rising());
    }

    #[test]
    fn when_raw_level_is_out_of_range_it_means_no_change() {
        assert_eq!(Level::from_raw(2), Level::NoChange);
        assert_eq!(Level::from_raw(17), Level::NoChange);
    }
}

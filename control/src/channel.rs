//! Identification of the two sensors.

/// One of the two counted sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    A,
    B,
}

/// Raw channel identifier outside of the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnknownChannel(pub u8);

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::A, Channel::B];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Channel::A => 0,
            Channel::B => 1,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Channel::A => "A",
            Channel::B => "B",
        }
    }
}

impl TryFrom<u8> for Channel {
    type Error = UnknownChannel;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(Channel::A),
            1 => Ok(Channel::B),
            _ => Err(UnknownChannel(raw)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_raw_identifier_is_known_it_converts_to_channel() {
        assert_eq!(Channel::try_from(0), Ok(Channel::A));
        assert_eq!(Channel::try_from(1), Ok(Channel::B));
    }

    #[test]
    fn when_raw_identifier_is_unknown_it_is_rejected() {
        assert_eq!(Channel::try_from(2), Err(UnknownChannel(2)));
        assert_eq!(Channel::try_from(255), Err(UnknownChannel(255)));
    }

    #[test]
    fn index_matches_raw_identifier() {
        for channel in Channel::ALL {
            assert_eq!(Channel::try_from(channel.index() as u8), Ok(channel));
        }
    }
}

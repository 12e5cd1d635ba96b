use core::fmt;

use crate::bits::{IndexSet, Member};

/// Highest channel count a configuration set can describe.
pub const MAX_CHANNEL_COUNT: u8 = 31;

/// Number of channels in an interleaved frame, from 1 to `MAX_CHANNEL_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChannelCount(u8);

impl ChannelCount {
    pub fn new(count: u8) -> Option<Self> {
        (1..=MAX_CHANNEL_COUNT)
            .contains(&count)
            .then_some(Self(count))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Every describable channel count, ascending.
    pub fn all() -> impl Iterator<Item = ChannelCount> {
        (1..=MAX_CHANNEL_COUNT).map(ChannelCount)
    }
}

// Bit 0 is never used so that bit `n` means `n` channels.
impl Member for ChannelCount {
    const LIMIT: usize = MAX_CHANNEL_COUNT as usize + 1;

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(idx: usize) -> Option<Self> {
        u8::try_from(idx).ok().and_then(Self::new)
    }
}

impl fmt::Display for ChannelCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type ChannelSet = IndexSet<ChannelCount>;

use core::fmt;

use crate::bits::{IndexSet, Member};

/// Sample rates probed on every interface, in probing order.
pub const CANDIDATE_RATES: [u32; 15] = [
    5512, 8000, 11025, 16000, 22050, 32000, 44100, 48000, 64000, 88200, 96000, 176400, 192000,
    352800, 384000,
];

/// One of the `CANDIDATE_RATES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate(u8);

impl Rate {
    /// Look up a candidate rate by its exact frequency.
    pub fn from_hz(hz: u32) -> Option<Self> {
        CANDIDATE_RATES
            .iter()
            .position(|r| *r == hz)
            .map(|idx| Rate(idx as u8))
    }

    pub fn hz(self) -> u32 {
        CANDIDATE_RATES[self.0 as usize]
    }

    pub fn all() -> impl Iterator<Item = Rate> {
        (0..CANDIDATE_RATES.len()).map(|idx| Rate(idx as u8))
    }
}

impl Member for Rate {
    const LIMIT: usize = CANDIDATE_RATES.len();

    fn index(self) -> usize {
        self.0 as usize
    }

    fn from_index(idx: usize) -> Option<Self> {
        (idx < Self::LIMIT).then_some(Rate(idx as u8))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hz())
    }
}

pub type RateSet = IndexSet<Rate>;

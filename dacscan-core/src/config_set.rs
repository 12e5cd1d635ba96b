use alloc::string::String;

use crate::{
    bits::Member,
    candidate::Triple,
    channel::{ChannelCount, ChannelSet},
    format::FormatSet,
    rate::RateSet,
};

/// One label slot per possible channel count, slot 0 included but never used.
pub const CHANNEL_MAP_SLOTS: usize = ChannelCount::LIMIT;

/// A compact description of working configurations: any rate in `rates()` combined with any
/// format in `formats()` works for every channel count in `channels()`.
///
/// Each channel count carries its own channel map label, which may be empty.
///
/// A set whose channel set is empty has been absorbed by another set during compaction and
/// describes nothing. Consumers should skip it (see `is_live`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSet {
    pub(crate) rate_set: RateSet,
    pub(crate) format_set: FormatSet,
    pub(crate) channel_set: ChannelSet,
    pub(crate) channel_mappings: [String; CHANNEL_MAP_SLOTS],
}

impl ConfigurationSet {
    /// A set for a single channel count.
    pub fn new(channels: ChannelCount, rates: RateSet, formats: FormatSet, label: &str) -> Self {
        let mut channel_mappings: [String; CHANNEL_MAP_SLOTS] =
            core::array::from_fn(|_| String::new());
        channel_mappings[channels.index()] = label.into();
        Self {
            rate_set: rates,
            format_set: formats,
            channel_set: ChannelSet::single(channels),
            channel_mappings,
        }
    }

    pub fn rates(&self) -> RateSet {
        self.rate_set
    }

    pub fn formats(&self) -> FormatSet {
        self.format_set
    }

    pub fn channels(&self) -> ChannelSet {
        self.channel_set
    }

    /// Channel map label recorded for `channels`, empty if none.
    pub fn channel_map(&self, channels: ChannelCount) -> &str {
        &self.channel_mappings[channels.index()]
    }

    pub fn is_live(&self) -> bool {
        !self.channel_set.is_empty()
    }

    /// Every channel/rate/format combination this set stands for.
    pub fn triples(&self) -> impl Iterator<Item = Triple> + use<> {
        let (rates, formats) = (self.rate_set, self.format_set);
        self.channel_set.iter().flat_map(move |channels| {
            rates.iter().flat_map(move |rate| {
                formats.iter().map(move |format| Triple {
                    channels,
                    rate,
                    format,
                })
            })
        })
    }

    /// Whether a run of formats for a single channel count can be folded into this set by
    /// adding a rate.
    pub(crate) fn accepts(&self, channels: ChannelCount, formats: FormatSet, label: &str) -> bool {
        self.channel_set == ChannelSet::single(channels)
            && self.format_set == formats
            && self.channel_map(channels) == label
    }

    /// Whether `other` describes the same rates and formats, with matching labels wherever
    /// both sets cover a channel count.
    pub(crate) fn compatible_with(&self, other: &ConfigurationSet) -> bool {
        self.rate_set == other.rate_set
            && self.format_set == other.format_set
            && self
                .channel_set
                .intersection(&other.channel_set)
                .iter()
                .all(|c| self.channel_map(c) == other.channel_map(c))
    }

    /// Take over all of `other`'s channel counts and labels, leaving `other` empty.
    pub(crate) fn absorb(&mut self, other: &mut ConfigurationSet) {
        for c in other.channel_set.iter() {
            if !self.channel_set.contains(c) {
                self.channel_mappings[c.index()] =
                    core::mem::take(&mut other.channel_mappings[c.index()]);
            }
        }
        self.channel_set |= other.channel_set;
        other.channel_set = ChannelSet::empty();
    }

    /// Same rates, formats and channels, with labels equal apart from ASCII case in every
    /// slot.
    pub fn equivalent(&self, other: &ConfigurationSet) -> bool {
        self.rate_set == other.rate_set
            && self.channel_set == other.channel_set
            && self.format_set == other.format_set
            && self
                .channel_mappings
                .iter()
                .zip(other.channel_mappings.iter())
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

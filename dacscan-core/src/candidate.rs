use core::fmt;

use log::debug;

use crate::{
    channel::{ChannelCount, ChannelSet},
    discovery::DiscoveryConfig,
    format::{FormatSet, SampleFormat},
    oracle::CapabilityOracle,
    rate::{Rate, RateSet},
};

/// A single channel count, rate and format combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub channels: ChannelCount,
    pub rate: Rate,
    pub format: SampleFormat,
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.rate, self.format, self.channels)
    }
}

/// Values of each dimension that an interface accepted on their own.
///
/// Passing individually says nothing about whether a particular combination works, it only
/// rules out combinations containing a value that already failed alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CandidateSpace {
    pub channels: ChannelSet,
    pub rates: RateSet,
    pub formats: FormatSet,
}

impl CandidateSpace {
    /// Ask `oracle` about every candidate channel count, rate and format in isolation.
    pub fn probe<O: CapabilityOracle + ?Sized>(oracle: &mut O, config: &DiscoveryConfig) -> Self {
        let mut space = CandidateSpace::default();

        for channels in ChannelCount::all().take_while(|c| c.get() <= config.max_channels()) {
            if oracle.test_channel_count(channels) {
                space.channels.insert(channels);
            } else {
                debug!("can not handle {channels} channels");
            }
        }

        for rate in Rate::all() {
            match oracle.test_rate(rate) {
                Some(actual) if actual == rate.hz() => space.rates.insert(rate),
                Some(actual) => debug!("asked for {rate} fps but would get {actual}"),
                None => debug!("can not handle {rate} fps"),
            }
        }

        for format in SampleFormat::ALL {
            if oracle.test_format(format) {
                space.formats.insert(format);
            } else {
                debug!("can not accept the {format} format");
            }
        }

        space
    }

    /// Number of combinations worth attempting.
    pub fn len(&self) -> usize {
        self.channels.len() * self.rates.len() * self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All combinations in probing order: channel count, then rate, then format, each
    /// ascending.
    pub fn triples(&self) -> impl Iterator<Item = Triple> + use<> {
        let (rates, formats) = (self.rates, self.formats);
        self.channels.iter().flat_map(move |channels| {
            rates.iter().flat_map(move |rate| {
                formats.iter().map(move |format| Triple {
                    channels,
                    rate,
                    format,
                })
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{ScriptedOracle, triple};

    #[test]
    fn probe_prunes_each_dimension() {
        let mut oracle = ScriptedOracle::new()
            .works(triple(2, 44100, SampleFormat::S16Le), "")
            .works(triple(2, 48000, SampleFormat::S32Le), "")
            .works(triple(6, 48000, SampleFormat::S16Le), "");
        let space = CandidateSpace::probe(&mut oracle, &DiscoveryConfig::default());
        let channels: Vec<u8> = space.channels.iter().map(ChannelCount::get).collect();
        let rates: Vec<u32> = space.rates.iter().map(Rate::hz).collect();
        let formats: Vec<SampleFormat> = space.formats.iter().collect();
        assert_eq!(channels, vec![2, 6]);
        assert_eq!(rates, vec![44100, 48000]);
        assert_eq!(formats, vec![SampleFormat::S16Le, SampleFormat::S32Le]);
        assert_eq!(space.len(), 8);
    }

    #[test]
    fn nearby_rate_is_rejected() {
        let mut oracle = ScriptedOracle::new()
            .works(triple(2, 48000, SampleFormat::S16Le), "")
            .rate_lands_on(44100, 48000);
        let space = CandidateSpace::probe(&mut oracle, &DiscoveryConfig::default());
        let rates: Vec<u32> = space.rates.iter().map(Rate::hz).collect();
        assert_eq!(rates, vec![48000]);
    }

    #[test]
    fn channel_probe_respects_limit() {
        let mut oracle = ScriptedOracle::new()
            .works(triple(2, 48000, SampleFormat::S16Le), "")
            .works(triple(12, 48000, SampleFormat::S16Le), "");
        let space = CandidateSpace::probe(&mut oracle, &DiscoveryConfig::default());
        assert_eq!(space.channels.len(), 1);
        let wide = DiscoveryConfig::default().with_max_channels(16);
        let space = CandidateSpace::probe(&mut oracle, &wide);
        assert_eq!(space.channels.len(), 2);
    }

    #[test]
    fn triples_in_probing_order() {
        let space = CandidateSpace {
            channels: [2, 1].iter().map(|c| ChannelCount::new(*c).unwrap()).collect(),
            rates: [48000, 44100].iter().map(|r| Rate::from_hz(*r).unwrap()).collect(),
            formats: [SampleFormat::S32Le, SampleFormat::S16Le].into_iter().collect(),
        };
        let triples: Vec<Triple> = space.triples().collect();
        assert_eq!(triples.len(), space.len());
        let mut sorted = triples.clone();
        sorted.sort();
        assert_eq!(triples, sorted);
        assert_eq!(triples[0], triple(1, 44100, SampleFormat::S16Le));
        assert_eq!(triples[7], triple(2, 48000, SampleFormat::S32Le));
    }

    #[test]
    fn empty_dimension_empties_space() {
        let mut oracle = ScriptedOracle::new();
        let space = CandidateSpace::probe(&mut oracle, &DiscoveryConfig::default());
        assert!(space.is_empty());
        assert_eq!(space.triples().count(), 0);
    }
}

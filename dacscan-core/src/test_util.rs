use std::collections::BTreeMap;

use crate::{
    candidate::Triple,
    channel::ChannelCount,
    error::InterfaceError,
    format::SampleFormat,
    oracle::{CapabilityOracle, CommitError},
    rate::Rate,
};

pub(crate) fn triple(channels: u8, hz: u32, format: SampleFormat) -> Triple {
    Triple {
        channels: ChannelCount::new(channels).unwrap(),
        rate: Rate::from_hz(hz).unwrap(),
        format,
    }
}

/// Oracle answering from a fixed table of working combinations.
///
/// A single dimension passes whenever some working combination uses it.
#[derive(Default)]
pub(crate) struct ScriptedOracle {
    working: BTreeMap<Triple, String>,
    nearest: BTreeMap<u32, u32>,
    fail_after: Option<(usize, InterfaceError)>,
    pub(crate) attempts: Vec<Triple>,
}

impl ScriptedOracle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn works(mut self, triple: Triple, label: &str) -> Self {
        self.working.insert(triple, label.to_owned());
        self
    }

    /// Asking for `requested` Hz yields `actual` Hz instead.
    pub(crate) fn rate_lands_on(mut self, requested: u32, actual: u32) -> Self {
        self.nearest.insert(requested, actual);
        self
    }

    /// Every commit after the first `attempts` fails at the interface level.
    pub(crate) fn fails_after(mut self, attempts: usize, error: InterfaceError) -> Self {
        self.fail_after = Some((attempts, error));
        self
    }
}

impl CapabilityOracle for ScriptedOracle {
    fn test_channel_count(&mut self, channels: ChannelCount) -> bool {
        self.working.keys().any(|t| t.channels == channels)
    }

    fn test_rate(&mut self, rate: Rate) -> Option<u32> {
        if let Some(actual) = self.nearest.get(&rate.hz()) {
            return Some(*actual);
        }
        self.working
            .keys()
            .any(|t| t.rate == rate)
            .then_some(rate.hz())
    }

    fn test_format(&mut self, format: SampleFormat) -> bool {
        self.working.keys().any(|t| t.format == format)
    }

    fn commit_configuration(
        &mut self,
        channels: ChannelCount,
        rate: Rate,
        format: SampleFormat,
    ) -> Result<String, CommitError> {
        let attempt = Triple {
            channels,
            rate,
            format,
        };
        self.attempts.push(attempt);
        if let Some((limit, error)) = &self.fail_after {
            if self.attempts.len() > *limit {
                return Err(CommitError::Interface(error.clone()));
            }
        }
        self.working
            .get(&attempt)
            .cloned()
            .ok_or(CommitError::Rejected)
    }
}

use log::{debug, info};

use crate::{
    builder::SetBuilder,
    bundle::{ConfigurationBundle, InterfaceIdentity},
    candidate::CandidateSpace,
    channel::MAX_CHANNEL_COUNT,
    compact::compact,
    error::DiscoveryError,
    oracle::{CapabilityOracle, CommitError},
};

const DEFAULT_MAX_CHANNELS: u8 = 8;

/// Settings applied to every interface discovered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    max_channels: u8,
}

impl DiscoveryConfig {
    /// Probe channel counts from 1 up to `max_channels`, clamped to what a configuration set
    /// can describe.
    pub fn with_max_channels(mut self, max_channels: u8) -> Self {
        self.max_channels = max_channels.clamp(1, MAX_CHANNEL_COUNT);
        self
    }

    pub fn max_channels(&self) -> u8 {
        self.max_channels
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            max_channels: DEFAULT_MAX_CHANNELS,
        }
    }
}

/// Find every configuration `oracle` accepts and describe them as compacted sets.
///
/// Per-value and per-combination rejections only shape the result. An interface-level failure
/// ends discovery and yields a failed bundle with no sets. Running out of memory while
/// recording sets is returned as an error and no bundle is produced.
pub fn discover<O: CapabilityOracle + ?Sized>(
    identity: InterfaceIdentity,
    oracle: &mut O,
    config: &DiscoveryConfig,
) -> Result<ConfigurationBundle, DiscoveryError> {
    let name = identity.interface_name.as_str();
    let space = CandidateSpace::probe(oracle, config);
    debug!(
        "\"{name}\": {} channel counts, {} rates, {} formats, {} combinations to try",
        space.channels.len(),
        space.rates.len(),
        space.formats.len(),
        space.len()
    );

    let mut builder = SetBuilder::new();
    for triple in space.triples() {
        match oracle.commit_configuration(triple.channels, triple.rate, triple.format) {
            Ok(label) => {
                if label.is_empty() {
                    debug!("\"{name}\": {triple}");
                } else {
                    debug!("\"{name}\": {triple} <{label}>");
                }
                builder.push(triple, &label)?;
            }
            Err(CommitError::Rejected) => {
                debug!("\"{name}\": {triple} rejected");
            }
            Err(CommitError::Interface(e)) => {
                info!("\"{name}\": discovery stopped: {e}");
                return Ok(ConfigurationBundle::failed(identity, e));
            }
        }
    }

    let mut sets = builder.finish()?;
    let absorbed = compact(&mut sets);
    debug!(
        "\"{name}\": {} configuration sets, {absorbed} merged across channel counts",
        sets.len()
    );
    Ok(ConfigurationBundle::new(identity, sets))
}

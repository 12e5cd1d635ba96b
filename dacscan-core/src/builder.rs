use alloc::{collections::TryReserveError, string::String, vec::Vec};

use log::debug;

use crate::{
    candidate::Triple,
    channel::ChannelCount,
    config_set::ConfigurationSet,
    format::FormatSet,
    rate::{Rate, RateSet},
};

/// Folds working combinations into configuration sets as they are discovered.
///
/// Combinations must arrive in probing order: channel count ascending, then rate ascending,
/// then format ascending. All formats found for one channel count and rate are gathered into
/// runs that share a channel map label. Each run then either widens the rate range of an
/// earlier set with the same channel count, formats and label, or starts a new set.
///
/// ```
/// use dacscan_core::{
///     builder::SetBuilder, candidate::Triple, channel::ChannelCount, format::SampleFormat,
///     rate::Rate,
/// };
///
/// let mut builder = SetBuilder::new();
/// for hz in [44100, 48000] {
///     for format in [SampleFormat::S16Le, SampleFormat::S24Le] {
///         let triple = Triple {
///             channels: ChannelCount::new(2).unwrap(),
///             rate: Rate::from_hz(hz).unwrap(),
///             format,
///         };
///         builder.push(triple, "").unwrap();
///     }
/// }
/// let sets = builder.finish().unwrap();
/// assert_eq!(sets.len(), 1);
/// assert_eq!(sets[0].rates().len(), 2);
/// assert_eq!(sets[0].formats().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SetBuilder {
    sets: Vec<ConfigurationSet>,
    run: Option<FormatRun>,
}

/// Formats sharing a label, found so far for one channel count and rate.
#[derive(Debug)]
struct FormatRun {
    channels: ChannelCount,
    rate: Rate,
    formats: FormatSet,
    label: String,
}

impl SetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `triple` works, reporting the channel map `label`.
    pub fn push(&mut self, triple: Triple, label: &str) -> Result<(), TryReserveError> {
        if let Some(run) = self.run.as_mut() {
            if run.channels == triple.channels && run.rate == triple.rate && run.label == label {
                run.formats.insert(triple.format);
                return Ok(());
            }
        }
        if let Some(run) = self.run.take() {
            if run.channels == triple.channels && run.rate == triple.rate {
                debug!(
                    "channel map for {triple} is \"{label}\", was \"{}\", splitting",
                    run.label
                );
            }
            self.commit(run)?;
        }
        self.run = Some(FormatRun {
            channels: triple.channels,
            rate: triple.rate,
            formats: FormatSet::single(triple.format),
            label: label.into(),
        });
        Ok(())
    }

    /// Close any open run and hand over the sets built so far, in creation order.
    pub fn finish(mut self) -> Result<Vec<ConfigurationSet>, TryReserveError> {
        if let Some(run) = self.run.take() {
            self.commit(run)?;
        }
        Ok(self.sets)
    }

    fn commit(&mut self, run: FormatRun) -> Result<(), TryReserveError> {
        let rate = RateSet::single(run.rate);
        if let Some(set) = self
            .sets
            .iter_mut()
            .find(|s| s.accepts(run.channels, run.formats, &run.label))
        {
            set.rate_set |= rate;
            return Ok(());
        }
        self.sets.try_reserve(1)?;
        self.sets.push(ConfigurationSet::new(
            run.channels,
            rate,
            run.formats,
            &run.label,
        ));
        Ok(())
    }
}

/// Build configuration sets from working combinations already in probing order.
pub fn build_sets<'a, I>(found: I) -> Result<Vec<ConfigurationSet>, TryReserveError>
where
    I: IntoIterator<Item = (Triple, &'a str)>,
{
    let mut builder = SetBuilder::new();
    for (triple, label) in found {
        builder.push(triple, label)?;
    }
    builder.finish()
}

use alloc::string::String;

use crate::{channel::ChannelCount, error::InterfaceError, format::SampleFormat, rate::Rate};

/// Answers capability questions about one open output interface.
///
/// Implementations talk to real hardware, so every call may block for as long as the driver
/// takes. Discovery holds the oracle by `&mut` and never issues two attempts at once.
pub trait CapabilityOracle {
    /// Whether the interface accepts `channels` with every other parameter left open.
    fn test_channel_count(&mut self, channels: ChannelCount) -> bool;

    /// Ask for `rate` and report the rate the interface would actually run at, if any.
    ///
    /// Callers compare the answer against the request; a nearby rate does not count.
    fn test_rate(&mut self, rate: Rate) -> Option<u32>;

    /// Whether the interface accepts `format` with every other parameter left open.
    fn test_format(&mut self, format: SampleFormat) -> bool;

    /// Try to fully apply a channel count, rate and format together.
    ///
    /// On success the channel map label is returned, which is empty when the interface does
    /// not report one.
    fn commit_configuration(
        &mut self,
        channels: ChannelCount,
        rate: Rate,
        format: SampleFormat,
    ) -> Result<String, CommitError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitError {
    /// This particular combination is not supported. Discovery carries on.
    Rejected,

    /// The interface itself failed. Discovery of this interface stops.
    Interface(InterfaceError),
}

use cpal::{SupportedStreamConfigRange, SupportedStreamConfigsError, traits::DeviceTrait};
use dacscan_core::{
    CapabilityOracle, CommitError, InterfaceError, channel::ChannelCount, format::SampleFormat,
    rate::Rate,
};
use log::debug;

// strerror() has no name for ENOTSUPP, which is what a disconnected HDMI port reports.
const DISCONNECTED_MARKER: &str = "524";

/// Capability oracle backed by the output config ranges cpal reports for a device.
///
/// cpal does not expose channel maps so every working combination reports an empty label.
pub struct CpalOracle {
    configs: Vec<SupportedStreamConfigRange>,
}

impl CpalOracle {
    pub fn new(configs: Vec<SupportedStreamConfigRange>) -> Self {
        Self { configs }
    }

    /// Read the output config ranges of `device`.
    ///
    /// This is where busy or disconnected devices show up.
    pub fn open(device: &cpal::Device) -> Result<Self, InterfaceError> {
        let configs = device
            .supported_output_configs()
            .map_err(interface_error)?
            .collect::<Vec<_>>();
        debug!("{} output config ranges", configs.len());
        Ok(Self::new(configs))
    }

    fn ranges_with(
        &self,
        channels: Option<ChannelCount>,
        format: Option<SampleFormat>,
    ) -> impl Iterator<Item = &SupportedStreamConfigRange> {
        self.configs.iter().filter(move |c| {
            channels.is_none_or(|n| c.channels() == u16::from(n.get()))
                && format.is_none_or(|f| candidate_format(c.sample_format()) == Some(f))
        })
    }
}

impl CapabilityOracle for CpalOracle {
    fn test_channel_count(&mut self, channels: ChannelCount) -> bool {
        self.ranges_with(Some(channels), None).next().is_some()
    }

    fn test_rate(&mut self, rate: Rate) -> Option<u32> {
        let wanted = rate.hz();
        self.configs
            .iter()
            .map(|c| wanted.max(c.min_sample_rate().0).min(c.max_sample_rate().0))
            .min_by_key(|actual| actual.abs_diff(wanted))
    }

    fn test_format(&mut self, format: SampleFormat) -> bool {
        self.ranges_with(None, Some(format)).next().is_some()
    }

    fn commit_configuration(
        &mut self,
        channels: ChannelCount,
        rate: Rate,
        format: SampleFormat,
    ) -> Result<String, CommitError> {
        let hz = rate.hz();
        if self
            .ranges_with(Some(channels), Some(format))
            .any(|c| c.min_sample_rate().0 <= hz && hz <= c.max_sample_rate().0)
        {
            Ok(String::new())
        } else {
            Err(CommitError::Rejected)
        }
    }
}

/// The candidate format matching a cpal sample format, in this machine's byte order.
pub fn candidate_format(format: cpal::SampleFormat) -> Option<SampleFormat> {
    let native = |le, be| {
        if cfg!(target_endian = "big") { be } else { le }
    };
    match format {
        cpal::SampleFormat::I8 => Some(SampleFormat::S8),
        cpal::SampleFormat::U8 => Some(SampleFormat::U8),
        cpal::SampleFormat::I16 => Some(native(SampleFormat::S16Le, SampleFormat::S16Be)),
        cpal::SampleFormat::U16 => Some(native(SampleFormat::U16Le, SampleFormat::U16Be)),
        cpal::SampleFormat::I32 => Some(native(SampleFormat::S32Le, SampleFormat::S32Be)),
        cpal::SampleFormat::U32 => Some(native(SampleFormat::U32Le, SampleFormat::U32Be)),
        cpal::SampleFormat::F32 => Some(native(SampleFormat::FloatLe, SampleFormat::FloatBe)),
        cpal::SampleFormat::F64 => Some(native(SampleFormat::Float64Le, SampleFormat::Float64Be)),
        _ => None,
    }
}

/// Classify a failure to read the config ranges of a device.
///
/// cpal reports a device that has gone away as `DeviceNotAvailable`. It has no busy status of
/// its own, so busy interfaces are only told apart where errnos are available.
pub(crate) fn interface_error(e: SupportedStreamConfigsError) -> InterfaceError {
    match e {
        SupportedStreamConfigsError::DeviceNotAvailable => InterfaceError::NotFound,
        SupportedStreamConfigsError::BackendSpecific { err }
            if err.description.contains(DISCONNECTED_MARKER) =>
        {
            InterfaceError::Disconnected
        }
        SupportedStreamConfigsError::BackendSpecific { err } => {
            InterfaceError::Other(err.description)
        }
        other => InterfaceError::Other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::range;
    use cpal::BackendSpecificError;

    fn ch(n: u8) -> ChannelCount {
        ChannelCount::new(n).unwrap()
    }

    fn hz(r: u32) -> Rate {
        Rate::from_hz(r).unwrap()
    }

    fn s16() -> SampleFormat {
        candidate_format(cpal::SampleFormat::I16).unwrap()
    }

    fn s32() -> SampleFormat {
        candidate_format(cpal::SampleFormat::I32).unwrap()
    }

    #[test]
    fn dimensions_pass_individually() {
        let mut oracle = CpalOracle::new(vec![
            range(2, 44100, 48000, cpal::SampleFormat::I16),
            range(8, 48000, 48000, cpal::SampleFormat::I32),
        ]);
        assert!(oracle.test_channel_count(ch(2)));
        assert!(oracle.test_channel_count(ch(8)));
        assert!(!oracle.test_channel_count(ch(1)));
        assert!(oracle.test_format(s16()));
        assert!(!oracle.test_format(SampleFormat::S24Le3));
        assert_eq!(oracle.test_rate(hz(44100)), Some(44100));
        assert_eq!(oracle.test_rate(hz(96000)), Some(48000));
    }

    #[test]
    fn commit_needs_one_range_for_everything() {
        let mut oracle = CpalOracle::new(vec![
            range(2, 44100, 48000, cpal::SampleFormat::I16),
            range(8, 48000, 48000, cpal::SampleFormat::I32),
        ]);
        assert_eq!(oracle.commit_configuration(ch(2), hz(44100), s16()), Ok(String::new()));
        assert_eq!(
            oracle.commit_configuration(ch(8), hz(44100), s32()),
            Err(CommitError::Rejected)
        );
        assert_eq!(
            oracle.commit_configuration(ch(2), hz(48000), s32()),
            Err(CommitError::Rejected)
        );
    }

    #[test]
    fn no_ranges_no_rates() {
        let mut oracle = CpalOracle::new(vec![]);
        assert_eq!(oracle.test_rate(hz(48000)), None);
    }

    #[test]
    fn error_mapping() {
        assert_eq!(
            interface_error(SupportedStreamConfigsError::DeviceNotAvailable),
            InterfaceError::NotFound
        );
        let backend = |description: &str| SupportedStreamConfigsError::BackendSpecific {
            err: BackendSpecificError {
                description: description.into(),
            },
        };
        assert_eq!(
            interface_error(backend(
                "ALSA function 'snd_pcm_hw_params_any' failed with error 'Unknown error 524'"
            )),
            InterfaceError::Disconnected
        );
        assert_eq!(
            interface_error(backend("I/O error")),
            InterfaceError::Other("I/O error".into())
        );
    }
}

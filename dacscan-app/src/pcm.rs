use alsa::{
    Direction, PCM, ValueOr,
    pcm::{Access, Format, HwParams},
};
use dacscan_core::{
    CapabilityOracle, CommitError, InterfaceError, channel::ChannelCount, format::SampleFormat,
    rate::Rate,
};
use log::debug;

// Kernel-internal ENOTSUPP, which is what an HDMI port with nothing attached reports.
const ENOTSUPP: i32 = 524;

/// Capability oracle that applies hardware parameters to an ALSA playback PCM.
///
/// Every question starts again from the full configuration space of the PCM. A combination
/// only counts as working once it has been installed with `snd_pcm_hw_params`, after which the
/// channel map the driver reports becomes its label.
pub struct PcmOracle {
    pcm: PCM,
    name: String,
}

impl PcmOracle {
    /// Open the PCM called `name` for playback.
    ///
    /// The PCM is opened non-blocking so that an interface in use fails straight away.
    pub fn open(name: &str) -> Result<Self, InterfaceError> {
        let pcm = PCM::new(name, Direction::Playback, true).map_err(interface_error)?;
        Ok(Self {
            pcm,
            name: name.to_owned(),
        })
    }

    fn params(&self) -> Option<HwParams<'_>> {
        match HwParams::any(&self.pcm) {
            Ok(hwp) => Some(hwp),
            Err(e) => {
                debug!("\"{}\": no configurations available: {e}", self.name);
                None
            }
        }
    }

    fn channel_map(&self) -> String {
        match self.pcm.get_chmap() {
            Ok(map) => map.to_string(),
            Err(e) => {
                debug!("\"{}\": no channel map: {e}", self.name);
                String::new()
            }
        }
    }
}

impl CapabilityOracle for PcmOracle {
    fn test_channel_count(&mut self, channels: ChannelCount) -> bool {
        self.params()
            .is_some_and(|hwp| hwp.test_channels(channels.get().into()).is_ok())
    }

    fn test_rate(&mut self, rate: Rate) -> Option<u32> {
        // test_rate is too strict for rates that are nominally right, so ask for the nearest
        self.params()?
            .set_rate_near(rate.hz(), ValueOr::Nearest)
            .ok()
    }

    fn test_format(&mut self, format: SampleFormat) -> bool {
        let Some(format) = alsa_format(format) else {
            return false;
        };
        self.params()
            .is_some_and(|hwp| hwp.test_format(format).is_ok())
    }

    fn commit_configuration(
        &mut self,
        channels: ChannelCount,
        rate: Rate,
        format: SampleFormat,
    ) -> Result<String, CommitError> {
        let name = self.name.as_str();
        let Some(alsa_fmt) = alsa_format(format) else {
            return Err(CommitError::Rejected);
        };
        let hwp = self.params().ok_or(CommitError::Rejected)?;
        if hwp.set_access(Access::RWInterleaved).is_err()
            && hwp.set_access(Access::MMapInterleaved).is_err()
        {
            debug!("\"{name}\": interleaved access not available");
            return Err(CommitError::Rejected);
        }

        let applied = hwp
            .set_channels(channels.get().into())
            .and_then(|_| hwp.set_format(alsa_fmt))
            .and_then(|_| hwp.set_rate_near(rate.hz(), ValueOr::Nearest));
        match applied {
            Ok(actual) if actual == rate.hz() => {}
            Ok(actual) => {
                debug!("\"{name}\": asked for {rate} fps for {format}/{channels}, got {actual}");
                return Err(CommitError::Rejected);
            }
            Err(e) => {
                debug!("\"{name}\": {rate}/{format}/{channels} not settable: {e}");
                return Err(CommitError::Rejected);
            }
        }

        if let Err(e) = self.pcm.hw_params(&hwp) {
            if e.errno() == libc::ENOSPC {
                debug!(
                    "\"{name}\": unable to install {rate}/{format}/{channels}: {e}. This is \
                     usually a USB incompatibility between the system and the device."
                );
            } else {
                debug!("\"{name}\": unable to install {rate}/{format}/{channels}: {e}");
            }
            return Err(CommitError::Rejected);
        }
        Ok(self.channel_map())
    }
}

/// The ALSA format with the same name as `format`.
pub fn alsa_format(format: SampleFormat) -> Option<Format> {
    format
        .name()
        .parse::<Format>()
        .ok()
        .filter(|f| *f != Format::Unknown)
}

/// Classify a failure to open or query an interface by its errno.
pub(crate) fn interface_error(e: alsa::Error) -> InterfaceError {
    match e.errno() {
        libc::ENOENT => InterfaceError::NotFound,
        libc::EBUSY => InterfaceError::Busy,
        ENOTSUPP => InterfaceError::Disconnected,
        _ => InterfaceError::Other(e.to_string()),
    }
}

use cpal::traits::{DeviceTrait, HostTrait};
use dacscan_core::{
    CapabilityOracle, ConfigurationBundle, DiscoveryConfig, InterfaceError, InterfaceIdentity,
    discover,
};
use log::{debug, warn};

use crate::{
    error::ScanError,
    interface::{DEFAULT_PREFIXES, InterfaceName},
    mixer::MixerControl,
    soundcard::CpalOracle,
};

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Access prefixes of the interfaces to probe, such as `hw`.
    pub prefixes: Vec<String>,
    /// Probe every output interface regardless of prefix.
    pub include_all: bool,
    pub discovery: DiscoveryConfig,
}

impl ScanConfig {
    pub fn wants(&self, name: &InterfaceName) -> bool {
        self.include_all || self.prefixes.iter().any(|p| *p == name.prefix)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            include_all: false,
            discovery: DiscoveryConfig::default(),
        }
    }
}

/// A sound card and everything discovered on it.
#[derive(Debug, Default)]
pub struct Card {
    pub number: u32,
    pub name: String,
    /// Name of the control interface, if the card was found through one.
    pub ctl_name: Option<String>,
    pub long_name: Option<String>,
    /// Number of PCM devices the card reports, playback or not.
    pub device_count: Option<u32>,
    /// Playback devices that were probed.
    pub devices: Vec<PcmDevice>,
    /// Playback volume controls. `None` when they could not be read.
    pub mixers: Option<Vec<MixerControl>>,
    /// Discovery results in probing order.
    pub bundles: Vec<ConfigurationBundle>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PcmDevice {
    pub number: u32,
    pub name: String,
    pub id: String,
    /// Subdevices the driver reports as available, if the driver was asked. A busy device
    /// reports zero.
    pub subdevices_available: Option<u32>,
    pub subdevices: Vec<Subdevice>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Subdevice {
    pub number: u32,
    pub name: String,
    /// Names of the interfaces that were discovered on this subdevice.
    pub interfaces: Vec<String>,
}

impl Card {
    pub fn new(number: u32, name: impl Into<String>) -> Self {
        Self {
            number,
            name: name.into(),
            ..Default::default()
        }
    }

    /// Record the result for an interface, listing it under its device and subdevice.
    pub fn add_bundle(&mut self, bundle: ConfigurationBundle) {
        let id = bundle.identity();
        let subdevice = self.subdevice_mut(id.device_number, id.subdevice_number);
        subdevice.interfaces.push(id.interface_name.clone());
        self.bundles.push(bundle);
    }

    /// The entry for a subdevice, added if it is not listed yet.
    pub fn subdevice_mut(&mut self, device: u32, subdevice: u32) -> &mut Subdevice {
        let d = match self.devices.iter().position(|d| d.number == device) {
            Some(d) => d,
            None => {
                self.devices.push(PcmDevice {
                    number: device,
                    ..Default::default()
                });
                self.devices.len() - 1
            }
        };
        let subdevices = &mut self.devices[d].subdevices;
        let s = match subdevices.iter().position(|s| s.number == subdevice) {
            Some(s) => s,
            None => {
                subdevices.push(Subdevice {
                    number: subdevice,
                    ..Default::default()
                });
                subdevices.len() - 1
            }
        };
        &mut subdevices[s]
    }
}

/// Name of the audio host that [`scan_cards`] enumerates.
pub fn host_name() -> &'static str {
    cpal::default_host().id().name()
}

/// Discover every wanted output interface of every sound card.
///
/// On Linux the cards are walked through ALSA directly. Elsewhere the output devices of the
/// default cpal host are used.
pub fn scan_cards(config: &ScanConfig) -> Result<Vec<Card>, ScanError> {
    #[cfg(target_os = "linux")]
    {
        crate::cards::scan_cards(config)
    }
    #[cfg(not(target_os = "linux"))]
    {
        scan_host_devices(config)
    }
}

/// Discover every wanted output device of the default cpal host.
pub fn scan_host_devices(config: &ScanConfig) -> Result<Vec<Card>, ScanError> {
    let host = cpal::default_host();
    debug!("scanning host {:?}", host.id());
    let devices = host.output_devices().map_err(ScanError::Host)?;
    let named = devices.filter_map(|d| match d.name() {
        Ok(name) => Some((name, d)),
        Err(e) => {
            debug!("skipping device without a name: {e}");
            None
        }
    });
    Ok(scan_interfaces(named, config, CpalOracle::open))
}

/// Discover each named interface in turn, one at a time, grouping the results by card.
///
/// `open` prepares an oracle for an interface. Cards are numbered in order of their first
/// interface with a result.
pub fn scan_interfaces<D, O, I, F>(interfaces: I, config: &ScanConfig, mut open: F) -> Vec<Card>
where
    I: IntoIterator<Item = (String, D)>,
    O: CapabilityOracle,
    F: FnMut(&D) -> Result<O, InterfaceError>,
{
    let mut cards: Vec<Card> = Vec::new();
    for (full_name, device) in interfaces {
        let name = InterfaceName::parse(&full_name);
        if !config.wants(&name) {
            debug!("skipping \"{full_name}\"");
            continue;
        }
        let card_name = name.card.clone().unwrap_or_else(|| full_name.clone());
        let card_idx = cards.iter().position(|c| c.name == card_name);
        let card_number = card_idx.unwrap_or(cards.len()) as u32;
        let identity = name.identity(&full_name, card_number);
        debug!("probing \"{full_name}\" as {name} on card {card_number}");

        let Some(bundle) = discover_interface(identity, open(&device), &config.discovery) else {
            continue;
        };
        match card_idx {
            Some(idx) => cards[idx].add_bundle(bundle),
            None => {
                let mut card = Card::new(card_number, card_name);
                card.add_bundle(bundle);
                cards.push(card);
            }
        }
    }
    cards
}

/// Run discovery on an interface, or record why it could not be opened.
///
/// Interfaces that do not exist and interfaces whose discovery runs out of memory give `None`.
pub(crate) fn discover_interface<O: CapabilityOracle>(
    identity: InterfaceIdentity,
    opened: Result<O, InterfaceError>,
    config: &DiscoveryConfig,
) -> Option<ConfigurationBundle> {
    let name = identity.interface_name.clone();
    match opened {
        Ok(mut oracle) => match discover(identity, &mut oracle, config) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                warn!("dropping \"{name}\": {e}");
                None
            }
        },
        Err(InterfaceError::NotFound) => {
            debug!("\"{name}\" does not exist");
            None
        }
        Err(e) => {
            debug!("unable to open \"{name}\": {e}");
            Some(ConfigurationBundle::failed(identity, e))
        }
    }
}

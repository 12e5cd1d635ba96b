//! Sound cards walked through ALSA.
//!
//! Each card is visited device by device and subdevice by subdevice, and every wanted access
//! prefix is tried on each subdevice.

use alsa::{
    Direction,
    card::{self, Card as AlsaCard},
    ctl::{Ctl, DeviceIter},
    device_name::HintIter,
};
use dacscan_core::InterfaceIdentity;
use log::debug;

use crate::{
    error::ScanError,
    interface::{InterfaceName, interface_name},
    mixer::playback_controls,
    pcm::PcmOracle,
    scan::{Card, PcmDevice, ScanConfig, Subdevice, discover_interface},
};

/// Discover the wanted playback interfaces of every card ALSA knows about.
pub fn scan_cards(config: &ScanConfig) -> Result<Vec<Card>, ScanError> {
    let mut cards = Vec::new();
    for alsa_card in card::Iter::new() {
        let alsa_card = alsa_card.map_err(ScanError::Cards)?;
        match scan_card(&alsa_card, config) {
            Ok(card) => cards.push(card),
            Err(e) => debug!("skipping card {}: {e}", alsa_card.get_index()),
        }
    }
    Ok(cards)
}

fn scan_card(alsa_card: &AlsaCard, config: &ScanConfig) -> Result<Card, alsa::Error> {
    let ctl = Ctl::from_card(alsa_card, false)?;
    let card_info = ctl.card_info()?;
    let card_id = card_info.get_id()?.to_owned();
    let ctl_name = format!("hw:CARD={card_id}");
    let mut card = Card::new(alsa_card.get_index() as u32, card_info.get_name()?);
    card.long_name = card_info.get_longname().ok().map(str::to_owned);
    debug!("card {}: \"{ctl_name}\", \"{}\"", card.number, card.name);

    let device_numbers: Vec<u32> = DeviceIter::new(&ctl).map(|d| d as u32).collect();
    card.device_count = Some(device_numbers.len() as u32);
    for number in device_numbers {
        let info = match ctl.pcm_info(number, 0, Direction::Playback) {
            Ok(info) => info,
            Err(e) => {
                debug!("card {}, device {number}: no playback: {e}", card.number);
                continue;
            }
        };
        let available = info.get_subdevices_avail();
        let mut device = PcmDevice {
            number,
            name: info.get_name().unwrap_or_default().to_owned(),
            id: info.get_id().unwrap_or_default().to_owned(),
            subdevices_available: Some(available),
            subdevices: Vec::new(),
        };
        // A busy device can report no free subdevices, so the first one is always tried
        for sub in 0..available.max(1) {
            let subdevice_name = match ctl.pcm_info(number, sub, Direction::Playback) {
                Ok(info) => info.get_subdevice_name().unwrap_or_default().to_owned(),
                Err(e) => {
                    debug!("card {}, device {number}, subdevice {sub}: {e}", card.number);
                    String::new()
                }
            };
            let mut subdevice = Subdevice {
                number: sub,
                name: subdevice_name,
                interfaces: Vec::new(),
            };
            for prefix in &config.prefixes {
                let name = interface_name(prefix, &card_id, number, sub);
                let identity = InterfaceIdentity {
                    interface_name: name.clone(),
                    device_name: device.name.clone(),
                    subdevice_name: subdevice.name.clone(),
                    card_number: card.number,
                    device_number: number,
                    subdevice_number: sub,
                };
                debug!(
                    "probing \"{name}\", device \"{}\", subdevice \"{}\"",
                    identity.device_name, identity.subdevice_name
                );
                let opened = PcmOracle::open(&name);
                if let Some(bundle) = discover_interface(identity, opened, &config.discovery) {
                    subdevice.interfaces.push(name);
                    card.bundles.push(bundle);
                }
            }
            device.subdevices.push(subdevice);
        }
        card.devices.push(device);
    }

    if config.include_all {
        scan_hinted(alsa_card, &mut card, config);
    }
    card.mixers = match playback_controls(&ctl_name) {
        Ok(controls) => Some(controls),
        Err(e) => {
            debug!("unable to read mixers of \"{ctl_name}\": {e}");
            None
        }
    };
    card.ctl_name = Some(ctl_name);
    Ok(card)
}

/// Playback interfaces of the card under any other name, such as `front:CARD=PCH,DEV=0`.
fn scan_hinted(alsa_card: &AlsaCard, card: &mut Card, config: &ScanConfig) {
    let hints = match HintIter::new_str(Some(alsa_card), "pcm") {
        Ok(hints) => hints,
        Err(e) => {
            debug!("no interface names for card {}: {e}", card.number);
            return;
        }
    };
    for hint in hints {
        if hint.direction == Some(Direction::Capture) {
            continue;
        }
        let Some(full_name) = hint.name else {
            continue;
        };
        if card.bundles.iter().any(|b| b.interface_name() == full_name) {
            continue;
        }
        let identity = InterfaceName::parse(&full_name).identity(&full_name, card.number);
        debug!("probing \"{full_name}\"");
        let opened = PcmOracle::open(&full_name);
        if let Some(bundle) = discover_interface(identity, opened, &config.discovery) {
            card.add_bundle(bundle);
        }
    }
}

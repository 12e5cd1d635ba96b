use std::fmt;

use dacscan_core::InterfaceIdentity;

/// Access prefixes probed unless told otherwise.
pub const DEFAULT_PREFIXES: [&str; 3] = ["hw", "hdmi", "iec958"];

/// An ALSA-style PCM name split into its parts.
///
/// Both `prefix:CARD=name,DEV=n,SUBDEV=m` and the positional `prefix:name,n,m` forms are
/// understood. Missing device and subdevice numbers are 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceName {
    pub prefix: String,
    pub card: Option<String>,
    pub device: u32,
    pub subdevice: u32,
}

impl InterfaceName {
    pub fn parse(name: &str) -> Self {
        let (prefix, args) = match name.split_once(':') {
            Some((prefix, args)) => (prefix, args),
            None => (name, ""),
        };
        let mut parsed = InterfaceName {
            prefix: prefix.to_owned(),
            card: None,
            device: 0,
            subdevice: 0,
        };
        let mut position = 0;
        for arg in args.split(',').filter(|a| !a.is_empty()) {
            match arg.split_once('=') {
                Some((key, value)) => match key.to_ascii_uppercase().as_str() {
                    "CARD" => parsed.card = Some(value.to_owned()),
                    "DEV" => parsed.device = value.parse().unwrap_or(0),
                    "SUBDEV" => parsed.subdevice = value.parse().unwrap_or(0),
                    _ => {}
                },
                None => {
                    match position {
                        0 => parsed.card = Some(arg.to_owned()),
                        1 => parsed.device = arg.parse().unwrap_or(0),
                        2 => parsed.subdevice = arg.parse().unwrap_or(0),
                        _ => {}
                    }
                    position += 1;
                }
            }
        }
        parsed
    }

    /// Identity of this interface for a discovery run on card number `card_number`.
    ///
    /// The name only carries numbers. Device and subdevice names are left empty for the caller
    /// to fill in from the driver.
    pub fn identity(&self, full_name: &str, card_number: u32) -> InterfaceIdentity {
        InterfaceIdentity {
            interface_name: full_name.to_owned(),
            card_number,
            device_number: self.device,
            subdevice_number: self.subdevice,
            ..Default::default()
        }
    }
}

/// Name of the interface with access `prefix` on a card, device and subdevice.
///
/// The first subdevice of the first device uses the short `prefix:card` form.
pub fn interface_name(prefix: &str, card_id: &str, device: u32, subdevice: u32) -> String {
    match (device, subdevice) {
        (0, 0) => format!("{prefix}:{card_id}"),
        (device, 0) => format!("{prefix}:CARD={card_id},DEV={device}"),
        (device, subdevice) => format!("{prefix}:CARD={card_id},DEV={device},SUBDEV={subdevice}"),
    }
}

impl fmt::Display for InterfaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix)?;
        if let Some(card) = &self.card {
            write!(f, ":CARD={card},DEV={}", self.device)?;
            if self.subdevice != 0 {
                write!(f, ",SUBDEV={}", self.subdevice)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyed_form() {
        let n = InterfaceName::parse("hdmi:CARD=vc4hdmi0,DEV=1,SUBDEV=2");
        assert_eq!(n.prefix, "hdmi");
        assert_eq!(n.card.as_deref(), Some("vc4hdmi0"));
        assert_eq!(n.device, 1);
        assert_eq!(n.subdevice, 2);
    }

    #[test]
    fn short_and_positional_forms() {
        let n = InterfaceName::parse("hw:Headphones");
        assert_eq!(n.card.as_deref(), Some("Headphones"));
        assert_eq!(n.device, 0);
        let n = InterfaceName::parse("hw:0,3");
        assert_eq!(n.card.as_deref(), Some("0"));
        assert_eq!(n.device, 3);
    }

    #[test]
    fn plain_name_has_no_card() {
        let n = InterfaceName::parse("default");
        assert_eq!(n.prefix, "default");
        assert_eq!(n.card, None);
        assert_eq!(n.to_string(), "default");
    }

    #[test]
    fn identity_carries_numbers() {
        let full = "iec958:CARD=PCH,DEV=0";
        let id = InterfaceName::parse(full).identity(full, 2);
        assert_eq!(id.interface_name, full);
        assert_eq!(id.device_name, "");
        assert_eq!(id.card_number, 2);
        assert_eq!(id.device_number, 0);
    }

    #[test]
    fn names_built_per_prefix() {
        assert_eq!(interface_name("hw", "PCH", 0, 0), "hw:PCH");
        assert_eq!(interface_name("hdmi", "vc4hdmi0", 3, 0), "hdmi:CARD=vc4hdmi0,DEV=3");
        assert_eq!(
            interface_name("hw", "PCH", 0, 2),
            "hw:CARD=PCH,DEV=0,SUBDEV=2"
        );
        for name in ["hw:PCH", "hw:CARD=PCH,DEV=3", "hw:CARD=PCH,DEV=0,SUBDEV=2"] {
            let parsed = InterfaceName::parse(name);
            assert_eq!(parsed.card.as_deref(), Some("PCH"));
            assert_eq!(
                interface_name(&parsed.prefix, "PCH", parsed.device, parsed.subdevice),
                name
            );
        }
    }
}

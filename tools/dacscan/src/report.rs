use ascii_table::{Align, AsciiTable};
use dacscan_app::{
    ConfigurationBundle, ConfigurationSet, InterfaceError, InterfaceGroup,
    access::{AccessReport, current_user},
    error::AccessError,
    group_equivalent,
    mixer::MixerControl,
    scan::{Card, PcmDevice},
};

const INDENT: &str = "                  ";

pub fn print_access(result: Result<AccessReport, AccessError>) {
    let report = match result {
        Ok(report) => report,
        Err(e) => {
            println!("{}.", capitalise(&e.to_string()));
            return;
        }
    };
    if report.is_empty() {
        println!("No sound devices were found.");
        return;
    }
    if report.all_accessible() {
        return;
    }
    let user = current_user().unwrap_or_else(|| "current user".to_owned());
    let dir = report.directory.display();
    if report.accessible == 0 && !report.stat_failed {
        println!(
            "This check can not be performed because the current user, \"{user}\", does not have \
             permission to access sound devices."
        );
        if let Some(group) = report.blocking_group() {
            println!("Adding \"{user}\" to the \"{group}\" group may fix this.");
        }
    } else if report.accessible == 0 {
        println!(
            "This check can not be performed because the current user, \"{user}\", does not have \
             permission to examine the contents of the sound devices directory \"{dir}\"."
        );
    } else {
        println!(
            "This check can not be performed because the current user, \"{user}\", does not have \
             permission to access all sound devices."
        );
        println!(
            "To fix this, check the permissions of items in the standard sound device directory \
             \"{dir}\"."
        );
    }
    println!("Alternatively, try running this tool as the \"root\" user.");
}

pub fn print_card(card: &mut Card, extended: bool) {
    println!("  --- Card {}:", card.number);
    if let Some(ctl_name) = card.ctl_name.as_ref().filter(|_| extended) {
        println!("        --- CTL name: \"{ctl_name}\".");
    }
    println!("        --- Name: \"{}\".", card.name);
    if extended {
        if let Some(long_name) = &card.long_name {
            println!("        --- Long name: \"{long_name}\".");
        }
        if let Some(count) = card.device_count {
            println!("        --- Devices: {count}.");
        }
        for device in &card.devices {
            print_device(device);
        }
    }
    if let Some(mixers) = &card.mixers {
        print_mixers(mixers);
    }

    let groups = group_equivalent(&mut card.bundles);
    if groups.is_empty() {
        return;
    }
    println!("        --- Interfaces and Supported Formats:");
    for group in &groups {
        print_group(group);
    }
}

fn print_device(device: &PcmDevice) {
    println!("              --- Device {}:", device.number);
    if !device.name.is_empty() || !device.id.is_empty() {
        println!("                    --- Name: \"{}\".", device.name);
        println!("                    --- ID: \"{}\".", device.id);
    }
    match device.subdevices_available {
        Some(0) => println!(
            "                    --- Subdevices: Count not available. Is the device busy?"
        ),
        Some(n) => println!("                    --- Subdevices: {n}."),
        None => {}
    }
    for subdevice in &device.subdevices {
        println!("                          --- Subdevice: {}:", subdevice.number);
        if device.subdevices_available.is_some() {
            println!("                                --- Name: \"{}\".", subdevice.name);
        }
        if subdevice.interfaces.is_empty() {
            continue;
        }
        println!("                                --- Interfaces:");
        for name in &subdevice.interfaces {
            println!("                                      >>> \"{name}\"");
        }
    }
}

fn print_mixers(mixers: &[MixerControl]) {
    match mixers.len() {
        0 => {
            println!("        --- No mixers found.");
            return;
        }
        1 => println!("        --- Mixer:"),
        _ => println!("        --- Mixers:"),
    }
    let mut table = AsciiTable::default();
    table.set_max_width(160);
    table.column(0).set_header("Name").set_align(Align::Left);
    for (i, header) in ["Index", "Min", "Max", "Mute dB", "Min dB", "Max dB"]
        .into_iter()
        .enumerate()
    {
        table.column(i + 1).set_header(header).set_align(Align::Right);
    }
    table.print(mixer_rows(mixers));
}

/// Decibel columns are left blank for controls without decibel information.
fn mixer_rows(mixers: &[MixerControl]) -> Vec<[String; 7]> {
    mixers
        .iter()
        .map(|m| {
            let (mute, min_db, max_db) = match &m.decibels {
                Some(db) => (
                    String::from(if db.lowest_is_mute { "Yes" } else { "No" }),
                    format!("{:.2}", db.min_db()),
                    format!("{:.2}", db.max_db()),
                ),
                None => Default::default(),
            };
            [
                m.name.clone(),
                m.index.to_string(),
                m.min.to_string(),
                m.max.to_string(),
                mute,
                min_db,
                max_db,
            ]
        })
        .collect()
}

fn print_group(group: &InterfaceGroup<'_>) {
    for member in group.members() {
        println!("              >>> Interface \"{}\":", member.interface_name());
    }
    match group.primary.error_status() {
        None => print_sets(group.primary, group.members().count()),
        Some(InterfaceError::Busy) => {
            println!("{INDENT}This interface is busy and can not be checked.");
            println!("{INDENT}To check it, take it out of use and try again.");
        }
        Some(InterfaceError::Disconnected) => {
            println!(
                "{INDENT}This interface appears to be for a disconnected or uninitialised HDMI \
                 port. To test it:"
            );
            println!("{INDENT}   (1) connect it to the HDMI device,");
            println!("{INDENT}   (2) turn the HDMI device on and select this device as source,");
            println!("{INDENT}   (3) reboot and try again.");
        }
        Some(e) => println!("{INDENT}{}.", capitalise(&e.to_string())),
    }
}

fn print_sets(bundle: &ConfigurationBundle, similar: usize) {
    if bundle.live_set_count() == 0 {
        println!("{INDENT}No supported combination of rate, format and channel count was found.");
        return;
    }
    for (n, set) in bundle.live_sets().enumerate() {
        let lead = match (n, similar) {
            (0, 1) => "This interface supports",
            (0, _) => "These interfaces support",
            (_, 1) => "It also supports",
            (_, _) => "They also support",
        };
        println!("{INDENT}{lead} any rate, format and channel combination from the following table:");

        let mut table = AsciiTable::default();
        table.set_max_width(160);
        table.column(0).set_header("Rate").set_align(Align::Right);
        table.column(1).set_header("Format").set_align(Align::Right);
        table.column(2).set_header("Channels").set_align(Align::Right);
        table.column(3).set_header("Channel Map").set_align(Align::Left);
        table.print(set_rows(set));
    }
}

/// Rates, formats and channel counts listed side by side, each column as long as it needs.
fn set_rows(set: &ConfigurationSet) -> Vec<[String; 4]> {
    let rates: Vec<String> = set.rates().iter().map(|r| r.to_string()).collect();
    let formats: Vec<String> = set.formats().iter().map(|f| f.to_string()).collect();
    let channels: Vec<(String, String)> = set
        .channels()
        .iter()
        .map(|c| (c.to_string(), set.channel_map(c).to_owned()))
        .collect();
    let rows = rates.len().max(formats.len()).max(channels.len());
    (0..rows)
        .map(|i| {
            let (count, map) = channels.get(i).cloned().unwrap_or_default();
            [
                rates.get(i).cloned().unwrap_or_default(),
                formats.get(i).cloned().unwrap_or_default(),
                count,
                map,
            ]
        })
        .collect()
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dacscan_app::mixer::{DB_GAIN_MUTE, DecibelRange};
    use dacscan_core::{channel::ChannelCount, format::SampleFormat, rate::Rate};

    #[test]
    fn columns_run_side_by_side() {
        let rates = [44100, 48000, 96000]
            .into_iter()
            .filter_map(Rate::from_hz)
            .collect();
        let formats = [SampleFormat::S16Le].into_iter().collect();
        let set = ConfigurationSet::new(ChannelCount::new(2).unwrap(), rates, formats, "FL,FR");
        let rows = set_rows(&set);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ["44100", "S16_LE", "2", "FL,FR"].map(String::from));
        assert_eq!(rows[2], ["96000", "", "", ""].map(String::from));
    }

    #[test]
    fn mixer_decibels_in_hundredths() {
        let control = |name: &str, decibels| MixerControl {
            name: name.into(),
            index: 0,
            min: -10239,
            max: 400,
            decibels,
        };
        let rows = mixer_rows(&[
            control(
                "PCM",
                DecibelRange::from_reported(DB_GAIN_MUTE, 400, || Some(-10239)),
            ),
            control("Digital", None),
        ]);
        assert_eq!(
            rows[0],
            ["PCM", "0", "-10239", "400", "Yes", "-102.39", "4.00"].map(String::from)
        );
        assert_eq!(rows[1][4..], ["", "", ""].map(String::from));
    }
}

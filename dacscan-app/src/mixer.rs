//! Playback volume controls of a card.

/// Minimum decibel value ALSA reports for a control whose lowest setting mutes.
pub const DB_GAIN_MUTE: i64 = -9_999_999;

/// A simple mixer element with a playback volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixerControl {
    pub name: String,
    pub index: u32,
    /// Raw volume range.
    pub min: i64,
    pub max: i64,
    pub decibels: Option<DecibelRange>,
}

/// Decibel range of a control, in hundredths of a decibel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecibelRange {
    /// Lowest non-muting level.
    pub min: i64,
    pub max: i64,
    pub lowest_is_mute: bool,
}

impl DecibelRange {
    /// Interpret the range a control reports.
    ///
    /// A control without decibel information reports an empty range. When the lowest value is
    /// a mute, `above_mute` is asked for the level one step up.
    pub fn from_reported(
        min: i64,
        max: i64,
        above_mute: impl FnOnce() -> Option<i64>,
    ) -> Option<Self> {
        if min == max {
            return None;
        }
        if min == DB_GAIN_MUTE {
            return Some(Self {
                min: above_mute().unwrap_or(min),
                max,
                lowest_is_mute: true,
            });
        }
        Some(Self {
            min,
            max,
            lowest_is_mute: false,
        })
    }

    pub fn min_db(&self) -> f64 {
        self.min as f64 / 100.0
    }

    pub fn max_db(&self) -> f64 {
        self.max as f64 / 100.0
    }
}

/// Playback volume controls on the card with control interface `ctl_name`, in mixer order.
///
/// Enumerated controls are skipped.
#[cfg(target_os = "linux")]
pub fn playback_controls(ctl_name: &str) -> Result<Vec<MixerControl>, alsa::Error> {
    use alsa::mixer::{Mixer, Selem};
    use log::debug;

    let mixer = Mixer::new(ctl_name, false)?;
    let mut controls = Vec::new();
    for elem in mixer.iter() {
        let Some(selem) = Selem::new(elem) else {
            continue;
        };
        if !selem.has_playback_volume() || selem.is_enumerated() {
            continue;
        }
        let id = selem.get_id();
        let name = id.get_name().unwrap_or_default().to_owned();
        let (min, max) = selem.get_playback_volume_range();
        let (min_mb, max_mb) = selem.get_playback_db_range();
        let decibels = DecibelRange::from_reported(min_mb.0, max_mb.0, || {
            selem.ask_playback_vol_db(min + 1).ok().map(|mb| mb.0)
        });
        debug!("{ctl_name}: mixer \"{name}\",{} range {min}..={max}", id.get_index());
        controls.push(MixerControl {
            name,
            index: id.get_index(),
            min,
            max,
            decibels,
        });
    }
    Ok(controls)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_decibel_information() {
        assert_eq!(DecibelRange::from_reported(0, 0, || None), None);
    }

    #[test]
    fn plain_range() {
        let range = DecibelRange::from_reported(-10350, 400, || panic!("not a mute")).unwrap();
        assert!(!range.lowest_is_mute);
        assert_eq!(range.min_db(), -103.5);
        assert_eq!(range.max_db(), 4.0);
    }

    #[test]
    fn muting_minimum_uses_next_step() {
        let range = DecibelRange::from_reported(DB_GAIN_MUTE, 400, || Some(-10239)).unwrap();
        assert!(range.lowest_is_mute);
        assert_eq!(range.min, -10239);
        let range = DecibelRange::from_reported(DB_GAIN_MUTE, 400, || None).unwrap();
        assert_eq!(range.min, DB_GAIN_MUTE);
    }
}

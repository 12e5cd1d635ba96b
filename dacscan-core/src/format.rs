use core::fmt;

use crate::bits::{IndexSet, Member};

/// Sample formats probed on every interface, in probing order.
///
/// The discriminant of each variant is its bit position in a `FormatSet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SampleFormat {
    S8,
    U8,
    S16Le,
    S16Be,
    U16Le,
    U16Be,
    S24Le,
    S24Be,
    U24Le,
    U24Be,
    S32Le,
    S32Be,
    U32Le,
    U32Be,
    FloatLe,
    FloatBe,
    Float64Le,
    Float64Be,
    Iec958SubframeLe,
    Iec958SubframeBe,
    MuLaw,
    ALaw,
    ImaAdpcm,
    Mpeg,
    Gsm,
    Special,
    S24Le3,
    S24Be3,
    U24Le3,
    U24Be3,
    S20Le3,
    S20Be3,
    U20Le3,
    U20Be3,
    S18Le3,
    S18Be3,
    U18Le3,
    U18Be3,
    G723x24,
    G723x24OneByte,
    G723x40,
    G723x40OneByte,
    DsdU8,
    DsdU16Le,
    DsdU32Le,
    DsdU16Be,
    DsdU32Be,
}

impl SampleFormat {
    pub const ALL: [SampleFormat; 47] = [
        SampleFormat::S8,
        SampleFormat::U8,
        SampleFormat::S16Le,
        SampleFormat::S16Be,
        SampleFormat::U16Le,
        SampleFormat::U16Be,
        SampleFormat::S24Le,
        SampleFormat::S24Be,
        SampleFormat::U24Le,
        SampleFormat::U24Be,
        SampleFormat::S32Le,
        SampleFormat::S32Be,
        SampleFormat::U32Le,
        SampleFormat::U32Be,
        SampleFormat::FloatLe,
        SampleFormat::FloatBe,
        SampleFormat::Float64Le,
        SampleFormat::Float64Be,
        SampleFormat::Iec958SubframeLe,
        SampleFormat::Iec958SubframeBe,
        SampleFormat::MuLaw,
        SampleFormat::ALaw,
        SampleFormat::ImaAdpcm,
        SampleFormat::Mpeg,
        SampleFormat::Gsm,
        SampleFormat::Special,
        SampleFormat::S24Le3,
        SampleFormat::S24Be3,
        SampleFormat::U24Le3,
        SampleFormat::U24Be3,
        SampleFormat::S20Le3,
        SampleFormat::S20Be3,
        SampleFormat::U20Le3,
        SampleFormat::U20Be3,
        SampleFormat::S18Le3,
        SampleFormat::S18Be3,
        SampleFormat::U18Le3,
        SampleFormat::U18Be3,
        SampleFormat::G723x24,
        SampleFormat::G723x24OneByte,
        SampleFormat::G723x40,
        SampleFormat::G723x40OneByte,
        SampleFormat::DsdU8,
        SampleFormat::DsdU16Le,
        SampleFormat::DsdU32Le,
        SampleFormat::DsdU16Be,
        SampleFormat::DsdU32Be,
    ];

    /// Conventional ALSA name of the format.
    pub fn name(self) -> &'static str {
        match self {
            SampleFormat::S8 => "S8",
            SampleFormat::U8 => "U8",
            SampleFormat::S16Le => "S16_LE",
            SampleFormat::S16Be => "S16_BE",
            SampleFormat::U16Le => "U16_LE",
            SampleFormat::U16Be => "U16_BE",
            SampleFormat::S24Le => "S24_LE",
            SampleFormat::S24Be => "S24_BE",
            SampleFormat::U24Le => "U24_LE",
            SampleFormat::U24Be => "U24_BE",
            SampleFormat::S32Le => "S32_LE",
            SampleFormat::S32Be => "S32_BE",
            SampleFormat::U32Le => "U32_LE",
            SampleFormat::U32Be => "U32_BE",
            SampleFormat::FloatLe => "FLOAT_LE",
            SampleFormat::FloatBe => "FLOAT_BE",
            SampleFormat::Float64Le => "FLOAT64_LE",
            SampleFormat::Float64Be => "FLOAT64_BE",
            SampleFormat::Iec958SubframeLe => "IEC958_SUBFRAME_LE",
            SampleFormat::Iec958SubframeBe => "IEC958_SUBFRAME_BE",
            SampleFormat::MuLaw => "MU_LAW",
            SampleFormat::ALaw => "A_LAW",
            SampleFormat::ImaAdpcm => "IMA_ADPCM",
            SampleFormat::Mpeg => "MPEG",
            SampleFormat::Gsm => "GSM",
            SampleFormat::Special => "SPECIAL",
            SampleFormat::S24Le3 => "S24_3LE",
            SampleFormat::S24Be3 => "S24_3BE",
            SampleFormat::U24Le3 => "U24_3LE",
            SampleFormat::U24Be3 => "U24_3BE",
            SampleFormat::S20Le3 => "S20_3LE",
            SampleFormat::S20Be3 => "S20_3BE",
            SampleFormat::U20Le3 => "U20_3LE",
            SampleFormat::U20Be3 => "U20_3BE",
            SampleFormat::S18Le3 => "S18_3LE",
            SampleFormat::S18Be3 => "S18_3BE",
            SampleFormat::U18Le3 => "U18_3LE",
            SampleFormat::U18Be3 => "U18_3BE",
            SampleFormat::G723x24 => "G723_24",
            SampleFormat::G723x24OneByte => "G723_24_1B",
            SampleFormat::G723x40 => "G723_40",
            SampleFormat::G723x40OneByte => "G723_40_1B",
            SampleFormat::DsdU8 => "DSD_U8",
            SampleFormat::DsdU16Le => "DSD_U16_LE",
            SampleFormat::DsdU32Le => "DSD_U32_LE",
            SampleFormat::DsdU16Be => "DSD_U16_BE",
            SampleFormat::DsdU32Be => "DSD_U32_BE",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }
}

impl Member for SampleFormat {
    const LIMIT: usize = 47;

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub type FormatSet = IndexSet<SampleFormat>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_discriminants() {
        for (idx, format) in SampleFormat::ALL.iter().enumerate() {
            assert_eq!(format.index(), idx);
            assert_eq!(SampleFormat::from_index(idx), Some(*format));
        }
        assert_eq!(SampleFormat::from_index(47), None);
    }

    #[test]
    fn names() {
        assert_eq!(SampleFormat::S16Le.name(), "S16_LE");
        assert_eq!(SampleFormat::S24Le3.name(), "S24_3LE");
        assert_eq!(SampleFormat::from_name("float64_le"), Some(SampleFormat::Float64Le));
        assert_eq!(SampleFormat::from_name("S16"), None);
    }
}

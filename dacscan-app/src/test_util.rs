use cpal::{SampleRate, SupportedBufferSize, SupportedStreamConfigRange};

pub(crate) fn range(
    channels: u16,
    min_rate: u32,
    max_rate: u32,
    format: cpal::SampleFormat,
) -> SupportedStreamConfigRange {
    SupportedStreamConfigRange::new(
        channels,
        SampleRate(min_rate),
        SampleRate(max_rate),
        SupportedBufferSize::Unknown,
        format,
    )
}

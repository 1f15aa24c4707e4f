/// A timed span of recognized speech.
///
/// Times are in seconds. Upstream models emit segments in order with
/// monotonically non-decreasing start times, so encoders can stream them
/// without sorting.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_seconds: f32,
    pub end_seconds: f32,
    pub text: String,
}

/// Whisper reports timestamps in centiseconds; negative means unknown.
pub(crate) fn centiseconds_to_seconds(value: i64) -> f32 {
    if value < 0 { 0.0 } else { value as f32 / 100.0 }
}

#[cfg(test)]
mod tests {
    use super::centiseconds_to_seconds;

    #[test]
    fn centiseconds_convert_and_clamp() {
        assert_eq!(centiseconds_to_seconds(0), 0.0);
        assert_eq!(centiseconds_to_seconds(250), 2.5);
        assert_eq!(centiseconds_to_seconds(13_000), 130.0);
        assert_eq!(centiseconds_to_seconds(-1), 0.0);
    }
}

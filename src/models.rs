/// Sentinel for fields whose value could not be determined.
pub const NOT_SPECIFIED: i32 = -1;

/// Byte order of decoded sample data.
///
/// Decoded output is always little-endian linear PCM; the field exists so the
/// format description is self-contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    pub fn is_big_endian(&self) -> bool {
        matches!(self, ByteOrder::BigEndian)
    }
}

/// Canonical description of an audio resource, produced by a probe.
///
/// Immutable once constructed; the caller owns it outright. All derived
/// fields follow from the decode target being uncompressed interleaved PCM,
/// which is why `frame_rate` always equals `sample_rate`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFileFormat {
    pub url: String,
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Bits per sample; 16 when the source does not say.
    pub sample_size: i32,
    /// Channel count; -1 when unknown.
    pub channels: i32,
    /// Bytes per frame; -1 when sample size or channel count is unknown.
    pub frame_size: i32,
    /// Frames per second; equal to `sample_rate` for PCM output.
    pub frame_rate: f32,
    pub byte_order: ByteOrder,
    /// Duration in milliseconds; -1 when unavailable.
    pub duration_ms: i64,
    /// Encoded bit rate in bits per second; 0 when unknown.
    pub bit_rate: i32,
    /// Whether the source is variable-bit-rate encoded.
    pub vbr: bool,
}

impl AudioFileFormat {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        url: String,
        sample_rate: f32,
        sample_size: i32,
        channels: i32,
        frame_size: i32,
        frame_rate: f32,
        byte_order: ByteOrder,
        duration_ms: i64,
        bit_rate: i32,
        vbr: bool,
    ) -> Self {
        Self {
            url,
            sample_rate,
            sample_size,
            channels,
            frame_size,
            frame_rate,
            byte_order,
            duration_ms,
            bit_rate,
            vbr,
        }
    }

    /// Total number of sample frames, derived from sample rate and duration.
    /// Returns -1 when either is unknown.
    pub fn frame_length(&self) -> i64 {
        if self.sample_rate <= 0.0 || self.duration_ms < 0 {
            return NOT_SPECIFIED as i64;
        }
        ((self.sample_rate as f64 * self.duration_ms as f64) / 1000.0) as i64
    }

    /// Get a human-readable format description
    pub fn format_description(&self) -> String {
        format!(
            "{}-bit/{} Hz - {} channel{}, {} ms",
            self.sample_size,
            self.sample_rate,
            self.channels,
            if self.channels == 1 { "" } else { "s" },
            self.duration_ms,
        )
    }
}

/// Raw field set gathered by a probe before canonicalization.
///
/// Both survey strategies (per-stream enumeration and the flat property
/// fallback) reduce to this struct so a single canonicalization routine
/// covers them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStreamDescription {
    /// Duration in 100-nanosecond units; 0 means unknown.
    pub duration_hns: u64,
    /// Encoded bit rate in bits per second; 0 means unknown.
    pub bit_rate: u32,
    /// Channel count; 0 means unknown.
    pub channels: u32,
    /// Sample rate as floating point; 0.0 means unset.
    pub sample_rate: f64,
    /// Integer fallback for the sample rate; used when the float field is 0.
    pub sample_rate_int: u32,
    /// Declared bits per sample; 0 means unknown.
    pub bits_per_sample: u32,
    /// Declared bytes per sample; 0 means unknown.
    pub bytes_per_sample: u32,
    /// Variable-bit-rate flag.
    pub vbr: bool,
}

impl RawStreamDescription {
    /// Reduce the raw fields to the canonical description.
    pub fn canonicalize(&self, url: &str) -> AudioFileFormat {
        let sample_rate = if self.sample_rate == 0.0 {
            self.sample_rate_int as f32
        } else {
            self.sample_rate as f32
        };
        // We always decode to PCM; 16 bits is the target when the source
        // does not declare a width.
        let sample_size = if self.bits_per_sample != 0 {
            self.bits_per_sample as i32
        } else if self.bytes_per_sample != 0 {
            self.bytes_per_sample as i32 * 8
        } else {
            16
        };
        let channels = if self.channels > 0 {
            self.channels as i32
        } else {
            NOT_SPECIFIED
        };
        let frame_size = if sample_size == NOT_SPECIFIED || channels == NOT_SPECIFIED {
            NOT_SPECIFIED
        } else {
            sample_size * channels / 8
        };
        let duration_ms = if self.duration_hns == 0 {
            -1
        } else {
            (self.duration_hns / 10_000) as i64
        };

        AudioFileFormat::new(
            url.to_string(),
            sample_rate,
            sample_size,
            channels,
            frame_size,
            // PCM output, so frames and samples advance in lockstep.
            sample_rate,
            ByteOrder::LittleEndian,
            duration_ms,
            self.bit_rate as i32,
            self.vbr,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rate_always_equals_sample_rate() {
        let raw = RawStreamDescription {
            sample_rate: 48000.0,
            channels: 2,
            bits_per_sample: 24,
            ..Default::default()
        };
        let fmt = raw.canonicalize("file:///test.flac");
        assert_eq!(fmt.frame_rate, fmt.sample_rate);
        assert_eq!(fmt.byte_order, ByteOrder::LittleEndian);
    }

    #[test]
    fn test_integer_sample_rate_fallback() {
        let raw = RawStreamDescription {
            sample_rate: 0.0,
            sample_rate_int: 44100,
            ..Default::default()
        };
        let fmt = raw.canonicalize("file:///test.mp3");
        assert_eq!(fmt.sample_rate, 44100.0);
        assert_eq!(fmt.frame_rate, 44100.0);
    }

    #[test]
    fn test_sample_size_fallback_chain() {
        // declared bits win
        let raw = RawStreamDescription {
            bits_per_sample: 24,
            bytes_per_sample: 2,
            ..Default::default()
        };
        assert_eq!(raw.canonicalize("u").sample_size, 24);

        // else bytes * 8
        let raw = RawStreamDescription {
            bytes_per_sample: 3,
            ..Default::default()
        };
        assert_eq!(raw.canonicalize("u").sample_size, 24);

        // else the 16-bit decode target
        let raw = RawStreamDescription::default();
        assert_eq!(raw.canonicalize("u").sample_size, 16);
    }

    #[test]
    fn test_unknown_channels_propagate_to_frame_size() {
        let raw = RawStreamDescription {
            bits_per_sample: 16,
            channels: 0,
            ..Default::default()
        };
        let fmt = raw.canonicalize("u");
        assert_eq!(fmt.channels, NOT_SPECIFIED);
        assert_eq!(fmt.frame_size, NOT_SPECIFIED);
        // sample size was still determined
        assert_eq!(fmt.sample_size, 16);
    }

    #[test]
    fn test_frame_size_computation() {
        let raw = RawStreamDescription {
            bits_per_sample: 24,
            channels: 2,
            ..Default::default()
        };
        assert_eq!(raw.canonicalize("u").frame_size, 6);
    }

    #[test]
    fn test_zero_duration_means_unknown() {
        let raw = RawStreamDescription::default();
        assert_eq!(raw.canonicalize("u").duration_ms, -1);
    }

    #[test]
    fn test_duration_conversion_is_exact_floor() {
        let raw = RawStreamDescription {
            duration_hns: 10_000_000, // one second
            ..Default::default()
        };
        assert_eq!(raw.canonicalize("u").duration_ms, 1000);

        let raw = RawStreamDescription {
            duration_hns: 19_999, // just under 2 ms
            ..Default::default()
        };
        assert_eq!(raw.canonicalize("u").duration_ms, 1);
    }

    #[test]
    fn test_frame_length_derivation() {
        let raw = RawStreamDescription {
            sample_rate: 44100.0,
            channels: 2,
            bits_per_sample: 16,
            duration_hns: 10_000_000,
            ..Default::default()
        };
        let fmt = raw.canonicalize("u");
        assert_eq!(fmt.frame_length(), 44100);

        let unknown = RawStreamDescription::default().canonicalize("u");
        assert_eq!(unknown.frame_length(), -1);
    }

    #[test]
    fn test_bit_rate_copied_as_is() {
        let raw = RawStreamDescription {
            bit_rate: 320_000,
            vbr: true,
            ..Default::default()
        };
        let fmt = raw.canonicalize("u");
        assert_eq!(fmt.bit_rate, 320_000);
        assert!(fmt.vbr);
    }
}

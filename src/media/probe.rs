use std::path::Path;

use lofty::file::AudioFile;
use log::{debug, trace};
use symphonia::core::codecs::CODEC_TYPE_NULL;
use symphonia::core::formats::Track;
use symphonia::core::sample::SampleFormat;

use crate::error::{MediaError, STATUS_GENERIC};
use crate::media::source;
use crate::models::{AudioFileFormat, RawStreamDescription};

/// Outcome of the format survey: which metadata strategy produced the raw
/// description. Both variants feed the same canonicalization.
#[derive(Debug)]
pub(crate) enum FormatSurvey {
    /// Per-stream type enumeration on an identified container.
    PerStream(RawStreamDescription),
    /// Flat audio-property query, used for sources the demuxer pipeline
    /// cannot enumerate.
    FlatProperties(RawStreamDescription),
}

impl FormatSurvey {
    pub(crate) fn into_raw(self) -> RawStreamDescription {
        match self {
            FormatSurvey::PerStream(raw) => raw,
            FormatSurvey::FlatProperties(raw) => raw,
        }
    }
}

/// Format prober: reduces an audio resource to a canonical
/// [`AudioFileFormat`] description without decoding it.
pub struct FormatProber;

impl FormatProber {
    /// Probe the resource behind `url` and return its canonical description.
    ///
    /// Fails with `FileNotFound` when the path does not resolve, and with
    /// `UnsupportedFormat` when no survey strategy can describe the
    /// resource. All intermediate handles are dropped before returning.
    pub fn probe_url(url: &str) -> Result<AudioFileFormat, MediaError> {
        let path = source::locate(url)?;
        let survey = Self::survey(url, &path)?;
        if matches!(survey, FormatSurvey::FlatProperties(_)) {
            debug!("probe of '{}' used flat property fallback", url);
        }
        Ok(survey.into_raw().canonicalize(url))
    }

    /// Probe a raw byte buffer.
    ///
    /// Always fails: without a name or MIME hint the underlying pipeline
    /// cannot sniff a bare byte stream.
    pub fn probe_bytes(_data: &[u8]) -> Result<AudioFileFormat, MediaError> {
        Err(MediaError::unsupported(
            "Guessing audio format from raw byte streams is not supported",
            STATUS_GENERIC,
        ))
    }

    /// Run the survey strategies in order of fidelity.
    fn survey(url: &str, path: &Path) -> Result<FormatSurvey, MediaError> {
        match source::resolve(url) {
            Ok(resolved) => {
                if let Some(mut raw) = Self::survey_streams(resolved.format.tracks()) {
                    if raw.bit_rate == 0 {
                        raw.bit_rate = Self::property_bit_rate(path);
                    }
                    return Ok(FormatSurvey::PerStream(raw));
                }
                // Identified, but no audio stream was described; the flat
                // property store may still know the essentials.
                Self::survey_properties(path).map(FormatSurvey::FlatProperties)
            }
            Err(err @ MediaError::FileNotFound { .. }) => Err(err),
            Err(_) => Self::survey_properties(path).map(FormatSurvey::FlatProperties),
        }
    }

    /// Enumerate candidate streams and keep the first audio stream's
    /// parameters (explicit policy when a source exposes several).
    fn survey_streams(tracks: &[Track]) -> Option<RawStreamDescription> {
        let track = tracks
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)?;
        let params = &track.codec_params;
        trace!("surveying stream {} ({:?})", track.id, params.codec);

        let duration_hns = match (params.time_base, params.n_frames) {
            (Some(tb), Some(n)) => {
                let time = tb.calc_time(n);
                time.seconds * 10_000_000 + (time.frac * 10_000_000.0) as u64
            }
            (None, Some(n)) => params
                .sample_rate
                .map(|sr| ((n as f64 / sr as f64) * 10_000_000.0) as u64)
                .unwrap_or(0),
            _ => 0,
        };

        let bytes_per_sample = match params.sample_format {
            Some(SampleFormat::U8) | Some(SampleFormat::S8) => 1,
            Some(SampleFormat::U16) | Some(SampleFormat::S16) => 2,
            Some(SampleFormat::U24) | Some(SampleFormat::S24) => 3,
            Some(SampleFormat::U32) | Some(SampleFormat::S32) | Some(SampleFormat::F32) => 4,
            Some(SampleFormat::F64) => 8,
            None => 0,
        };

        Some(RawStreamDescription {
            duration_hns,
            // The stream parameters carry no encoding bit rate; the caller
            // supplements it from the flat property store.
            bit_rate: 0,
            channels: params.channels.map(|c| c.count() as u32).unwrap_or(0),
            sample_rate: 0.0,
            sample_rate_int: params.sample_rate.unwrap_or(0),
            bits_per_sample: params.bits_per_sample.unwrap_or(0),
            bytes_per_sample,
            vbr: false,
        })
    }

    /// Encoding bit rate in bits/s from the flat property store, 0 when the
    /// store cannot be read or does not know it.
    fn property_bit_rate(path: &Path) -> u32 {
        lofty::read_from_path(path)
            .ok()
            .and_then(|tagged| tagged.properties().audio_bitrate())
            .map(|kbps| kbps * 1000)
            .unwrap_or(0)
    }

    /// Flat property query over the whole resource.
    fn survey_properties(path: &Path) -> Result<RawStreamDescription, MediaError> {
        let tagged = lofty::read_from_path(path).map_err(|e| {
            MediaError::unsupported(
                format!("Failed to read source properties: {}", e),
                STATUS_GENERIC,
            )
        })?;
        let props = tagged.properties();

        Ok(RawStreamDescription {
            duration_hns: (props.duration().as_nanos() / 100) as u64,
            bit_rate: props.audio_bitrate().unwrap_or(0) * 1000,
            channels: props.channels().map(u32::from).unwrap_or(0),
            sample_rate: 0.0,
            sample_rate_int: props.sample_rate().unwrap_or(0),
            bits_per_sample: props.bit_depth().map(u32::from).unwrap_or(0),
            bytes_per_sample: 0,
            // The flat store does not expose a VBR flag.
            vbr: false,
        })
    }
}

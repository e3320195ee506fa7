use std::io::Read;

use log::{debug, warn};
use symphonia::core::codecs::{Decoder, DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{FormatReader, SeekMode, SeekTo};
use symphonia::core::units::Time;

use crate::error::{MediaError, STATUS_GENERIC};
use crate::media::buffer::TransferBuffer;
use crate::media::platform;
use crate::media::pcm;
use crate::media::source;

/// Options applied when opening a stream.
#[derive(Debug, Clone)]
pub struct StreamOptions {
    /// Initial capacity of the transfer buffer used by [`PcmReader`].
    pub initial_buffer_capacity: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            initial_buffer_capacity: crate::media::buffer::DEFAULT_CAPACITY,
        }
    }
}

/// Long-lived state behind an open stream: the demuxer and the negotiated
/// decoder for its first audio stream.
struct StreamState {
    reader: Box<dyn FormatReader>,
    decoder: Box<dyn Decoder>,
    track_id: u32,
    /// Scratch area for the contiguous interleaved conversion of one sample.
    scratch: Vec<u8>,
}

/// An open decoding stream over an audio resource.
///
/// Produces uncompressed interleaved little-endian PCM, one decoded sample
/// per [`fill`](PcmStream::fill) call. Not internally synchronized: a handle
/// must be used from one thread at a time, though independent handles are
/// independent. Closing releases the underlying reader exactly once; `Drop`
/// closes as a backstop.
pub struct PcmStream {
    state: Option<StreamState>,
    seekable: bool,
    url: String,
}

impl PcmStream {
    /// Open `url` for decoding to PCM.
    ///
    /// Resolves the resource, selects its first audio stream and loads the
    /// matching decoder. A nonexistent path fails with `FileNotFound`; every
    /// other construction failure is an `UnsupportedFormat`.
    pub fn open(url: &str) -> Result<Self, MediaError> {
        let resolved = source::resolve(url)?;
        let reader = resolved.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| {
                MediaError::unsupported(
                    format!("No audio stream in '{}'", url),
                    STATUS_GENERIC,
                )
            })?;
        let track_id = track.id;

        // Loading the decoder is the PCM negotiation step: from here on the
        // pipeline hands us uncompressed samples.
        let decoder = platform::runtime()
            .codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| {
                MediaError::unsupported(
                    format!("Failed to load decoder for '{}': {}", url, e),
                    STATUS_GENERIC,
                )
            })?;

        debug!("opened stream '{}' (track {})", url, track_id);
        Ok(Self {
            state: Some(StreamState {
                reader,
                decoder,
                track_id,
                scratch: Vec::new(),
            }),
            seekable: resolved.seekable,
            url: url.to_string(),
        })
    }

    /// Whether the stream is still open.
    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    /// Whether the source supports seeking.
    pub fn is_seekable(&self) -> bool {
        self.seekable
    }

    /// Decode the next sample into `buffer` and return the number of bytes
    /// written. Returns 0 at end of stream, with the buffer's region reset
    /// to empty. Grows the buffer when a decoded sample needs more room.
    ///
    /// A mid-stream format change and any internal decode failure are I/O
    /// errors; format renegotiation is not supported once a stream is open.
    pub fn fill(&mut self, buffer: &mut TransferBuffer) -> Result<usize, MediaError> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| MediaError::io("Cannot read from closed stream", STATUS_GENERIC))?;

        loop {
            let packet = match state.reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref err))
                    if err.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    // End of stream: an empty region, not an error.
                    buffer.clear();
                    return Ok(0);
                }
                Err(SymphoniaError::ResetRequired) => {
                    return Err(MediaError::io("Media type changed", STATUS_GENERIC));
                }
                Err(err) => {
                    return Err(MediaError::io(
                        format!("Failed to read sample: {}", err),
                        STATUS_GENERIC,
                    ));
                }
            };

            if packet.track_id() != state.track_id {
                continue;
            }

            let decoded = state.decoder.decode(&packet).map_err(|e| {
                MediaError::io(format!("Failed to decode sample: {}", e), STATUS_GENERIC)
            })?;
            if decoded.frames() == 0 {
                continue;
            }

            let required = pcm::byte_len(&decoded);
            if buffer.capacity() < required {
                debug!(
                    "growing transfer buffer for '{}': {} -> {} bytes",
                    self.url,
                    buffer.capacity(),
                    required
                );
            }
            pcm::copy_interleaved(&decoded, &mut state.scratch);
            return buffer.load(&state.scratch);
        }
    }

    /// Seek the whole source to a timestamp given in 100-nanosecond units.
    ///
    /// Fails with an I/O error when the stream is closed or the underlying
    /// seek is rejected.
    pub fn seek(&mut self, hundred_ns: u64) -> Result<(), MediaError> {
        let state = self
            .state
            .as_mut()
            .ok_or_else(|| MediaError::io("Cannot seek on closed stream", STATUS_GENERIC))?;

        let seconds = hundred_ns as f64 / 10_000_000.0;
        state
            .reader
            .seek(
                SeekMode::Accurate,
                SeekTo::Time {
                    time: Time::from(seconds),
                    track_id: None,
                },
            )
            .map_err(|e| {
                MediaError::io(
                    format!("Failed to seek desired position: {}", e),
                    STATUS_GENERIC,
                )
            })?;

        // Packets before the seek point may still sit in the decoder.
        state.decoder.reset();
        Ok(())
    }

    /// Release the underlying reader. Idempotent; a second close is a no-op.
    pub fn close(&mut self) {
        if self.state.take().is_some() {
            debug!("closed stream '{}'", self.url);
        }
    }
}

impl Drop for PcmStream {
    fn drop(&mut self) {
        if self.is_open() {
            warn!("stream '{}' dropped while open; closing", self.url);
            self.close();
        }
    }
}

/// Blocking `Read` adapter over a [`PcmStream`] and its transfer buffer.
///
/// Reads drain the buffer and refill it on demand; `Ok(0)` means end of
/// stream.
pub struct PcmReader {
    stream: PcmStream,
    buffer: TransferBuffer,
}

impl PcmReader {
    pub fn open(url: &str) -> Result<Self, MediaError> {
        Self::open_with(url, &StreamOptions::default())
    }

    pub fn open_with(url: &str, options: &StreamOptions) -> Result<Self, MediaError> {
        Ok(Self {
            stream: PcmStream::open(url)?,
            buffer: TransferBuffer::with_capacity(options.initial_buffer_capacity),
        })
    }

    pub fn is_seekable(&self) -> bool {
        self.stream.is_seekable()
    }

    /// Seek by timestamp in 100-nanosecond units, discarding buffered data.
    pub fn seek(&mut self, hundred_ns: u64) -> Result<(), MediaError> {
        self.stream.seek(hundred_ns)?;
        self.buffer.clear();
        Ok(())
    }

    pub fn close(&mut self) {
        self.stream.close();
        self.buffer.clear();
    }
}

impl Read for PcmReader {
    fn read(&mut self, out: &mut [u8]) -> std::io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        if !self.buffer.has_remaining() {
            if !self.stream.is_open() {
                return Ok(0);
            }
            let filled = self.stream.fill(&mut self.buffer)?;
            if filled == 0 {
                return Ok(0);
            }
        }
        Ok(self.buffer.copy_to(out))
    }
}

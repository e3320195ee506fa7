//! Audio format probing and streaming PCM decoding.
//!
//! `pcmstream` opens an audio file or `file` URL, describes its format
//! (sample rate, bit depth, channels, duration, bit rate), and streams its
//! decoded content as uncompressed interleaved little-endian PCM. All
//! container and codec work is delegated to the symphonia pipeline; this
//! crate owns format negotiation, canonicalization, buffer marshalling, and
//! error mapping.
//!
//! ```no_run
//! use pcmstream::{FormatProber, PcmStream, TransferBuffer};
//!
//! # fn main() -> Result<(), pcmstream::MediaError> {
//! pcmstream::startup();
//!
//! let format = FormatProber::probe_url("audio/track.flac")?;
//! println!("{} Hz, {} channels", format.sample_rate, format.channels);
//!
//! let mut stream = PcmStream::open("audio/track.flac")?;
//! let mut buffer = TransferBuffer::new();
//! while stream.fill(&mut buffer)? > 0 {
//!     // consume buffer.as_slice()
//! }
//! stream.close();
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod logging;
pub mod media;
pub mod models;


pub use error::{ErrorSeverity, MediaError};
pub use media::platform::{is_started, shutdown, startup};
pub use media::{FormatProber, PcmReader, PcmStream, StreamOptions, TransferBuffer};
pub use models::{AudioFileFormat, ByteOrder, RawStreamDescription, NOT_SPECIFIED};

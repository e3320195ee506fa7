pub mod buffer;
pub mod platform;
pub mod probe;
pub mod stream;

pub(crate) mod pcm;
pub(crate) mod source;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the probing and streaming surface
pub use buffer::TransferBuffer;
pub use probe::FormatProber;
pub use stream::{PcmReader, PcmStream, StreamOptions};

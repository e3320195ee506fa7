use std::io::Write;

use tempfile::NamedTempFile;

/// Write a 16-bit PCM RIFF/WAVE file with a deterministic ramp signal and
/// return the temp file keeping it alive.
pub(crate) fn wav_fixture(sample_rate: u32, channels: u16, frames: usize) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .expect("create temp wav");

    let data_len = frames * channels as usize * 2;
    let block_align = channels * 2;

    let mut bytes = Vec::with_capacity(44 + data_len);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&((36 + data_len) as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(data_len as u32).to_le_bytes());

    for i in 0..frames {
        let sample = (((i % 200) as i32 - 100) * 80) as i16;
        for _ in 0..channels {
            bytes.extend_from_slice(&sample.to_le_bytes());
        }
    }

    file.write_all(&bytes).expect("write temp wav");
    file.flush().expect("flush temp wav");
    file
}

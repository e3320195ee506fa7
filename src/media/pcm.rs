use symphonia::core::audio::AudioBufferRef;

/// Bytes per sample of the decoded representation, at its native width.
/// 24-bit samples are packed into three bytes.
pub(crate) fn bytes_per_sample(buf: &AudioBufferRef) -> usize {
    match buf {
        AudioBufferRef::U8(_) | AudioBufferRef::S8(_) => 1,
        AudioBufferRef::U16(_) | AudioBufferRef::S16(_) => 2,
        AudioBufferRef::U24(_) | AudioBufferRef::S24(_) => 3,
        AudioBufferRef::U32(_) | AudioBufferRef::S32(_) | AudioBufferRef::F32(_) => 4,
        AudioBufferRef::F64(_) => 8,
    }
}

/// Contiguous byte length required to hold the decoded buffer interleaved.
pub(crate) fn byte_len(buf: &AudioBufferRef) -> usize {
    buf.frames() * buf.spec().channels.count() * bytes_per_sample(buf)
}

/// Convert a decoded (planar) buffer into one contiguous region of
/// interleaved little-endian PCM in `dst`.
pub(crate) fn copy_interleaved(src: &AudioBufferRef, dst: &mut Vec<u8>) {
    let frames = src.frames();
    match src {
        AudioBufferRef::U8(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s: u8| [s]);
        }
        AudioBufferRef::U16(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s: u16| s.to_le_bytes());
        }
        AudioBufferRef::U24(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s| {
                let b = s.inner().to_le_bytes();
                [b[0], b[1], b[2]]
            });
        }
        AudioBufferRef::U32(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s: u32| s.to_le_bytes());
        }
        AudioBufferRef::S8(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s: i8| [s as u8]);
        }
        AudioBufferRef::S16(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s: i16| s.to_le_bytes());
        }
        AudioBufferRef::S24(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s| {
                let b = s.inner().to_le_bytes();
                [b[0], b[1], b[2]]
            });
        }
        AudioBufferRef::S32(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s: i32| s.to_le_bytes());
        }
        AudioBufferRef::F32(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s: f32| s.to_le_bytes());
        }
        AudioBufferRef::F64(buf) => {
            let planes = buf.planes();
            interleave(planes.planes(), frames, dst, |s: f64| s.to_le_bytes());
        }
    }
}

/// Interleave planar channel data into `dst` as little-endian bytes.
/// Frame f, channel c lands at `(f * channels + c) * N`.
fn interleave<S: Copy, const N: usize>(
    planes: &[&[S]],
    frames: usize,
    dst: &mut Vec<u8>,
    to_bytes: impl Fn(S) -> [u8; N],
) {
    let channels = planes.len();
    dst.clear();
    dst.resize(frames * channels * N, 0);
    for (ch, plane) in planes.iter().enumerate() {
        for (f, &sample) in plane.iter().take(frames).enumerate() {
            let off = (f * channels + ch) * N;
            dst[off..off + N].copy_from_slice(&to_bytes(sample));
        }
    }
}

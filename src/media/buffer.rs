use crate::error::MediaError;

/// Default transfer buffer capacity in bytes.
pub const DEFAULT_CAPACITY: usize = 32 * 1024;

/// Growable byte buffer a stream fills with decoded PCM.
///
/// The buffer tracks a logical region `[position, limit)` of valid data.
/// A fill resets the region to exactly the bytes copied in that call; a
/// zero-length region after a fill signals end of stream. Capacity grows on
/// request but never while unread data remains.
#[derive(Debug)]
pub struct TransferBuffer {
    data: Vec<u8>,
    position: usize,
    limit: usize,
    grow_count: u64,
}

impl TransferBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            position: 0,
            limit: 0,
            grow_count: 0,
        }
    }

    /// Current capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of unread bytes in the logical region.
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Length of the logical region set by the last fill.
    pub fn len(&self) -> usize {
        self.limit
    }

    pub fn is_empty(&self) -> bool {
        self.limit == 0
    }

    /// Number of times the capacity has been grown.
    pub fn grow_count(&self) -> u64 {
        self.grow_count
    }

    /// Grow the capacity to at least `capacity` bytes.
    ///
    /// Rejected while the buffer still holds unread data, since growth
    /// replaces the backing storage.
    pub fn ensure_capacity(&mut self, capacity: usize) -> Result<(), MediaError> {
        if self.has_remaining() {
            return Err(MediaError::invalid_argument(format!(
                "Cannot change buffer capacity with {} bytes unread",
                self.remaining()
            )));
        }
        if self.data.len() < capacity {
            self.data = vec![0; capacity];
            self.grow_count += 1;
        }
        Ok(())
    }

    /// Reset the logical region to empty.
    pub fn clear(&mut self) {
        self.position = 0;
        self.limit = 0;
    }

    /// Replace the buffer contents with `src`, growing if needed, and set
    /// the logical region to `[0, src.len())`.
    pub fn load(&mut self, src: &[u8]) -> Result<usize, MediaError> {
        self.clear();
        self.ensure_capacity(src.len())?;
        self.data[..src.len()].copy_from_slice(src);
        self.limit = src.len();
        Ok(src.len())
    }

    /// The unread portion of the logical region.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[self.position..self.limit]
    }

    /// Copy unread bytes into `out`, advancing the read position.
    /// Returns the number of bytes copied.
    pub fn copy_to(&mut self, out: &mut [u8]) -> usize {
        let n = self.remaining().min(out.len());
        out[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        n
    }
}

impl Default for TransferBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        let buf = TransferBuffer::new();
        assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
        assert_eq!(buf.len(), 0);
        assert!(!buf.has_remaining());
    }

    #[test]
    fn test_load_sets_region_exactly() {
        let mut buf = TransferBuffer::with_capacity(8);
        let n = buf.load(&[1, 2, 3]).unwrap();
        assert_eq!(n, 3);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_load_grows_once_when_too_small() {
        let mut buf = TransferBuffer::with_capacity(2);
        let data = [7u8; 10];
        buf.load(&data).unwrap();
        assert_eq!(buf.capacity(), 10);
        assert_eq!(buf.grow_count(), 1);
        assert_eq!(buf.len(), 10);

        // A second load that fits must not grow again.
        buf.copy_to(&mut [0u8; 10]);
        buf.load(&[1, 2]).unwrap();
        assert_eq!(buf.grow_count(), 1);
    }

    #[test]
    fn test_ensure_capacity_rejected_with_unread_data() {
        let mut buf = TransferBuffer::with_capacity(4);
        buf.load(&[1, 2, 3]).unwrap();
        let err = buf.ensure_capacity(64).unwrap_err();
        assert!(matches!(err, MediaError::InvalidArgument { .. }));

        // Draining the region makes growth legal again.
        let mut out = [0u8; 3];
        assert_eq!(buf.copy_to(&mut out), 3);
        buf.ensure_capacity(64).unwrap();
        assert_eq!(buf.capacity(), 64);
    }

    #[test]
    fn test_ensure_capacity_never_shrinks() {
        let mut buf = TransferBuffer::with_capacity(16);
        buf.ensure_capacity(4).unwrap();
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.grow_count(), 0);
    }

    #[test]
    fn test_copy_to_advances_position() {
        let mut buf = TransferBuffer::new();
        buf.load(&[1, 2, 3, 4, 5]).unwrap();

        let mut out = [0u8; 2];
        assert_eq!(buf.copy_to(&mut out), 2);
        assert_eq!(out, [1, 2]);
        assert_eq!(buf.remaining(), 3);

        let mut rest = [0u8; 8];
        assert_eq!(buf.copy_to(&mut rest), 3);
        assert_eq!(&rest[..3], &[3, 4, 5]);
        assert!(!buf.has_remaining());
    }

    #[test]
    fn test_clear_resets_region() {
        let mut buf = TransferBuffer::new();
        buf.load(&[9; 12]).unwrap();
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.remaining(), 0);
    }
}

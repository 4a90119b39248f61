//! Fixed-capacity circular store addressed by absolute position.
//!
//! Positions grow without bound; every access resolves to `pos % capacity`.
//! The buffer therefore holds exactly the last `capacity` writes, and reading
//! a position that has been overwritten returns whatever now sits in its slot.

/// Ring buffer keyed by absolute stream position.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Vec<T>,
}

impl<T: Copy + Default> RingBuffer<T> {
    /// Create a buffer with `capacity` default-initialised slots.
    ///
    /// A zero capacity is bumped to one slot so indexing never divides by zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![T::default(); capacity.max(1)],
        }
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    fn slot(&self, pos: u64) -> usize {
        (pos % self.slots.len() as u64) as usize
    }

    /// Store `value` at `pos`.
    #[inline(always)]
    pub fn write(&mut self, pos: u64, value: T) {
        let idx = self.slot(pos);
        self.slots[idx] = value;
    }

    /// Load the value stored at `pos`.
    #[inline(always)]
    pub fn read(&self, pos: u64) -> T {
        self.slots[self.slot(pos)]
    }

    /// Iterate over all slots in storage order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots.iter()
    }

    /// Reset every slot to the default value.
    pub fn clear(&mut self) {
        self.slots.fill(T::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_read() {
        let mut ring: RingBuffer<u8> = RingBuffer::new(3);
        ring.write(0, b'A');
        ring.write(1, b'C');
        ring.write(2, b'G');
        assert_eq!(ring.read(0), b'A');
        assert_eq!(ring.read(1), b'C');
        assert_eq!(ring.read(2), b'G');
    }

    #[test]
    fn test_wraparound() {
        let mut ring: RingBuffer<u8> = RingBuffer::new(3);
        for (pos, &b) in b"ACGTA".iter().enumerate() {
            ring.write(pos as u64, b);
        }
        // Positions 3 and 4 overwrote slots 0 and 1
        assert_eq!(ring.read(3), b'T');
        assert_eq!(ring.read(4), b'A');
        assert_eq!(ring.read(0), b'T');
        assert_eq!(ring.read(2), b'G');
        assert_eq!(ring.read(5), b'G');
    }

    #[test]
    fn test_large_positions() {
        let mut ring: RingBuffer<bool> = RingBuffer::new(7);
        let pos = u64::MAX - 3;
        ring.write(pos, true);
        assert!(ring.read(pos));
        assert!(ring.read(pos - 7));
        assert!(!ring.read(pos + 1));
    }

    #[test]
    fn test_zero_capacity_is_one_slot() {
        let mut ring: RingBuffer<u8> = RingBuffer::new(0);
        assert_eq!(ring.capacity(), 1);
        ring.write(10, b'C');
        assert_eq!(ring.read(11), b'C');
    }

    #[test]
    fn test_clear() {
        let mut ring: RingBuffer<bool> = RingBuffer::new(4);
        for pos in 0..4 {
            ring.write(pos, true);
        }
        assert!(ring.iter().all(|&v| v));
        ring.clear();
        assert!(ring.iter().all(|&v| !v));
    }
}

//! Per-divisor self-similarity tracking.

use crate::ring::RingBuffer;

/// Tracks whether the last `r` symbols are periodic at divisor `d`.
///
/// Each update records whether the symbol at `pos` equals the one at
/// `pos - d`. The window `[pos - r + 1, pos]` is periodic at `d` exactly when
/// the last `r - d` comparisons all matched, which is what the match ring of
/// capacity `r - d` holds.
#[derive(Debug, Clone)]
pub struct SubperiodMatcher {
    divisor: usize,
    matches: RingBuffer<bool>,
}

impl SubperiodMatcher {
    /// Matcher for divisor `d` of period `r` (`d < r`).
    pub fn new(divisor: usize, period: usize) -> Self {
        debug_assert!(divisor > 0 && divisor < period);
        Self {
            divisor,
            matches: RingBuffer::new(period - divisor),
        }
    }

    #[inline]
    pub fn divisor(&self) -> usize {
        self.divisor
    }

    /// Record the comparison between `symbols[pos]` and `symbols[pos - d]`.
    ///
    /// Requires `pos >= d` and both positions still resident in `symbols`.
    #[inline(always)]
    pub fn update(&mut self, symbols: &RingBuffer<u8>, pos: u64) {
        let d = self.divisor as u64;
        let equal = symbols.read(pos) == symbols.read(pos - d);
        self.matches.write(pos, equal);
    }

    /// True iff every recorded comparison matched.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.matches.iter().all(|&m| m)
    }

    pub fn clear(&mut self) {
        self.matches.clear();
    }
}

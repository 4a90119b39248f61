//! General tandem repeat scanner for periods `r >= 2`.
//!
//! # Algorithm
//!
//! The scanner tracks `n`, the length of the current run ending at the last
//! consumed position, and keeps the last `r` symbols in a ring buffer.
//!
//! 1. Ambiguous base: report the run if long enough, then restart priming.
//! 2. Priming (`n < r - 1`): buffer the symbol and update primed matchers.
//!    Divisor `d` becomes primed once `d` symbols are buffered.
//! 3. Window complete (`n == r - 1`): buffer the symbol, then `n = r` if the
//!    window is non-degenerate, else `n = r - 1` so the next symbol re-tests
//!    a window shifted by one.
//! 4. Steady state (`n >= r`): compare against the symbol one unit back.
//!    A match extends the run. A mismatch reports the run if long enough
//!    and restarts from the last `r` symbols as in step 3.
//!
//! Matchers are updated on every buffered or matched symbol so their rings
//! always describe the last `r` symbols, whatever the run length.
//!
//! # Memory Complexity
//!
//! O(r): one symbol ring of `r` slots plus one flag ring of `r - d` slots per
//! exclusive divisor `d`. Nothing is allocated per symbol or per sequence.

use crate::config::ScanConfig;
use crate::divisors::ExclusiveDivisors;
use crate::error::{Result, ScanError};
use crate::matcher::SubperiodMatcher;
use crate::ring::RingBuffer;
use crate::scanner::{is_sentinel, RepeatSink};

/// Streaming scanner for non-degenerate `r`-periodic repeats.
#[derive(Debug, Clone)]
pub struct RepeatScanner {
    config: ScanConfig,
    /// Absolute position of the next symbol within the current sequence.
    pos: u64,
    /// Current run length (`n`).
    run: u64,
    /// Number of matchers primed, in ascending divisor order.
    active: usize,
    symbols: RingBuffer<u8>,
    matchers: Vec<SubperiodMatcher>,
    /// Scratch space for the reported unit.
    unit: Vec<u8>,
}

impl RepeatScanner {
    /// Create a scanner for `config.period >= 2`.
    pub fn new(config: ScanConfig) -> Result<Self> {
        if config.min_length < config.period as u64 {
            return Err(ScanError::InvalidConfiguration(format!(
                "minimum length ({}) must be >= repeat period ({})",
                config.min_length, config.period
            )));
        }
        let divisors = ExclusiveDivisors::for_period(config.period)?;
        let matchers = divisors
            .as_slice()
            .iter()
            .map(|&d| SubperiodMatcher::new(d, config.period))
            .collect();

        Ok(Self {
            config,
            pos: 0,
            run: 0,
            active: 0,
            symbols: RingBuffer::new(config.period),
            matchers,
            unit: Vec::with_capacity(config.period),
        })
    }

    #[inline]
    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Number of symbols consumed in the current sequence.
    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Length of the run ending at the last consumed symbol.
    #[inline]
    pub fn run_length(&self) -> u64 {
        self.run
    }

    /// Divisors checked for degeneracy, ascending.
    pub fn divisors(&self) -> impl Iterator<Item = usize> + '_ {
        self.matchers.iter().map(SubperiodMatcher::divisor)
    }

    /// Consume one symbol at the current position.
    pub fn push<S: RepeatSink + ?Sized>(&mut self, symbol: u8, sink: &mut S) -> Result<()> {
        let period = self.config.period as u64;
        let p = self.pos;

        if is_sentinel(symbol) {
            self.report(p, sink)?;
            self.run = 0;
            self.active = 0;
        } else if self.run < period - 1 {
            self.symbols.write(p, symbol);
            self.update_matchers(p);
            if self
                .matchers
                .get(self.active)
                .is_some_and(|m| m.divisor() as u64 == self.run + 1)
            {
                self.active += 1;
            }
            self.run += 1;
        } else if self.run == period - 1 {
            self.symbols.write(p, symbol);
            self.update_matchers(p);
            self.run = self.window_run_length();
        } else if self.symbols.read(p - period) == symbol {
            // Slot already holds `symbol`; matchers still advance to stay in phase
            self.run += 1;
            self.update_matchers(p);
        } else {
            self.report(p, sink)?;
            self.symbols.write(p, symbol);
            self.update_matchers(p);
            self.run = self.window_run_length();
        }

        self.pos += 1;
        Ok(())
    }

    /// End the current sequence, reporting the final run if long enough.
    pub fn finish<S: RepeatSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.report(self.pos, sink)?;
        self.reset();
        Ok(())
    }

    /// Return to the start-of-sequence state. Buffers are kept, not reallocated.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.run = 0;
        self.active = 0;
    }

    #[inline(always)]
    fn update_matchers(&mut self, pos: u64) {
        for matcher in &mut self.matchers[..self.active] {
            matcher.update(&self.symbols, pos);
        }
    }

    /// Run length after a full window is buffered: `r` if the window is a
    /// valid unit, `r - 1` if it is periodic at a smaller divisor.
    #[inline]
    fn window_run_length(&self) -> u64 {
        let period = self.config.period as u64;
        if self.matchers[..self.active]
            .iter()
            .any(SubperiodMatcher::is_degenerate)
        {
            period - 1
        } else {
            period
        }
    }

    /// Report the run ending just before `end` if it meets the minimum length.
    fn report<S: RepeatSink + ?Sized>(&mut self, end: u64, sink: &mut S) -> Result<()> {
        if self.run < self.config.min_length {
            return Ok(());
        }
        let start = end - self.run;
        self.unit.clear();
        for offset in 0..self.config.period as u64 {
            self.unit.push(self.symbols.read(start + offset));
        }
        sink.emit(start, end, &self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RecordCollector, RepeatRecord};

    fn scanner(period: usize, min_length: u64) -> RepeatScanner {
        RepeatScanner::new(ScanConfig {
            period,
            min_length,
        })
        .unwrap()
    }

    fn scan(period: usize, min_length: u64, seq: &[u8]) -> Vec<(u64, u64, String)> {
        let mut s = scanner(period, min_length);
        let mut sink = RecordCollector::new("chr");
        for &b in seq {
            s.push(b, &mut sink).unwrap();
        }
        s.finish(&mut sink).unwrap();
        sink.into_records()
            .into_iter()
            .map(|r: RepeatRecord| (r.start, r.end, r.unit))
            .collect()
    }

    #[test]
    fn test_dinucleotide_full_run() {
        assert_eq!(scan(2, 4, b"ACACACAC"), vec![(0, 8, "AC".to_string())]);
    }

    #[test]
    fn test_homopolymer_is_degenerate_for_dimer() {
        assert!(scan(2, 4, b"AAAAAA").is_empty());
        assert!(scan(2, 2, b"AAAAAAA").is_empty());
    }

    #[test]
    fn test_sentinel_splits_runs() {
        assert_eq!(
            scan(2, 4, b"ACACACNACACACAC"),
            vec![(0, 6, "AC".to_string()), (7, 15, "AC".to_string())]
        );
    }

    #[test]
    fn test_lowercase_sentinel() {
        assert_eq!(
            scan(2, 4, b"ACACnACAC"),
            vec![(0, 4, "AC".to_string()), (5, 9, "AC".to_string())]
        );
    }

    #[test]
    fn test_length_threshold_boundary() {
        // Run of exactly l - 1 is dropped
        assert!(scan(3, 7, b"GCAGCAT").is_empty());
        // Run of exactly l is kept
        assert_eq!(scan(3, 7, b"GCAGCAGT"), vec![(0, 7, "GCA".to_string())]);
    }

    #[test]
    fn test_partial_unit_tail() {
        assert_eq!(scan(3, 6, b"CAGCAGCA"), vec![(0, 8, "CAG".to_string())]);
    }

    #[test]
    fn test_unit_reported_in_run_phase() {
        // Run starts at position 1, so the unit is read from the run's first base
        assert_eq!(scan(3, 6, b"TGCAGCAGCA"), vec![(1, 10, "GCA".to_string())]);
    }

    #[test]
    fn test_doubled_dimer_rejected_for_tetramer() {
        assert!(scan(4, 8, b"ACACACACACAC").is_empty());
        assert_eq!(
            scan(4, 8, b"AACCAACCAACC"),
            vec![(0, 12, "AACC".to_string())]
        );
    }

    #[test]
    fn test_hexamer_excludes_dimer_and_trimer() {
        assert!(scan(6, 12, b"ATATATATATATATAT").is_empty());
        assert!(scan(6, 12, b"CAGCAGCAGCAGCAG").is_empty());
        assert_eq!(
            scan(6, 12, b"GATTACGATTACGATTAC"),
            vec![(0, 18, "GATTAC".to_string())]
        );
    }

    #[test]
    fn test_degenerate_prefix_slides_into_valid_window() {
        // "AA" is degenerate; the run starts at the first valid window "AC"
        assert_eq!(scan(2, 4, b"AAACACAC"), vec![(2, 8, "AC".to_string())]);
    }

    #[test]
    fn test_adjacent_runs_overlap_by_one_unit_minus_one() {
        // ACACAC then CGCGCG: the second run starts at the last C of the first
        assert_eq!(
            scan(2, 4, b"ACACACGCGCG"),
            vec![(0, 6, "AC".to_string()), (5, 11, "CG".to_string())]
        );
    }

    #[test]
    fn test_prime_period_seven() {
        let unit = b"ACGTTGA";
        let seq: Vec<u8> = unit.iter().cycle().take(21).copied().collect();
        assert_eq!(scan(7, 14, &seq), vec![(0, 21, "ACGTTGA".to_string())]);
    }

    #[test]
    fn test_sentinel_during_priming() {
        assert!(scan(4, 4, b"ACGNTAC").is_empty());
        assert_eq!(scan(4, 4, b"ACGNTACGT"), vec![(4, 9, "TACG".to_string())]);
    }

    #[test]
    fn test_reset_between_sequences_keeps_divisors() {
        let mut s = scanner(12, 24);
        assert_eq!(s.divisors().collect::<Vec<_>>(), vec![4, 6]);
        let mut sink = RecordCollector::new("a");
        for &b in b"ACGTACGT" {
            s.push(b, &mut sink).unwrap();
        }
        assert_eq!(s.position(), 8);
        assert_eq!(s.run_length(), 8);
        s.reset();
        assert_eq!(s.position(), 0);
        assert_eq!(s.run_length(), 0);
    }

    #[test]
    fn test_rejects_period_one() {
        let err = RepeatScanner::new(ScanConfig {
            period: 1,
            min_length: 5,
        })
        .unwrap_err();
        assert!(matches!(err, ScanError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_short_min_length() {
        let err = RepeatScanner::new(ScanConfig {
            period: 4,
            min_length: 2,
        })
        .unwrap_err();
        assert!(matches!(err, ScanError::InvalidConfiguration(_)));
    }
}

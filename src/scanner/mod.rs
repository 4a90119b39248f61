//! Streaming tandem repeat scanners.
//!
//! A scanner consumes one symbol at a time and reports every maximal interval
//! that repeats a fixed-length unit, is at least the configured length, and is
//! not degenerate (periodic at a smaller period dividing the unit length).
//!
//! - [`RepeatScanner`] handles periods `r >= 2` using one
//!   [`SubperiodMatcher`](crate::matcher::SubperiodMatcher) per exclusive divisor.
//! - [`HomopolymerScanner`] handles `r == 1` with a single counter.
//!
//! Both treat the ambiguous base (`N`/`n`) as a hard reset: no interval ever
//! spans it. Memory is `O(r)` regardless of input length.

pub mod homopolymer;
pub mod periodic;

pub use homopolymer::HomopolymerScanner;
pub use periodic::RepeatScanner;

use crate::config::ScanConfig;
use crate::error::Result;

/// The ambiguous-base sentinel.
pub const SENTINEL: u8 = b'N';

/// True for the ambiguous base in either case.
#[inline(always)]
pub fn is_sentinel(symbol: u8) -> bool {
    symbol == SENTINEL || symbol == b'n'
}

/// Receiver for repeats as they are found.
///
/// `start` is inclusive, `end` exclusive, both relative to the start of the
/// current sequence. `unit` borrows the scanner's scratch buffer and is only
/// valid for the duration of the call.
pub trait RepeatSink {
    fn emit(&mut self, start: u64, end: u64, unit: &[u8]) -> Result<()>;
}

impl<F> RepeatSink for F
where
    F: FnMut(u64, u64, &[u8]) -> Result<()>,
{
    #[inline]
    fn emit(&mut self, start: u64, end: u64, unit: &[u8]) -> Result<()> {
        self(start, end, unit)
    }
}

/// Scanner for any period, routing `r == 1` to the homopolymer path.
#[derive(Debug, Clone)]
pub enum Scanner {
    Homopolymer(HomopolymerScanner),
    Periodic(RepeatScanner),
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Result<Self> {
        if config.is_homopolymer() {
            Ok(Self::Homopolymer(HomopolymerScanner::new(config)?))
        } else {
            Ok(Self::Periodic(RepeatScanner::new(config)?))
        }
    }

    /// Consume one symbol.
    #[inline]
    pub fn push<S: RepeatSink + ?Sized>(&mut self, symbol: u8, sink: &mut S) -> Result<()> {
        match self {
            Self::Homopolymer(s) => s.push(symbol, sink),
            Self::Periodic(s) => s.push(symbol, sink),
        }
    }

    /// Consume a run of symbols.
    pub fn push_slice<S: RepeatSink + ?Sized>(&mut self, symbols: &[u8], sink: &mut S) -> Result<()> {
        match self {
            Self::Homopolymer(s) => symbols.iter().try_for_each(|&b| s.push(b, sink)),
            Self::Periodic(s) => symbols.iter().try_for_each(|&b| s.push(b, sink)),
        }
    }

    /// End the current sequence: report any pending run and reset.
    pub fn finish<S: RepeatSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        match self {
            Self::Homopolymer(s) => s.finish(sink),
            Self::Periodic(s) => s.finish(sink),
        }
    }

    /// Scan one complete sequence.
    pub fn scan<S: RepeatSink + ?Sized>(&mut self, symbols: &[u8], sink: &mut S) -> Result<()> {
        self.push_slice(symbols, sink)?;
        self.finish(sink)
    }

    /// Discard any in-progress run without reporting it.
    pub fn reset(&mut self) {
        match self {
            Self::Homopolymer(s) => s.reset(),
            Self::Periodic(s) => s.reset(),
        }
    }

    pub fn config(&self) -> ScanConfig {
        match self {
            Self::Homopolymer(s) => s.config(),
            Self::Periodic(s) => s.config(),
        }
    }
}

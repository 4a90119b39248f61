//! Homopolymer scanner (period 1).
//!
//! Counts how long the current base has repeated. When the base changes, the
//! finished run is reported if it is long enough and is not a run of the
//! ambiguous base. No degeneracy analysis applies: nothing is smaller than 1.

use crate::config::ScanConfig;
use crate::error::{Result, ScanError};
use crate::scanner::{is_sentinel, RepeatSink, SENTINEL};

/// Single-counter scanner for runs of one repeated base.
#[derive(Debug, Clone)]
pub struct HomopolymerScanner {
    config: ScanConfig,
    pos: u64,
    run: u64,
    last: u8,
}

impl HomopolymerScanner {
    pub fn new(config: ScanConfig) -> Result<Self> {
        if config.period != 1 {
            return Err(ScanError::InvalidConfiguration(format!(
                "homopolymer scanner requires period 1, got {}",
                config.period
            )));
        }
        if config.min_length == 0 {
            return Err(ScanError::InvalidConfiguration(
                "minimum length must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            config,
            pos: 0,
            run: 0,
            last: SENTINEL,
        })
    }

    #[inline]
    pub fn config(&self) -> ScanConfig {
        self.config
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.pos
    }

    #[inline]
    pub fn run_length(&self) -> u64 {
        self.run
    }

    /// Consume one symbol at the current position.
    #[inline]
    pub fn push<S: RepeatSink + ?Sized>(&mut self, symbol: u8, sink: &mut S) -> Result<()> {
        if symbol == self.last {
            self.run += 1;
        } else {
            self.report(sink)?;
            self.run = 1;
            self.last = symbol;
        }
        self.pos += 1;
        Ok(())
    }

    /// End the current sequence, reporting the final run if long enough.
    pub fn finish<S: RepeatSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        self.report(sink)?;
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.pos = 0;
        self.run = 0;
        self.last = SENTINEL;
    }

    fn report<S: RepeatSink + ?Sized>(&mut self, sink: &mut S) -> Result<()> {
        if is_sentinel(self.last) || self.run < self.config.min_length {
            return Ok(());
        }
        sink.emit(self.pos - self.run, self.pos, &[self.last])
    }
}

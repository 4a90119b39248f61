//! Scan configuration and global input options.
//!
//! [`ScanConfig`] carries the per-scan parameters and is validated once at
//! construction. The case-folding switch is process-wide, set at startup and
//! read by the FASTA reader outside the per-symbol hot loop.

use crate::error::{Result, ScanError};
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for case-insensitive input.
///
/// When enabled, soft-masked (lower-case) bases are upper-cased by the FASTA
/// reader so that `acAC` scans the same as `ACAC`.
static IGNORE_CASE: AtomicBool = AtomicBool::new(false);

/// Enable or disable case folding of input bases.
///
/// # Example
///
/// ```
/// use repscan::config;
///
/// config::set_ignore_case(true);
/// assert!(config::is_ignore_case());
/// config::set_ignore_case(false);
/// ```
#[inline]
pub fn set_ignore_case(enabled: bool) {
    IGNORE_CASE.store(enabled, Ordering::Release);
}

/// Check if case folding is enabled.
#[inline]
pub fn is_ignore_case() -> bool {
    IGNORE_CASE.load(Ordering::Acquire)
}

/// Repeat period and minimum reported length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Length of the repeating unit (`r`).
    pub period: usize,
    /// Minimum total length of a reported interval (`l`).
    pub min_length: u64,
}

impl ScanConfig {
    /// Create a validated configuration.
    ///
    /// Fails with [`ScanError::InvalidConfiguration`] if `period` is zero or
    /// `min_length` is shorter than one unit.
    pub fn new(period: usize, min_length: u64) -> Result<Self> {
        if period == 0 {
            return Err(ScanError::InvalidConfiguration(
                "repeat period must be at least 1".to_string(),
            ));
        }
        if min_length < period as u64 {
            return Err(ScanError::InvalidConfiguration(format!(
                "minimum length ({}) must be >= repeat period ({})",
                min_length, period
            )));
        }
        Ok(Self { period, min_length })
    }

    /// True when the homopolymer path applies.
    #[inline]
    pub fn is_homopolymer(&self) -> bool {
        self.period == 1
    }
}

//! Exclusive divisor analysis for degeneracy checks.
//!
//! A window of length `r` that is periodic at some proper divisor `e` of `r`
//! is also periodic at every multiple of `e` that divides `r`. Each proper
//! divisor divides at least one maximal proper divisor `r / p` (`p` prime),
//! so testing those alone detects every smaller-period degeneracy.
//!
//! For example, `r = 12` has prime factors `{2, 3}` and exclusive divisors
//! `{4, 6}`: a window periodic at 1, 2 or 3 is also periodic at 4 or 6.

use crate::error::{Result, ScanError};

/// Distinct prime factors of `n`, ascending.
pub fn prime_factors(mut n: usize) -> Vec<usize> {
    let mut factors = Vec::new();
    let mut p = 2;
    while p * p <= n {
        if n % p == 0 {
            factors.push(p);
            while n % p == 0 {
                n /= p;
            }
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// The minimal set of smaller periods to test for a given repeat period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusiveDivisors {
    period: usize,
    divisors: Vec<usize>,
}

impl ExclusiveDivisors {
    /// Compute `{ r / p : p a distinct prime factor of r }`, sorted ascending.
    ///
    /// Fails with [`ScanError::InvalidInput`] for `r < 2`; period 1 has no
    /// proper divisors and belongs on the homopolymer path.
    pub fn for_period(period: usize) -> Result<Self> {
        if period < 2 {
            return Err(ScanError::InvalidInput(format!(
                "divisor analysis requires a period >= 2, got {}",
                period
            )));
        }

        let mut divisors: Vec<usize> = prime_factors(period)
            .into_iter()
            .map(|p| period / p)
            .collect();
        divisors.sort_unstable();

        Ok(Self { period, divisors })
    }

    /// The period these divisors were computed for.
    #[inline]
    pub fn period(&self) -> usize {
        self.period
    }

    /// Divisors in ascending order.
    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.divisors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.divisors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.divisors.is_empty()
    }
}

/// True if `unit` is not periodic at any smaller period dividing its length.
///
/// Units of length 0 or 1 are primitive.
pub fn is_primitive(unit: &[u8]) -> bool {
    let Ok(divisors) = ExclusiveDivisors::for_period(unit.len()) else {
        return true;
    };
    !divisors
        .as_slice()
        .iter()
        .any(|&d| (d..unit.len()).all(|i| unit[i] == unit[i - d]))
}

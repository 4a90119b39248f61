//! repscan: streaming tandem repeat detection for FASTA sequences.
//!
//! Reports every maximal interval that repeats a unit of fixed length `r`,
//! is at least `l` bases long, and is not periodic at a smaller period that
//! divides `r` (so `ATATAT` is a 2-mer repeat, never a 4-mer or 6-mer one).
//!
//! # Features
//!
//! - **Single pass**: one symbol at a time, O(r) memory
//! - **Any period**: degeneracy is checked against the exclusive divisors of `r`
//! - **Streaming I/O**: FASTA in, tab-separated records out
//!
//! # Example
//!
//! ```rust
//! use repscan::{RecordCollector, ScanConfig, Scanner};
//!
//! let mut scanner = Scanner::new(ScanConfig::new(2, 4).unwrap()).unwrap();
//! let mut sink = RecordCollector::new("chr1");
//! scanner.scan(b"GGACACACACTT", &mut sink).unwrap();
//!
//! let records = sink.into_records();
//! assert_eq!(records[0].to_string(), "chr1\t2\t10\tunit=AC");
//! ```

pub mod commands;
pub mod config;
pub mod divisors;
pub mod error;
pub mod fasta;
pub mod logging;
pub mod matcher;
pub mod record;
pub mod ring;
pub mod scanner;
pub mod streaming;

// Re-export commonly used types
pub use config::ScanConfig;
pub use error::{Result, ScanError};
pub use fasta::FastaReader;
pub use record::{RecordCollector, RepeatRecord};
pub use scanner::{HomopolymerScanner, RepeatScanner, RepeatSink, Scanner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{GenerateCommand, GenerateConfig, ScanCommand, ScanStats};
    pub use crate::config::ScanConfig;
    pub use crate::error::{Result, ScanError};
    pub use crate::fasta::FastaReader;
    pub use crate::record::{RecordCollector, RepeatRecord};
    pub use crate::scanner::{RepeatSink, Scanner};
    pub use crate::streaming::RepeatWriter;
}

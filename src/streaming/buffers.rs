//! Buffer size constants for streaming I/O.
//!
//! Scanning memory is O(r) and independent of these; they only trade
//! memory for I/O throughput.

/// Default output buffer size (2 MB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 2 * 1024 * 1024;

/// Default input buffer size (256 KB).
/// Good balance for reading FASTA line by line.
pub const DEFAULT_INPUT_BUFFER: usize = 256 * 1024;

/// Files at least this large are memory-mapped instead of buffered (16 MB).
pub const MMAP_THRESHOLD: u64 = 16 * 1024 * 1024;

//! Streaming I/O utilities shared by the commands.
//!
//! - Buffer size constants
//! - Zero-allocation record output

pub mod buffers;
pub mod output;

pub use output::RepeatWriter;

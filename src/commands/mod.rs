//! Command implementations for repscan.

pub mod generate;
pub mod scan;

pub use generate::{GenerateCommand, GenerateConfig, GenerateStats};
pub use scan::{ScanCommand, ScanStats};

//! Streaming tandem repeat scan over FASTA input.
//!
//! # Algorithm
//!
//! For each FASTA record:
//! 1. Reset the scanner (buffers are reused, not reallocated)
//! 2. Stream bases through the scanner, writing records as runs end
//! 3. Flush the final run at the sequence boundary
//!
//! # Memory Complexity
//!
//! O(r) for the scanner plus fixed I/O buffers, regardless of sequence length.

use crate::config::ScanConfig;
use crate::error::Result;
use crate::fasta::FastaReader;
use crate::scanner::Scanner;
use crate::streaming::buffers::{DEFAULT_INPUT_BUFFER, MMAP_THRESHOLD};
use crate::streaming::RepeatWriter;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Scan command configuration.
#[derive(Debug, Clone)]
pub struct ScanCommand {
    pub config: ScanConfig,
    /// Write the `#repeat_length` / `#total_length` header lines.
    pub header: bool,
}

impl ScanCommand {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            header: true,
        }
    }

    /// Enable or disable the comment header.
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Scan a FASTA file.
    ///
    /// Large files are memory-mapped; smaller ones are read through a buffer.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input_path: P, output: &mut W) -> Result<ScanStats> {
        let file = File::open(input_path.as_ref())?;
        let file_size = file.metadata()?.len();

        if file_size >= MMAP_THRESHOLD {
            // SAFETY: the map is read-only and dropped before returning
            let mmap = unsafe { Mmap::map(&file)? };
            log::debug!("Memory-mapped {} bytes", file_size);
            self.run_streaming(FastaReader::new(&mmap[..]), output)
        } else {
            let reader = FastaReader::with_capacity(DEFAULT_INPUT_BUFFER, file);
            self.run_streaming(reader, output)
        }
    }

    /// Scan FASTA from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<ScanStats> {
        let stdin = io::stdin();
        let reader = FastaReader::new(stdin.lock());
        self.run_streaming(reader, output)
    }

    /// Core streaming scan.
    pub fn run_streaming<R: BufRead, W: Write>(
        &self,
        mut reader: FastaReader<R>,
        output: &mut W,
    ) -> Result<ScanStats> {
        let mut stats = ScanStats::default();
        let mut scanner = Scanner::new(self.config)?;
        let mut writer = RepeatWriter::new(output);

        if self.config.is_homopolymer() {
            log::info!("Finding homopolymers >={}bp", self.config.min_length);
        } else {
            log::info!(
                "Finding {}-mer repeats >={}bp",
                self.config.period,
                self.config.min_length
            );
        }

        if self.header {
            writer.write_header(self.config.period, self.config.min_length)?;
        }

        while let Some(seq_id) = reader.next_record()? {
            log::info!("Parsing sequence {}", seq_id);
            writer.begin_sequence(&seq_id);
            let records_before = writer.records_written();

            let mut bases = 0u64;
            reader.read_sequence(|chunk| {
                bases += chunk.len() as u64;
                scanner.push_slice(chunk, &mut writer)
            })?;
            scanner.finish(&mut writer)?;

            log::debug!(
                "{}: {} bases, {} repeats",
                seq_id,
                bases,
                writer.records_written() - records_before
            );
            stats.sequences += 1;
            stats.bases += bases;
        }

        stats.repeats = writer.records_written();
        stats.repeat_bases = writer.bases_written();
        writer.flush()?;
        Ok(stats)
    }
}

/// Statistics from a scan.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Number of FASTA records scanned
    pub sequences: u64,
    /// Number of symbols scanned (newlines excluded)
    pub bases: u64,
    /// Number of repeats written
    pub repeats: u64,
    /// Total length of all repeats written
    pub repeat_bases: u64,
}

impl ScanStats {
    /// Fraction of scanned bases covered by reported repeats.
    pub fn repeat_fraction(&self) -> f64 {
        if self.bases == 0 {
            0.0
        } else {
            self.repeat_bases as f64 / self.bases as f64
        }
    }
}

impl std::fmt::Display for ScanStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Sequences: {}, Bases: {}, Repeats: {}, Repeat bases: {} ({:.4}%)",
            self.sequences,
            self.bases,
            self.repeats,
            self.repeat_bases,
            self.repeat_fraction() * 100.0
        )
    }
}

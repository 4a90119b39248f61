//! Efficient output formatting for repeat records.
//!
//! Uses itoa for integer formatting to avoid allocation in the hot path.

use crate::error::Result;
use crate::scanner::RepeatSink;
use crate::streaming::buffers::DEFAULT_OUTPUT_BUFFER;
use std::io::{BufWriter, Write};

/// Buffered writer for `id\tstart\tend\tunit=UNIT` records.
///
/// Holds the id of the sequence being scanned so it can be used directly as
/// a [`RepeatSink`].
pub struct RepeatWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    seq_id: Vec<u8>,
    records_written: u64,
    bases_written: u64,
}

impl<W: Write> RepeatWriter<W> {
    /// Create a new RepeatWriter with the default buffer size.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    /// Create a new RepeatWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            seq_id: Vec::with_capacity(64),
            records_written: 0,
            bases_written: 0,
        }
    }

    /// Set the sequence id written in front of subsequent records.
    pub fn begin_sequence(&mut self, seq_id: &str) {
        self.seq_id.clear();
        self.seq_id.extend_from_slice(seq_id.as_bytes());
    }

    /// Write the `#repeat_length` / `#total_length` comment header.
    pub fn write_header(&mut self, period: usize, min_length: u64) -> Result<()> {
        self.writer.write_all(b"#repeat_length: ")?;
        self.write_int(period)?;
        self.writer.write_all(b"\n#total_length: ")?;
        self.write_int(min_length)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write one record for the current sequence.
    #[inline]
    pub fn write_repeat(&mut self, start: u64, end: u64, unit: &[u8]) -> Result<()> {
        self.writer.write_all(&self.seq_id)?;
        self.writer.write_all(b"\t")?;
        self.write_int(start)?;
        self.writer.write_all(b"\t")?;
        self.write_int(end)?;
        self.writer.write_all(b"\tunit=")?;
        self.writer.write_all(unit)?;
        self.writer.write_all(b"\n")?;
        self.records_written += 1;
        self.bases_written += end - start;
        Ok(())
    }

    /// Write an integer using itoa.
    #[inline]
    fn write_int<I: itoa::Integer>(&mut self, n: I) -> Result<()> {
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    /// Records written so far.
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Total bases covered by records written so far.
    pub fn bases_written(&self) -> u64 {
        self.bases_written
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> RepeatSink for RepeatWriter<W> {
    #[inline]
    fn emit(&mut self, start: u64, end: u64, unit: &[u8]) -> Result<()> {
        self.write_repeat(start, end, unit)
    }
}

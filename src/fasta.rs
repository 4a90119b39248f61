//! Streaming FASTA reader.
//!
//! Yields one sequence id per record and streams its bases in chunks with
//! line terminators removed. A record's sequence is never held in memory as
//! a whole, so arbitrarily long chromosomes scan in constant space.

use crate::config::is_ignore_case;
use crate::error::{Result, ScanError};
use memchr::memchr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Marker that starts a FASTA header line.
pub const HEADER_PREFIX: u8 = b'>';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing read yet; leading junk before the first header is skipped.
    Start,
    /// A header was returned and its sequence has not been fully consumed.
    InSequence,
    /// The `>` of the next header has been consumed.
    AtHeader,
    Eof,
}

/// A streaming FASTA reader over any buffered source.
pub struct FastaReader<R: BufRead> {
    reader: R,
    state: State,
    /// 1-based number of the line the cursor is on.
    line_number: usize,
    at_line_start: bool,
    ignore_case: bool,
    header: Vec<u8>,
    folded: Vec<u8>,
}

impl FastaReader<BufReader<File>> {
    /// Open a FASTA file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> FastaReader<BufReader<R>> {
    /// Wrap an unbuffered source with a buffer of the given capacity.
    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self::new(BufReader::with_capacity(capacity, reader))
    }
}

impl<R: BufRead> FastaReader<R> {
    /// Create a reader. Case folding follows [`crate::config::is_ignore_case`]
    /// at construction time.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            state: State::Start,
            line_number: 1,
            at_line_start: true,
            ignore_case: is_ignore_case(),
            header: Vec::with_capacity(256),
            folded: Vec::new(),
        }
    }

    /// Override case folding for this reader.
    pub fn with_ignore_case(mut self, enabled: bool) -> Self {
        self.ignore_case = enabled;
        self
    }

    /// Advance to the next record and return its sequence id.
    ///
    /// Any unread bases of the previous record are skipped.
    pub fn next_record(&mut self) -> Result<Option<String>> {
        loop {
            match self.state {
                State::Eof => return Ok(None),
                State::AtHeader => return self.read_header().map(Some),
                State::Start => self.seek_header()?,
                State::InSequence => self.read_sequence(|_| Ok(()))?,
            }
        }
    }

    /// Stream the current record's bases to `f` until the next header or EOF.
    ///
    /// Chunks never contain `\n` or `\r`. Does nothing if no record is open.
    pub fn read_sequence<F>(&mut self, mut f: F) -> Result<()>
    where
        F: FnMut(&[u8]) -> Result<()>,
    {
        if self.state != State::InSequence {
            return Ok(());
        }

        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                self.state = State::Eof;
                return Ok(());
            }

            if self.at_line_start && buf[0] == HEADER_PREFIX {
                self.reader.consume(1);
                self.at_line_start = false;
                self.state = State::AtHeader;
                return Ok(());
            }

            let (chunk_len, consumed, ends_line) = match memchr(b'\n', buf) {
                Some(i) => (i, i + 1, true),
                None => (buf.len(), buf.len(), false),
            };

            let mut chunk = &buf[..chunk_len];
            while !chunk.is_empty() {
                let piece_len = memchr(b'\r', chunk).unwrap_or(chunk.len());
                if piece_len > 0 {
                    let piece = &chunk[..piece_len];
                    if self.ignore_case {
                        self.folded.clear();
                        self.folded
                            .extend(piece.iter().map(|b| b.to_ascii_uppercase()));
                        f(&self.folded)?;
                    } else {
                        f(piece)?;
                    }
                }
                chunk = &chunk[(piece_len + 1).min(chunk.len())..];
            }

            self.reader.consume(consumed);
            self.at_line_start = ends_line;
            if ends_line {
                self.line_number += 1;
            }
        }
    }

    /// Skip everything up to and including the first header marker.
    fn seek_header(&mut self) -> Result<()> {
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                self.state = State::Eof;
                return Ok(());
            }

            if self.at_line_start && buf[0] == HEADER_PREFIX {
                self.reader.consume(1);
                self.at_line_start = false;
                self.state = State::AtHeader;
                return Ok(());
            }

            // Jump to the next line start
            match memchr(b'\n', buf) {
                Some(i) => {
                    self.reader.consume(i + 1);
                    self.at_line_start = true;
                    self.line_number += 1;
                }
                None => {
                    let len = buf.len();
                    self.reader.consume(len);
                    self.at_line_start = false;
                }
            }
        }
    }

    /// Read the remainder of a header line (after `>`) and extract the id.
    fn read_header(&mut self) -> Result<String> {
        let header_line = self.line_number;
        self.header.clear();
        let n = self.reader.read_until(b'\n', &mut self.header)?;
        if n > 0 && self.header.last() == Some(&b'\n') {
            self.line_number += 1;
            self.at_line_start = true;
        }

        let text = trim_ascii_start(&self.header);
        let id_len = text
            .iter()
            .position(|b| b.is_ascii_whitespace())
            .unwrap_or(text.len());
        let id = &text[..id_len];

        if id.is_empty() {
            return Err(ScanError::Parse {
                line: header_line,
                message: "FASTA header has no sequence id".to_string(),
            });
        }

        self.state = State::InSequence;
        Ok(String::from_utf8_lossy(id).into_owned())
    }

    /// Current 1-based line number.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

fn trim_ascii_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes
        .iter()
        .take_while(|&&b| b == b' ' || b == b'\t')
        .count();
    &bytes[skip..]
}

/// Read every record into memory (useful for testing and small inputs).
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<(String, Vec<u8>)>> {
    let mut fasta = FastaReader::new(reader);
    let mut records = Vec::new();
    while let Some(id) = fasta.next_record()? {
        let mut seq = Vec::new();
        fasta.read_sequence(|chunk| {
            seq.extend_from_slice(chunk);
            Ok(())
        })?;
        records.push((id, seq));
    }
    Ok(records)
}

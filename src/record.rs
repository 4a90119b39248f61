//! Repeat records: the scanner's output unit.

use crate::error::Result;
use crate::scanner::RepeatSink;
use std::cmp::Ordering;
use std::fmt;

/// A reported tandem repeat.
/// Uses 0-based, half-open coordinates (BED convention).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepeatRecord {
    pub seq_id: String,
    pub start: u64,
    pub end: u64,
    /// The repeating unit as read from the first `r` symbols of the interval.
    pub unit: String,
}

impl RepeatRecord {
    #[inline]
    pub fn new(seq_id: impl Into<String>, start: u64, end: u64, unit: impl Into<String>) -> Self {
        Self {
            seq_id: seq_id.into(),
            start,
            end,
            unit: unit.into(),
        }
    }

    /// Returns the length of the interval.
    #[inline]
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Number of complete copies of the unit in the interval.
    #[inline]
    pub fn copies(&self) -> u64 {
        match self.unit.len() as u64 {
            0 => 0,
            r => self.len() / r,
        }
    }
}

impl fmt::Display for RepeatRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\tunit={}",
            self.seq_id, self.start, self.end, self.unit
        )
    }
}

impl PartialOrd for RepeatRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RepeatRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seq_id
            .cmp(&other.seq_id)
            .then(self.start.cmp(&other.start))
            .then(self.end.cmp(&other.end))
            .then(self.unit.cmp(&other.unit))
    }
}

/// Sink that collects owned records, tagging each with the current sequence id.
#[derive(Debug, Default, Clone)]
pub struct RecordCollector {
    seq_id: String,
    records: Vec<RepeatRecord>,
}

impl RecordCollector {
    pub fn new(seq_id: impl Into<String>) -> Self {
        Self {
            seq_id: seq_id.into(),
            records: Vec::new(),
        }
    }

    /// Switch the id attached to subsequent records.
    pub fn set_sequence(&mut self, seq_id: &str) {
        self.seq_id.clear();
        self.seq_id.push_str(seq_id);
    }

    pub fn records(&self) -> &[RepeatRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<RepeatRecord> {
        self.records
    }
}

impl RepeatSink for RecordCollector {
    fn emit(&mut self, start: u64, end: u64, unit: &[u8]) -> Result<()> {
        self.records.push(RepeatRecord::new(
            self.seq_id.as_str(),
            start,
            end,
            String::from_utf8_lossy(unit),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display() {
        let rec = RepeatRecord::new("chr1", 100, 120, "CA");
        assert_eq!(rec.to_string(), "chr1\t100\t120\tunit=CA");
    }

    #[test]
    fn test_record_len_and_copies() {
        let rec = RepeatRecord::new("chr1", 10, 23, "ACG");
        assert_eq!(rec.len(), 13);
        assert_eq!(rec.copies(), 4);
        assert!(!rec.is_empty());
    }

    #[test]
    fn test_record_ordering() {
        let mut recs = vec![
            RepeatRecord::new("chr2", 5, 15, "AC"),
            RepeatRecord::new("chr1", 50, 60, "AG"),
            RepeatRecord::new("chr1", 5, 15, "AT"),
        ];
        recs.sort();
        assert_eq!(recs[0].start, 5);
        assert_eq!(recs[0].seq_id, "chr1");
        assert_eq!(recs[1].start, 50);
        assert_eq!(recs[2].seq_id, "chr2");
    }

    #[test]
    fn test_collector_tags_sequence() {
        let mut sink = RecordCollector::new("seqA");
        sink.emit(0, 8, b"AC").unwrap();
        sink.set_sequence("seqB");
        sink.emit(3, 9, b"GTT").unwrap();

        let recs = sink.into_records();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0], RepeatRecord::new("seqA", 0, 8, "AC"));
        assert_eq!(recs[1], RepeatRecord::new("seqB", 3, 9, "GTT"));
    }
}

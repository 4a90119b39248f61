//! Generate synthetic FASTA with planted tandem repeats.
//!
//! This module provides the `repscan generate` command for creating test and
//! benchmark inputs with known repeats.
//!
//! Features:
//! - Uniform random background over `ACGT`
//! - Optional ambiguous bases (`N`) at a configurable rate
//! - One planted repeat per equal-sized slot, so plants never overlap
//! - Planted units are always primitive (never periodic at a smaller period)
//! - Deterministic reproducibility via seed

use crate::divisors::is_primitive;
use crate::error::{Result, ScanError};
use crate::record::RepeatRecord;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Buffer size for output (8MB for better throughput)
const BUF_SIZE: usize = 8 * 1024 * 1024;

const BASES: [u8; 4] = *b"ACGT";

/// Configuration for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub output: PathBuf,
    /// Number of FASTA records
    pub sequences: usize,
    /// Bases per record
    pub length: u64,
    /// Period of planted repeats
    pub period: usize,
    /// Copies of the unit per planted repeat
    pub units: u64,
    /// Planted repeats per record
    pub repeats: usize,
    /// Probability that a background base is `N`
    pub n_rate: f64,
    /// Bases per FASTA line
    pub line_width: usize,
    pub seed: u64,
    pub force: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("./repscan_synthetic.fa"),
            sequences: 3,
            length: 100_000,
            period: 2,
            units: 10,
            repeats: 20,
            n_rate: 0.001,
            line_width: 60,
            seed: 42,
            force: false,
        }
    }
}

/// Statistics from generate operation.
#[derive(Debug, Default, Clone)]
pub struct GenerateStats {
    pub sequences: usize,
    pub bases: u64,
    /// Every planted repeat, in sequence then position order
    pub planted: Vec<RepeatRecord>,
    pub elapsed_secs: f64,
}

impl std::fmt::Display for GenerateStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} sequences, {} bases, {} planted repeats ({:.1}s)",
            self.sequences,
            self.bases,
            self.planted.len(),
            self.elapsed_secs
        )
    }
}

/// Synthetic FASTA generator.
pub struct GenerateCommand {
    config: GenerateConfig,
}

impl GenerateCommand {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    fn validate(&self) -> Result<()> {
        let c = &self.config;
        if c.period == 0 {
            return Err(ScanError::InvalidConfiguration(
                "period must be at least 1".to_string(),
            ));
        }
        if c.line_width == 0 {
            return Err(ScanError::InvalidConfiguration(
                "line width must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&c.n_rate) {
            return Err(ScanError::InvalidConfiguration(format!(
                "N rate must be within [0, 1], got {}",
                c.n_rate
            )));
        }
        if c.repeats > 0 {
            let span = c.period as u64 * c.units;
            let slot = c.length / c.repeats as u64;
            if span > slot {
                return Err(ScanError::InvalidConfiguration(format!(
                    "{} repeats of {}bp do not fit in {}bp sequences",
                    c.repeats, span, c.length
                )));
            }
        }
        Ok(())
    }

    /// Write the FASTA file and return what was planted.
    pub fn run(&self) -> Result<GenerateStats> {
        self.validate()?;
        let start_time = Instant::now();

        if self.config.output.exists() && !self.config.force {
            return Err(ScanError::InvalidConfiguration(format!(
                "{} already exists. Use --force to overwrite.",
                self.config.output.display()
            )));
        }

        let file = File::create(&self.config.output)?;
        let mut writer = BufWriter::with_capacity(BUF_SIZE, file);
        let stats = self.generate_into(&mut writer)?;
        writer.flush()?;

        log::info!(
            "Wrote {} ({} planted repeats)",
            self.config.output.display(),
            stats.planted.len()
        );

        Ok(GenerateStats {
            elapsed_secs: start_time.elapsed().as_secs_f64(),
            ..stats
        })
    }

    /// Generate FASTA into any writer.
    pub fn generate_into<W: Write>(&self, writer: &mut W) -> Result<GenerateStats> {
        self.validate()?;
        let c = &self.config;
        let mut rng = SmallRng::seed_from_u64(c.seed);
        let mut stats = GenerateStats::default();
        let mut seq = Vec::with_capacity(c.length as usize);

        for i in 0..c.sequences {
            let seq_id = format!("seq{}", i + 1);
            seq.clear();
            seq.extend((0..c.length).map(|_| random_background_base(&mut rng, c.n_rate)));

            self.plant_repeats(&mut rng, &seq_id, &mut seq, &mut stats.planted);

            writeln!(writer, ">{}", seq_id)?;
            for line in seq.chunks(c.line_width) {
                writer.write_all(line)?;
                writer.write_all(b"\n")?;
            }

            stats.sequences += 1;
            stats.bases += c.length;
        }

        Ok(stats)
    }

    fn plant_repeats(
        &self,
        rng: &mut SmallRng,
        seq_id: &str,
        seq: &mut [u8],
        planted: &mut Vec<RepeatRecord>,
    ) {
        let c = &self.config;
        if c.repeats == 0 {
            return;
        }
        let span = c.period as u64 * c.units;
        let slot = c.length / c.repeats as u64;

        for k in 0..c.repeats as u64 {
            let unit = random_primitive_unit(rng, c.period);
            let start = k * slot + rng.gen_range(0..=slot - span);
            let end = start + span;
            for (pos, base) in seq[start as usize..end as usize]
                .iter_mut()
                .zip(unit.iter().cycle())
            {
                *pos = *base;
            }
            planted.push(RepeatRecord::new(
                seq_id,
                start,
                end,
                String::from_utf8_lossy(&unit),
            ));
        }
    }
}

#[inline]
fn random_background_base(rng: &mut SmallRng, n_rate: f64) -> u8 {
    if n_rate > 0.0 && rng.gen_bool(n_rate) {
        b'N'
    } else {
        BASES[rng.gen_range(0..4)]
    }
}

/// Draw units until one is primitive. Any period > 1 has primitive units,
/// and most random draws already are.
fn random_primitive_unit(rng: &mut SmallRng, period: usize) -> Vec<u8> {
    loop {
        let unit: Vec<u8> = (0..period).map(|_| BASES[rng.gen_range(0..4)]).collect();
        if is_primitive(&unit) {
            return unit;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fasta::read_records;

    fn config(period: usize) -> GenerateConfig {
        GenerateConfig {
            sequences: 2,
            length: 1_000,
            period,
            units: 6,
            repeats: 5,
            n_rate: 0.01,
            line_width: 50,
            seed: 7,
            ..Default::default()
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let cmd = GenerateCommand::new(config(3));
        let mut a = Vec::new();
        let mut b = Vec::new();
        let stats_a = cmd.generate_into(&mut a).unwrap();
        let stats_b = cmd.generate_into(&mut b).unwrap();
        assert_eq!(a, b);
        assert_eq!(stats_a.planted, stats_b.planted);
    }

    #[test]
    fn test_planted_repeats_present() {
        let cmd = GenerateCommand::new(config(4));
        let mut out = Vec::new();
        let stats = cmd.generate_into(&mut out).unwrap();
        assert_eq!(stats.sequences, 2);
        assert_eq!(stats.bases, 2_000);
        assert_eq!(stats.planted.len(), 10);

        let records = read_records(out.as_slice()).unwrap();
        assert_eq!(records.len(), 2);
        for plant in &stats.planted {
            let (_, seq) = records.iter().find(|(id, _)| *id == plant.seq_id).unwrap();
            let region = &seq[plant.start as usize..plant.end as usize];
            let expected: Vec<u8> = plant.unit.bytes().cycle().take(region.len()).collect();
            assert_eq!(region, expected.as_slice());
            assert!(is_primitive(plant.unit.as_bytes()));
        }
    }

    #[test]
    fn test_line_width() {
        let cmd = GenerateCommand::new(config(2));
        let mut out = Vec::new();
        cmd.generate_into(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text
            .lines()
            .filter(|l| !l.starts_with('>'))
            .all(|l| l.len() <= 50));
    }

    #[test]
    fn test_repeats_must_fit() {
        let cmd = GenerateCommand::new(GenerateConfig {
            length: 100,
            repeats: 10,
            units: 10,
            period: 2,
            ..Default::default()
        });
        assert!(matches!(
            cmd.generate_into(&mut Vec::new()),
            Err(ScanError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut cfg = config(2);
        cfg.output = file.path().to_path_buf();
        assert!(GenerateCommand::new(cfg.clone()).run().is_err());

        cfg.force = true;
        let stats = GenerateCommand::new(cfg).run().unwrap();
        assert_eq!(stats.sequences, 2);
    }
}

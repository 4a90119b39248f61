//! repscan: streaming tandem repeat finder
//!
//! Usage: repscan <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process;

use repscan::commands::{GenerateCommand, GenerateConfig, ScanCommand};
use repscan::{config, logging, ScanConfig, ScanError};

#[derive(Parser)]
#[command(name = "repscan")]
#[command(version)]
#[command(about = "repscan: find non-degenerate tandem repeats in FASTA files", long_about = None)]
struct Cli {
    /// Log progress to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Treat lower-case (soft-masked) bases as their upper-case equivalents.
    /// By default bases are compared byte for byte, so `ac` does not extend
    /// a run of `AC`.
    #[arg(long, global = true)]
    ignore_case: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a FASTA file for tandem repeats
    Scan {
        /// Repeat unit length (1 finds homopolymers)
        #[arg(short = 'r', long)]
        period: usize,

        /// Minimum total repeat length in bases (must be >= period)
        #[arg(short = 'l', long)]
        min_length: u64,

        /// Input FASTA file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Omit the #repeat_length / #total_length header lines
        #[arg(long)]
        no_header: bool,

        /// Print scan statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Generate a synthetic FASTA file with planted repeats
    Generate {
        /// Output FASTA file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of sequences
        #[arg(long, default_value = "3")]
        sequences: usize,

        /// Length of each sequence
        #[arg(long, default_value = "100000")]
        length: u64,

        /// Period of planted repeats
        #[arg(short = 'r', long, default_value = "2")]
        period: usize,

        /// Copies of the unit in each planted repeat
        #[arg(long, default_value = "10")]
        units: u64,

        /// Planted repeats per sequence
        #[arg(long, default_value = "20")]
        repeats: usize,

        /// Probability that a background base is N
        #[arg(long, default_value = "0.001")]
        n_rate: f64,

        /// Bases per FASTA line
        #[arg(long, default_value = "60")]
        line_width: usize,

        /// Random seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Overwrite an existing output file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    logging::init_logger(cli.verbose);
    config::set_ignore_case(cli.ignore_case);

    let result = match cli.command {
        Commands::Scan {
            period,
            min_length,
            input,
            no_header,
            stats,
        } => run_scan(period, min_length, input, no_header, stats),
        Commands::Generate {
            output,
            sequences,
            length,
            period,
            units,
            repeats,
            n_rate,
            line_width,
            seed,
            force,
        } => run_generate(GenerateConfig {
            output,
            sequences,
            length,
            period,
            units,
            repeats,
            n_rate,
            line_width,
            seed,
            force,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_scan(
    period: usize,
    min_length: u64,
    input: Option<PathBuf>,
    no_header: bool,
    stats: bool,
) -> Result<(), ScanError> {
    let config = ScanConfig::new(period, min_length)?;
    let cmd = ScanCommand::new(config).with_header(!no_header);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let result = match input {
        Some(path) if path.as_os_str() != "-" => cmd.run(&path, &mut handle)?,
        _ => cmd.run_stdin(&mut handle)?,
    };

    if stats {
        eprintln!("Scan stats: {}", result);
    }

    Ok(())
}

fn run_generate(config: GenerateConfig) -> Result<(), ScanError> {
    let cmd = GenerateCommand::new(config);
    let stats = cmd.run()?;
    eprintln!("Generated {}", stats);
    Ok(())
}

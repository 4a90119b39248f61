//! Tests for the process-wide case folding switch.
//!
//! Soft-masked FASTA stores repeat-masked bases in lower case. By default
//! those bytes compare unequal to their upper-case forms; with case folding
//! enabled the reader upper-cases them before they reach the scanner.
//!
//! Note: Tests are run serially to avoid global config race conditions.

use repscan::commands::ScanCommand;
use repscan::{config, FastaReader, ScanConfig};
use serial_test::serial;

/// Reset config to default state before each test
fn reset_config() {
    config::set_ignore_case(false);
}

fn scan(period: usize, min_length: u64, fasta: &str) -> String {
    let cmd = ScanCommand::new(ScanConfig::new(period, min_length).unwrap()).with_header(false);
    let mut output = Vec::new();
    cmd.run_streaming(FastaReader::new(fasta.as_bytes()), &mut output)
        .unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
#[serial]
fn test_case_sensitive_by_default() {
    reset_config();

    assert!(!config::is_ignore_case());
    // The lower-case half breaks the AC run into two short pieces
    assert_eq!(scan(2, 6, ">a\nACACacac\n"), "");
    assert_eq!(scan(2, 4, ">a\nACACacac\n"), "a\t0\t4\tunit=AC\na\t4\t8\tunit=ac\n");
}

#[test]
#[serial]
fn test_ignore_case_joins_soft_masked_run() {
    reset_config();
    config::set_ignore_case(true);

    assert_eq!(scan(2, 6, ">a\nACACacac\n"), "a\t0\t8\tunit=AC\n");

    reset_config();
}

#[test]
#[serial]
fn test_ignore_case_reports_upper_case_unit() {
    reset_config();
    config::set_ignore_case(true);

    assert_eq!(scan(3, 9, ">a\ncagcagCAG\n"), "a\t0\t9\tunit=CAG\n");

    reset_config();
}

#[test]
#[serial]
fn test_lower_case_n_is_sentinel_in_both_modes() {
    reset_config();
    assert_eq!(
        scan(2, 4, ">a\nACACnACAC\n"),
        "a\t0\t4\tunit=AC\na\t5\t9\tunit=AC\n"
    );

    config::set_ignore_case(true);
    assert_eq!(
        scan(2, 4, ">a\nACACnACAC\n"),
        "a\t0\t4\tunit=AC\na\t5\t9\tunit=AC\n"
    );

    reset_config();
}

#[test]
#[serial]
fn test_explicit_reader_setting_overrides_global() {
    reset_config();
    config::set_ignore_case(true);

    let cmd = ScanCommand::new(ScanConfig::new(1, 4).unwrap()).with_header(false);
    let reader = FastaReader::new(">a\naaAA\n".as_bytes()).with_ignore_case(false);
    let mut output = Vec::new();
    cmd.run_streaming(reader, &mut output).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "");

    reset_config();
}

//! Test fixtures for the discharge reader
//!
//! Provides helpers that write small USGS-style discharge files to disk so
//! reader tests exercise the real file path.

use std::io::Write;
use tempfile::NamedTempFile;

mod clip_tests;

/// Standard comment block plus column-name and RDB format rows
pub const FILE_PREAMBLE: &str = "\
# ---------------------------------- WARNING ----------------------------------------\n\
# Data provided for site 03335000\n\
#\n\
agency_cd\tsite_no\tdatetime\tdischarge\tquality\n\
5s\t15s\t10d\t14n\t10s\n";

/// Write a discharge file with the standard preamble and the given data rows
pub fn write_discharge_file(rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    write!(file, "{}", FILE_PREAMBLE).expect("write preamble");
    for row in rows {
        writeln!(file, "{}", row).expect("write row");
    }
    file.flush().expect("flush temp file");
    file
}

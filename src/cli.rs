//! Command handler for the profcov CLI.
//!
//! The handler returns its output as a `String` so it can be tested without
//! capturing stdout.

use std::fmt::Write;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::convert;

pub fn cmd_convert(config: &Config) -> Result<String> {
    let (report, output_path) =
        convert::convert(config).context("Failed to convert coverage report")?;

    let mut out = String::new();
    writeln!(out, "Written to {}", output_path.display()).unwrap();
    writeln!(
        out,
        "Packages:   {}\nFiles:      {}",
        report.package_count(),
        report.class_count()
    )
    .unwrap();
    writeln!(
        out,
        "Lines:      {}/{} ({:.1}%)",
        report.root.total_line_hit_count(),
        report.root.active_line_count(),
        report.line_rate() * 100.0
    )
    .unwrap();
    if config.source_path.is_none() {
        writeln!(out, "No --source given: the report contains no files.").unwrap();
    }
    Ok(out)
}

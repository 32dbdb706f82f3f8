use std::path::Path;

use tracing::{debug, info};

use crate::config::{Config, InputMode};
use crate::error::Result;
use crate::generator;
use crate::package::PackageCoverage;
use crate::parsers::llvm_cov::LlvmCovParser;
use crate::parsers::Parser;
use crate::report::CoverageReport;

/// Fetch the `llvm-cov show` text for the configured input mode.
pub fn load_input(config: &Config) -> Result<String> {
    match &config.input {
        InputMode::LlvmCov { binary, profdata } => {
            generator::run_llvm_cov(&config.tool, binary, profdata)
        }
        InputMode::InputFile(path) => {
            debug!("Reading {}", path.display());
            Ok(std::fs::read_to_string(path)?)
        }
    }
}

/// Turn report text into a Cobertura report: parse, merge, build the tree.
pub fn build_report(text: &str, source_path: Option<&str>) -> Result<CoverageReport> {
    let classes = LlvmCovParser::new(source_path.map(str::to_string)).parse(text)?;
    debug!("Parsed {} files", classes.len());

    let root = PackageCoverage::build_tree(classes)?;
    Ok(CoverageReport::new(root, source_path.map(str::to_string)))
}

/// Run the whole conversion and write the report.
/// Returns the report that was written and where it went.
pub fn convert(config: &Config) -> Result<(CoverageReport, &Path)> {
    let text = load_input(config)?;
    let report = build_report(&text, config.source_path.as_deref())?;

    let output_path = config.output_path();
    report.write(output_path)?;
    info!("Written to {}", output_path.display());
    Ok((report, output_path))
}

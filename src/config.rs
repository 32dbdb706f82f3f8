//! Run configuration, resolved once from the command line and passed
//! explicitly to the generator, parser and report writer.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CoverageError, Result};

/// Where the report is written when no output path is given.
pub const DEFAULT_OUTPUT_PATH: &str = "coverage.xml";

/// Default command prefix for the coverage-report generator.
pub const DEFAULT_TOOL: &str = "xcrun llvm-cov";

/// Where the `llvm-cov show` text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Run the generator against an instrumented binary and its profile.
    LlvmCov { binary: PathBuf, profdata: PathBuf },
    /// Read previously captured generator output.
    InputFile(PathBuf),
}

impl InputMode {
    /// Exactly one of the two inputs must be given.
    pub fn resolve(
        llvm_cov: Option<(PathBuf, PathBuf)>,
        input_file: Option<PathBuf>,
    ) -> Result<Self> {
        match (llvm_cov, input_file) {
            (Some((binary, profdata)), None) => Ok(InputMode::LlvmCov { binary, profdata }),
            (None, Some(path)) => Ok(InputMode::InputFile(path)),
            (Some(_), Some(_)) => Err(CoverageError::Config(
                "either '--input-file' or '--llvm-cov' is required, but not both".to_string(),
            )),
            (None, None) => Err(CoverageError::Config(
                "either '--input-file' or '--llvm-cov' is required".to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input: InputMode,
    /// Source root; only files below it are reported.
    pub source_path: Option<String>,
    pub output_path: Option<PathBuf>,
    /// Generator command prefix, e.g. `["xcrun", "llvm-cov"]`.
    pub tool: Vec<String>,
    pub verbose: bool,
}

impl Config {
    pub fn new(input: InputMode) -> Self {
        Self {
            input,
            source_path: None,
            output_path: None,
            tool: split_tool(DEFAULT_TOOL),
            verbose: false,
        }
    }

    pub fn output_path(&self) -> &Path {
        self.output_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_PATH))
    }
}

/// Split a tool command line such as `"xcrun llvm-cov"` into words.
pub fn split_tool(tool: &str) -> Vec<String> {
    tool.split_whitespace().map(str::to_string).collect()
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.input {
            InputMode::LlvmCov { binary, profdata } => {
                writeln!(f, "  mode:        llvm-cov")?;
                writeln!(f, "  binary:      {}", binary.display())?;
                writeln!(f, "  profdata:    {}", profdata.display())?;
                writeln!(f, "  tool:        {}", self.tool.join(" "))?;
            }
            InputMode::InputFile(path) => {
                writeln!(f, "  mode:        input file")?;
                writeln!(f, "  input:       {}", path.display())?;
            }
        }
        writeln!(f, "  source:      {}", self.source_path.as_deref().unwrap_or(""))?;
        writeln!(f, "  output:      {}", self.output_path().display())?;
        write!(f, "  verbose:     {}", self.verbose)
    }
}

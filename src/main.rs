use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use profcov::cli;
use profcov::config::{self, Config, InputMode};

/// profcov: convert `llvm-cov show` output into a Cobertura XML report.
#[derive(Parser)]
#[command(name = "profcov", version, about)]
#[command(group(
    ArgGroup::new("input")
        .required(true)
        .args(["input_file", "llvm_cov"]),
))]
struct Cli {
    /// Previously captured `llvm-cov show` output.
    #[arg(long, value_name = "FILE")]
    input_file: Option<PathBuf>,

    /// Run llvm-cov against an instrumented binary and its profile data.
    #[arg(long, num_args = 2, value_names = ["BINARY", "PROFDATA"])]
    llvm_cov: Option<Vec<PathBuf>>,

    /// Source root. Only files below it are reported, relative to it.
    #[arg(long, value_name = "DIR")]
    source: Option<String>,

    /// Output file (default: ./coverage.xml).
    #[arg(long, short, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Command used to invoke llvm-cov.
    #[arg(long, default_value = config::DEFAULT_TOOL)]
    tool: String,

    /// Log progress details to stderr.
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let llvm_cov = self.llvm_cov.and_then(|paths| {
            let mut paths = paths.into_iter();
            Some((paths.next()?, paths.next()?))
        });
        let input = InputMode::resolve(llvm_cov, self.input_file)?;

        Ok(Config {
            input,
            source_path: self.source,
            output_path: self.output,
            tool: config::split_tool(&self.tool),
            verbose: self.verbose,
        })
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let config = args.into_config()?;
    if let Ok(dir) = std::env::current_dir() {
        debug!("Current directory={}", dir.display());
    }
    debug!("Configuration:\n{}", config);

    let out = cli::cmd_convert(&config)?;
    print!("{}", out);
    Ok(())
}

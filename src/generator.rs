//! Runs `llvm-cov show` and captures its output.
//!
//! The tool runs once, to completion, with both streams buffered. Anything
//! written to stderr is treated as failure and handed back line by line.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{CoverageError, Result};

/// Build the argument list for `<tool> show <binary> -instr-profile <profdata>`.
pub fn show_args(binary: &Path, profdata: &Path) -> Vec<String> {
    vec![
        "show".to_string(),
        binary.display().to_string(),
        "-instr-profile".to_string(),
        profdata.display().to_string(),
    ]
}

/// Run the generator and return its standard output.
///
/// `tool` is the command prefix, e.g. `["xcrun", "llvm-cov"]`.
pub fn run_llvm_cov(tool: &[String], binary: &Path, profdata: &Path) -> Result<String> {
    let (program, prefix) = tool.split_first().ok_or_else(|| {
        CoverageError::Config("coverage tool command is empty".to_string())
    })?;
    let args: Vec<String> = prefix
        .iter()
        .cloned()
        .chain(show_args(binary, profdata))
        .collect();

    debug!("Launch: {} {}", program, args.join(" "));
    let output = Command::new(program)
        .args(&args)
        .output()
        .map_err(|source| CoverageError::Spawn {
            program: program.clone(),
            source,
        })?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return Err(CoverageError::Generator {
            diagnostics: stderr.lines().map(str::to_string).collect(),
        });
    }
    if !output.status.success() {
        return Err(CoverageError::Generator {
            diagnostics: vec![format!("{} exited with {}", program, output.status)],
        });
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| {
        CoverageError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })?;
    debug!("Success with {} bytes of output", stdout.len());
    Ok(stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_show_args() {
        let args = show_args(Path::new("build/App"), Path::new("App.profdata"));
        assert_eq!(args, ["show", "build/App", "-instr-profile", "App.profdata"]);
    }

    #[test]
    fn test_empty_tool_is_config_error() {
        let err = run_llvm_cov(&[], Path::new("a"), Path::new("b")).unwrap_err();
        assert!(matches!(err, CoverageError::Config(_)));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let err = run_llvm_cov(
            &tool(&["profcov-no-such-tool-for-tests"]),
            Path::new("a"),
            Path::new("b"),
        )
        .unwrap_err();
        assert!(matches!(err, CoverageError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_stdout_is_captured() {
        // `echo` stands in for the generator and prints its arguments.
        let out = run_llvm_cov(&tool(&["echo"]), Path::new("App"), Path::new("App.profdata"))
            .unwrap();
        assert_eq!(out.trim_end(), "show App -instr-profile App.profdata");
    }

    #[cfg(unix)]
    #[test]
    fn test_stderr_lines_are_returned() {
        let err = run_llvm_cov(
            &tool(&["sh", "-c", "echo 'error: no profile' >&2; echo 'second line' >&2", "sh"]),
            Path::new("App"),
            Path::new("App.profdata"),
        )
        .unwrap_err();
        match err {
            CoverageError::Generator { diagnostics } => {
                assert_eq!(diagnostics, ["error: no profile", "second line"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_without_stderr() {
        let err = run_llvm_cov(&tool(&["false"]), Path::new("App"), Path::new("App.profdata"))
            .unwrap_err();
        assert!(matches!(err, CoverageError::Generator { .. }));
    }
}

/// Parser for the text output of `llvm-cov show`.
///
/// The output is one block per source file:
///
///   /absolute/path/to/File.m:
///         |    1|#import "File.h"
///        3|    2|int f(void) {
///        0|    3|  return 0;
///
/// Every block header starts a line with `/`, so blocks are split on
/// `"\n/"`. Only files below the configured source root are kept; their
/// paths are made relative to that root.
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::{ClassCoverage, PATH_SEPARATOR};
use crate::parsers::Parser;

const BLOCK_SEPARATOR: &str = "\n/";

pub struct LlvmCovParser {
    source_path: Option<String>,
}

impl LlvmCovParser {
    pub fn new(source_path: Option<String>) -> Self {
        Self { source_path }
    }
}

impl Parser for LlvmCovParser {
    fn parse(&self, input: &str) -> Result<Vec<ClassCoverage>> {
        Ok(parse(input, self.source_path.as_deref()))
    }
}

/// Split `input` into per-file records. Without a source root nothing is
/// kept, so system and library code never leaks into a report.
pub fn parse(input: &str, source_path: Option<&str>) -> Vec<ClassCoverage> {
    let blocks: Vec<&str> = input.split(BLOCK_SEPARATOR).collect();
    debug!("Processing {} separate files", blocks.len());

    let Some(source_path) = source_path else {
        warn!("No source root configured; the report will contain no files");
        return Vec::new();
    };

    let mut classes = Vec::new();
    for block in blocks {
        let mut lines = block.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l));
        let header = lines.next().unwrap_or_default();
        let header = if header.starts_with(PATH_SEPARATOR) {
            header.to_string()
        } else {
            format!("{PATH_SEPARATOR}{header}")
        };
        debug!("Checking {}", header);

        let Some(path) = relative_to_source_root(&header, source_path) else {
            continue;
        };
        debug!("Processing {}", header);

        let mut raw_lines: Vec<String> = lines.map(str::to_string).collect();
        // Trailing blank lines only separate blocks or end the input.
        while raw_lines.last().is_some_and(|l| l.trim().is_empty()) {
            raw_lines.pop();
        }
        classes.push(ClassCoverage::new(path, raw_lines));
    }
    classes
}

/// Strip the source root, the separator after it and the `:` that ends a
/// file header. `None` when the header is outside the root or names no
/// file.
fn relative_to_source_root<'a>(header: &'a str, source_path: &str) -> Option<&'a str> {
    let root = source_path.trim_end_matches(PATH_SEPARATOR);
    let rest = header.strip_prefix(root)?.strip_prefix(PATH_SEPARATOR)?;
    let rest = rest.strip_suffix(':').unwrap_or(rest);
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

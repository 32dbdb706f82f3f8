//! Parser for a single annotated line of `llvm-cov show` output.
//!
//! Each line has three `|`-separated columns:
//!
//!   <hits>|<line number>|<source text>
//!
//! The hit column is blank for lines that are not executable. Only the
//! first two separators are significant; any `|` in the source text is kept.

/// Width of the hit-count column when a line is re-rendered.
pub const HIT_COLUMN_WIDTH: usize = 7;

const COLUMN_SEPARATOR: char = '|';

/// One parsed line. Borrows the columns from the raw line so the source
/// text can be re-emitted unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord<'a> {
    /// Execution count, or `None` for a non-executable (or malformed) line.
    pub hit_count: Option<u64>,
    /// Line number embedded in the report; 0 when it does not parse.
    pub line_number: u32,
    /// The line-number column exactly as it appeared, padding included.
    pub line_column: &'a str,
    /// Everything after the second separator.
    pub code: &'a str,
}

impl<'a> LineRecord<'a> {
    pub fn parse(line: &'a str) -> Self {
        let mut columns = line.splitn(3, COLUMN_SEPARATOR);
        let hit_column = columns.next().unwrap_or("");
        let line_column = columns.next().unwrap_or("");
        let code = columns.next().unwrap_or("");

        Self {
            // Counts are never negative; anything else is not an annotation.
            hit_count: hit_column.trim().parse::<u64>().ok(),
            line_number: line_column.trim().parse::<u32>().unwrap_or(0),
            line_column,
            code,
        }
    }

    /// Render this line again with a different hit count, keeping the
    /// line-number column and source text untouched.
    #[must_use]
    pub fn with_hit_count(&self, hit_count: Option<u64>) -> String {
        let hits = hit_count.map(|h| h.to_string()).unwrap_or_default();
        format!(
            "{hits:<width$}{sep}{}{sep}{}",
            self.line_column,
            self.code,
            width = HIT_COLUMN_WIDTH,
            sep = COLUMN_SEPARATOR,
        )
    }
}

/// Shorthand for the hit count of a raw line.
pub fn hit_count(line: &str) -> Option<u64> {
    LineRecord::parse(line).hit_count
}

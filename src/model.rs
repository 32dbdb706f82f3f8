//! Per-file coverage record built from one block of `llvm-cov show` output.
//! A `ClassCoverage` is the unit that gets merged, grouped into packages and
//! emitted as a Cobertura `<class>` element.

use std::cmp::Ordering;

use crate::error::{CoverageError, Result};
use crate::line::{self, LineRecord};
use crate::xml::XmlNode;

/// Separator used both in report paths and in package names.
pub const PATH_SEPARATOR: char = '/';

/// Compute a coverage rate, returning 0.0 when the total is zero.
#[must_use]
pub fn rate(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        covered as f64 / total as f64
    }
}

/// Render a rate for an XML attribute as plain decimal text. Always keeps a
/// fractional part so whole numbers come out as `0.0` / `1.0`.
#[must_use]
pub fn format_rate(value: f64) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Coverage for one logical source file.
///
/// Identity is the path alone: two records with the same path compare equal
/// regardless of their lines, which is what lets duplicates be merged.
#[derive(Debug, Clone)]
pub struct ClassCoverage {
    path: String,
    path_components: Vec<String>,
    filename: Option<String>,
    raw_lines: Vec<String>,
    total_line_hit_count: u64,
    line_hits: Vec<(usize, u64)>,
}

impl ClassCoverage {
    pub fn new(path: impl Into<String>, raw_lines: Vec<String>) -> Self {
        let path = path.into();
        let mut components: Vec<String> =
            path.split(PATH_SEPARATOR).map(str::to_string).collect();
        if components.first().is_some_and(|c| c.is_empty()) {
            components.remove(0);
        }
        let filename = components.pop();

        let mut coverage = Self {
            path,
            path_components: components,
            filename,
            raw_lines,
            total_line_hit_count: 0,
            line_hits: Vec::new(),
        };
        coverage.process_lines();
        coverage
    }

    fn process_lines(&mut self) {
        self.line_hits = self
            .raw_lines
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| line::hit_count(raw).map(|hits| (index, hits)))
            .collect();
        self.total_line_hit_count = self.line_hits.iter().filter(|(_, h)| *h > 0).count() as u64;
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Directory components, without a leading empty component for
    /// absolute paths and without the file name.
    pub fn path_components(&self) -> &[String] {
        &self.path_components
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }

    /// `(line index, hits)` for every executable line, in line order.
    /// The index is the 0-based position in the block, not the embedded
    /// line number.
    pub fn line_hits(&self) -> &[(usize, u64)] {
        &self.line_hits
    }

    pub fn active_line_count(&self) -> u64 {
        self.line_hits.len() as u64
    }

    pub fn total_line_hit_count(&self) -> u64 {
        self.total_line_hit_count
    }

    #[must_use]
    pub fn line_rate(&self) -> f64 {
        rate(self.total_line_hit_count, self.active_line_count())
    }

    /// Not available in line-coverage output.
    pub fn branch_rate(&self) -> f64 {
        0.0
    }

    /// Not available in line-coverage output.
    pub fn complexity(&self) -> f64 {
        0.0
    }

    /// Combine two reports for the same file, summing hit counts line by
    /// line. Lines are matched by position, so both sides must have the
    /// same number of lines. A line that is executable on only one side
    /// keeps that side's count; a line executable on neither stays
    /// non-executable.
    pub fn merge(&self, other: &ClassCoverage) -> Result<ClassCoverage> {
        if self.raw_lines.len() != other.raw_lines.len() {
            return Err(CoverageError::LineCountMismatch {
                path: self.path.clone(),
                left: self.raw_lines.len(),
                right: other.raw_lines.len(),
            });
        }

        let raw_lines = self
            .raw_lines
            .iter()
            .zip(&other.raw_lines)
            .map(|(mine, theirs)| {
                let record = LineRecord::parse(mine);
                let combined = match (record.hit_count, line::hit_count(theirs)) {
                    (Some(a), Some(b)) => Some(a.saturating_add(b)),
                    (Some(a), None) => Some(a),
                    (None, Some(b)) => Some(b),
                    (None, None) => None,
                };
                record.with_hit_count(combined)
            })
            .collect();

        Ok(ClassCoverage::new(self.path.clone(), raw_lines))
    }

    /// Build the `<class>` element with its `<lines>`.
    pub fn to_xml(&self) -> XmlNode {
        let mut class = XmlNode::new("class")
            .with_attr("branch-rate", format_rate(self.branch_rate()))
            .with_attr("complexity", format_rate(self.complexity()))
            .with_attr("line-rate", format_rate(self.line_rate()))
            .with_attr("filename", self.path.as_str());
        if let Some(filename) = &self.filename {
            class = class.with_attr("name", filename.as_str());
        }

        let lines = class.append(XmlNode::new("lines"));
        for (index, hits) in &self.line_hits {
            lines.append(
                XmlNode::new("line")
                    .with_attr("branch", "false")
                    .with_attr("hits", hits.to_string())
                    .with_attr("number", (index + 1).to_string()),
            );
        }
        class
    }
}

impl PartialEq for ClassCoverage {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ClassCoverage {}

impl PartialOrd for ClassCoverage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ClassCoverage {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

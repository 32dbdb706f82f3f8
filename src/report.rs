//! Cobertura document assembly and output.

use std::io::Write;
use std::path::Path;

use chrono::Utc;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::model::format_rate;
use crate::package::PackageCoverage;
use crate::xml::{self, XmlNode};

pub const COBERTURA_DOCTYPE: &str =
    r#"coverage SYSTEM "http://cobertura.sourceforge.net/xml/coverage-03.dtd""#;

/// Value of the `version` attribute on `<coverage>`.
pub const TOOL_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));

/// A complete report: the package tree plus document-level metadata.
#[derive(Debug, Clone)]
pub struct CoverageReport {
    pub root: PackageCoverage,
    pub source_path: Option<String>,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

impl CoverageReport {
    pub fn new(root: PackageCoverage, source_path: Option<String>) -> Self {
        let timestamp = Utc::now().timestamp_millis() as f64 / 1000.0;
        Self {
            root,
            source_path,
            timestamp,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    #[must_use]
    pub fn line_rate(&self) -> f64 {
        self.root.line_rate()
    }

    pub fn package_count(&self) -> usize {
        self.root.walk().len()
    }

    pub fn class_count(&self) -> usize {
        self.root.class_count()
    }

    /// Build the `<coverage>` element. Every package of the tree is emitted
    /// as a direct child of `<packages>`, in pre-order.
    pub fn to_xml(&self) -> XmlNode {
        let mut coverage = XmlNode::new("coverage")
            .with_attr("branch-rate", format_rate(self.root.branch_rate()))
            .with_attr("line-rate", format_rate(self.line_rate()))
            .with_attr("timestamp", format_rate(self.timestamp))
            .with_attr("version", TOOL_VERSION);

        if let Some(source_path) = &self.source_path {
            coverage
                .append(XmlNode::new("sources"))
                .append(XmlNode::new("source").with_text(source_path.as_str()));
        }

        let packages = coverage.append(XmlNode::new("packages"));
        for package in self.root.walk() {
            packages.append(package.to_xml());
        }
        coverage
    }

    pub fn to_document(&self) -> Result<String> {
        xml::to_document(&self.to_xml(), Some(COBERTURA_DOCTYPE))
    }

    /// Write the document to `path`. The content goes to a temporary file
    /// in the same directory first and is then renamed over the target.
    pub fn write(&self, path: &Path) -> Result<()> {
        let document = self.to_document()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(document.as_bytes())?;
        file.flush()?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

pub mod llvm_cov;

use crate::error::Result;
use crate::model::ClassCoverage;

/// Every report parser implements this trait.
pub trait Parser {
    /// Parse a complete report into per-file coverage records, in report order.
    fn parse(&self, input: &str) -> Result<Vec<ClassCoverage>>;
}

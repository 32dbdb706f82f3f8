use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Coverage generator failed:\n{}", .diagnostics.join("\n"))]
    Generator { diagnostics: Vec<String> },

    #[error(
        "Cannot merge coverage for '{path}': line counts differ ({left} vs {right})"
    )]
    LineCountMismatch {
        path: String,
        left: usize,
        right: usize,
    },

    #[error("Package tree construction failed: {0}")]
    TreeConstruction(String),
}

pub type Result<T> = std::result::Result<T, CoverageError>;

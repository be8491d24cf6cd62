//! Error types for stylesheet processing

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for stylesheet operations
pub type Result<T> = std::result::Result<T, StyleError>;

/// Which lightningcss pass failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssStage {
    Parse,
    Transform,
    Print,
}

impl fmt::Display for CssStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CssStage::Parse => write!(f, "parse"),
            CssStage::Transform => write!(f, "transform"),
            CssStage::Print => write!(f, "print"),
        }
    }
}

/// Errors produced while turning Sass into CSS artifacts
#[derive(Debug, Error)]
pub enum StyleError {
    /// The Sass entry file does not exist
    #[error("Sass entry not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    /// Sass compilation failed (syntax error, undefined variable, missing import, ...)
    #[error("{message}")]
    Sass { file: PathBuf, message: String },

    /// lightningcss rejected the compiled CSS
    #[error("Failed to {stage} CSS from {file}: {message}")]
    Css {
        file: String,
        stage: CssStage,
        message: String,
    },

    /// A browserslist query could not be resolved
    #[error("Invalid browser query {query:?}: {message}")]
    Targets { query: String, message: String },

    /// Compatibility floor string was not recognised
    #[error("Unknown compatibility level '{0}' (expected e.g. 'ie10' or '*')")]
    InvalidCompatibility(String),

    /// Source map serialisation failed
    #[error("Failed to generate CSS source map: {0}")]
    SourceMap(String),
}

impl StyleError {
    pub(crate) fn css(file: &str, stage: CssStage, message: impl fmt::Display) -> Self {
        Self::Css {
            file: file.to_string(),
            stage,
            message: message.to_string(),
        }
    }
}

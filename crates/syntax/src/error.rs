use thiserror::Error;

/// Result type for syntax operations
pub type Result<T> = std::result::Result<T, SyntaxError>;

/// Errors that can occur while parsing Go source
#[derive(Error, Debug)]
pub enum SyntaxError {
    /// The source does not parse; position is 1-based
    #[error("{line}:{column}: syntax error near `{snippet}`")]
    Parse {
        line: usize,
        column: usize,
        snippet: String,
    },

    /// No `package` clause at the top of the file
    #[error("missing package clause")]
    MissingPackage,

    /// Unsupported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Tree-sitter error
    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),
}

impl SyntaxError {
    /// Create a parse error at a 0-based tree-sitter position
    pub fn parse_at(point: tree_sitter::Point, snippet: impl Into<String>) -> Self {
        Self::Parse {
            line: point.row + 1,
            column: point.column + 1,
            snippet: snippet.into(),
        }
    }

    /// Create an unsupported language error
    pub fn unsupported_language(lang: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(lang.into())
    }

    /// Create a tree-sitter error
    pub fn tree_sitter(msg: impl Into<String>) -> Self {
        Self::TreeSitterError(msg.into())
    }
}

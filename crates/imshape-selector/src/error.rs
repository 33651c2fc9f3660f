//! Error types for imshape-selector
//!
//! A query either fails to parse ([`ParseError`]) or parses but cannot be
//! evaluated, usually because it asks for a tie group that does not exist
//! ([`SelectionError`]). A direction predicate applied to an element
//! without a direction is not an error. Rejected tolerances and frames
//! are [`ConfigError`]s.

use thiserror::Error;

/// Syntax errors in a query string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Query is empty or only whitespace
    #[error("Empty selector query")]
    Empty,

    /// Query ended where an operand, axis or bracket was expected
    #[error("Unexpected end of query at position {position}")]
    UnexpectedEnd { position: usize },

    /// Token that does not fit the grammar
    #[error("Unexpected token '{found}' at position {position}")]
    UnexpectedToken { position: usize, found: String },

    /// Group index that does not fit in a usize
    #[error("Invalid group index '{text}' at position {position}")]
    InvalidIndex { position: usize, text: String },

    /// Parentheses, `not` or chained operators nest too deeply
    #[error("Query nested deeper than {limit} levels at position {position}")]
    TooDeep { position: usize, limit: usize },
}

/// Errors raised while evaluating a well-formed query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// Requested tie group does not exist
    #[error("Group index {index} out of range for '{predicate}' ({groups} groups)")]
    GroupIndexOutOfRange {
        index: usize,
        groups: usize,
        predicate: String,
    },

    /// Expression tree deeper than the evaluator accepts
    #[error("Expression depth {depth} exceeds the limit of {limit}")]
    TooDeep { depth: usize, limit: usize },
}

/// Errors loading or validating a configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main error type for selector operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] ParseError),

    #[error("Selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SelectorError {
    /// Check if this is a syntax error
    pub fn is_syntax(&self) -> bool {
        matches!(self, SelectorError::Syntax(_))
    }

    /// Check if this is an evaluation error
    pub fn is_selection(&self) -> bool {
        matches!(self, SelectorError::Selection(_))
    }
}

/// Result type alias for selector operations
pub type SelectorResult<T> = Result<T, SelectorError>;

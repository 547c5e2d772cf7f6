// Error types

use thiserror::Error;

/// Syntax fault raised by the lexer/parser layer. Fail-fast: the first
/// error aborts the whole parse, no recovery is attempted and no partial
/// tree is ever handed to the adaptation layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at position {position}: {message}")]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// Adaptation fault raised by a factory when a syntactically valid parse
/// tree violates an invariant this layer relies on, or when a dialect
/// forbids a construct the grammar accepts (e.g. Oracle `varchar` with no
/// length). Never retried, never downgraded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot adapt {construct}: {message}")]
pub struct AdaptError {
    /// Grammar construct the fault was detected in, e.g. `data_type`.
    pub construct: &'static str,
    pub message: String,
}

impl AdaptError {
    pub fn new(construct: &'static str, message: impl Into<String>) -> Self {
        Self {
            construct,
            message: message.into(),
        }
    }
}

/// Umbrella error returned by the front-end facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrontendError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Adapt(#[from] AdaptError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_display_includes_position() {
        let err = SyntaxError::new("unexpected token ','", 17);
        assert_eq!(
            err.to_string(),
            "syntax error at position 17: unexpected token ','"
        );
    }

    #[test]
    fn adapt_error_display_names_construct() {
        let err = AdaptError::new("data_type", "varchar requires a length");
        assert_eq!(
            err.to_string(),
            "cannot adapt data_type: varchar requires a length"
        );
    }
}

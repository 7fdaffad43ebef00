//! Search error types.

use super::literal::LiteralError;

/// Errors raised while building or running a search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The text query is not a term, a list or a tuple
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The date query is not a date, a window or a list of those
    #[error("invalid date format: {0}")]
    InvalidDateFormat(String),
}

impl SearchError {
    pub(crate) fn query_syntax(err: LiteralError) -> Self {
        SearchError::InvalidQuery(err.to_string())
    }

    pub(crate) fn date_syntax(err: LiteralError) -> Self {
        SearchError::InvalidDateFormat(err.to_string())
    }
}

//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! They are distinct from fetch/IO errors.

use chrono::NaiveDate;

/// Domain-level errors for record validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Event ends before it starts
    #[error("invalid period: {end} is before {start}")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },
}

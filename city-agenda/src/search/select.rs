//! Combining the text and date filters.

use tracing::debug;

use crate::domain::Event;

use super::period::{DateQuery, filter_by_period};
use super::query::{Query, evaluate};

/// Narrow `events` by an optional text query, then an optional date query.
///
/// With a date query the result is ordered by closeness to the queried
/// dates; otherwise pool order is kept.
pub fn select_events<'a>(
    events: &[&'a Event],
    query: Option<&Query>,
    dates: Option<&DateQuery>,
) -> Vec<&'a Event> {
    let matched = match query {
        Some(q) => {
            let matched = evaluate(q, events);
            debug!(query = %q, before = events.len(), after = matched.len(), "applied text query");
            matched
        }
        None => events.to_vec(),
    };

    match dates {
        Some(d) => filter_by_period(&matched, d),
        None => matched,
    }
}

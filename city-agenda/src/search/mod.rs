//! Event search.
//!
//! Three independent filters over in-memory collections:
//! - proximity: stations and parking lots around an event,
//! - text queries over event names, venues and districts,
//! - date queries ranking events by closeness to a date.

mod config;
mod error;
mod literal;
mod period;
mod proximity;
mod query;
mod ranked;
mod select;

pub use config::{DEFAULT_RADIUS_KM, DEFAULT_STATION_CAP, SearchConfig};
pub use error::SearchError;
pub use literal::{Literal, LiteralError};
pub use period::{
    Closeness, DateQuery, DateSpec, filter_by_period, parse_date, rank_by_period, score_overlap,
};
pub use proximity::{
    nearby, nearby_matching, parking_nearby, stations_with_bikes, stations_with_slots,
};
pub use query::{Query, evaluate, evaluate_observed};
pub use ranked::RankedList;
pub use select::select_events;

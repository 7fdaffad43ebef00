//! City agenda search.
//!
//! Fetches Barcelona's cultural agenda together with Bicing station status
//! and public parking lots, narrows the events by text and date queries,
//! and lists for each event the stations and car parks within walking
//! distance.

pub mod domain;
pub mod feeds;
pub mod report;
pub mod search;
pub mod text;

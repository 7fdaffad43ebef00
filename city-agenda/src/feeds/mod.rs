//! Barcelona open-data feeds.
//!
//! Three XML documents are fetched once per run:
//! - Bicing station status (free docks and bikes per station),
//! - the public parking lot listing,
//! - the cultural agenda.
//!
//! Any fetch or decode failure is fatal for the run; individual malformed
//! rows are skipped with a warning.

mod client;
mod convert;
mod error;
mod types;

pub use client::{
    DEFAULT_EVENTS_URL, DEFAULT_PARKINGS_URL, DEFAULT_STATIONS_URL, FeedClient, FeedConfig, Feeds,
};
pub use convert::{ConversionError, convert_event, convert_parking, convert_station};
pub use error::FeedError;
pub use types::{
    EventDto, InterestInfo, InterestItem, ListingDocument, ParkingDto, StationDto,
    StationsDocument,
};

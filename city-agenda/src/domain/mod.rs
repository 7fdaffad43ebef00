//! Domain types for the city agenda.
//!
//! Records are built once per run from the open-data feeds and are
//! read-only afterwards. Validation happens at construction time so the
//! search code can trust what it receives.

mod coord;
mod error;
mod event;
mod parking;
mod station;

pub use coord::{Coord, EARTH_RADIUS_KM, Located, haversine};
pub use error::DomainError;
pub use event::{DATE_FORMAT, Event, EventCatalog, EventPeriod};
pub use parking::ParkingLot;
pub use station::{Station, StationStatus};

//! Report view models.

use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use crate::domain::{Event, ParkingLot, Station};
use crate::search::{SearchConfig, parking_nearby, stations_with_bikes, stations_with_slots};

/// One table row: an event and what is around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRow {
    pub name: String,
    pub venue: String,
    pub address: String,
    pub district: String,
    pub dates: String,
    pub interest_info: Option<String>,
    /// Stations where a bike can be left, closest first.
    pub stations_with_slots: Vec<String>,
    /// Stations where a bike can be taken, closest first.
    pub stations_with_bikes: Vec<String>,
    pub parkings: Vec<String>,
}

impl EventRow {
    /// Build the row for `event`, looking up nearby amenities.
    ///
    /// Events without a position get empty amenity lists.
    pub fn build(
        event: &Event,
        stations: &[Station],
        parkings: &[ParkingLot],
        config: &SearchConfig,
    ) -> Self {
        let (with_slots, with_bikes, lots) = if event.has_location() {
            let at = &event.coord;
            (
                to_strings(stations_with_slots(at, stations, config)),
                to_strings(stations_with_bikes(at, stations, config)),
                to_strings(parking_nearby(at, parkings, config)),
            )
        } else {
            Default::default()
        };

        Self {
            name: event.name.clone(),
            venue: event.venue.clone(),
            address: event.address.clone(),
            district: event.district.clone(),
            dates: event.period.to_string(),
            interest_info: event.interest_info.clone(),
            stations_with_slots: with_slots,
            stations_with_bikes: with_bikes,
            parkings: lots,
        }
    }
}

fn to_strings<T: ToString>(items: Vec<&T>) -> Vec<String> {
    items.into_iter().map(ToString::to_string).collect()
}

/// Everything rendered for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// The text query, as the user wrote it.
    pub query: Option<String>,
    /// The date query, as the user wrote it.
    pub dates: Option<String>,
    pub radius_km: f64,
    pub rows: Vec<EventRow>,
}

impl Report {
    /// Build one row per event, in the given order.
    pub fn build(
        events: &[&Event],
        stations: &[Station],
        parkings: &[ParkingLot],
        config: &SearchConfig,
    ) -> Self {
        let started = Instant::now();
        let rows: Vec<EventRow> = events
            .iter()
            .map(|event| EventRow::build(event, stations, parkings, config))
            .collect();
        debug!(
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "built report rows"
        );

        Self {
            query: None,
            dates: None,
            radius_km: config.radius_km,
            rows,
        }
    }

    /// Record the text query shown in the report header.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Record the date query shown in the report header.
    pub fn with_dates(mut self, dates: impl Into<String>) -> Self {
        self.dates = Some(dates.into());
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//! Bicing station records.

use std::fmt;

use super::coord::{Coord, Located};

/// Operational status reported by the Bicing feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationStatus {
    /// `OPN` in the feed.
    Open,
    /// `CLS` in the feed.
    Closed,
    /// Any other code, kept verbatim.
    Other(String),
}

impl StationStatus {
    /// Parse a feed status code. Never fails; unknown codes are kept as `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "OPN" => StationStatus::Open,
            "CLS" => StationStatus::Closed,
            other => StationStatus::Other(other.to_string()),
        }
    }
}

/// A bike-share station with its current occupancy.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: u32,
    pub street: String,
    pub street_number: Option<String>,
    pub coord: Coord,
    pub status: StationStatus,
    /// Free docks.
    pub slots: u32,
    /// Available bikes.
    pub bikes: u32,
}

impl Station {
    pub fn is_open(&self) -> bool {
        self.status == StationStatus::Open
    }

    /// Whether at least one dock is free.
    pub fn has_slots(&self) -> bool {
        self.slots > 0
    }

    /// Whether at least one bike can be picked up.
    pub fn has_bikes(&self) -> bool {
        self.bikes > 0
    }

    /// Open and with a free dock to leave a bike.
    pub fn can_drop_off(&self) -> bool {
        self.is_open() && self.has_slots()
    }

    /// Open and with a bike to pick up.
    pub fn can_pick_up(&self) -> bool {
        self.is_open() && self.has_bikes()
    }
}

impl Located for Station {
    fn coord(&self) -> Coord {
        self.coord
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let number = self
            .street_number
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("S/N");
        write!(
            f,
            "{} - {}, {} ({} slots | {} bikes)",
            self.id, self.street, number, self.slots, self.bikes
        )
    }
}

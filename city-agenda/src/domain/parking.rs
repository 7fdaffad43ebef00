//! Public parking lots.

use std::fmt;

use super::coord::{Coord, Located};

/// A parking lot from the city's open-data listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingLot {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub coord: Coord,
}

impl Located for ParkingLot {
    fn coord(&self) -> Coord {
        self.coord
    }
}

impl fmt::Display for ParkingLot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.address)
    }
}

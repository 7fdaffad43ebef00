//! Search configuration for amenity lookups.

/// Default search radius around an event, in kilometres.
pub const DEFAULT_RADIUS_KM: f64 = 0.5;

/// Default number of stations listed per event.
pub const DEFAULT_STATION_CAP: usize = 5;

/// Configuration parameters for the proximity search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum distance from the event, in kilometres.
    pub radius_km: f64,

    /// Stop scanning stations once this many are found.
    /// `None` scans the whole feed.
    pub station_cap: Option<usize>,

    /// Same as `station_cap`, for parking lots.
    pub parking_cap: Option<usize>,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(radius_km: f64, station_cap: Option<usize>, parking_cap: Option<usize>) -> Self {
        Self {
            radius_km,
            station_cap,
            parking_cap,
        }
    }

    /// Set the search radius.
    pub fn with_radius(mut self, radius_km: f64) -> Self {
        self.radius_km = radius_km;
        self
    }

    /// Set the station cap.
    pub fn with_station_cap(mut self, cap: Option<usize>) -> Self {
        self.station_cap = cap;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_km: DEFAULT_RADIUS_KM,
            station_cap: Some(DEFAULT_STATION_CAP),
            parking_cap: None,
        }
    }
}

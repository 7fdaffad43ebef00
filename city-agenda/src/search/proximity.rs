//! Amenities near a point.

use tracing::trace;

use crate::domain::{Coord, Located, ParkingLot, Station};

use super::config::SearchConfig;
use super::ranked::RankedList;

/// Candidates within `radius_km` of `point`, closest first.
///
/// Candidates are scanned in input order. With `cap = Some(k)` the scan
/// stops as soon as `k` candidates within the radius have been found, so
/// the result is the first `k` matches of the feed sorted by distance, not
/// necessarily the `k` nearest overall. Without a cap every candidate is
/// considered and the result does not depend on input order (ties aside).
pub fn nearby<'a, T, I>(point: &Coord, candidates: I, radius_km: f64, cap: Option<usize>) -> Vec<&'a T>
where
    T: Located + 'a,
    I: IntoIterator<Item = &'a T>,
{
    nearby_matching(point, candidates, radius_km, cap, |_| true)
}

/// Like [`nearby`], but only candidates passing `keep` are considered.
///
/// Rejected candidates never count toward the cap.
pub fn nearby_matching<'a, T, I, F>(
    point: &Coord,
    candidates: I,
    radius_km: f64,
    cap: Option<usize>,
    keep: F,
) -> Vec<&'a T>
where
    T: Located + 'a,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> bool,
{
    let mut found = RankedList::new();
    let mut scanned = 0usize;

    for candidate in candidates {
        if cap.is_some_and(|c| found.len() >= c) {
            break;
        }
        scanned += 1;
        if !keep(candidate) {
            continue;
        }
        let distance = point.distance_to(&candidate.coord());
        if distance <= radius_km {
            found.insert(distance, candidate);
        }
    }

    trace!(%point, radius_km, scanned, found = found.len(), "proximity scan");
    found.into_payloads()
}

/// Open stations with a free dock near `point`.
pub fn stations_with_slots<'a>(
    point: &Coord,
    stations: &'a [Station],
    config: &SearchConfig,
) -> Vec<&'a Station> {
    nearby_matching(
        point,
        stations,
        config.radius_km,
        config.station_cap,
        Station::can_drop_off,
    )
}

/// Open stations with a bike available near `point`.
pub fn stations_with_bikes<'a>(
    point: &Coord,
    stations: &'a [Station],
    config: &SearchConfig,
) -> Vec<&'a Station> {
    nearby_matching(
        point,
        stations,
        config.radius_km,
        config.station_cap,
        Station::can_pick_up,
    )
}

/// Parking lots near `point`.
pub fn parking_nearby<'a>(
    point: &Coord,
    lots: &'a [ParkingLot],
    config: &SearchConfig,
) -> Vec<&'a ParkingLot> {
    nearby(point, lots, config.radius_km, config.parking_cap)
}

//! Conversion from feed DTOs to domain types.
//!
//! Each record is built from a fixed list of fields, each with its own
//! parser. Rows that fail validation are logged and skipped so a single
//! bad entry does not take down a whole feed.

use chrono::NaiveDate;
use tracing::warn;

use crate::domain::{
    Coord, DATE_FORMAT, DomainError, Event, EventPeriod, ParkingLot, Station, StationStatus,
};

use super::types::{EventDto, InterestInfo, ParkingDto, StationDto};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing or empty required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A numeric field did not parse
    #[error("invalid number in {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A date field did not parse
    #[error("invalid date in {field}: {value:?}")]
    InvalidDate { field: &'static str, value: String },

    /// The dates do not form a valid period
    #[error(transparent)]
    InvalidPeriod(#[from] DomainError),
}

/// The trimmed value of a field, treating empty text as absent.
fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, ConversionError> {
    text(value).ok_or(ConversionError::MissingField(field))
}

fn number<T: std::str::FromStr>(value: &Option<String>, field: &'static str) -> Result<T, ConversionError> {
    let raw = required(value, field)?;
    raw.parse().map_err(|_| ConversionError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

fn date(value: &str, field: &'static str) -> Result<NaiveDate, ConversionError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ConversionError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Convert one `<station>` element.
pub fn convert_station(dto: &StationDto) -> Result<Station, ConversionError> {
    Ok(Station {
        id: number(&dto.id, "id")?,
        street: required(&dto.street, "street")?.to_string(),
        street_number: text(&dto.street_number).map(str::to_string),
        coord: Coord::new(number(&dto.lat, "lat")?, number(&dto.long, "long")?),
        status: StationStatus::parse(required(&dto.status, "status")?),
        slots: number(&dto.slots, "slots")?,
        bikes: number(&dto.bikes, "bikes")?,
    })
}

/// Convert one parking lot item.
pub fn convert_parking(dto: &ParkingDto) -> Result<ParkingLot, ConversionError> {
    Ok(ParkingLot {
        id: number(&dto.id, "id")?,
        name: required(&dto.name, "name")?.to_string(),
        address: text(&dto.address).unwrap_or_default().to_string(),
        coord: Coord::new(number(&dto.gmapx, "gmapx")?, number(&dto.gmapy, "gmapy")?),
    })
}

/// Convert one agenda item.
///
/// Events without readable coordinates are placed at `(0, 0)`. Events without any
/// date are permanent; events with only one date last that single day.
pub fn convert_event(dto: &EventDto) -> Result<Event, ConversionError> {
    let coord = match (number(&dto.gmapx, "gmapx"), number(&dto.gmapy, "gmapy")) {
        (Ok(lat), Ok(lon)) => Coord::new(lat, lon),
        (Err(ConversionError::MissingField(_)), _) | (_, Err(ConversionError::MissingField(_))) => {
            Coord::default()
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(event = ?dto.name, error = %e, "unreadable coordinates, placing event at (0, 0)");
            Coord::default()
        }
    };

    let begin = text(&dto.begindate).map(|d| date(d, "begindate")).transpose()?;
    let end = text(&dto.enddate).map(|d| date(d, "enddate")).transpose()?;
    let period = match (begin, end) {
        (Some(start), Some(end)) => EventPeriod::range(start, end)?,
        (Some(day), None) | (None, Some(day)) => EventPeriod::single(day),
        (None, None) => EventPeriod::permanent(),
    };

    Ok(Event {
        name: required(&dto.name, "name")?.to_string(),
        venue: text(&dto.institutionname).unwrap_or_default().to_string(),
        district: text(&dto.district).unwrap_or_default().to_string(),
        address: text(&dto.address).unwrap_or_default().to_string(),
        coord,
        period,
        interest_info: dto.interestinfo.as_ref().and_then(interest_info),
    })
}

/// `"label: value"` from the first interest item.
fn interest_info(info: &InterestInfo) -> Option<String> {
    let first = info.item.first()?;
    match (text(&first.label), text(&first.interinfo)) {
        (Some(label), Some(value)) => Some(format!("{label}: {value}")),
        (None, Some(value)) => Some(value.to_string()),
        (Some(label), None) => Some(label.to_string()),
        (None, None) => None,
    }
}

/// Convert every item, skipping the ones that fail.
pub fn convert_all<D, T>(
    feed: &'static str,
    dtos: impl IntoIterator<Item = D>,
    convert: impl Fn(&D) -> Result<T, ConversionError>,
) -> Vec<T> {
    let mut out = Vec::new();
    for (idx, dto) in dtos.into_iter().enumerate() {
        match convert(&dto) {
            Ok(record) => out.push(record),
            Err(e) => warn!(feed, row = idx, error = %e, "skipping malformed row"),
        }
    }
    out
}

//! Cultural agenda events.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;

use super::coord::{Coord, Located};
use super::error::DomainError;

/// Display and parse format for agenda dates.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Closed date interval during which an event runs.
///
/// Permanent events (exhibitions without an end, for instance) span
/// `[NaiveDate::MIN, NaiveDate::MAX]` so they overlap every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl EventPeriod {
    /// A one-day event.
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// An event running from `start` to `end`, both inclusive.
    pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// An event with no date bounds.
    pub fn permanent() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn is_permanent(&self) -> bool {
        self.start == NaiveDate::MIN
    }
}

impl fmt::Display for EventPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_permanent() {
            f.write_str("permanent")
        } else if self.start == self.end {
            write!(f, "{}", self.start.format(DATE_FORMAT))
        } else {
            write!(
                f,
                "{} - {}",
                self.start.format(DATE_FORMAT),
                self.end.format(DATE_FORMAT)
            )
        }
    }
}

/// An event from the cultural agenda.
///
/// Two events are the same event when they share name, venue and period;
/// address, coordinates and interest info do not take part in identity.
#[derive(Debug, Clone)]
pub struct Event {
    pub name: String,
    pub venue: String,
    pub district: String,
    pub address: String,
    /// `(0, 0)` when the feed has no position for the event.
    pub coord: Coord,
    pub period: EventPeriod,
    /// Free text such as `"Preu: Gratuït"`.
    pub interest_info: Option<String>,
}

impl Event {
    fn identity(&self) -> (&str, &str, NaiveDate, NaiveDate) {
        (
            &self.name,
            &self.venue,
            self.period.start(),
            self.period.end(),
        )
    }

    /// The fields free-text queries are matched against, joined with `|`.
    pub fn search_text(&self) -> String {
        format!("{}|{}|{}", self.name, self.venue, self.district)
    }

    /// Whether the feed gave this event a real position.
    pub fn has_location(&self) -> bool {
        self.coord != Coord::default()
    }
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Event {}

impl Hash for Event {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl Located for Event {
    fn coord(&self) -> Coord {
        self.coord
    }
}

/// Events deduplicated by identity, in feed order.
///
/// The agenda lists some events once per session or per address; the
/// first occurrence is kept.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        let mut seen = HashSet::new();
        let events = events
            .into_iter()
            .filter(|e| seen.insert(e.clone()))
            .collect();
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Borrowed view of every event, suitable as a query pool.
    pub fn pool(&self) -> Vec<&Event> {
        self.events.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

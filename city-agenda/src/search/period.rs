//! Date queries over events.
//!
//! A date query selects the events running on a date or within a window
//! around it, and ranks them by how close they are to that date.

use std::fmt;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::domain::{DATE_FORMAT, Event};

use super::error::SearchError;
use super::literal::Literal;
use super::ranked::RankedList;

/// How close an event is to the queried date.
///
/// Permanent events always overlap and always rank after dated ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Closeness {
    /// Days between the anchor and the nearer end of the event.
    Days(i64),
    Permanent,
}

impl fmt::Display for Closeness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Closeness::Days(d) => write!(f, "{d} days"),
            Closeness::Permanent => f.write_str("permanent"),
        }
    }
}

/// A date, or a window of days around an anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpec {
    anchor: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpec {
    /// Exactly one day.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            anchor: date,
            start: date,
            end: date,
        }
    }

    /// The days from `anchor + from_days` to `anchor + to_days`, inclusive.
    ///
    /// Offsets are taken as given: a reversed window (`from_days > to_days`)
    /// still overlaps any event spanning both of its ends.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidDateFormat`] if either end falls outside the
    /// calendar.
    pub fn window(anchor: NaiveDate, from_days: i64, to_days: i64) -> Result<Self, SearchError> {
        let out_of_range = || {
            SearchError::InvalidDateFormat(format!(
                "window ({}, {from_days}, {to_days}) is out of range",
                anchor.format(DATE_FORMAT)
            ))
        };
        Ok(Self {
            anchor,
            start: shift(anchor, from_days).ok_or_else(out_of_range)?,
            end: shift(anchor, to_days).ok_or_else(out_of_range)?,
        })
    }

    /// Parse a single spec: `dd/mm/yyyy` or `(dd/mm/yyyy, from, to)`.
    pub fn parse(input: &str) -> Result<Self, SearchError> {
        let literal = Literal::parse(input).map_err(SearchError::date_syntax)?;
        Self::from_literal(&literal)
    }

    pub fn from_literal(literal: &Literal) -> Result<Self, SearchError> {
        match literal {
            Literal::Str(s) => parse_date(s).map(Self::on),
            Literal::Tuple(items) => match items.as_slice() {
                [Literal::Str(date), Literal::Int(from), Literal::Int(to)] => {
                    Self::window(parse_date(date)?, *from, *to)
                }
                _ => Err(SearchError::InvalidDateFormat(format!(
                    "expected (date, from_days, to_days), found {literal}"
                ))),
            },
            other => Err(SearchError::InvalidDateFormat(format!(
                "expected a date or a (date, from_days, to_days) window, found {} {other}",
                other.kind()
            ))),
        }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

impl fmt::Display for DateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.anchor && self.end == self.anchor {
            write!(f, "{}", self.anchor.format(DATE_FORMAT))
        } else {
            write!(
                f,
                "{} ({} - {})",
                self.anchor.format(DATE_FORMAT),
                self.start.format(DATE_FORMAT),
                self.end.format(DATE_FORMAT)
            )
        }
    }
}

/// One spec, or several of which any may match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateQuery {
    Single(DateSpec),
    AnyOf(Vec<DateSpec>),
}

impl DateQuery {
    /// Parse the command-line syntax: a spec, or a list of specs.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidDateFormat`] for syntax errors, unparseable
    /// dates, malformed windows or nested lists.
    pub fn parse(input: &str) -> Result<Self, SearchError> {
        let literal = Literal::parse(input).map_err(SearchError::date_syntax)?;
        match &literal {
            Literal::List(items) => items
                .iter()
                .map(DateSpec::from_literal)
                .collect::<Result<_, _>>()
                .map(DateQuery::AnyOf),
            other => DateSpec::from_literal(other).map(DateQuery::Single),
        }
    }
}

/// Parse `dd/mm/yyyy`, falling back to ISO `yyyy-mm-dd`.
pub fn parse_date(s: &str) -> Result<NaiveDate, SearchError> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .map_err(|_| SearchError::InvalidDateFormat(s.to_string()))
}

fn shift(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    let delta = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(delta)
    } else {
        date.checked_sub_days(delta)
    }
}

/// Score an event against a spec.
///
/// Returns the closeness and whether the event overlaps the spec's
/// window at all. The closeness of a non-overlapping event is still
/// computed but carries no meaning for filtering.
pub fn score_overlap(event: &Event, spec: &DateSpec) -> (Closeness, bool) {
    let period = &event.period;
    let overlaps = spec.start <= period.end() && spec.end >= period.start();

    if overlaps && period.is_permanent() {
        return (Closeness::Permanent, true);
    }

    let to_start = (spec.anchor - period.start()).num_days().abs();
    let to_end = (spec.anchor - period.end()).num_days().abs();
    (Closeness::Days(to_start.min(to_end)), overlaps)
}

/// Best closeness of `event` over the overlapping specs, if any overlaps.
fn best_score(event: &Event, query: &DateQuery) -> Option<Closeness> {
    match query {
        DateQuery::Single(spec) => match score_overlap(event, spec) {
            (score, true) => Some(score),
            (_, false) => None,
        },
        DateQuery::AnyOf(specs) => specs
            .iter()
            .map(|spec| score_overlap(event, spec))
            .filter(|(_, overlaps)| *overlaps)
            .map(|(score, _)| score)
            .min(),
    }
}

/// Overlapping events paired with their closeness, closest first.
pub fn rank_by_period<'a>(events: &[&'a Event], query: &DateQuery) -> RankedList<Closeness, &'a Event> {
    let ranked: RankedList<_, _> = events
        .iter()
        .filter_map(|event| best_score(event, query).map(|score| (score, *event)))
        .collect();
    debug!(
        candidates = events.len(),
        kept = ranked.len(),
        "filtered events by period"
    );
    ranked
}

/// Events overlapping `query`, closest first, permanent events last.
pub fn filter_by_period<'a>(events: &[&'a Event], query: &DateQuery) -> Vec<&'a Event> {
    rank_by_period(events, query).into_payloads()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, EventPeriod};

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn event(name: &str, period: EventPeriod) -> Event {
        Event {
            name: name.to_string(),
            venue: "Venue".to_string(),
            district: "Eixample".to_string(),
            address: String::new(),
            coord: Coord::default(),
            period,
            interest_info: None,
        }
    }

    fn single(name: &str, d: &str) -> Event {
        event(name, EventPeriod::single(date(d)))
    }

    fn range(name: &str, start: &str, end: &str) -> Event {
        event(name, EventPeriod::range(date(start), date(end)).unwrap())
    }

    #[test]
    fn parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_date("01/03/2024").unwrap(), expected);
        assert_eq!(parse_date("2024-03-01").unwrap(), expected);
        assert!(matches!(
            parse_date("32/01/2024"),
            Err(SearchError::InvalidDateFormat(_))
        ));
    }

    #[test]
    fn parse_single_and_window() {
        assert_eq!(
            DateQuery::parse("01/03/2024").unwrap(),
            DateQuery::Single(DateSpec::on(date("01/03/2024")))
        );

        let DateQuery::Single(spec) = DateQuery::parse("(10/03/2024, -2, 3)").unwrap() else {
            panic!("expected a single spec");
        };
        assert_eq!(spec.anchor(), date("10/03/2024"));
        assert_eq!(spec.start(), date("08/03/2024"));
        assert_eq!(spec.end(), date("13/03/2024"));
    }

    #[test]
    fn parse_list() {
        let query = DateQuery::parse("[01/03/2024, (10/03/2024, 0, 1)]").unwrap();
        let DateQuery::AnyOf(specs) = query else {
            panic!("expected a list");
        };
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[1].end(), date("11/03/2024"));
    }

    #[test]
    fn parse_rejects_malformed_specs() {
        for input in [
            "3",
            "(01/03/2024, 1)",
            "(01/03/2024, 'a', 2)",
            "[[01/03/2024]]",
            "not-a-date",
            "[01/03/2024",
        ] {
            assert!(
                matches!(DateQuery::parse(input), Err(SearchError::InvalidDateFormat(_))),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn window_out_of_calendar_is_rejected() {
        let err = DateSpec::window(date("01/03/2024"), 0, i64::MAX).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn display_spec() {
        assert_eq!(DateSpec::on(date("01/03/2024")).to_string(), "01/03/2024");
        assert_eq!(
            DateSpec::window(date("10/03/2024"), -1, 1)
                .unwrap()
                .to_string(),
            "10/03/2024 (09/03/2024 - 11/03/2024)"
        );
    }

    #[test]
    fn same_day_overlaps_with_zero_score() {
        let e = single("Concert", "01/03/2024");
        let spec = DateSpec::parse("2024-03-01").unwrap();
        assert_eq!(score_overlap(&e, &spec), (Closeness::Days(0), true));
    }

    #[test]
    fn score_is_distance_to_nearer_end() {
        let e = range("Expo", "01/03/2024", "31/03/2024");

        let spec = DateSpec::on(date("05/03/2024"));
        assert_eq!(score_overlap(&e, &spec), (Closeness::Days(4), true));

        let spec = DateSpec::on(date("29/03/2024"));
        assert_eq!(score_overlap(&e, &spec), (Closeness::Days(2), true));
    }

    #[test]
    fn no_overlap_outside_window() {
        let e = single("Concert", "01/03/2024");

        let (_, overlaps) = score_overlap(&e, &DateSpec::on(date("02/03/2024")));
        assert!(!overlaps);

        let window = DateSpec::window(date("05/03/2024"), -4, 0).unwrap();
        assert_eq!(score_overlap(&e, &window), (Closeness::Days(4), true));

        let window = DateSpec::window(date("05/03/2024"), -3, 0).unwrap();
        assert!(!score_overlap(&e, &window).1);
    }

    #[test]
    fn reversed_window_scores_against_long_event() {
        let spec = DateSpec::window(date("10/03/2024"), 5, -5).unwrap();
        assert_eq!(spec.start(), date("15/03/2024"));
        assert_eq!(spec.end(), date("05/03/2024"));

        let month = range("Festival", "01/03/2024", "31/03/2024");
        assert_eq!(score_overlap(&month, &spec), (Closeness::Days(9), true));

        let inside = single("Concert", "10/03/2024");
        assert!(!score_overlap(&inside, &spec).1);

        assert_eq!(
            DateQuery::parse("(10/03/2024, 5, -5)").unwrap(),
            DateQuery::Single(spec)
        );
    }

    #[test]
    fn permanent_always_overlaps_and_sorts_last() {
        let permanent = event("Col·lecció", EventPeriod::permanent());
        for d in ["01/01/1900", "01/03/2024", "31/12/2999"] {
            assert_eq!(
                score_overlap(&permanent, &DateSpec::on(date(d))),
                (Closeness::Permanent, true)
            );
        }

        let far = range("Long expo", "01/01/2020", "31/12/2030");
        let near = single("Concert", "01/03/2024");
        let pool = vec![&permanent, &far, &near];

        let result = filter_by_period(&pool, &DateQuery::Single(DateSpec::on(date("01/03/2024"))));
        let names: Vec<&str> = result.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Concert", "Long expo", "Col·lecció"]);
    }

    #[test]
    fn single_spec_drops_non_overlapping_and_ranks() {
        let a = single("A", "03/03/2024");
        let b = single("B", "10/03/2024");
        let c = single("C", "01/03/2024");
        let pool = vec![&a, &b, &c];
        let query = DateQuery::Single(DateSpec::window(date("02/03/2024"), -1, 3).unwrap());

        let result = filter_by_period(&pool, &query);
        let names: Vec<&str> = result.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"A"));
        assert!(names.contains(&"C"));
    }

    #[test]
    fn any_of_keeps_event_with_second_window_score() {
        let e = single("Concert", "20/03/2024");
        let pool = vec![&e];
        let query = DateQuery::AnyOf(vec![
            DateSpec::window(date("01/03/2024"), 0, 2).unwrap(),
            DateSpec::window(date("18/03/2024"), 0, 5).unwrap(),
        ]);

        let ranked = rank_by_period(&pool, &query);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked.keys().next(), Some(&Closeness::Days(2)));
    }

    #[test]
    fn any_of_takes_minimum_over_overlapping_specs() {
        let e = range("Expo", "01/03/2024", "31/03/2024");
        let query = DateQuery::AnyOf(vec![
            DateSpec::on(date("10/03/2024")),
            DateSpec::on(date("02/03/2024")),
            DateSpec::on(date("01/05/2024")),
        ]);
        assert_eq!(best_score(&e, &query), Some(Closeness::Days(1)));
    }

    #[test]
    fn any_of_drops_events_matching_nothing() {
        let e = single("Concert", "20/03/2024");
        let pool = vec![&e];
        let query = DateQuery::AnyOf(vec![DateSpec::on(date("01/03/2024"))]);
        assert!(filter_by_period(&pool, &query).is_empty());
        assert!(filter_by_period(&pool, &DateQuery::AnyOf(vec![])).is_empty());
    }

    #[test]
    fn closeness_ordering() {
        assert!(Closeness::Days(0) < Closeness::Days(1));
        assert!(Closeness::Days(i64::MAX) < Closeness::Permanent);
        assert_eq!(Closeness::Days(3).to_string(), "3 days");
    }
}

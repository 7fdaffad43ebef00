//! Boolean text queries over events.
//!
//! A query is a term, a conjunction or a disjunction, nested to any
//! depth. On the command line lists are conjunctions and tuples are
//! disjunctions:
//!
//! ```text
//! ['cinema', 'gràcia']             cinema AND gràcia
//! ('teatre', 'cinema')             teatre OR cinema
//! [('teatre', 'dansa'), 'sants']   (teatre OR dansa) AND sants
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::domain::Event;
use crate::text::contains_folded;

use super::error::SearchError;
use super::literal::Literal;

/// A text query over event name, venue and district.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Accent- and case-insensitive substring.
    Term(String),
    /// Every sub-query must match.
    All(Vec<Query>),
    /// At least one sub-query must match.
    Any(Vec<Query>),
}

impl Query {
    /// Parse the command-line syntax.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] on a syntax error or when an
    /// element is neither a string, a list nor a tuple.
    pub fn parse(input: &str) -> Result<Self, SearchError> {
        let literal = Literal::parse(input).map_err(SearchError::query_syntax)?;
        Self::from_literal(literal)
    }

    /// Build a query from an already parsed literal.
    pub fn from_literal(literal: Literal) -> Result<Self, SearchError> {
        match literal {
            Literal::Str(term) => Ok(Query::Term(term)),
            Literal::List(items) => items
                .into_iter()
                .map(Self::from_literal)
                .collect::<Result<_, _>>()
                .map(Query::All),
            Literal::Tuple(items) => items
                .into_iter()
                .map(Self::from_literal)
                .collect::<Result<_, _>>()
                .map(Query::Any),
            other @ Literal::Int(_) => Err(SearchError::InvalidQuery(format!(
                "expected a string, list or tuple, found {} {other}",
                other.kind()
            ))),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Query], sep: &str) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{item}")?;
            }
            Ok(())
        }

        match self {
            Query::Term(t) => write!(f, "'{t}'"),
            Query::All(items) => {
                f.write_str("[")?;
                join(f, items, ", ")?;
                f.write_str("]")
            }
            Query::Any(items) => {
                f.write_str("(")?;
                join(f, items, ", ")?;
                f.write_str(")")
            }
        }
    }
}

/// Events in `pool` matching `query`, in pool order.
pub fn evaluate<'a>(query: &Query, pool: &[&'a Event]) -> Vec<&'a Event> {
    evaluate_observed(query, pool, &mut |_, _, _| {})
}

/// Like [`evaluate`], reporting every term evaluation to `observer` as
/// `(term, pool the term was matched against, matches)`.
///
/// A disjunction matches each branch against the pool minus what earlier
/// branches already matched, so an event matching several branches is
/// only ever seen by the first of them. The result is the same as a plain
/// OR; only the per-branch pools differ.
pub fn evaluate_observed<'a, F>(query: &Query, pool: &[&'a Event], observer: &mut F) -> Vec<&'a Event>
where
    F: FnMut(&str, &[&'a Event], &[&'a Event]),
{
    match query {
        Query::Term(term) => {
            let matches: Vec<&Event> = pool
                .iter()
                .copied()
                .filter(|e| contains_folded(&e.search_text(), term))
                .collect();
            observer(term.as_str(), pool, matches.as_slice());
            matches
        }
        Query::All(items) => {
            let mut current = pool.to_vec();
            for item in items {
                current = evaluate_observed(item, &current, observer);
            }
            current
        }
        Query::Any(items) => {
            let mut matched: HashSet<&Event> = HashSet::new();
            for item in items {
                let remaining: Vec<&Event> = pool
                    .iter()
                    .copied()
                    .filter(|e| !matched.contains(e))
                    .collect();
                matched.extend(evaluate_observed(item, &remaining, observer));
            }
            // Restore pool order.
            pool.iter().copied().filter(|e| matched.contains(e)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coord, EventPeriod};
    use chrono::NaiveDate;

    fn event(name: &str, venue: &str, district: &str) -> Event {
        Event {
            name: name.to_string(),
            venue: venue.to_string(),
            district: district.to_string(),
            address: String::new(),
            coord: Coord::default(),
            period: EventPeriod::single(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            interest_info: None,
        }
    }

    fn names(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.name.clone()).collect()
    }

    fn sample() -> Vec<Event> {
        vec![
            event("Cicle de cinema", "Cines Verdi", "Gràcia"),
            event("Cinema a la fresca", "Montjuïc", "Sants-Montjuïc"),
            event("Teatre de titelles", "Sala Fènix", "Gràcia"),
            event("Teatre i cinema mut", "Filmoteca", "Ciutat Vella"),
            event("Concert", "Sala Apolo", "Sants-Montjuïc"),
        ]
    }

    #[test]
    fn parse_term_list_tuple() {
        assert_eq!(Query::parse("'cinema'").unwrap(), Query::Term("cinema".into()));
        assert_eq!(
            Query::parse("['cinema', ('teatre', 'dansa')]").unwrap(),
            Query::All(vec![
                Query::Term("cinema".into()),
                Query::Any(vec![
                    Query::Term("teatre".into()),
                    Query::Term("dansa".into())
                ]),
            ])
        );
    }

    #[test]
    fn parse_rejects_integers() {
        let err = Query::parse("['cinema', 3]").unwrap_err();
        assert!(matches!(err, SearchError::InvalidQuery(_)));
        assert!(err.to_string().contains("integer 3"));
    }

    #[test]
    fn parse_rejects_bad_syntax() {
        assert!(matches!(
            Query::parse("['cinema'"),
            Err(SearchError::InvalidQuery(_))
        ));
        assert!(matches!(Query::parse(""), Err(SearchError::InvalidQuery(_))));
    }

    #[test]
    fn display() {
        let q = Query::parse("[cinema, (teatre, dansa)]").unwrap();
        assert_eq!(q.to_string(), "['cinema', ('teatre', 'dansa')]");
    }

    #[test]
    fn term_matches_name_venue_or_district() {
        let events = sample();
        let pool: Vec<&Event> = events.iter().collect();

        let by_name = evaluate(&Query::Term("titelles".into()), &pool);
        assert_eq!(names(&by_name), vec!["Teatre de titelles"]);

        let by_venue = evaluate(&Query::Term("apolo".into()), &pool);
        assert_eq!(names(&by_venue), vec!["Concert"]);

        let by_district = evaluate(&Query::Term("ciutat vella".into()), &pool);
        assert_eq!(names(&by_district), vec!["Teatre i cinema mut"]);
    }

    #[test]
    fn term_ignores_accents_and_case() {
        let events = sample();
        let pool: Vec<&Event> = events.iter().collect();

        let result = evaluate(&Query::Term("GRACIA".into()), &pool);
        assert_eq!(result.len(), 2);

        let result = evaluate(&Query::Term("montjuic".into()), &pool);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn conjunction_is_intersection() {
        let events = sample();
        let pool: Vec<&Event> = events.iter().collect();
        let query = Query::parse("['cinema', 'gràcia']").unwrap();

        let result = evaluate(&query, &pool);

        let cinema = evaluate(&Query::Term("cinema".into()), &pool);
        let gracia = evaluate(&Query::Term("gràcia".into()), &pool);
        let expected: Vec<&Event> = cinema.into_iter().filter(|e| gracia.contains(e)).collect();
        assert_eq!(result, expected);
        assert_eq!(names(&result), vec!["Cicle de cinema"]);
    }

    #[test]
    fn empty_conjunction_keeps_pool() {
        let events = sample();
        let pool: Vec<&Event> = events.iter().collect();
        assert_eq!(evaluate(&Query::All(vec![]), &pool).len(), 5);
        assert!(evaluate(&Query::Any(vec![]), &pool).is_empty());
    }

    #[test]
    fn disjunction_is_union_in_pool_order() {
        let events = sample();
        let pool: Vec<&Event> = events.iter().collect();
        let query = Query::parse("('concert', 'titelles')").unwrap();

        let result = evaluate(&query, &pool);
        assert_eq!(names(&result), vec!["Teatre de titelles", "Concert"]);
    }

    #[test]
    fn disjunction_over_full_agenda() {
        let events: Vec<Event> = (0..5000)
            .map(|i| {
                let venue = if i % 2 == 0 { "Sala Parell" } else { "Sala Senar" };
                let district = if i % 3 == 0 { "Gràcia" } else { "Sants" };
                event(&format!("Acte {i}"), venue, district)
            })
            .collect();
        let pool: Vec<&Event> = events.iter().collect();
        let query = Query::parse("('parell', 'gracia')").unwrap();

        let result = evaluate(&query, &pool);

        let expected: Vec<&Event> = events
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 0 || i % 3 == 0)
            .map(|(_, e)| e)
            .collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn disjunction_first_branch_consumes_shared_matches() {
        let events = sample();
        let pool: Vec<&Event> = events.iter().collect();
        let query = Query::parse("('teatre', 'cinema')").unwrap();

        let mut seen: Vec<(String, Vec<String>, Vec<String>)> = Vec::new();
        let result = evaluate_observed(&query, &pool, &mut |term, pool, matches| {
            seen.push((term.to_string(), names(pool), names(matches)));
        });

        // "Teatre i cinema mut" matches both branches but appears once.
        let both = "Teatre i cinema mut".to_string();
        assert_eq!(result.iter().filter(|e| e.name == both).count(), 1);
        assert_eq!(result.len(), 4);

        assert_eq!(seen.len(), 2);
        let (first_term, first_pool, first_matches) = &seen[0];
        assert_eq!(first_term, "teatre");
        assert_eq!(first_pool.len(), 5);
        assert!(first_matches.contains(&both));

        let (second_term, second_pool, second_matches) = &seen[1];
        assert_eq!(second_term, "cinema");
        assert_eq!(second_pool.len(), 3);
        assert!(!second_pool.contains(&both));
        assert!(!second_matches.contains(&both));
    }

    #[test]
    fn nested_query() {
        let events = sample();
        let pool: Vec<&Event> = events.iter().collect();
        let query = Query::parse("[('teatre', 'concert'), 'sants']").unwrap();

        let result = evaluate(&query, &pool);
        assert_eq!(names(&result), vec!["Concert"]);
    }
}

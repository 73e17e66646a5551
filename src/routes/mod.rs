use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, rejection::QueryRejection},
};
use chrono::NaiveDate;

use crate::reports::window::DATE_FORMAT;
use crate::state::AppState;

pub mod customers;
pub mod dashboard;
pub mod entries;
pub mod payments;

/// Assemble the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(dashboard::router(state.clone()))
        .merge(customers::router(state.clone()))
        .merge(entries::router(state.clone()))
        .merge(payments::router(state))
}

/// Unwrap a query-string extraction, treating a string the extractor rejects
/// (repeated keys, undecodable values) as no filters at all. Filters never
/// fail a request.
pub(crate) fn lenient_query<T: Default>(query: Result<Query<T>, QueryRejection>) -> T {
    query.map(|Query(query)| query).unwrap_or_default()
}

/// Parse an id filter value. Blank or non-numeric ids are dropped, never
/// errors.
pub(crate) fn parse_id(raw: Option<&str>) -> Option<i32> {
    raw?.trim().parse().ok()
}

/// Normalize a free-text filter value: trimmed, with blanks collapsed to
/// absent. No vocabulary check happens here; an unknown value simply matches
/// nothing.
pub(crate) fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_filter_drops_garbage() {
        assert_eq!(parse_id(None), None);
        assert_eq!(parse_id(Some("")), None);
        assert_eq!(parse_id(Some("abc")), None);
        assert_eq!(parse_id(Some("12.5")), None);
        assert_eq!(parse_id(Some(" 12 ")), Some(12));
    }

    #[test]
    fn text_filter_keeps_unknown_values() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(Some(" cow ")), Some("cow".to_string()));
        // Unknown vocabulary passes through untouched.
        assert_eq!(non_empty(Some("goat")), Some("goat".to_string()));
    }
}

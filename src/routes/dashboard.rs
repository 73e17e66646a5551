use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        customer_repo,
        entry_repo::{self, EntryFilter},
    },
    error::AppError,
    reports::{DailyTotals, EntryRow, EntryTotals, dashboard::DashboardReport, parse_filter_date},
    state::AppState,
};

use super::customers::CustomerResponse;
use super::{format_date, lenient_query, parse_id};

#[derive(Debug, Default, Deserialize)]
struct DashboardQuery {
    from_date: Option<String>,
    to_date: Option<String>,
    customer: Option<String>,
}

#[derive(Debug, Serialize)]
struct DashboardResponse {
    entries: Vec<EntryRow>,
    totals: EntryTotals,
    daily_summary: Vec<DailyTotals>,
    from_date: Option<String>,
    to_date: Option<String>,
    selected_customer: Option<i32>,
    customers: Vec<CustomerResponse>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().route("/", get(dashboard)).with_state(state)
}

/// Today's activity, or a filtered slice of the ledger when any filter
/// survives parsing.
async fn dashboard(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
) -> Result<Json<DashboardResponse>, AppError> {
    let query = lenient_query(query);
    let customer_id = parse_id(query.customer.as_deref());
    let from = parse_filter_date(query.from_date.as_deref());
    let to = parse_filter_date(query.to_date.as_deref());

    // With no surviving filter the dashboard narrows to today only.
    let (date_from, date_to) = if customer_id.is_none() && from.is_none() && to.is_none() {
        let today = Local::now().date_naive();
        (Some(today), Some(today))
    } else {
        (from, to)
    };

    let filter = EntryFilter {
        customer_id,
        date_from,
        date_to,
        ..EntryFilter::default()
    };
    let entries = entry_repo::list_filtered(&state.db, &filter).await?;
    let report = DashboardReport::build(&entries);
    let customers = customer_repo::list(&state.db).await?;

    Ok(Json(DashboardResponse {
        entries: report.entries,
        totals: report.totals,
        daily_summary: report.daily_summary,
        from_date: date_from.map(format_date),
        to_date: date_to.map(format_date),
        selected_customer: customer_id,
        customers: customers.iter().map(CustomerResponse::from).collect(),
    }))
}

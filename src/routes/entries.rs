use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::Redirect,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        customer_repo,
        entities::{customer, milk_entry},
        entry_repo::{self, EntryFilter},
    },
    error::AppError,
    forms::EntryForm,
    reports::{EntryRow, EntryTotals, parse_filter_date},
    state::AppState,
};

use super::customers::CustomerResponse;
use super::{format_date, lenient_query, non_empty, parse_id};

/// Ledger page size.
const PAGE_SIZE: usize = 20;

#[derive(Debug, Default, Deserialize)]
struct EntryListQuery {
    customer: Option<String>,
    from_date: Option<String>,
    to_date: Option<String>,
    milk_type: Option<String>,
    shift: Option<String>,
    page: Option<String>,
}

#[derive(Debug, Serialize)]
struct EntryListResponse {
    entries: Vec<EntryRow>,
    page: usize,
    total_pages: usize,
    totals: EntryTotals,
    customers: Vec<CustomerResponse>,
    selected_customer: Option<i32>,
    from_date: Option<String>,
    to_date: Option<String>,
    selected_milk_type: Option<String>,
    selected_shift: Option<String>,
}

#[derive(Debug, Serialize)]
struct EntryFormContext {
    initial: Option<EntryRow>,
    customers: Vec<CustomerResponse>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/entries/", get(list_entries))
        .route("/new_entry/", get(new_entry_form).post(create_entry))
        .route("/entry/{id}/", get(entry_detail))
        .route("/entry/{id}/edit/", get(edit_entry_form).post(update_entry))
        .route("/entry/{id}/delete/", post(delete_entry))
        .with_state(state)
}

/// The full ledger, filterable and paginated. Filters that fail to parse are
/// dropped; a page outside the range is a 404.
async fn list_entries(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EntryListQuery>, QueryRejection>,
) -> Result<Json<EntryListResponse>, AppError> {
    let query = lenient_query(query);
    let filter = EntryFilter {
        customer_id: parse_id(query.customer.as_deref()),
        date_from: parse_filter_date(query.from_date.as_deref()),
        date_to: parse_filter_date(query.to_date.as_deref()),
        milk_type: non_empty(query.milk_type.as_deref()),
        shift: non_empty(query.shift.as_deref()),
    };
    let entries = entry_repo::list_filtered(&state.db, &filter).await?;

    let totals = EntryTotals::collect(&entries);
    let total_pages = entries.len().div_ceil(PAGE_SIZE).max(1);
    let page = resolve_page(query.page.as_deref(), total_pages)?;
    let page_entries = entries
        .iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .map(EntryRow::from)
        .collect();

    let customers = customer_repo::list(&state.db).await?;

    Ok(Json(EntryListResponse {
        entries: page_entries,
        page,
        total_pages,
        totals,
        customers: customers.iter().map(CustomerResponse::from).collect(),
        selected_customer: filter.customer_id,
        from_date: filter.date_from.map(format_date),
        to_date: filter.date_to.map(format_date),
        selected_milk_type: filter.milk_type,
        selected_shift: filter.shift,
    }))
}

async fn new_entry_form(
    State(state): State<Arc<AppState>>,
) -> Result<Json<EntryFormContext>, AppError> {
    let customers = customer_repo::list(&state.db).await?;
    Ok(Json(EntryFormContext {
        initial: None,
        customers: customers.iter().map(CustomerResponse::from).collect(),
    }))
}

async fn create_entry(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, AppError> {
    let input = form.clean()?;
    let customer = resolve_customer(&state, input.customer_id).await?;
    let entry = entry_repo::create(
        &state.db,
        &customer,
        input.shift,
        input.milk_type,
        input.fat,
        input.quantity,
        input.amount,
    )
    .await?;
    tracing::info!(
        "entry {} recorded for account {}",
        entry.id,
        entry.account_number
    );
    // Straight back to the blank form, ready for the next delivery.
    Ok(Redirect::to("/new_entry/"))
}

async fn entry_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EntryRow>, AppError> {
    let entry = require_entry(&state, id).await?;
    Ok(Json(EntryRow::from(&entry)))
}

async fn edit_entry_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<EntryFormContext>, AppError> {
    let entry = require_entry(&state, id).await?;
    let customers = customer_repo::list(&state.db).await?;
    Ok(Json(EntryFormContext {
        initial: Some(EntryRow::from(&entry)),
        customers: customers.iter().map(CustomerResponse::from).collect(),
    }))
}

async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<EntryForm>,
) -> Result<Redirect, AppError> {
    require_entry(&state, id).await?;
    let input = form.clean()?;
    let customer = resolve_customer(&state, input.customer_id).await?;
    entry_repo::update(
        &state.db,
        id,
        &customer,
        input.shift,
        input.milk_type,
        input.fat,
        input.quantity,
        input.amount,
    )
    .await?
    .ok_or_else(|| AppError::not_found(format!("entry {id} not found")))?;
    tracing::info!("entry {id} updated");
    Ok(Redirect::to("/entries/"))
}

async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let deleted = entry_repo::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("entry {id} not found")));
    }
    tracing::info!("entry {id} deleted");
    Ok(Redirect::to("/entries/"))
}

/// The page parameter is stricter than the filters: a value that is not a
/// valid page of the current result set is a 404, matching how out-of-range
/// pages behave. The literal "last" always lands on the final page.
fn resolve_page(raw: Option<&str>, total_pages: usize) -> Result<usize, AppError> {
    let page = match raw.map(str::trim) {
        None => 1,
        Some("last") => total_pages,
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| AppError::not_found("page is not a number or \"last\""))?,
    };
    if page < 1 || page > total_pages {
        return Err(AppError::not_found(format!(
            "page {page} of {total_pages} does not exist"
        )));
    }
    Ok(page)
}

async fn require_entry(state: &AppState, id: i32) -> Result<milk_entry::Model, AppError> {
    entry_repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("entry {id} not found")))
}

/// A posted customer id that does not exist is a form problem, not a missing
/// page.
async fn resolve_customer(state: &AppState, customer_id: i32) -> Result<customer::Model, AppError> {
    customer_repo::find_by_id(&state.db, customer_id)
        .await?
        .ok_or_else(|| AppError::validation(format!("customer {customer_id} does not exist")))
}

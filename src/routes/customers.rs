use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::Redirect,
    routing::{get, post},
};
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        customer_repo,
        entities::{customer, milk_entry},
        entry_repo::{self, EntryFilter},
    },
    error::AppError,
    forms::CustomerForm,
    reports::{
        EntryRow, EntryTotals, ReportWindow,
        customer_detail::{CustomerDetailReport, DayGroup},
    },
    state::AppState,
};

use super::{format_date, lenient_query};

/// Entries counted towards a customer's "recent activity" on the registry
/// page.
const RECENT_ACTIVITY_CAP: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct CustomerResponse {
    pub id: i32,
    pub account_number: i64,
    pub name: String,
    pub phone: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CustomerSummary {
    pub customer: CustomerResponse,
    pub total_quantity: f64,
    pub total_amount: f64,
    pub recent_entries_count: usize,
    pub last_entry: Option<EntryRow>,
}

#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub customers: Vec<CustomerSummary>,
}

#[derive(Debug, Serialize)]
pub struct CustomerFormContext {
    pub initial: Option<CustomerResponse>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DetailQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetailResponse {
    pub customer: CustomerResponse,
    pub entries: Vec<EntryRow>,
    pub days: Vec<DayGroup>,
    pub totals: EntryTotals,
    pub lifetime: EntryTotals,
    pub from_date: String,
    pub to_date: String,
    pub date_range_days: i64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/customers/", get(list_customers))
        .route("/new_customer/", get(new_customer_form).post(create_customer))
        .route("/customer/{id}/", get(customer_detail))
        .route(
            "/customer/{id}/edit/",
            get(edit_customer_form).post(update_customer),
        )
        .route("/customer/{id}/delete/", post(delete_customer))
        .with_state(state)
}

/// The registry: every customer in name order with lifetime totals and their
/// latest delivery.
async fn list_customers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CustomerListResponse>, AppError> {
    let customers = customer_repo::list(&state.db).await?;
    let entries = entry_repo::list_filtered(&state.db, &EntryFilter::default()).await?;

    let mut by_customer: HashMap<i32, Vec<&milk_entry::Model>> = HashMap::new();
    for entry in &entries {
        by_customer.entry(entry.customer_id).or_default().push(entry);
    }

    let customers = customers
        .iter()
        .map(|customer| {
            let entries = by_customer
                .get(&customer.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let totals = EntryTotals::collect(entries.iter().copied());
            CustomerSummary {
                customer: CustomerResponse::from(customer),
                total_quantity: totals.quantity,
                total_amount: totals.amount,
                recent_entries_count: entries.len().min(RECENT_ACTIVITY_CAP),
                // Entries arrive in ledger order, so the first one is newest.
                last_entry: entries.first().map(|entry| EntryRow::from(*entry)),
            }
        })
        .collect();

    Ok(Json(CustomerListResponse { customers }))
}

async fn new_customer_form() -> Json<CustomerFormContext> {
    Json(CustomerFormContext { initial: None })
}

async fn create_customer(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, AppError> {
    let input = form.clean()?;
    ensure_account_number_free(&state, input.account_number, None).await?;
    let created =
        customer_repo::create(&state.db, &input.name, input.account_number, input.phone).await?;
    tracing::info!(
        "customer {} added (account {})",
        created.id,
        created.account_number
    );
    Ok(Redirect::to("/customers/"))
}

async fn edit_customer_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<CustomerFormContext>, AppError> {
    let customer = require_customer(&state, id).await?;
    Ok(Json(CustomerFormContext {
        initial: Some(CustomerResponse::from(&customer)),
    }))
}

async fn update_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, AppError> {
    require_customer(&state, id).await?;
    let input = form.clean()?;
    ensure_account_number_free(&state, input.account_number, Some(id)).await?;
    customer_repo::update(&state.db, id, &input.name, input.account_number, input.phone)
        .await?
        .ok_or_else(|| AppError::not_found(format!("customer {id} not found")))?;
    tracing::info!("customer {id} updated");
    Ok(Redirect::to("/customers/"))
}

async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let deleted = customer_repo::delete(&state.db, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("customer {id} not found")));
    }
    tracing::info!("customer {id} deleted");
    Ok(Redirect::to("/customers/"))
}

/// A customer's statement over a date window, defaulting to the last ten days,
/// plus lifetime stats.
async fn customer_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    query: Result<Query<DetailQuery>, QueryRejection>,
) -> Result<Json<CustomerDetailResponse>, AppError> {
    let customer = require_customer(&state, id).await?;
    let query = lenient_query(query);

    let today = Local::now().date_naive();
    let window = ReportWindow::resolve(query.from_date.as_deref(), query.to_date.as_deref(), today);

    let filter = EntryFilter {
        customer_id: Some(id),
        date_from: Some(window.from),
        date_to: Some(window.to),
        ..EntryFilter::default()
    };
    let window_entries = entry_repo::list_filtered(&state.db, &filter).await?;
    let lifetime_entries = entry_repo::list_by_customer(&state.db, id).await?;
    let report = CustomerDetailReport::build(&window_entries, &lifetime_entries);

    Ok(Json(CustomerDetailResponse {
        customer: CustomerResponse::from(&customer),
        entries: window_entries.iter().map(EntryRow::from).collect(),
        days: report.days,
        totals: report.totals,
        lifetime: report.lifetime,
        from_date: format_date(window.from),
        to_date: format_date(window.to),
        date_range_days: window.days(),
    }))
}

async fn require_customer(state: &AppState, id: i32) -> Result<customer::Model, AppError> {
    customer_repo::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("customer {id} not found")))
}

/// Account numbers are unique across the registry. `current_id` exempts the
/// customer being edited so an unchanged number passes.
async fn ensure_account_number_free(
    state: &AppState,
    account_number: i64,
    current_id: Option<i32>,
) -> Result<(), AppError> {
    if let Some(existing) = customer_repo::find_by_account_number(&state.db, account_number).await?
    {
        if current_id != Some(existing.id) {
            return Err(AppError::validation(format!(
                "account number {account_number} is already in use"
            )));
        }
    }
    Ok(())
}

impl From<&customer::Model> for CustomerResponse {
    fn from(model: &customer::Model) -> Self {
        Self {
            id: model.id,
            account_number: model.account_number,
            name: model.name.clone(),
            phone: model.phone,
        }
    }
}

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
    reports::{
        ReportWindow,
        payment_summary::{PaymentRow, PaymentSummaryReport},
    },
    state::AppState,
};

use super::customers::CustomerResponse;
use super::{format_date, lenient_query, parse_id};

#[derive(Debug, Default, Deserialize)]
struct PaymentQuery {
    from_date: Option<String>,
    to_date: Option<String>,
    customer: Option<String>,
}

#[derive(Debug, Serialize)]
struct PaymentSummaryResponse {
    customers_data: Vec<PaymentRow>,
    grand_total_amount: f64,
    grand_total_quantity: f64,
    from_date: String,
    to_date: String,
    date_range_days: i64,
    selected_customer: Option<i32>,
    all_customers: Vec<CustomerResponse>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/payment-summary/", get(payment_summary))
        .with_state(state)
}

/// Who is owed what over the window, largest amount first.
async fn payment_summary(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PaymentQuery>, QueryRejection>,
) -> Result<Json<PaymentSummaryResponse>, AppError> {
    let query = lenient_query(query);
    let today = Local::now().date_naive();
    let window = ReportWindow::resolve(query.from_date.as_deref(), query.to_date.as_deref(), today);
    let selected_customer = parse_id(query.customer.as_deref());

    let all_customers = customer_repo::list(&state.db).await?;
    let customers: Vec<_> = match selected_customer {
        Some(id) => all_customers
            .iter()
            .filter(|customer| customer.id == id)
            .cloned()
            .collect(),
        None => all_customers.clone(),
    };

    let filter = EntryFilter {
        customer_id: selected_customer,
        date_from: Some(window.from),
        date_to: Some(window.to),
        ..EntryFilter::default()
    };
    let entries = entry_repo::list_filtered(&state.db, &filter).await?;
    let report = PaymentSummaryReport::build(&customers, &entries);

    Ok(Json(PaymentSummaryResponse {
        customers_data: report.rows,
        grand_total_amount: report.grand_total_amount,
        grand_total_quantity: report.grand_total_quantity,
        from_date: format_date(window.from),
        to_date: format_date(window.to),
        date_range_days: window.days(),
        selected_customer,
        all_customers: all_customers.iter().map(CustomerResponse::from).collect(),
    }))
}

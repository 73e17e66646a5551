use chrono::NaiveDate;
use serde::Serialize;

use crate::db::entities::milk_entry;

pub mod aggregate;
pub mod customer_detail;
pub mod dashboard;
pub mod payment_summary;
pub mod window;

pub use aggregate::{DailyTotals, EntryTotals, daily_breakdown, round2};
pub use window::{ReportWindow, parse_filter_date};

/// Serializable projection of a ledger entry, shared by every report and list
/// response.
#[derive(Debug, Clone, Serialize)]
pub struct EntryRow {
    pub id: i32,
    pub customer_id: i32,
    pub account_number: i64,
    pub shift: String,
    pub milk_type: String,
    pub fat: f64,
    pub quantity: f64,
    pub amount: f64,
    pub date: NaiveDate,
}

impl From<&milk_entry::Model> for EntryRow {
    fn from(model: &milk_entry::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            account_number: model.account_number,
            shift: model.shift.clone(),
            milk_type: model.milk_type.clone(),
            fat: model.fat,
            quantity: model.quantity,
            amount: model.amount,
            date: model.date,
        }
    }
}

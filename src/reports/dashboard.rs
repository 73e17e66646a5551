use serde::Serialize;

use crate::db::entities::milk_entry;

use super::EntryRow;
use super::aggregate::{DailyTotals, EntryTotals, daily_breakdown};

/// Most recent entries shown on the dashboard.
pub const RECENT_ENTRIES_LIMIT: usize = 15;
/// Most recent dates in the dashboard's daily summary.
pub const DAILY_SUMMARY_LIMIT: usize = 7;

#[derive(Debug, Serialize)]
pub struct DashboardReport {
    pub entries: Vec<EntryRow>,
    pub totals: EntryTotals,
    pub daily_summary: Vec<DailyTotals>,
}

impl DashboardReport {
    /// Build the dashboard over the full filtered set in ledger order (date
    /// desc, id desc). Totals always cover the whole set; only the entry list
    /// and the daily summary are capped.
    pub fn build(entries: &[milk_entry::Model]) -> Self {
        Self {
            totals: EntryTotals::collect(entries),
            daily_summary: daily_breakdown(entries, DAILY_SUMMARY_LIMIT),
            entries: entries
                .iter()
                .take(RECENT_ENTRIES_LIMIT)
                .map(EntryRow::from)
                .collect(),
        }
    }
}

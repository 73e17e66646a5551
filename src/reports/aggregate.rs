use chrono::NaiveDate;
use serde::Serialize;

use crate::db::entities::milk_entry;

/// Round to two decimal places, the display precision for every quantity and
/// amount the app reports. Ties go to the even hundredth.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Quantity, amount and row count folded over a set of entries. Sums are
/// rounded to two decimals; an empty set folds to zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct EntryTotals {
    pub quantity: f64,
    pub amount: f64,
    pub entries: u64,
}

impl EntryTotals {
    pub fn collect<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a milk_entry::Model>,
    {
        let mut quantity = 0.0;
        let mut amount = 0.0;
        let mut count = 0u64;
        for entry in entries {
            quantity += entry.quantity;
            amount += entry.amount;
            count += 1;
        }
        Self {
            quantity: round2(quantity),
            amount: round2(amount),
            entries: count,
        }
    }
}

/// Totals for a single calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub quantity: f64,
    pub amount: f64,
    pub entries: u64,
}

/// Bucket a ledger-ordered entry list (date desc, id desc) into per-date
/// totals, most recent date first, keeping at most `limit` dates. Entries for
/// the same date are adjacent in that order, so one forward pass suffices.
pub fn daily_breakdown(entries: &[milk_entry::Model], limit: usize) -> Vec<DailyTotals> {
    let mut buckets: Vec<(NaiveDate, f64, f64, u64)> = Vec::new();
    for entry in entries {
        match buckets.last_mut() {
            Some((date, quantity, amount, count)) if *date == entry.date => {
                *quantity += entry.quantity;
                *amount += entry.amount;
                *count += 1;
            }
            _ => {
                if buckets.len() == limit {
                    break;
                }
                buckets.push((entry.date, entry.quantity, entry.amount, 1));
            }
        }
    }
    buckets
        .into_iter()
        .map(|(date, quantity, amount, entries)| DailyTotals {
            date,
            quantity: round2(quantity),
            amount: round2(amount),
            entries,
        })
        .collect()
}

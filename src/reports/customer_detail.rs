use chrono::NaiveDate;
use serde::Serialize;

use crate::db::entities::milk_entry;

use super::EntryRow;
use super::aggregate::{EntryTotals, round2};

/// One calendar date of a customer statement: the date's entries in ledger
/// order plus the date's accumulated quantity and amount.
#[derive(Debug, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    pub entries: Vec<EntryRow>,
    pub quantity: f64,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct CustomerDetailReport {
    pub days: Vec<DayGroup>,
    pub totals: EntryTotals,
    pub lifetime: EntryTotals,
}

impl CustomerDetailReport {
    /// Build a statement from the customer's entries inside the window and the
    /// customer's full history, both in ledger order (date desc, id desc).
    pub fn build(
        window_entries: &[milk_entry::Model],
        lifetime_entries: &[milk_entry::Model],
    ) -> Self {
        let mut days: Vec<DayGroup> = Vec::new();
        for entry in window_entries {
            match days.last_mut() {
                Some(group) if group.date == entry.date => {
                    group.entries.push(EntryRow::from(entry));
                    group.quantity += entry.quantity;
                    group.amount += entry.amount;
                }
                _ => days.push(DayGroup {
                    date: entry.date,
                    entries: vec![EntryRow::from(entry)],
                    quantity: entry.quantity,
                    amount: entry.amount,
                }),
            }
        }
        for group in &mut days {
            group.quantity = round2(group.quantity);
            group.amount = round2(group.amount);
        }

        Self {
            days,
            totals: EntryTotals::collect(window_entries),
            lifetime: EntryTotals::collect(lifetime_entries),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::{MilkType, Shift};

    fn entry(id: i32, day: u32, quantity: f64, amount: f64) -> milk_entry::Model {
        milk_entry::Model {
            id,
            customer_id: 7,
            account_number: 707,
            shift: Shift::Evening.as_str().to_string(),
            milk_type: MilkType::Cow.as_str().to_string(),
            fat: 3.8,
            quantity,
            amount,
            date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
        }
    }

    #[test]
    fn groups_by_date_keeping_ledger_order() {
        let window = vec![
            entry(9, 25, 2.0, 120.0),
            entry(8, 25, 1.5, 90.0),
            entry(5, 23, 3.0, 180.0),
        ];
        let lifetime = {
            let mut all = window.clone();
            all.push(entry(1, 1, 10.0, 600.0));
            all
        };

        let report = CustomerDetailReport::build(&window, &lifetime);
        assert_eq!(report.days.len(), 2);
        assert_eq!(
            report.days[0].date,
            NaiveDate::from_ymd_opt(2026, 8, 25).unwrap()
        );
        assert_eq!(report.days[0].entries.len(), 2);
        assert_eq!(report.days[0].entries[0].id, 9);
        assert_eq!(report.days[0].quantity, 3.5);
        assert_eq!(report.days[0].amount, 210.0);
        assert_eq!(report.days[1].entries.len(), 1);

        assert_eq!(report.totals.quantity, 6.5);
        assert_eq!(report.totals.amount, 390.0);
        assert_eq!(report.totals.entries, 3);
        // Lifetime stats ignore the window.
        assert_eq!(report.lifetime.entries, 4);
        assert_eq!(report.lifetime.quantity, 16.5);
        assert_eq!(report.lifetime.amount, 990.0);
    }

    #[test]
    fn no_entries_in_window_still_reports_lifetime() {
        let lifetime = vec![entry(1, 1, 4.0, 240.0)];
        let report = CustomerDetailReport::build(&[], &lifetime);
        assert!(report.days.is_empty());
        assert_eq!(report.totals, EntryTotals::default());
        assert_eq!(report.lifetime.entries, 1);
    }
}

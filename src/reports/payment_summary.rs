use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::entities::{customer, milk_entry};

use super::aggregate::{EntryTotals, round2};

/// One customer's settlement line: totals over the window plus the date of
/// their latest delivery in it.
#[derive(Debug, Serialize)]
pub struct PaymentRow {
    pub customer_id: i32,
    pub account_number: i64,
    pub name: String,
    pub total_amount: f64,
    pub total_quantity: f64,
    pub total_entries: u64,
    pub last_entry_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct PaymentSummaryReport {
    pub rows: Vec<PaymentRow>,
    pub grand_total_amount: f64,
    pub grand_total_quantity: f64,
}

impl PaymentSummaryReport {
    /// Build the settlement table. `customers` must be in name order and
    /// `entries` already narrowed to the window (and to one customer when one
    /// was selected). Customers without entries in the window are omitted.
    /// Rows are sorted by amount owed descending; the sort is stable, so equal
    /// amounts keep name order. Grand totals re-round the sum of the already
    /// rounded row totals.
    pub fn build(customers: &[customer::Model], entries: &[milk_entry::Model]) -> Self {
        let mut by_customer: HashMap<i32, Vec<&milk_entry::Model>> = HashMap::new();
        for entry in entries {
            by_customer.entry(entry.customer_id).or_default().push(entry);
        }

        let mut rows: Vec<PaymentRow> = Vec::new();
        for customer in customers {
            let Some(list) = by_customer.get(&customer.id) else {
                continue;
            };
            let Some(last_entry_date) = list.iter().map(|entry| entry.date).max() else {
                continue;
            };
            let totals = EntryTotals::collect(list.iter().copied());
            rows.push(PaymentRow {
                customer_id: customer.id,
                account_number: customer.account_number,
                name: customer.name.clone(),
                total_amount: totals.amount,
                total_quantity: totals.quantity,
                total_entries: totals.entries,
                last_entry_date,
            });
        }

        rows.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));

        let grand_total_amount = round2(rows.iter().map(|row| row.total_amount).sum());
        let grand_total_quantity = round2(rows.iter().map(|row| row.total_quantity).sum());

        Self {
            rows,
            grand_total_amount,
            grand_total_quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::entities::{MilkType, Shift};

    fn customer(id: i32, account_number: i64, name: &str) -> customer::Model {
        customer::Model {
            id,
            account_number,
            name: name.to_string(),
            phone: None,
        }
    }

    fn entry(id: i32, customer_id: i32, day: u32, quantity: f64, amount: f64) -> milk_entry::Model {
        milk_entry::Model {
            id,
            customer_id,
            account_number: customer_id as i64 * 100,
            shift: Shift::Day.as_str().to_string(),
            milk_type: MilkType::Cow.as_str().to_string(),
            fat: 4.2,
            quantity,
            amount,
            date: NaiveDate::from_ymd_opt(2026, 8, day).unwrap(),
        }
    }

    #[test]
    fn sorts_by_amount_and_skips_customers_without_entries() {
        let customers = vec![
            customer(1, 100, "Anwar"),
            customer(2, 200, "Bashir"),
            customer(3, 300, "Chandni"),
        ];
        let entries = vec![
            entry(5, 1, 25, 2.0, 120.0),
            entry(4, 3, 24, 4.0, 260.0),
            entry(3, 1, 23, 1.0, 60.0),
            entry(2, 3, 22, 1.0, 40.0),
        ];

        let report = PaymentSummaryReport::build(&customers, &entries);
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].name, "Chandni");
        assert_eq!(report.rows[0].total_amount, 300.0);
        assert_eq!(
            report.rows[0].last_entry_date,
            NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
        );
        assert_eq!(report.rows[1].name, "Anwar");
        assert_eq!(report.rows[1].total_amount, 180.0);
        assert_eq!(report.rows[1].total_entries, 2);
        assert_eq!(report.grand_total_amount, 480.0);
        assert_eq!(report.grand_total_quantity, 8.0);
    }

    #[test]
    fn equal_amounts_keep_name_order() {
        let customers = vec![
            customer(2, 200, "Asha"),
            customer(1, 100, "Zoya"),
        ];
        let entries = vec![
            entry(2, 1, 25, 1.0, 100.0),
            entry(1, 2, 25, 2.0, 100.0),
        ];

        let report = PaymentSummaryReport::build(&customers, &entries);
        assert_eq!(report.rows[0].name, "Asha");
        assert_eq!(report.rows[1].name, "Zoya");
    }

    #[test]
    fn grand_totals_sum_the_rounded_rows() {
        let customers = vec![customer(1, 100, "A"), customer(2, 200, "B")];
        // Each row's raw sum rounds to 0.33; the grand total sums the rounded
        // values (0.66), not the raw ones (0.666 -> 0.67).
        let entries = vec![
            entry(4, 1, 25, 0.111, 0.111),
            entry(3, 1, 25, 0.222, 0.222),
            entry(2, 2, 24, 0.111, 0.111),
            entry(1, 2, 24, 0.222, 0.222),
        ];

        let report = PaymentSummaryReport::build(&customers, &entries);
        assert_eq!(report.rows[0].total_amount, 0.33);
        assert_eq!(report.rows[1].total_amount, 0.33);
        assert_eq!(report.grand_total_amount, 0.66);
        assert_eq!(report.grand_total_quantity, 0.66);
    }

    #[test]
    fn empty_window_yields_zero_grand_totals() {
        let customers = vec![customer(1, 100, "A")];
        let report = PaymentSummaryReport::build(&customers, &[]);
        assert!(report.rows.is_empty());
        assert_eq!(report.grand_total_amount, 0.0);
        assert_eq!(report.grand_total_quantity, 0.0);
    }
}

use chrono::{Days, NaiveDate};

/// Wire format for every date the app accepts or echoes back.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the default settlement window, ending today inclusive.
pub const DEFAULT_WINDOW_DAYS: u64 = 10;

/// Parse a date filter value. Absent, blank and malformed values all count as
/// "not supplied" rather than as errors, so a bad filter never fails a report.
pub fn parse_filter_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Inclusive date range a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportWindow {
    /// The `days`-day window ending at `today`, both ends inclusive.
    pub fn last_days(today: NaiveDate, days: u64) -> Self {
        Self {
            from: today - Days::new(days.saturating_sub(1)),
            to: today,
        }
    }

    /// Resolve a user-supplied window. The bounds only apply when both parse;
    /// otherwise the whole window falls back to the default settlement range.
    pub fn resolve(from_raw: Option<&str>, to_raw: Option<&str>, today: NaiveDate) -> Self {
        match (parse_filter_date(from_raw), parse_filter_date(to_raw)) {
            (Some(from), Some(to)) => Self { from, to },
            _ => Self::last_days(today, DEFAULT_WINDOW_DAYS),
        }
    }

    /// Inclusive span in days. An inverted window (from after to) yields a
    /// non-positive span and matches no entries, which is allowed.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn filter_date_ignores_blank_and_malformed_values() {
        assert_eq!(parse_filter_date(None), None);
        assert_eq!(parse_filter_date(Some("")), None);
        assert_eq!(parse_filter_date(Some("   ")), None);
        assert_eq!(parse_filter_date(Some("25-08-2026")), None);
        assert_eq!(parse_filter_date(Some("2026-13-01")), None);
        assert_eq!(parse_filter_date(Some("not-a-date")), None);
        assert_eq!(
            parse_filter_date(Some("2026-08-25")),
            Some(date(2026, 8, 25))
        );
        assert_eq!(
            parse_filter_date(Some(" 2026-08-25 ")),
            Some(date(2026, 8, 25))
        );
    }

    #[test]
    fn default_window_covers_ten_days_ending_today() {
        let today = date(2026, 8, 25);
        let window = ReportWindow::last_days(today, DEFAULT_WINDOW_DAYS);
        assert_eq!(window.from, date(2026, 8, 16));
        assert_eq!(window.to, today);
        assert_eq!(window.days(), 10);
    }

    #[test]
    fn resolve_is_all_or_nothing() {
        let today = date(2026, 8, 25);
        let default = ReportWindow::last_days(today, DEFAULT_WINDOW_DAYS);

        assert_eq!(
            ReportWindow::resolve(Some("2026-08-01"), Some("2026-08-10"), today),
            ReportWindow {
                from: date(2026, 8, 1),
                to: date(2026, 8, 10),
            }
        );
        // One bound missing or bad drops the other too.
        assert_eq!(
            ReportWindow::resolve(Some("2026-08-01"), None, today),
            default
        );
        assert_eq!(
            ReportWindow::resolve(None, Some("2026-08-10"), today),
            default
        );
        assert_eq!(
            ReportWindow::resolve(Some("garbage"), Some("2026-08-10"), today),
            default
        );
        assert_eq!(ReportWindow::resolve(None, None, today), default);
    }

    #[test]
    fn inverted_window_is_kept_as_given() {
        let today = date(2026, 8, 25);
        let window = ReportWindow::resolve(Some("2026-08-10"), Some("2026-08-01"), today);
        assert_eq!(window.from, date(2026, 8, 10));
        assert_eq!(window.to, date(2026, 8, 1));
        assert!(window.days() <= 0);
    }
}

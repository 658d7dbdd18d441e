//! Narrowing of the loaded report list before aggregation.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::ReportRecord;

/// Category value that lets every line of business through.
pub const ALL_CATEGORIES: &str = "ALL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportFilter {
    pub month: u32,
    pub year: i32,
    pub category: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Case-insensitive fragment of the outlet name.
    pub outlet: Option<String>,
}

impl ReportFilter {
    pub fn for_month(year: i32, month: u32) -> Self {
        Self {
            month,
            year,
            category: ALL_CATEGORIES.to_string(),
            start_date: None,
            end_date: None,
            outlet: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn with_outlet(mut self, outlet: impl Into<String>) -> Self {
        self.outlet = Some(outlet.into());
        self
    }

    fn all_categories(&self) -> bool {
        let c = self.category.trim();
        c.is_empty() || c.eq_ignore_ascii_case(ALL_CATEGORIES)
    }

    pub fn matches(&self, r: &ReportRecord) -> bool {
        // The range only applies once both ends are set; `NaiveDate` has no
        // time component so `<= end` already covers the whole end day.
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            match r.date {
                Some(d) if d >= start && d <= end => {}
                _ => return false,
            }
        }
        if !self.all_categories() && r.line_of_business != self.category.trim() {
            return false;
        }
        if let Some(fragment) = self.outlet.as_deref() {
            if !outlet_matches(&r.outlet_name, fragment) {
                return false;
            }
        }
        true
    }

    /// Keep the records passing every active predicate, in input order.
    pub fn apply(&self, records: &[ReportRecord]) -> Vec<ReportRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

pub fn outlet_matches(outlet_name: &str, fragment: &str) -> bool {
    let fragment = fragment.trim().to_lowercase();
    fragment.is_empty() || outlet_name.to_lowercase().contains(&fragment)
}

/// Month/year narrowing the reports endpoint performs server-side; file
/// sources may hold several months.
pub fn scope_to_period(records: &[ReportRecord], year: i32, month: u32) -> Vec<ReportRecord> {
    records
        .iter()
        .filter(|r| matches!(r.date, Some(d) if d.year() == year && d.month() == month))
        .cloned()
        .collect()
}

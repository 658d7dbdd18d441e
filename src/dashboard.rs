//! One dashboard render: scope, filter, then aggregate.

use serde::Serialize;

use crate::access::Role;
use crate::filter::{scope_to_period, ReportFilter};
use crate::metrics::MetricsConfig;
use crate::reports::{annotate, build_category_series, build_daily_series, summarize};
use crate::session::Session;
use crate::types::{CategoryBucket, DailyBucket, ReportRecord, ReportRow, SummaryStats};

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub year: i32,
    pub month: u32,
    pub summary: SummaryStats,
    pub daily: Vec<DailyBucket>,
    pub categories: Vec<CategoryBucket>,
    pub rows: Vec<ReportRow>,
}

impl Dashboard {
    /// Outlet users only ever see their own outlet, and nothing at all when
    /// the session names no outlet; the filter's outlet fragment narrows
    /// further for admins.
    pub fn build(
        records: &[ReportRecord],
        filter: &ReportFilter,
        session: &Session,
        cfg: &MetricsConfig,
    ) -> Self {
        let mut filter = filter.clone();
        let mut unscoped_outlet_user = false;
        if session.role == Role::Outlet {
            let own = session.outlet_name.as_deref().map(str::trim).unwrap_or_default();
            unscoped_outlet_user = own.is_empty();
            filter.outlet = Some(own.to_string());
        }

        let period = scope_to_period(records, filter.year, filter.month);
        let selected = if unscoped_outlet_user {
            tracing::warn!(user = %session.username, "Outlet session has no outlet name");
            Vec::new()
        } else {
            filter.apply(&period)
        };
        tracing::debug!(
            user = %session.username,
            period = period.len(),
            selected = selected.len(),
            category = %filter.category,
            "Building dashboard"
        );

        Self {
            year: filter.year,
            month: filter.month,
            summary: summarize(&selected, cfg),
            daily: build_daily_series(&selected, filter.year, filter.month, cfg),
            categories: build_category_series(&selected),
            rows: annotate(&selected, cfg),
        }
    }
}

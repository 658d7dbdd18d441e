//! Sales dashboard aggregation for cinema and F&B outlets.
//!
//! Report rows from the reports API are decoded once by [`loader`], narrowed
//! by a [`filter::ReportFilter`], and turned into the summary tiles, the
//! daily series and the per-category breakdown a dashboard draws.

pub mod access;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod output;
pub mod reports;
pub mod session;
pub mod types;
pub mod util;

pub use dashboard::Dashboard;
pub use error::{ReportError, Result};
pub use filter::ReportFilter;
pub use metrics::{compute_metrics, MetricsConfig};
pub use reports::{annotate, build_category_series, build_daily_series, summarize};
pub use types::{CategoryBucket, DailyBucket, DerivedMetrics, ReportRecord, SummaryStats};

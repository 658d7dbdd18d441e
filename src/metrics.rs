//! Per-report derived metrics.

use serde::{Deserialize, Serialize};

use crate::types::{DerivedMetrics, ReportRecord};
use crate::util::{ratio, round_to};

/// Business constants behind the percentage metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Expected F&B spend per visitor.
    pub avg_spend_per_head: f64,
    /// F&B revenue that counts as a 100% target before `target_percentage` scaling.
    pub base_target: f64,
    /// Upper clamp for both percentages.
    pub max_percentage: f64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            avg_spend_per_head: 50_000.0,
            base_target: 10_000_000.0,
            max_percentage: 200.0,
        }
    }
}

fn clamp_pct(v: f64, max: f64) -> f64 {
    if v.is_nan() {
        return 0.0;
    }
    // Infinities saturate like any other out-of-range ratio.
    round_to(v.clamp(0.0, max), 1)
}

pub fn compute_metrics(record: &ReportRecord, cfg: &MetricsConfig) -> DerivedMetrics {
    let fnb = record.fnb_revenue;
    let total_sales = fnb + record.cinema_revenue;

    let expected_fnb = record.target_headcount as f64 * cfg.avg_spend_per_head;
    let ds_percentage = if record.target_headcount > 0 && expected_fnb > 0.0 {
        clamp_pct(fnb / expected_fnb * 100.0, cfg.max_percentage)
    } else {
        0.0
    };

    let target_value = record.target_percentage / 100.0 * cfg.base_target;
    let achievement_percentage = if target_value > 0.0 {
        clamp_pct(fnb / target_value * 100.0, cfg.max_percentage)
    } else {
        0.0
    };

    let per_head_fnb = ratio(fnb, record.audience_count as f64).round();

    DerivedMetrics {
        total_sales,
        ds_percentage,
        achievement_percentage,
        per_head_fnb,
    }
}

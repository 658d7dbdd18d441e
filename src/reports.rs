use crate::metrics::{compute_metrics, MetricsConfig};
use crate::types::{CategoryBucket, DailyBucket, ReportRecord, ReportRow, SummaryStats};
use crate::util::{average, days_in_month, ratio, round_to, short_date_label};
use chrono::{Datelike, NaiveDate};
use std::collections::{HashMap, HashSet};

/// Attach derived metrics to every record, keeping input order.
pub fn annotate(data: &[ReportRecord], cfg: &MetricsConfig) -> Vec<ReportRow> {
    data.iter()
        .map(|r| {
            let m = compute_metrics(r, cfg);
            ReportRow {
                date: r.date.map(|d| d.to_string()).unwrap_or_default(),
                outlet_name: r.outlet_name.clone(),
                line_of_business: r.line_of_business.clone(),
                fnb_revenue: r.fnb_revenue,
                cinema_revenue: r.cinema_revenue,
                total_sales: m.total_sales,
                audience_count: r.audience_count,
                ds_percentage: m.ds_percentage,
                achievement_percentage: m.achievement_percentage,
                per_head_fnb: m.per_head_fnb,
            }
        })
        .collect()
}

/// One bucket per calendar day of `year`-`month`, with no gaps.
///
/// Returns an empty series when the month itself is invalid.
pub fn build_daily_series(
    data: &[ReportRecord],
    year: i32,
    month: u32,
    cfg: &MetricsConfig,
) -> Vec<DailyBucket> {
    let Some(days) = days_in_month(year, month) else {
        return Vec::new();
    };

    let mut by_day: HashMap<u32, Vec<&ReportRecord>> = HashMap::new();
    for r in data {
        if let Some(d) = r.date {
            if d.year() == year && d.month() == month {
                by_day.entry(d.day()).or_default().push(r);
            }
        }
    }

    (1..=days)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .map(|date| {
            let selection = by_day.get(&date.day()).map(Vec::as_slice).unwrap_or(&[]);
            daily_bucket(date, selection, cfg)
        })
        .collect()
}

fn daily_bucket(date: NaiveDate, selection: &[&ReportRecord], cfg: &MetricsConfig) -> DailyBucket {
    let mut bucket = DailyBucket {
        day: date.day(),
        date,
        label: short_date_label(date),
        fnb_revenue: 0.0,
        cinema_revenue: 0.0,
        total_sales: 0.0,
        audience_count: 0,
        target_headcount: 0,
        ds_percentage: 0.0,
        achievement_percentage: 0.0,
        outlet_count: 0,
        category_count: 0,
        has_data: !selection.is_empty(),
    };
    if selection.is_empty() {
        return bucket;
    }

    let mut ds = Vec::with_capacity(selection.len());
    let mut achievement = Vec::with_capacity(selection.len());
    let mut outlets: HashSet<&str> = HashSet::new();
    let mut categories: HashSet<&str> = HashSet::new();
    for r in selection {
        let m = compute_metrics(r, cfg);
        bucket.fnb_revenue += r.fnb_revenue;
        bucket.cinema_revenue += r.cinema_revenue;
        bucket.total_sales += m.total_sales;
        bucket.audience_count = bucket.audience_count.saturating_add(r.audience_count);
        bucket.target_headcount = bucket.target_headcount.saturating_add(r.target_headcount);
        ds.push(m.ds_percentage);
        achievement.push(m.achievement_percentage);
        outlets.insert(r.outlet_name.as_str());
        categories.insert(r.line_of_business.as_str());
    }
    bucket.ds_percentage = round_to(average(&ds), 1);
    bucket.achievement_percentage = round_to(average(&achievement), 1);
    bucket.outlet_count = outlets.len();
    bucket.category_count = categories.len();
    bucket
}

/// Group by (date, line of business); sorted by date, then category.
/// Undated records have no key and are left out.
pub fn build_category_series(data: &[ReportRecord]) -> Vec<CategoryBucket> {
    #[derive(Default)]
    struct Acc {
        fnb: f64,
        audience: u64,
        count: usize,
    }

    let mut map: HashMap<(NaiveDate, String), Acc> = HashMap::new();
    for r in data {
        let Some(date) = r.date else { continue };
        let e = map.entry((date, r.line_of_business.clone())).or_default();
        e.fnb += r.fnb_revenue;
        e.audience = e.audience.saturating_add(r.audience_count);
        e.count += 1;
    }

    let mut rows: Vec<CategoryBucket> = map
        .into_iter()
        .map(|((date, category), acc)| CategoryBucket {
            date,
            label: short_date_label(date),
            category,
            fnb_revenue: acc.fnb,
            audience_count: acc.audience,
            count: acc.count,
            per_head_fnb: ratio(acc.fnb, acc.audience as f64).round(),
            avg_fnb: ratio(acc.fnb, acc.count as f64),
            avg_audience: ratio(acc.audience as f64, acc.count as f64),
        })
        .collect();

    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.category.cmp(&b.category)));
    rows
}

pub fn summarize(data: &[ReportRecord], cfg: &MetricsConfig) -> SummaryStats {
    if data.is_empty() {
        return SummaryStats::default();
    }

    let mut stats = SummaryStats::default();
    let mut ds_sum = 0.0;
    let mut achievement_sum = 0.0;
    for r in data {
        let m = compute_metrics(r, cfg);
        stats.total_fnb_revenue += r.fnb_revenue;
        stats.total_cinema_revenue += r.cinema_revenue;
        stats.total_sales += m.total_sales;
        stats.total_audience = stats.total_audience.saturating_add(r.audience_count);
        stats.total_target_headcount = stats
            .total_target_headcount
            .saturating_add(r.target_headcount);
        ds_sum += m.ds_percentage;
        achievement_sum += m.achievement_percentage;
    }
    stats.record_count = data.len();
    stats.avg_ds_percentage = round_to(ds_sum / data.len() as f64, 1);
    stats.avg_achievement_percentage = round_to(achievement_sum / data.len() as f64, 1);
    stats
}

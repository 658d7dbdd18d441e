use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tabled::Tabled;

use crate::util::{format_money, format_percent};

/// One row as the reports API (or its CSV export) delivers it.
///
/// Every field is optional and loosely typed; the server has shipped several
/// spellings of the same column over time.
#[derive(Debug, Default, Deserialize)]
pub struct RawReportRow {
    #[serde(alias = "_id", alias = "report_id", alias = "reportId")]
    pub id: Option<Value>,
    #[serde(alias = "tanggal", alias = "reportDate", alias = "report_date")]
    pub date: Option<Value>,
    #[serde(
        alias = "outlet",
        alias = "outletName",
        alias = "outlet_name",
        alias = "nama_outlet"
    )]
    pub outlet_name: Option<Value>,
    #[serde(
        alias = "lob",
        alias = "lineOfBusiness",
        alias = "line_of_business",
        alias = "category"
    )]
    pub line_of_business: Option<Value>,
    #[serde(alias = "fnb", alias = "fnbRevenue", alias = "revenue_fnb")]
    pub fnb_revenue: Option<Value>,
    #[serde(alias = "cinema", alias = "cinemaRevenue", alias = "revenue_cinema")]
    pub cinema_revenue: Option<Value>,
    #[serde(alias = "audience", alias = "audienceCount", alias = "penonton")]
    pub audience_count: Option<Value>,
    #[serde(alias = "target", alias = "targetHeadcount", alias = "target_penonton")]
    pub target_headcount: Option<Value>,
    #[serde(alias = "targetPercentage", alias = "target_persen")]
    pub target_percentage: Option<Value>,
}

/// A decoded report: numbers are finite and non-negative, the date is either
/// a calendar day or absent because it failed to parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRecord {
    pub id: String,
    pub date: Option<NaiveDate>,
    pub outlet_name: String,
    pub line_of_business: String,
    pub fnb_revenue: f64,
    pub cinema_revenue: f64,
    pub audience_count: u64,
    pub target_headcount: u64,
    pub target_percentage: f64,
}

impl Default for ReportRecord {
    fn default() -> Self {
        Self {
            id: String::new(),
            date: None,
            outlet_name: String::new(),
            line_of_business: String::new(),
            fnb_revenue: 0.0,
            cinema_revenue: 0.0,
            audience_count: 0,
            target_headcount: 0,
            target_percentage: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub total_sales: f64,
    pub ds_percentage: f64,
    pub achievement_percentage: f64,
    pub per_head_fnb: f64,
}

/// A report joined with its metrics, as listed on the report table screen.
#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ReportRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "Outlet")]
    #[tabled(rename = "Outlet")]
    pub outlet_name: String,
    #[serde(rename = "LOB")]
    #[tabled(rename = "LOB")]
    pub line_of_business: String,
    #[serde(rename = "FnbRevenue")]
    #[tabled(rename = "FnbRevenue", display_with = "format_money")]
    pub fnb_revenue: f64,
    #[serde(rename = "CinemaRevenue")]
    #[tabled(rename = "CinemaRevenue", display_with = "format_money")]
    pub cinema_revenue: f64,
    #[serde(rename = "TotalSales")]
    #[tabled(rename = "TotalSales", display_with = "format_money")]
    pub total_sales: f64,
    #[serde(rename = "Audience")]
    #[tabled(rename = "Audience")]
    pub audience_count: u64,
    #[serde(rename = "DsPct")]
    #[tabled(rename = "DsPct", display_with = "format_percent")]
    pub ds_percentage: f64,
    #[serde(rename = "AchievementPct")]
    #[tabled(rename = "AchievementPct", display_with = "format_percent")]
    pub achievement_percentage: f64,
    #[serde(rename = "PerHeadFnb")]
    #[tabled(rename = "PerHeadFnb", display_with = "format_money")]
    pub per_head_fnb: f64,
}

/// One calendar day of the selected month. Days without reports keep their
/// slot with zeroed aggregates.
#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct DailyBucket {
    #[serde(rename = "Day")]
    #[tabled(rename = "Day")]
    pub day: u32,
    #[serde(rename = "Date")]
    #[tabled(skip)]
    pub date: NaiveDate,
    #[serde(rename = "Label")]
    #[tabled(rename = "Label")]
    pub label: String,
    #[serde(rename = "FnbRevenue")]
    #[tabled(rename = "FnbRevenue", display_with = "format_money")]
    pub fnb_revenue: f64,
    #[serde(rename = "CinemaRevenue")]
    #[tabled(rename = "CinemaRevenue", display_with = "format_money")]
    pub cinema_revenue: f64,
    #[serde(rename = "TotalSales")]
    #[tabled(rename = "TotalSales", display_with = "format_money")]
    pub total_sales: f64,
    #[serde(rename = "Audience")]
    #[tabled(rename = "Audience")]
    pub audience_count: u64,
    #[serde(rename = "TargetHeadcount")]
    #[tabled(rename = "TargetHeadcount")]
    pub target_headcount: u64,
    #[serde(rename = "AvgDsPct")]
    #[tabled(rename = "AvgDsPct", display_with = "format_percent")]
    pub ds_percentage: f64,
    #[serde(rename = "AvgAchievementPct")]
    #[tabled(rename = "AvgAchievementPct", display_with = "format_percent")]
    pub achievement_percentage: f64,
    #[serde(rename = "Outlets")]
    #[tabled(rename = "Outlets")]
    pub outlet_count: usize,
    #[serde(rename = "Categories")]
    #[tabled(rename = "Categories")]
    pub category_count: usize,
    #[serde(rename = "HasData")]
    #[tabled(rename = "HasData")]
    pub has_data: bool,
}

#[derive(Debug, Serialize, Tabled, Clone, PartialEq)]
pub struct CategoryBucket {
    #[serde(rename = "Date")]
    #[tabled(skip)]
    pub date: NaiveDate,
    #[serde(rename = "Label")]
    #[tabled(rename = "Label")]
    pub label: String,
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
    #[serde(rename = "FnbRevenue")]
    #[tabled(rename = "FnbRevenue", display_with = "format_money")]
    pub fnb_revenue: f64,
    #[serde(rename = "Audience")]
    #[tabled(rename = "Audience")]
    pub audience_count: u64,
    #[serde(rename = "Count")]
    #[tabled(rename = "Count")]
    pub count: usize,
    #[serde(rename = "PerHeadFnb")]
    #[tabled(rename = "PerHeadFnb", display_with = "format_money")]
    pub per_head_fnb: f64,
    #[serde(rename = "AvgFnb")]
    #[tabled(rename = "AvgFnb", display_with = "format_money")]
    pub avg_fnb: f64,
    #[serde(rename = "AvgAudience")]
    #[tabled(rename = "AvgAudience", display_with = "format_money")]
    pub avg_audience: f64,
}

#[derive(Debug, Default, Serialize, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_fnb_revenue: f64,
    pub total_cinema_revenue: f64,
    pub total_sales: f64,
    pub total_audience: u64,
    pub total_target_headcount: u64,
    pub avg_ds_percentage: f64,
    pub avg_achievement_percentage: f64,
    pub record_count: usize,
}

use crate::error::{ReportError, Result};
use crate::types::{RawReportRow, ReportRecord};
use crate::util::{
    coerce_amount, coerce_amount_or, coerce_count, coerce_text, is_malformed_number,
    parse_date_safe,
};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub undated_rows: usize,
    pub coerced_fields: usize,
}

/// The reports endpoint answers either with a bare array or with the rows
/// wrapped in a `data` envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Bare(Vec<serde_json::Value>),
    Wrapped { data: Vec<serde_json::Value> },
}

pub fn load_reports(path: impl AsRef<Path>) -> Result<(Vec<ReportRecord>, LoadReport)> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let result = match ext.as_str() {
        "json" => load_json(&std::fs::read_to_string(path)?),
        "csv" => load_csv(std::fs::File::open(path)?),
        _ => return Err(ReportError::UnsupportedFormat(path.display().to_string())),
    }?;
    let (_, report) = &result;
    tracing::info!(
        path = %path.display(),
        total = report.total_rows,
        loaded = report.loaded_rows,
        errors = report.parse_errors,
        undated = report.undated_rows,
        "Loaded report rows"
    );
    Ok(result)
}

pub fn load_json(body: &str) -> Result<(Vec<ReportRecord>, LoadReport)> {
    let rows = match serde_json::from_str::<Payload>(body)? {
        Payload::Bare(rows) => rows,
        Payload::Wrapped { data } => data,
    };
    let mut report = LoadReport::default();
    let mut records = Vec::with_capacity(rows.len());
    for value in rows {
        report.total_rows += 1;
        match serde_json::from_value::<RawReportRow>(value) {
            Ok(raw) => records.push(clean_row(raw, report.total_rows, &mut report)),
            Err(e) => {
                tracing::warn!(
                    row = report.total_rows,
                    error = %e,
                    "Skipping malformed report row"
                );
                report.parse_errors += 1;
            }
        }
    }
    report.loaded_rows = records.len();
    Ok((records, report))
}

pub fn load_csv<R: std::io::Read>(reader: R) -> Result<(Vec<ReportRecord>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut report = LoadReport::default();
    let mut records = Vec::new();
    for result in rdr.deserialize::<RawReportRow>() {
        report.total_rows += 1;
        match result {
            Ok(raw) => records.push(clean_row(raw, report.total_rows, &mut report)),
            Err(e) => {
                tracing::warn!(row = report.total_rows, error = %e, "Skipping malformed CSV row");
                report.parse_errors += 1;
            }
        }
    }
    report.loaded_rows = records.len();
    Ok((records, report))
}

/// Turn one loose row into a clean record. Never fails: bad numbers become
/// zero and a bad date leaves the record undated.
fn clean_row(raw: RawReportRow, row_no: usize, report: &mut LoadReport) -> ReportRecord {
    let numeric = [
        raw.fnb_revenue.as_ref(),
        raw.cinema_revenue.as_ref(),
        raw.audience_count.as_ref(),
        raw.target_headcount.as_ref(),
        raw.target_percentage.as_ref(),
    ];
    let coerced = numeric.iter().filter(|v| is_malformed_number(**v)).count();
    if coerced > 0 {
        tracing::debug!(row = row_no, fields = coerced, "Coerced malformed numeric fields");
        report.coerced_fields += coerced;
    }

    let date_text = coerce_text(raw.date.as_ref());
    let date = parse_date_safe(date_text.as_deref());
    if date.is_none() {
        tracing::debug!(row = row_no, date = ?date_text, "Unparsable report date");
        report.undated_rows += 1;
    }

    ReportRecord {
        id: coerce_text(raw.id.as_ref()).unwrap_or_else(|| format!("row-{}", row_no)),
        date,
        outlet_name: coerce_text(raw.outlet_name.as_ref())
            .unwrap_or_else(|| "Unknown Outlet".to_string()),
        line_of_business: coerce_text(raw.line_of_business.as_ref())
            .unwrap_or_else(|| "Unspecified".to_string()),
        fnb_revenue: coerce_amount(raw.fnb_revenue.as_ref()),
        cinema_revenue: coerce_amount(raw.cinema_revenue.as_ref()),
        audience_count: coerce_count(raw.audience_count.as_ref()),
        target_headcount: coerce_count(raw.target_headcount.as_ref()),
        target_percentage: coerce_amount_or(raw.target_percentage.as_ref(), 100.0),
    }
}

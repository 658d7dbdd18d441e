use crate::dashboard::Dashboard;
use crate::error::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Write every dashboard table into `dir`; returns the paths written.
pub fn export_dashboard(dir: &Path, dashboard: &Dashboard) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let stem = format!("{}_{:02}", dashboard.year, dashboard.month);
    let daily = dir.join(format!("daily_series_{}.csv", stem));
    let categories = dir.join(format!("category_breakdown_{}.csv", stem));
    let rows = dir.join(format!("report_rows_{}.csv", stem));
    let summary = dir.join(format!("summary_{}.json", stem));

    write_csv(&daily, &dashboard.daily)?;
    write_csv(&categories, &dashboard.categories)?;
    write_csv(&rows, &dashboard.rows)?;
    write_json(&summary, &dashboard.summary)?;
    tracing::info!(dir = %dir.display(), "Dashboard exported");
    Ok(vec![daily, categories, rows, summary])
}

/// Markdown table of the first `limit` rows under a heading, the way the
/// dashboard panels are echoed to the console.
pub fn render_panel<T>(heading: &str, rows: &[T], limit: usize) -> String
where
    T: Tabled,
{
    if rows.is_empty() {
        return format!("{}\n(no data)\n", heading);
    }
    let shown = rows.len().min(limit);
    let table = Table::new(&rows[..shown]).with(Style::markdown()).to_string();
    format!("{} (showing {} of {})\n{}\n", heading, shown, rows.len(), table)
}

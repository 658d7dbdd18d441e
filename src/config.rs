// Runtime configuration, read from the environment (and `.env` when present).
use std::env;
use std::path::PathBuf;

use crate::error::{ReportError, Result};
use crate::metrics::MetricsConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub session_file: PathBuf,
    pub metrics: MetricsConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal; real env vars still apply.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MetricsConfig::default();
        let number = |key: &str, default: f64| -> Result<f64> {
            match lookup(key) {
                None => Ok(default),
                Some(raw) => match raw.trim().replace(['_', ','], "").parse::<f64>() {
                    Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
                    _ => Err(ReportError::Config(format!(
                        "{} must be a positive number, got {:?}",
                        key, raw
                    ))),
                },
            }
        };

        Ok(Self {
            source: lookup("REPORT_SOURCE")
                .unwrap_or_else(|| "reports.json".to_string())
                .into(),
            output_dir: lookup("REPORT_OUTPUT_DIR").unwrap_or_else(|| ".".to_string()).into(),
            session_file: lookup("REPORT_SESSION_FILE")
                .unwrap_or_else(|| ".outlet_report_session.json".to_string())
                .into(),
            metrics: MetricsConfig {
                avg_spend_per_head: number(
                    "REPORT_AVG_SPEND_PER_HEAD",
                    defaults.avg_spend_per_head,
                )?,
                base_target: number("REPORT_BASE_TARGET", defaults.base_target)?,
                max_percentage: number("REPORT_MAX_PERCENTAGE", defaults.max_percentage)?,
            },
        })
    }
}

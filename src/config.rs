//! Dashboard Configuration
//! Fixed defaults for the review file, its columns and the reporting dates,
//! optionally overridden by a `dashboard.json` file in the working directory.

use crate::stats::DateWindow;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Date window starts after it ends ({start} > {end})")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
    #[error("Invalid date format '{0}'")]
    InvalidDateFormat(String),
}

/// Source column names of the review spreadsheet.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub written_at: String,
    pub category_code: String,
    pub sentiment: String,
    pub rating: String,
    pub text: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            written_at: "리뷰 작성시간".to_string(),
            category_code: "추가정보".to_string(),
            sentiment: "sentiment".to_string(),
            rating: "작성 리뷰 평점".to_string(),
            text: "리뷰 내용".to_string(),
        }
    }
}

/// Everything the dashboard needs that is not user-selectable at runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub columns: ColumnNames,
    /// Snapshot date for the metric cards.
    pub metrics_date: NaiveDate,
    /// Dates for which "Other" reviews are listed, in display order.
    pub other_table_dates: Vec<NaiveDate>,
    /// Daily granularity is zero-filled across this window.
    pub window: DateWindow,
    /// chrono format string for chart axis labels.
    pub date_format: String,
    pub font_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("전설의패치_reviews.xlsx"),
            columns: ColumnNames::default(),
            metrics_date: ymd(2024, 10, 20),
            other_table_dates: vec![ymd(2024, 10, 21), ymd(2024, 10, 20)],
            window: DateWindow::new(ymd(2024, 10, 12), ymd(2024, 10, 21)),
            date_format: "%Y-%m-%d".to_string(),
            font_path: None,
        }
    }
}

impl DashboardConfig {
    /// Load `path` if it exists, otherwise fall back to the built-in defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let config = Self::from_json(&raw)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.window.start > self.window.end {
            return Err(ConfigError::InvalidWindow {
                start: self.window.start,
                end: self.window.end,
            });
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::InvalidDateFormat(self.date_format.clone()));
        }
        Ok(())
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

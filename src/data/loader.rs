//! Review File Loader Module
//! Reads CSV files with Polars and spreadsheets with calamine into one DataFrame shape.

use crate::config::ColumnNames;
use crate::data::ReviewTable;
use calamine::{open_workbook_auto, Data, DataType as CellType, Reader};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Review file not found: {0}")]
    NotFound(PathBuf),
    #[error("Unsupported file type (expected .csv or a spreadsheet): {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Failed to read spreadsheet: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Spreadsheet has no worksheet")]
    NoWorksheet,
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Row {row}: cannot parse review timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },
}

/// Input file flavour, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    pub fn detect(path: &Path) -> Result<Self, LoaderError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(SourceFormat::Spreadsheet),
            _ => Err(LoaderError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Loads the review file once per session.
pub struct ReviewLoader {
    columns: ColumnNames,
}

impl ReviewLoader {
    pub fn new(columns: ColumnNames) -> Self {
        Self { columns }
    }

    /// Load and normalize the review file. All-or-nothing.
    pub fn load(&self, path: &Path) -> Result<ReviewTable, LoaderError> {
        let df = Self::read_frame(path)?;
        log::debug!("Raw frame: {} rows, columns {:?}", df.height(), df.get_column_names());

        let table = ReviewTable::from_dataframe(&df, &self.columns)?;
        log::info!("Loaded {} reviews from {}", table.len(), path.display());
        Ok(table)
    }

    /// Read the file into an untyped DataFrame.
    pub fn read_frame(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let format = SourceFormat::detect(path)?;
        log::info!("Reading {} as {:?}", path.display(), format);

        match format {
            SourceFormat::Csv => Self::read_csv(path),
            SourceFormat::Spreadsheet => Self::read_spreadsheet(path),
        }
    }

    fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;
        Ok(df)
    }

    /// First worksheet, first row as header. Cells are kept as text and typed later.
    fn read_spreadsheet(path: &Path) -> Result<DataFrame, LoaderError> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoaderError::NoWorksheet)??;

        let mut rows = range.rows();
        let Some(header) = rows.next() else {
            return Ok(DataFrame::empty());
        };

        let names: Vec<String> = header.iter().map(|c| c.to_string()).collect();
        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];

        for row in rows {
            for (i, column) in values.iter_mut().enumerate() {
                column.push(row.get(i).and_then(Self::cell_text));
            }
        }

        let columns: Vec<Column> = names
            .into_iter()
            .zip(values)
            .map(|(name, vals)| Column::new(name.into(), vals))
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    fn cell_text(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty => None,
            Data::String(s) if s.trim().is_empty() => None,
            Data::DateTime(_) | Data::DateTimeIso(_) => Some(
                cell.as_datetime()
                    .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_else(|| cell.to_string()),
            ),
            other => Some(other.to_string()),
        }
    }
}

//! Grid export: the visible rows as comma- or tab-separated text.
//!
//! Cells go through the same display formatter as the column filters, so an
//! exported sheet reads exactly like the grid.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{Terminator, WriterBuilder};
use thiserror::Error;
use tracing::info;

use bom_grid::{ColumnKey, VisibleRow};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to encode export rows: {0}")]
    Encode(#[from] csv::Error),

    #[error("export payload is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;

const CSV_COLUMNS: [(&str, ColumnKey); 12] = [
    ("Level", ColumnKey::Level),
    ("Item Number", ColumnKey::ItemNumber),
    ("Revision", ColumnKey::Revision),
    ("Description", ColumnKey::Description),
    ("Commodity", ColumnKey::Commodity),
    ("Plant", ColumnKey::Plant),
    ("Lifecycle Stage", ColumnKey::LifecycleStage),
    ("CO #", ColumnKey::PendingCoNumber),
    ("Make/Buy", ColumnKey::MakeBuy),
    ("Supplier", ColumnKey::Supplier),
    ("Lead Time", ColumnKey::LeadTime),
    ("Overall Readiness", ColumnKey::OverallReadiness),
];

const EXCEL_COLUMNS: [(&str, ColumnKey); 22] = [
    ("Level", ColumnKey::Level),
    ("Item Number", ColumnKey::ItemNumber),
    ("Revision", ColumnKey::Revision),
    ("Description", ColumnKey::Description),
    ("Commodity", ColumnKey::Commodity),
    ("Plant", ColumnKey::Plant),
    ("Lifecycle Stage", ColumnKey::LifecycleStage),
    ("CO #", ColumnKey::PendingCoNumber),
    ("CO Status", ColumnKey::CoStatus),
    ("CCO Status", ColumnKey::CcoStatus),
    ("Make/Buy", ColumnKey::MakeBuy),
    ("Supplier", ColumnKey::Supplier),
    ("Lead Time", ColumnKey::LeadTime),
    ("COO", ColumnKey::Coo),
    ("PPAP Status", ColumnKey::PpapStatus),
    ("Trade Compliance", ColumnKey::TradeComplianceStatus),
    ("Orderable", ColumnKey::Orderable),
    ("Overall Readiness", ColumnKey::OverallReadiness),
    ("Design Readiness", ColumnKey::DesignReadiness),
    ("Procurement Readiness", ColumnKey::ProcurementReadiness),
    ("Manufacturing Readiness", ColumnKey::ManufacturingReadiness),
    ("Quality Readiness", ColumnKey::QualityReadiness),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated, short column set.
    Csv,
    /// Tab-separated, full column set, opened by spreadsheet tools as `.xls`.
    Excel,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel => "xls",
        }
    }

    fn delimiter(&self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Excel => b'\t',
        }
    }

    fn columns(&self) -> &'static [(&'static str, ColumnKey)] {
        match self {
            ExportFormat::Csv => &CSV_COLUMNS,
            ExportFormat::Excel => &EXCEL_COLUMNS,
        }
    }

    /// Header labels in output order.
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns().iter().map(|(label, _)| *label).collect()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Excel => write!(f, "excel"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xls" | "tsv" => Ok(ExportFormat::Excel),
            _ => Err(format!("Unknown export format: {s}")),
        }
    }
}

/// Render the visible rows, header first, one line per row.
pub fn export_rows(rows: &[VisibleRow<'_>], format: ExportFormat) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter())
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(format.headers())?;
    for row in rows {
        writer.write_record(format.columns().iter().map(|(_, key)| key.display(row.item)))?;
    }
    let bytes = writer.into_inner().map_err(|e| ExportError::Encode(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}

/// `bom-grid-<date>.<ext>`
pub fn default_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("bom-grid-{}.{}", date.format("%Y-%m-%d"), format.extension())
}

/// Write the export payload to `path`, creating parent directories.
pub fn write_export(rows: &[VisibleRow<'_>], format: ExportFormat, path: &Path) -> Result<PathBuf> {
    let payload = export_rows(rows, format)?;
    let write_error = |source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, payload).map_err(write_error)?;
    info!(path = %path.display(), rows = rows.len(), %format, "exported grid");
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_sets_have_fixed_widths() {
        assert_eq!(ExportFormat::Csv.headers().len(), 12);
        assert_eq!(ExportFormat::Excel.headers().len(), 22);
        assert_eq!(ExportFormat::Excel.headers()[8], "CO Status");
    }

    #[test]
    fn default_names_carry_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(default_file_name(ExportFormat::Csv, date), "bom-grid-2026-03-09.csv");
        assert_eq!(default_file_name(ExportFormat::Excel, date), "bom-grid-2026-03-09.xls");
    }

    #[test]
    fn empty_view_exports_header_only() {
        let payload = export_rows(&[], ExportFormat::Csv).unwrap();
        assert_eq!(payload.lines().count(), 1);
        assert!(payload.starts_with("Level,Item Number,"));
    }

    #[test]
    fn format_parses_aliases() {
        assert_eq!("XLS".parse::<ExportFormat>().unwrap(), ExportFormat::Excel);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }
}

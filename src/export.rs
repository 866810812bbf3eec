/// Station export to CSV and JSON.
///
/// Produces the payload, file name, and MIME type for a researcher's
/// selection. `write_export` then drops the payload into an output
/// directory, which is the command-line counterpart of a browser download.

use chrono::{NaiveDate, SecondsFormat};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::logging::{self, Component};
use crate::model::Station;

/// Column order of the CSV export.
pub const CSV_HEADERS: [&str; 8] = [
    "Station_ID",
    "Location",
    "District",
    "State",
    "Water_Level_m",
    "Status",
    "Trend",
    "Timestamp",
];

/// Message shown when export is attempted with nothing selected.
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one station to export";

// ---------------------------------------------------------------------------
// Format and date range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unsupported export format '{}' (expected csv or json)", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// Date range stamped into the export file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for DateRange {
    /// 2023-07-01 to 2024-01-01, the window of the reference trend series.
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 7, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq)]
pub enum ExportError {
    /// Nothing was selected. Surfaced to the user, not a fault.
    EmptySelection,
    /// The payload could not be encoded.
    Serialize(String),
    /// The payload could not be written to disk.
    Io(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::EmptySelection => write!(f, "{}", EMPTY_SELECTION_MESSAGE),
            ExportError::Serialize(msg) => write!(f, "Export encoding failed: {}", msg),
            ExportError::Io(msg) => write!(f, "Export write failed: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// A finished export, ready to be saved.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportFile {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
    pub station_count: usize,
}

/// `dwlr_data_<start>_to_<end>.<ext>`
pub fn export_file_name(range: &DateRange, format: ExportFormat) -> String {
    format!(
        "dwlr_data_{}_to_{}.{}",
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Builds the export payload for the selected stations.
///
/// Fails with `ExportError::EmptySelection` when `selected` is empty.
pub fn export_stations(
    selected: &[&Station],
    format: ExportFormat,
    range: &DateRange,
) -> Result<ExportFile, ExportError> {
    if selected.is_empty() {
        logging::warn(Component::Export, None, EMPTY_SELECTION_MESSAGE);
        return Err(ExportError::EmptySelection);
    }

    let content = match format {
        ExportFormat::Csv => to_csv(selected)?,
        ExportFormat::Json => to_json(selected)?,
    };

    Ok(ExportFile {
        file_name: export_file_name(range, format),
        mime_type: format.mime_type(),
        content,
        station_count: selected.len(),
    })
}

/// Header row then one row per station; rows joined by `\n` with no
/// trailing newline.
pub fn to_csv(stations: &[&Station]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| ExportError::Serialize(e.to_string()))?;

    for station in stations {
        let level = station.water_level.to_string();
        let timestamp = station.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true);
        writer
            .write_record([
                station.id.as_str(),
                station.location.as_str(),
                station.district.as_str(),
                station.state.as_str(),
                level.as_str(),
                station.status.as_str(),
                station.trend.as_str(),
                timestamp.as_str(),
            ])
            .map_err(|e| ExportError::Serialize(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Serialize(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ExportError::Serialize(e.to_string()))?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// The selected records, pretty-printed.
pub fn to_json<T: Serialize + ?Sized>(stations: &T) -> Result<String, ExportError> {
    serde_json::to_string_pretty(stations).map_err(|e| ExportError::Serialize(e.to_string()))
}

/// Writes the export into `dir`, creating it if needed. Returns the full path.
pub fn write_export(file: &ExportFile, dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir).map_err(|e| ExportError::Io(format!("{}: {}", dir.display(), e)))?;

    let path = dir.join(&file.file_name);
    fs::write(&path, &file.content)
        .map_err(|e| ExportError::Io(format!("{}: {}", path.display(), e)))?;

    logging::log_export_summary(file.station_count, &file.file_name, file.mime_type);
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

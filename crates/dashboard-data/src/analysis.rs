//! Top-level pipeline: load → clean → aggregate.
//!
//! Produces a [`DashboardData`] holding everything the presentation layer
//! shows for one loaded spreadsheet.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use dashboard_core::error::Result;
use dashboard_core::models::{Column, RawTable, SalesRecord};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::aggregator::{SalesAggregator, SalesSummary};
use crate::cleaning::{clean, CleaningReport};
use crate::reader::load_workbook;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the dashboard data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Display name of the loaded file.
    pub source: String,
    /// Worksheet name, when one was requested explicitly.
    pub sheet: Option<String>,
    /// Row counts from the cleaning step.
    pub cleaning: CleaningReport,
    /// Wall-clock seconds spent reading the workbook.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent cleaning.
    pub clean_time_seconds: f64,
    /// Wall-clock seconds spent aggregating.
    pub aggregate_time_seconds: f64,
}

/// One line of the cleaned-data overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub non_null: usize,
    pub dtype: String,
}

/// Column listing of the cleaned table: names, non-null counts, dtypes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableOverview {
    pub rows: usize,
    pub columns: Vec<ColumnInfo>,
}

impl TableOverview {
    /// Describe `records` column by column.
    pub fn of(records: &[SalesRecord]) -> Self {
        let columns = Column::ALL
            .iter()
            .map(|c| ColumnInfo {
                name: c.header().to_string(),
                non_null: records.len(),
                dtype: c.kind().dtype_label().to_string(),
            })
            .collect();
        Self {
            rows: records.len(),
            columns,
        }
    }
}

/// The complete output of [`analyze_file`].
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    /// Header plus the first rows of the sheet, before cleaning.
    #[serde(skip)]
    pub raw_preview: RawTable,
    /// Cleaned records.
    #[serde(skip)]
    pub records: Vec<SalesRecord>,
    pub overview: TableOverview,
    pub summary: SalesSummary,
    pub metadata: AnalysisMetadata,
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the full pipeline on the spreadsheet at `path`.
///
/// 1. Read the worksheet (first one unless `sheet` is given).
/// 2. Clean it into [`SalesRecord`]s.
/// 3. Compute the five chart aggregations.
pub fn analyze_file(
    path: &Path,
    sheet: Option<&str>,
    preview_rows: usize,
) -> Result<DashboardData> {
    let load_start = Instant::now();
    let raw = load_workbook(path, sheet)?;
    let load_time = load_start.elapsed().as_secs_f64();

    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let mut data = analyze_table(&raw, &source, preview_rows)?;
    data.metadata.sheet = sheet.map(str::to_string);
    data.metadata.load_time_seconds = load_time;
    Ok(data)
}

/// Run the clean and aggregate steps on an already loaded table.
pub fn analyze_table(raw: &RawTable, source: &str, preview_rows: usize) -> Result<DashboardData> {
    let raw_preview = RawTable::new(raw.headers.clone(), raw.head(preview_rows).to_vec());

    let clean_start = Instant::now();
    let cleaned = clean(raw)?;
    let clean_time = clean_start.elapsed().as_secs_f64();

    let aggregate_start = Instant::now();
    let summary = SalesAggregator::summarize(&cleaned.records);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    info!(
        "Analysed {}: {} of {} rows kept, total revenue {:.2}",
        source, cleaned.report.rows_kept, cleaned.report.rows_read, summary.total_revenue
    );

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        source: source.to_string(),
        sheet: None,
        cleaning: cleaned.report,
        load_time_seconds: 0.0,
        clean_time_seconds: clean_time,
        aggregate_time_seconds: aggregate_time,
    };

    Ok(DashboardData {
        raw_preview,
        overview: TableOverview::of(&cleaned.records),
        records: cleaned.records,
        summary,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

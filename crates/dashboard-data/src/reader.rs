//! Spreadsheet loading for the sales dashboard.
//!
//! Opens the uploaded workbook with [`calamine`], picks the worksheet and
//! converts its cells into a [`RawTable`] for the cleaning step.

use std::path::Path;

use calamine::{open_workbook_auto, Data, DataType, Range, Reader};
use chrono::NaiveDateTime;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{RawCell, RawTable};
use tracing::{debug, info};

/// File extensions the workbook reader understands.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Whether `path` carries one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Load one worksheet of the workbook at `path` into a [`RawTable`].
///
/// * `sheet` – worksheet name; the first worksheet is used when `None`.
pub fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    std::fs::metadata(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    if !is_supported(path) {
        return Err(DashboardError::UnsupportedFormat(path.to_path_buf()));
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| DashboardError::Workbook(e.to_string()))?;

    let range = match sheet {
        Some(name) => {
            if !workbook.sheet_names().iter().any(|s| s == name) {
                return Err(DashboardError::SheetNotFound(name.to_string()));
            }
            workbook
                .worksheet_range(name)
                .map_err(|e| DashboardError::Workbook(e.to_string()))?
        }
        None => workbook
            .worksheet_range_at(0)
            .ok_or(DashboardError::NoWorksheets)?
            .map_err(|e| DashboardError::Workbook(e.to_string()))?,
    };

    let table = table_from_range(&range);
    info!(
        "Loaded {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Convert a worksheet range into a [`RawTable`], treating the first row as
/// the header row.
///
/// An empty range yields an empty table with no headers.
pub fn table_from_range(range: &Range<Data>) -> RawTable {
    let mut rows = range.rows();

    let Some(header_row) = rows.next() else {
        debug!("Worksheet is empty");
        return RawTable::default();
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|c| c.as_string().unwrap_or_else(|| c.to_string()))
        .collect();

    let data: Vec<Vec<RawCell>> = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    RawTable::new(headers, data)
}

/// Map a single calamine cell onto a [`RawCell`].
pub fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(s) => RawCell::Text(s.clone()),
        Data::Int(i) => RawCell::Int(*i),
        Data::Float(f) => RawCell::Float(*f),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(_) => cell
            .as_datetime()
            .map(RawCell::DateTime)
            .unwrap_or_else(|| RawCell::Text(cell.to_string())),
        Data::DateTimeIso(s) => cell
            .as_datetime()
            .or_else(|| parse_iso_datetime(s))
            .map(RawCell::DateTime)
            .unwrap_or_else(|| RawCell::Text(s.clone())),
        Data::DurationIso(s) => RawCell::Text(s.clone()),
        Data::Error(e) => RawCell::Error(e.to_string()),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s.trim(), fmt).ok())
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(chrono::NaiveTime::MIN))
        })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use chrono::NaiveDate;
    use std::io::Write;
    use std::path::PathBuf;

    fn make_range(cells: &[&[Data]]) -> Range<Data> {
        let height = cells.len() as u32;
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), cell.clone());
            }
        }
        range
    }

    fn sample_workbook() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sales_sample.xlsx")
    }

    // ── is_supported ──────────────────────────────────────────────────────────

    #[test]
    fn test_is_supported_extensions() {
        assert!(is_supported(Path::new("sales_data.xlsx")));
        assert!(is_supported(Path::new("SALES.XLSX")));
        assert!(is_supported(Path::new("archive/q1.ods")));
        assert!(!is_supported(Path::new("sales.csv")));
        assert!(!is_supported(Path::new("sales")));
    }

    // ── convert_cell ──────────────────────────────────────────────────────────

    #[test]
    fn test_convert_scalar_cells() {
        assert_eq!(convert_cell(&Data::Empty), RawCell::Empty);
        assert_eq!(
            convert_cell(&Data::String("East".into())),
            RawCell::Text("East".into())
        );
        assert_eq!(convert_cell(&Data::Int(42)), RawCell::Int(42));
        assert_eq!(convert_cell(&Data::Float(0.15)), RawCell::Float(0.15));
        assert_eq!(convert_cell(&Data::Bool(true)), RawCell::Bool(true));
    }

    #[test]
    fn test_convert_iso_datetime_cell() {
        let cell = Data::DateTimeIso("2023-02-03T10:30:00".into());
        let expected = NaiveDate::from_ymd_opt(2023, 2, 3)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(convert_cell(&cell), RawCell::DateTime(expected));
    }

    #[test]
    fn test_convert_error_cell_is_missing() {
        let cell = convert_cell(&Data::Error(CellErrorType::NA));
        assert!(matches!(cell, RawCell::Error(_)));
        assert!(cell.is_missing());
    }

    // ── table_from_range ──────────────────────────────────────────────────────

    #[test]
    fn test_table_from_range_splits_header() {
        let range = make_range(&[
            &[Data::String("Region".into()), Data::String("Sales_Amount".into())],
            &[Data::String("East".into()), Data::Float(100.0)],
            &[Data::String("West".into()), Data::Float(30.0)],
        ]);
        let table = table_from_range(&range);

        assert_eq!(table.headers, vec!["Region", "Sales_Amount"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 0), &RawCell::Text("East".into()));
        assert_eq!(table.cell(1, 1), &RawCell::Float(30.0));
    }

    #[test]
    fn test_table_from_range_keeps_blank_cells() {
        let range = make_range(&[
            &[Data::String("Region".into()), Data::String("Discount".into())],
            &[Data::String("East".into()), Data::Empty],
        ]);
        let table = table_from_range(&range);
        assert_eq!(table.cell(0, 1), &RawCell::Empty);
    }

    #[test]
    fn test_table_from_empty_range() {
        let range: Range<Data> = Range::empty();
        let table = table_from_range(&range);
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }

    // ── load_workbook ─────────────────────────────────────────────────────────

    #[test]
    fn test_load_workbook_reads_first_sheet() {
        let table = load_workbook(&sample_workbook(), None).unwrap();

        assert_eq!(table.headers.len(), 14);
        assert_eq!(table.headers[0], "Sale_Date");
        assert_eq!(table.headers[13], "Region_and_Sales_Rep");
        assert_eq!(table.len(), 6);

        let feb_3 = NaiveDate::from_ymd_opt(2023, 2, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(table.cell(0, 0), &RawCell::DateTime(feb_3));
        assert_eq!(table.cell(0, 2), &RawCell::Float(100.0));
        assert_eq!(table.cell(0, 8), &RawCell::Text("East".into()));
        assert_eq!(table.cell(4, 6), &RawCell::Text("N/A".into()));
        assert_eq!(table.cell(5, 8), &RawCell::Empty);
    }

    #[test]
    fn test_load_workbook_named_sheet() {
        let table = load_workbook(&sample_workbook(), Some("Sales")).unwrap();
        assert_eq!(table.len(), 6);

        let err = load_workbook(&sample_workbook(), Some("Returns")).unwrap_err();
        assert!(matches!(err, DashboardError::SheetNotFound(ref s) if s == "Returns"));
    }

    #[test]
    fn test_load_workbook_missing_file() {
        let err = load_workbook(&PathBuf::from("/definitely/not/here.xlsx"), None).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }));
    }

    #[test]
    fn test_load_workbook_rejects_unsupported_extension() {
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .expect("tempfile");
        writeln!(file, "Region,Sales_Amount").expect("write");

        let err = load_workbook(file.path(), None).unwrap_err();
        assert!(matches!(err, DashboardError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_workbook_rejects_corrupt_workbook() {
        let mut file = tempfile::Builder::new()
            .suffix(".xlsx")
            .tempfile()
            .expect("tempfile");
        file.write_all(b"this is not a zip archive").expect("write");

        let err = load_workbook(file.path(), None).unwrap_err();
        assert!(matches!(err, DashboardError::Workbook(_)));
    }
}

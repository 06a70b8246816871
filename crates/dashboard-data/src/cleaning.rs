//! Cleaning of the raw worksheet into [`SalesRecord`]s.
//!
//! Steps, in order:
//!
//! 1. parse `Sale_Date`;
//! 2. cast the numeric columns (a present non-numeric value is fatal);
//! 3. drop rows with any missing field;
//! 4. drop duplicate rows, keeping the first occurrence;
//! 5. lower-case and trim the text columns.
//!
//! Duplicates are detected on the normalised form of each row, so two rows
//! that only differ in text case or padding collapse into one and cleaning a
//! cleaned table is a no-op.

use std::collections::{HashMap, HashSet};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::{Column, RawCell, RawTable, SalesRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Text formats accepted for `Sale_Date` cells stored as strings.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// ── Public types ──────────────────────────────────────────────────────────────

/// Row counts collected while cleaning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub rows_read: usize,
    pub dropped_incomplete: usize,
    pub dropped_duplicates: usize,
    pub rows_kept: usize,
}

/// Output of [`clean`]: the surviving records plus how many were removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedTable {
    pub records: Vec<SalesRecord>,
    pub report: CleaningReport,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Clean `raw` into typed, complete, unique and normalised records.
///
/// Fails with [`DashboardError::MissingColumn`] when a schema column is absent
/// and with [`DashboardError::TypeCoercion`] / [`DashboardError::DateParse`]
/// on the first value that cannot be converted.  An empty sheet (no header
/// row) cleans to an empty table.
pub fn clean(raw: &RawTable) -> Result<CleanedTable> {
    if raw.headers.is_empty() && raw.is_empty() {
        return Ok(CleanedTable::default());
    }

    let layout = ColumnLayout::resolve(raw)?;

    // Steps 1 and 2: coerce every row before anything is dropped, so a bad
    // value fails the load even when its row would be discarded later.
    let mut complete: Vec<SalesRecord> = Vec::with_capacity(raw.len());
    let mut dropped_incomplete = 0usize;
    for row in 0..raw.len() {
        match coerce_row(raw, &layout, row)? {
            Some(record) => complete.push(record),
            // Step 3.
            None => dropped_incomplete += 1,
        }
    }

    // Step 4.
    let before_dedup = complete.len();
    let mut records = drop_duplicates(complete);
    let dropped_duplicates = before_dedup - records.len();

    // Step 5.
    for record in &mut records {
        record.normalize_text();
    }

    let report = CleaningReport {
        rows_read: raw.len(),
        dropped_incomplete,
        dropped_duplicates,
        rows_kept: records.len(),
    };
    debug!(
        "Cleaning: {} read, {} incomplete, {} duplicates, {} kept",
        report.rows_read, report.dropped_incomplete, report.dropped_duplicates, report.rows_kept
    );

    Ok(CleanedTable { records, report })
}

// ── Column layout ─────────────────────────────────────────────────────────────

/// Position of each schema column in the sheet.
struct ColumnLayout {
    positions: HashMap<Column, usize>,
}

impl ColumnLayout {
    fn resolve(raw: &RawTable) -> Result<Self> {
        let mut positions = HashMap::with_capacity(Column::ALL.len());
        for column in Column::ALL {
            let idx = raw
                .column_index(column)
                .ok_or_else(|| DashboardError::MissingColumn(column.header().to_string()))?;
            positions.insert(column, idx);
        }

        let extra: Vec<&str> = raw
            .headers
            .iter()
            .enumerate()
            .filter(|(i, _)| !positions.values().any(|p| p == i))
            .map(|(_, h)| h.as_str())
            .collect();
        if !extra.is_empty() {
            debug!("Ignoring columns outside the schema: {:?}", extra);
        }

        Ok(Self { positions })
    }

    fn cell<'a>(&self, raw: &'a RawTable, row: usize, column: Column) -> &'a RawCell {
        raw.cell(row, self.positions[&column])
    }
}

// ── Row coercion ──────────────────────────────────────────────────────────────

/// Typed fields of one row; `None` marks a missing value.
struct RowFields {
    sale_date: Option<NaiveDateTime>,
    product_id: Option<i64>,
    sales_amount: Option<f64>,
    quantity_sold: Option<i64>,
    unit_cost: Option<f64>,
    unit_price: Option<f64>,
    discount: Option<f64>,
    text: [Option<String>; 7],
}

impl RowFields {
    fn into_record(self) -> Option<SalesRecord> {
        let [sales_rep, region, product_category, customer_type, payment_method, sales_channel, region_and_sales_rep] =
            self.text;
        Some(SalesRecord {
            sale_date: self.sale_date?,
            product_id: self.product_id?,
            sales_amount: self.sales_amount?,
            quantity_sold: self.quantity_sold?,
            unit_cost: self.unit_cost?,
            unit_price: self.unit_price?,
            discount: self.discount?,
            sales_rep: sales_rep?,
            region: region?,
            product_category: product_category?,
            customer_type: customer_type?,
            payment_method: payment_method?,
            sales_channel: sales_channel?,
            region_and_sales_rep: region_and_sales_rep?,
        })
    }
}

/// Coerce data row `row`; `Ok(None)` when any field is missing.
fn coerce_row(raw: &RawTable, layout: &ColumnLayout, row: usize) -> Result<Option<SalesRecord>> {
    // Header occupies sheet row 1, data starts at row 2.
    let sheet_row = row + 2;
    let cell = |column: Column| layout.cell(raw, row, column);

    let fields = RowFields {
        sale_date: coerce_date(cell(Column::SaleDate), sheet_row)?,
        product_id: coerce_integer(cell(Column::ProductId), Column::ProductId, sheet_row)?,
        sales_amount: coerce_decimal(cell(Column::SalesAmount), Column::SalesAmount, sheet_row)?,
        quantity_sold: coerce_integer(cell(Column::QuantitySold), Column::QuantitySold, sheet_row)?,
        unit_cost: coerce_decimal(cell(Column::UnitCost), Column::UnitCost, sheet_row)?,
        unit_price: coerce_decimal(cell(Column::UnitPrice), Column::UnitPrice, sheet_row)?,
        discount: coerce_decimal(cell(Column::Discount), Column::Discount, sheet_row)?,
        text: Column::TEXT.map(|column| coerce_text(cell(column))),
    };

    Ok(fields.into_record())
}

fn coercion_error(column: Column, row: usize, cell: &RawCell) -> DashboardError {
    DashboardError::TypeCoercion {
        column: column.header().to_string(),
        row,
        value: cell.to_string(),
        expected: column.kind().expected_name(),
    }
}

/// Parse a `Sale_Date` cell, keeping any time of day.
///
/// Numbers are read as Excel date serials; plain dates land on midnight.
pub(crate) fn coerce_date(cell: &RawCell, row: usize) -> Result<Option<NaiveDateTime>> {
    if cell.is_missing() {
        return Ok(None);
    }
    let date_error = || DashboardError::DateParse {
        row,
        value: cell.to_string(),
    };
    match cell {
        RawCell::DateTime(dt) => Ok(Some(*dt)),
        RawCell::Text(s) => parse_date_text(s.trim()).map(Some).ok_or_else(date_error),
        RawCell::Int(i) => excel_serial_to_datetime(*i as f64).map(Some).ok_or_else(date_error),
        RawCell::Float(f) => excel_serial_to_datetime(*f).map(Some).ok_or_else(date_error),
        _ => Err(date_error()),
    }
}

fn parse_date_text(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Convert an Excel 1900-system date serial to a date-time.
///
/// The fractional part is the time of day, rounded to the millisecond.
fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial >= 2_958_466.0 {
        return None;
    }
    let days = serial.trunc();
    let millis = ((serial - days) * 86_400_000.0).round() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_time(NaiveTime::MIN);
    epoch
        .checked_add_signed(Duration::days(days as i64))?
        .checked_add_signed(Duration::milliseconds(millis))
}

pub(crate) fn coerce_integer(cell: &RawCell, column: Column, row: usize) -> Result<Option<i64>> {
    if cell.is_missing() {
        return Ok(None);
    }
    let value = match cell {
        RawCell::Int(i) => Some(*i),
        RawCell::Float(f) if f.is_finite() && f.abs() < i64::MAX as f64 => Some(f.trunc() as i64),
        RawCell::Bool(b) => Some(i64::from(*b)),
        RawCell::Text(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    value
        .map(Some)
        .ok_or_else(|| coercion_error(column, row, cell))
}

/// Cast a decimal cell; NaN counts as missing, infinities are rejected.
pub(crate) fn coerce_decimal(cell: &RawCell, column: Column, row: usize) -> Result<Option<f64>> {
    if cell.is_missing() {
        return Ok(None);
    }
    let value = match cell {
        RawCell::Int(i) => Some(*i as f64),
        RawCell::Float(f) => Some(*f),
        RawCell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        RawCell::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match value {
        Some(v) if v.is_nan() => Ok(None),
        Some(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(coercion_error(column, row, cell)),
    }
}

fn coerce_text(cell: &RawCell) -> Option<String> {
    match cell {
        _ if cell.is_missing() => None,
        RawCell::Text(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

// ── Deduplication ─────────────────────────────────────────────────────────────

/// Hashable identity of a record after text normalisation.
#[derive(PartialEq, Eq, Hash)]
struct RecordKey {
    sale_date: NaiveDateTime,
    product_id: i64,
    quantity_sold: i64,
    decimals: [u64; 4],
    text: Vec<String>,
}

impl RecordKey {
    fn of(record: &SalesRecord) -> Self {
        let mut normalized = record.clone();
        normalized.normalize_text();
        let SalesRecord {
            sales_rep,
            region,
            product_category,
            customer_type,
            payment_method,
            sales_channel,
            region_and_sales_rep,
            ..
        } = normalized;
        Self {
            sale_date: record.sale_date,
            product_id: record.product_id,
            quantity_sold: record.quantity_sold,
            decimals: [
                float_bits(record.sales_amount),
                float_bits(record.unit_cost),
                float_bits(record.unit_price),
                float_bits(record.discount),
            ],
            text: vec![
                sales_rep,
                region,
                product_category,
                customer_type,
                payment_method,
                sales_channel,
                region_and_sales_rep,
            ],
        }
    }
}

/// Bit pattern with `-0.0` folded onto `0.0`.
fn float_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

fn drop_duplicates(records: Vec<SalesRecord>) -> Vec<SalesRecord> {
    let mut seen: HashSet<RecordKey> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(RecordKey::of(record)))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

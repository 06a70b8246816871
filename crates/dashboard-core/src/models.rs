use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage type a schema column is coerced to during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Date,
    Integer,
    Decimal,
    Text,
}

impl ColumnKind {
    /// Dtype label shown in the cleaned-data overview.
    pub fn dtype_label(self) -> &'static str {
        match self {
            ColumnKind::Date => "datetime64",
            ColumnKind::Integer => "int64",
            ColumnKind::Decimal => "float64",
            ColumnKind::Text => "object",
        }
    }

    /// Human-readable type name used in coercion errors.
    pub fn expected_name(self) -> &'static str {
        match self {
            ColumnKind::Date => "date",
            ColumnKind::Integer => "integer",
            ColumnKind::Decimal => "decimal",
            ColumnKind::Text => "text",
        }
    }
}

/// The fixed spreadsheet schema, in sheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    SaleDate,
    ProductId,
    SalesAmount,
    QuantitySold,
    UnitCost,
    UnitPrice,
    Discount,
    SalesRep,
    Region,
    ProductCategory,
    CustomerType,
    PaymentMethod,
    SalesChannel,
    RegionAndSalesRep,
}

impl Column {
    pub const ALL: [Column; 14] = [
        Column::SaleDate,
        Column::ProductId,
        Column::SalesAmount,
        Column::QuantitySold,
        Column::UnitCost,
        Column::UnitPrice,
        Column::Discount,
        Column::SalesRep,
        Column::Region,
        Column::ProductCategory,
        Column::CustomerType,
        Column::PaymentMethod,
        Column::SalesChannel,
        Column::RegionAndSalesRep,
    ];

    /// Columns that are lower-cased and trimmed during cleaning.
    pub const TEXT: [Column; 7] = [
        Column::SalesRep,
        Column::Region,
        Column::ProductCategory,
        Column::CustomerType,
        Column::PaymentMethod,
        Column::SalesChannel,
        Column::RegionAndSalesRep,
    ];

    /// Header name as it appears in the spreadsheet.
    pub fn header(self) -> &'static str {
        match self {
            Column::SaleDate => "Sale_Date",
            Column::ProductId => "Product_ID",
            Column::SalesAmount => "Sales_Amount",
            Column::QuantitySold => "Quantity_Sold",
            Column::UnitCost => "Unit_Cost",
            Column::UnitPrice => "Unit_Price",
            Column::Discount => "Discount",
            Column::SalesRep => "Sales_Rep",
            Column::Region => "Region",
            Column::ProductCategory => "Product_Category",
            Column::CustomerType => "Customer_Type",
            Column::PaymentMethod => "Payment_Method",
            Column::SalesChannel => "Sales_Channel",
            Column::RegionAndSalesRep => "Region_and_Sales_Rep",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::SaleDate => ColumnKind::Date,
            Column::ProductId | Column::QuantitySold => ColumnKind::Integer,
            Column::SalesAmount | Column::UnitCost | Column::UnitPrice | Column::Discount => {
                ColumnKind::Decimal
            }
            _ => ColumnKind::Text,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// One spreadsheet cell before type coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    /// Excel error value such as `#N/A` or `#DIV/0!`.
    Error(String),
}

/// Text values read as missing, compared against the trimmed cell text.
pub const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

impl RawCell {
    /// Whether the cell counts as a missing value.
    ///
    /// Blank text, the [`NA_VALUES`] markers and NaN floats are missing.
    pub fn is_missing(&self) -> bool {
        match self {
            RawCell::Empty | RawCell::Error(_) => true,
            RawCell::Text(s) => {
                let s = s.trim();
                s.is_empty() || NA_VALUES.contains(&s)
            }
            RawCell::Float(f) => f.is_nan(),
            _ => false,
        }
    }
}

impl fmt::Display for RawCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCell::Empty => f.write_str("NaN"),
            RawCell::Text(s) => f.write_str(s),
            RawCell::Int(i) => write!(f, "{i}"),
            RawCell::Float(v) => write!(f, "{v}"),
            RawCell::Bool(b) => write!(f, "{b}"),
            RawCell::DateTime(dt) => {
                if dt.time() == chrono::NaiveTime::MIN {
                    write!(f, "{}", dt.date())
                } else {
                    write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
                }
            }
            RawCell::Error(e) => f.write_str(e),
        }
    }
}

/// A worksheet as read from disk: header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<RawCell>>) -> Self {
        Self { headers, rows }
    }

    /// Position of `column` in the header row (headers compared trimmed).
    pub fn column_index(&self, column: Column) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim() == column.header())
    }

    /// Cell at (`row`, `col`); short rows read as [`RawCell::Empty`].
    pub fn cell(&self, row: usize, col: usize) -> &RawCell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&RawCell::Empty)
    }

    /// The first `n` data rows.
    pub fn head(&self, n: usize) -> &[Vec<RawCell>] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single cleaned sales row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub sale_date: NaiveDateTime,
    pub product_id: i64,
    pub sales_amount: f64,
    pub quantity_sold: i64,
    pub unit_cost: f64,
    pub unit_price: f64,
    pub discount: f64,
    pub sales_rep: String,
    pub region: String,
    pub product_category: String,
    pub customer_type: String,
    pub payment_method: String,
    pub sales_channel: String,
    pub region_and_sales_rep: String,
}

impl SalesRecord {
    /// Mutable references to every text field, in schema order.
    pub fn text_fields_mut(&mut self) -> [&mut String; 7] {
        [
            &mut self.sales_rep,
            &mut self.region,
            &mut self.product_category,
            &mut self.customer_type,
            &mut self.payment_method,
            &mut self.sales_channel,
            &mut self.region_and_sales_rep,
        ]
    }

    /// Lower-case and trim every text field in place.
    pub fn normalize_text(&mut self) {
        for field in self.text_fields_mut() {
            *field = normalize_text(field);
        }
    }
}

/// Lower-case `value` and strip surrounding whitespace.
///
/// ```
/// use dashboard_core::models::normalize_text;
///
/// assert_eq!(normalize_text("  East "), "east");
/// assert_eq!(normalize_text("Returning\t"), "returning");
/// ```
pub fn normalize_text(value: &str) -> String {
    value.to_lowercase().trim().to_string()
}

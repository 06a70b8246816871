//! Plain-text and JSON renderings of a [`DashboardData`], used by the
//! `summary` and `json` views.

use std::fmt::Write;

use dashboard_core::error::Result;
use dashboard_core::formatting::{format_currency, format_number, format_percent};

use crate::analysis::DashboardData;

/// Shown when no spreadsheet has been given yet.
pub const PROMPT_TEXT: &str = "Please upload an Excel file to proceed.";

/// Shown in place of the detailed error when a load fails.
pub const LOAD_FAILED_TEXT: &str = "Failed to process the uploaded file.";

/// Render the dashboard results as a markdown-style text report.
pub fn build_report(data: &DashboardData) -> String {
    let summary = &data.summary;
    let cleaning = &data.metadata.cleaning;
    let mut output = String::new();

    let _ = writeln!(output, "# Sales Data Dashboard");
    let _ = writeln!(
        output,
        "Source: {} ({} of {} rows kept, {} incomplete, {} duplicate)",
        data.metadata.source,
        cleaning.rows_kept,
        cleaning.rows_read,
        cleaning.dropped_incomplete,
        cleaning.dropped_duplicates
    );
    let _ = writeln!(
        output,
        "Total revenue: {}",
        format_currency(summary.total_revenue)
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "## Revenue by Region");
    if summary.revenue_by_region.is_empty() {
        let _ = writeln!(output, "No sales recorded.");
    }
    for group in &summary.revenue_by_region {
        let _ = writeln!(output, "- {}: {}", group.key, format_currency(group.total));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Top 5 Products by Revenue");
    if summary.top_products.is_empty() {
        let _ = writeln!(output, "No sales recorded.");
    }
    for (rank, group) in summary.top_products.iter().enumerate() {
        let _ = writeln!(
            output,
            "{}. Product {}: {}",
            rank + 1,
            group.key,
            format_currency(group.total)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Revenue by Sales Representative");
    if summary.revenue_by_rep.is_empty() {
        let _ = writeln!(output, "No sales recorded.");
    }
    for group in &summary.revenue_by_rep {
        let _ = writeln!(output, "- {}: {}", group.key, format_currency(group.total));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Customer Type Distribution");
    if summary.customer_types.is_empty() {
        let _ = writeln!(output, "No sales recorded.");
    }
    for category in &summary.customer_types {
        let _ = writeln!(
            output,
            "- {}: {} sales ({})",
            category.key,
            category.count,
            format_percent(category.share)
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Sales Amount vs Discount");
    let points = &summary.discount_vs_revenue;
    if points.is_empty() {
        let _ = writeln!(output, "No sales recorded.");
    } else {
        let (min_d, max_d) = bounds(points.iter().map(|p| p.discount));
        let (min_s, max_s) = bounds(points.iter().map(|p| p.sales_amount));
        let _ = writeln!(
            output,
            "{} points, discount {} to {}, sales amount {} to {}",
            points.len(),
            format_number(min_d, 2),
            format_number(max_d, 2),
            format_currency(min_s),
            format_currency(max_s)
        );
    }

    output
}

/// Render the serialisable part of `data` as pretty-printed JSON.
pub fn to_json(data: &DashboardData) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_table;
    use dashboard_core::models::{Column, RawCell, RawTable};

    fn row(region: &str, rep: &str, product: i64, amount: f64, discount: f64) -> Vec<RawCell> {
        vec![
            RawCell::Text("2023-06-12".into()),
            RawCell::Int(product),
            RawCell::Float(amount),
            RawCell::Int(3),
            RawCell::Float(20.0),
            RawCell::Float(30.0),
            RawCell::Float(discount),
            RawCell::Text(rep.into()),
            RawCell::Text(region.into()),
            RawCell::Text("Food".into()),
            RawCell::Text("New".into()),
            RawCell::Text("Cash".into()),
            RawCell::Text("Online".into()),
            RawCell::Text(format!("{region}-{rep}")),
        ]
    }

    fn sample_data() -> DashboardData {
        let raw = RawTable::new(
            Column::ALL.iter().map(|c| c.header().to_string()).collect(),
            vec![
                row("East", "Bob", 1001, 100.0, 0.05),
                row("East", "Eve", 1002, 50.0, 0.2),
                row("West", "Bob", 1003, 30.0, 0.1),
            ],
        );
        analyze_table(&raw, "sales_data.xlsx", 5).unwrap()
    }

    fn empty_data() -> DashboardData {
        let raw = RawTable::new(
            Column::ALL.iter().map(|c| c.header().to_string()).collect(),
            vec![],
        );
        analyze_table(&raw, "empty.xlsx", 5).unwrap()
    }

    // ── build_report ──────────────────────────────────────────────────────────

    #[test]
    fn test_build_report_sections() {
        let report = build_report(&sample_data());
        assert!(report.starts_with("# Sales Data Dashboard"));
        assert!(report.contains("Source: sales_data.xlsx (3 of 3 rows kept"));
        assert!(report.contains("Total revenue: $180.00"));
        assert!(report.contains("## Revenue by Region"));
        assert!(report.contains("- east: $150.00"));
        assert!(report.contains("- west: $30.00"));
        assert!(report.contains("1. Product 1001: $100.00"));
        assert!(report.contains("- bob: $130.00"));
        assert!(report.contains("- new: 3 sales (100.0%)"));
        assert!(report.contains("3 points, discount 0.05 to 0.20"));
    }

    #[test]
    fn test_build_report_region_order() {
        let report = build_report(&sample_data());
        let east = report.find("- east:").unwrap();
        let west = report.find("- west:").unwrap();
        assert!(east < west);
    }

    #[test]
    fn test_build_report_empty_table() {
        let report = build_report(&empty_data());
        assert!(report.contains("No sales recorded."));
        assert!(report.contains("Total revenue: $0.00"));
    }

    // ── to_json ───────────────────────────────────────────────────────────────

    #[test]
    fn test_to_json_contains_results() {
        let json = to_json(&sample_data()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["revenue_by_region"][0]["key"], "east");
        assert_eq!(value["summary"]["revenue_by_region"][0]["total"], 150.0);
        assert_eq!(value["summary"]["top_products"][0]["key"], 1001);
        assert_eq!(value["metadata"]["cleaning"]["rows_kept"], 3);
        assert_eq!(value["overview"]["columns"][0]["dtype"], "datetime64");
    }
}

//! Read-only aggregations behind the five dashboard charts.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use dashboard_core::formatting::percentage;
use dashboard_core::models::SalesRecord;
use serde::{Deserialize, Serialize};

// ── Result types ──────────────────────────────────────────────────────────────

/// Summed `Sales_Amount` for one group key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total: f64,
}

/// Row count for one `Customer_Type`, with its share of all rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub key: String,
    pub count: usize,
    /// Percentage of all rows, one decimal.
    pub share: f64,
}

/// One (Discount, Sales_Amount) pair for the scatter view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub discount: f64,
    pub sales_amount: f64,
}

/// The five chart result sets computed over one cleaned table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub revenue_by_region: Vec<GroupTotal<String>>,
    pub top_products: Vec<GroupTotal<i64>>,
    pub revenue_by_rep: Vec<GroupTotal<String>>,
    pub customer_types: Vec<CategoryCount>,
    pub discount_vs_revenue: Vec<ScatterPoint>,
    pub total_revenue: f64,
    pub record_count: usize,
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper computing grouped sums and counts over sales records.
///
/// Group orderings are descending by value; equal values keep ascending key
/// order.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Number of products shown in the top-products chart.
    pub const TOP_PRODUCTS: usize = 5;

    /// Sum of `Sales_Amount` per `Region`, descending.
    pub fn revenue_by_region(records: &[SalesRecord]) -> Vec<GroupTotal<String>> {
        Self::sum_by(records, |r| r.region.clone())
    }

    /// Sum of `Sales_Amount` per `Product_ID`, descending, first `limit`.
    pub fn top_products(records: &[SalesRecord], limit: usize) -> Vec<GroupTotal<i64>> {
        let mut totals = Self::sum_by(records, |r| r.product_id);
        totals.truncate(limit);
        totals
    }

    /// Sum of `Sales_Amount` per `Sales_Rep`, descending.
    pub fn revenue_by_rep(records: &[SalesRecord]) -> Vec<GroupTotal<String>> {
        Self::sum_by(records, |r| r.sales_rep.clone())
    }

    /// Row count per `Customer_Type`, most frequent first.
    pub fn customer_type_counts(records: &[SalesRecord]) -> Vec<CategoryCount> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for record in records {
            *counts.entry(record.customer_type.as_str()).or_insert(0) += 1;
        }

        let total = records.len() as f64;
        let mut values: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(key, count)| CategoryCount {
                key: key.to_string(),
                count,
                share: percentage(count as f64, total, 1),
            })
            .collect();

        // Stable sort keeps the BTreeMap's key order for equal counts.
        values.sort_by(|a, b| b.count.cmp(&a.count));
        values
    }

    /// Unaggregated (Discount, Sales_Amount) pairs in record order.
    pub fn discount_vs_revenue(records: &[SalesRecord]) -> Vec<ScatterPoint> {
        records
            .iter()
            .map(|r| ScatterPoint {
                discount: r.discount,
                sales_amount: r.sales_amount,
            })
            .collect()
    }

    /// Compute all five result sets.
    pub fn summarize(records: &[SalesRecord]) -> SalesSummary {
        SalesSummary {
            revenue_by_region: Self::revenue_by_region(records),
            top_products: Self::top_products(records, Self::TOP_PRODUCTS),
            revenue_by_rep: Self::revenue_by_rep(records),
            customer_types: Self::customer_type_counts(records),
            discount_vs_revenue: Self::discount_vs_revenue(records),
            total_revenue: records.iter().map(|r| r.sales_amount).sum(),
            record_count: records.len(),
        }
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic group-by-sum driver.
    fn sum_by<K: Ord>(
        records: &[SalesRecord],
        key_fn: impl Fn(&SalesRecord) -> K,
    ) -> Vec<GroupTotal<K>> {
        let mut map: BTreeMap<K, f64> = BTreeMap::new();
        for record in records {
            *map.entry(key_fn(record)).or_insert(0.0) += record.sales_amount;
        }

        let mut totals: Vec<GroupTotal<K>> = map
            .into_iter()
            .map(|(key, total)| GroupTotal { key, total })
            .collect();
        totals.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
        totals
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

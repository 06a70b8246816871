//! The five chart views.
//!
//! Revenue by region and by rep are vertical bar charts, the top products
//! a horizontal bar chart with the best seller on top, customer types a
//! proportional share bar with legend, and discount against sales amount a
//! scatter plot.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use dashboard_core::formatting::{format_compact, format_number};
use dashboard_data::aggregator::{CategoryCount, GroupTotal, SalesSummary, ScatterPoint};

use crate::components::share_bar::ShareBar;
use crate::table_view::{fit_width, render_no_data};
use crate::themes::Theme;

/// Widest bar drawn in the vertical charts.
const MAX_BAR_WIDTH: u16 = 12;
const BAR_GAP: u16 = 1;

// ── ChartKind ─────────────────────────────────────────────────────────────────

/// One of the five dashboard charts, with its fixed title and axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    RevenueByRegion,
    TopProducts,
    RevenueByRep,
    CustomerTypes,
    DiscountVsSales,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::RevenueByRegion,
        ChartKind::TopProducts,
        ChartKind::RevenueByRep,
        ChartKind::CustomerTypes,
        ChartKind::DiscountVsSales,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::RevenueByRegion => "Revenue by Region",
            ChartKind::TopProducts => "Top 5 Products by Revenue",
            ChartKind::RevenueByRep => "Revenue by Sales Representative",
            ChartKind::CustomerTypes => "Customer Type Distribution",
            ChartKind::DiscountVsSales => "Sales Amount vs Discount",
        }
    }

    /// Horizontal axis label, if the chart has axes.
    pub fn x_label(self) -> Option<&'static str> {
        match self {
            ChartKind::RevenueByRegion => Some("Region"),
            ChartKind::TopProducts => Some("Total Revenue"),
            ChartKind::RevenueByRep => Some("Sales Rep"),
            ChartKind::CustomerTypes => None,
            ChartKind::DiscountVsSales => Some("Discount"),
        }
    }

    /// Vertical axis label, if the chart has axes.
    pub fn y_label(self) -> Option<&'static str> {
        match self {
            ChartKind::RevenueByRegion | ChartKind::RevenueByRep => Some("Total Revenue"),
            ChartKind::TopProducts => Some("Product ID"),
            ChartKind::CustomerTypes => None,
            ChartKind::DiscountVsSales => Some("Sales Amount"),
        }
    }

    /// `x: Region · y: Total Revenue`, shown under the chart.
    pub fn axis_caption(self) -> Option<String> {
        match (self.x_label(), self.y_label()) {
            (Some(x), Some(y)) => Some(format!(" x: {x} · y: {y} ")),
            _ => None,
        }
    }
}

// ── Layout helpers ────────────────────────────────────────────────────────────

/// Bar width that fits `bars` bars into `inner_width` columns.
pub fn bar_width(inner_width: u16, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    let bars = u16::try_from(bars).unwrap_or(u16::MAX);
    let per_bar = inner_width.saturating_add(BAR_GAP) / bars;
    per_bar.saturating_sub(BAR_GAP).clamp(1, MAX_BAR_WIDTH)
}

/// Padded `[min, max]` bounds for a chart axis.
pub fn axis_bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else if lo == 0.0 {
        1.0
    } else {
        lo.abs() * 0.1
    };
    [lo - pad, hi + pad]
}

fn chart_block(kind: ChartKind, theme: &Theme) -> Block<'static> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(format!(" {} ", kind.title()));
    match kind.axis_caption() {
        Some(caption) => block.title_bottom(Line::styled(caption, theme.dim)),
        None => block,
    }
}

fn revenue_bar<'a>(label: String, total: f64, width: usize, style: Style) -> Bar<'a> {
    Bar::default()
        .value(total.max(0.0).round() as u64)
        .label(Line::from(fit_width(&label, width)))
        .text_value(format_compact(total))
        .style(style)
}

// ── Bar charts ────────────────────────────────────────────────────────────────

fn render_vertical_bars(
    frame: &mut Frame,
    area: Rect,
    kind: ChartKind,
    groups: &[(String, f64)],
    style: Style,
    theme: &Theme,
) {
    let width = bar_width(area.width.saturating_sub(2), groups.len());
    let bars: Vec<Bar> = groups
        .iter()
        .map(|(key, total)| revenue_bar(key.clone(), *total, width as usize, style))
        .collect();

    let chart = BarChart::default()
        .block(chart_block(kind, theme))
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(BAR_GAP)
        .bar_style(style)
        .label_style(theme.chart_axis);

    frame.render_widget(chart, area);
}

/// Vertical bars of total revenue per region, largest first.
pub fn render_revenue_by_region(
    frame: &mut Frame,
    area: Rect,
    groups: &[GroupTotal<String>],
    theme: &Theme,
) {
    let groups: Vec<(String, f64)> = groups.iter().map(|g| (g.key.clone(), g.total)).collect();
    render_vertical_bars(
        frame,
        area,
        ChartKind::RevenueByRegion,
        &groups,
        theme.region_bar,
        theme,
    );
}

/// Vertical bars of total revenue per sales rep, largest first.
pub fn render_revenue_by_rep(
    frame: &mut Frame,
    area: Rect,
    groups: &[GroupTotal<String>],
    theme: &Theme,
) {
    let groups: Vec<(String, f64)> = groups.iter().map(|g| (g.key.clone(), g.total)).collect();
    render_vertical_bars(
        frame,
        area,
        ChartKind::RevenueByRep,
        &groups,
        theme.rep_bar,
        theme,
    );
}

/// Horizontal bars for the best-selling products, best seller on top.
pub fn render_top_products(
    frame: &mut Frame,
    area: Rect,
    groups: &[GroupTotal<i64>],
    theme: &Theme,
) {
    let label_width = groups
        .iter()
        .map(|g| g.key.to_string().len())
        .max()
        .unwrap_or(1);
    let bars: Vec<Bar> = groups
        .iter()
        .map(|g| revenue_bar(g.key.to_string(), g.total, label_width, theme.product_bar))
        .collect();

    let chart = BarChart::default()
        .block(chart_block(ChartKind::TopProducts, theme))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1)
        .bar_style(theme.product_bar)
        .label_style(theme.chart_axis);

    frame.render_widget(chart, area);
}

// ── Customer types ────────────────────────────────────────────────────────────

/// Share bar and legend of row counts per customer type.
pub fn render_customer_types(
    frame: &mut Frame,
    area: Rect,
    counts: &[CategoryCount],
    theme: &Theme,
) {
    let total: usize = counts.iter().map(|c| c.count).sum();
    let bar_width = area.width.saturating_sub(4).clamp(10, 60);
    let share_bar = ShareBar::new(counts, theme).with_width(bar_width);

    let mut lines = vec![
        Line::from(""),
        share_bar.to_line(),
        share_bar.to_line(),
        Line::from(""),
    ];
    lines.extend(share_bar.legend_lines());
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Total: ", theme.label),
        Span::styled(
            format!("{} sales", format_number(total as f64, 0)),
            theme.chart_value,
        ),
    ]));

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(chart_block(ChartKind::CustomerTypes, theme)),
        area,
    );
}

// ── Scatter ───────────────────────────────────────────────────────────────────

fn axis_labels(bounds: [f64; 2], format: impl Fn(f64) -> String) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![format(bounds[0]), format(mid), format(bounds[1])]
}

/// Scatter of every row's discount against its sales amount.
pub fn render_discount_scatter(
    frame: &mut Frame,
    area: Rect,
    points: &[ScatterPoint],
    theme: &Theme,
) {
    let data: Vec<(f64, f64)> = points.iter().map(|p| (p.discount, p.sales_amount)).collect();
    let x_bounds = axis_bounds(points.iter().map(|p| p.discount));
    let y_bounds = axis_bounds(points.iter().map(|p| p.sales_amount));

    let dataset = Dataset::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(theme.scatter_point)
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(chart_block(ChartKind::DiscountVsSales, theme))
        .x_axis(
            Axis::default()
                .title(ChartKind::DiscountVsSales.x_label().unwrap_or_default())
                .style(theme.chart_axis)
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds, |v| format_number(v, 2))),
        )
        .y_axis(
            Axis::default()
                .title(ChartKind::DiscountVsSales.y_label().unwrap_or_default())
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds, format_compact)),
        );

    frame.render_widget(chart, area);
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Render `kind` from `summary`, or a placeholder when there are no rows.
pub fn render_chart(
    frame: &mut Frame,
    area: Rect,
    kind: ChartKind,
    summary: &SalesSummary,
    theme: &Theme,
) {
    if summary.record_count == 0 {
        render_no_data(frame, area, theme);
        return;
    }

    match kind {
        ChartKind::RevenueByRegion => {
            render_revenue_by_region(frame, area, &summary.revenue_by_region, theme)
        }
        ChartKind::TopProducts => {
            // Keep the handful of product bars compact at the top.
            let height = (summary.top_products.len() as u16 * 2 + 3).min(area.height);
            let [chart_area, _] = Layout::vertical([Constraint::Length(height), Constraint::Min(0)])
                .areas(area);
            render_top_products(frame, chart_area, &summary.top_products, theme)
        }
        ChartKind::RevenueByRep => {
            render_revenue_by_rep(frame, area, &summary.revenue_by_rep, theme)
        }
        ChartKind::CustomerTypes => {
            render_customer_types(frame, area, &summary.customer_types, theme)
        }
        ChartKind::DiscountVsSales => {
            render_discount_scatter(frame, area, &summary.discount_vs_revenue, theme)
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

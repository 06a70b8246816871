//! Table-style views: the prompt screen, the raw preview and the cleaned
//! data overview.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dashboard_core::formatting::format_number;
use dashboard_core::models::RawTable;
use dashboard_data::analysis::{AnalysisMetadata, TableOverview};
use dashboard_data::report::PROMPT_TEXT;

use crate::themes::Theme;

/// Narrowest and widest column in the raw preview.
const MIN_COLUMN_WIDTH: usize = 4;
const MAX_COLUMN_WIDTH: usize = 18;

/// Cut `text` to at most `max` display columns, ending in `…` when cut.
pub fn fit_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

// ── Prompt ────────────────────────────────────────────────────────────────────

/// Render the file prompt shown before a spreadsheet is loaded.
///
/// `error` is shown beneath the input when the previous load failed.
pub fn render_prompt(
    frame: &mut Frame,
    area: Rect,
    input: &str,
    error: Option<&str>,
    theme: &Theme,
) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(PROMPT_TEXT, theme.info)),
        Line::from(""),
        Line::from(vec![
            Span::styled("File: ", theme.label),
            Span::styled(format!("{input}_"), theme.input),
        ]),
        Line::from(""),
    ];
    if let Some(message) = error {
        lines.push(Line::from(Span::styled(message.to_string(), theme.error)));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Type a path to an .xlsx/.xls/.ods file and press Enter. Esc to exit.",
        theme.dim,
    )));

    frame.render_widget(
        Paragraph::new(Text::from(lines)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Upload your sales_data.xlsx file "),
        ),
        area,
    );
}

// ── Raw preview ───────────────────────────────────────────────────────────────

/// Display width for each column of `preview`, clamped to
/// `MIN_COLUMN_WIDTH..=MAX_COLUMN_WIDTH`.
pub fn preview_column_widths(preview: &RawTable) -> Vec<usize> {
    preview
        .headers
        .iter()
        .enumerate()
        .map(|(col, header)| {
            let widest_cell = (0..preview.len())
                .map(|row| preview.cell(row, col).to_string().width())
                .max()
                .unwrap_or(0);
            header
                .width()
                .max(widest_cell)
                .clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
        })
        .collect()
}

/// Render the first rows of the sheet exactly as read, before cleaning.
pub fn render_raw_preview(frame: &mut Frame, area: Rect, preview: &RawTable, theme: &Theme) {
    let widths = preview_column_widths(preview);

    let header = Row::new(
        preview
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| Cell::from(fit_width(h, *w)).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = (0..preview.len())
        .map(|row| {
            Row::new(
                widths
                    .iter()
                    .enumerate()
                    .map(|(col, w)| Cell::from(fit_width(&preview.cell(row, col).to_string(), *w))),
            )
            .style(theme.row_style(row))
        })
        .collect();

    let constraints: Vec<Constraint> = widths.iter().map(|w| Constraint::Length(*w as u16)).collect();

    let table = Table::new(rows, constraints)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(format!(" Raw Data (first {} rows) ", preview.len())),
        )
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Cleaned overview ──────────────────────────────────────────────────────────

/// Summary lines above the overview table.
pub fn overview_lines<'a>(
    overview: &TableOverview,
    metadata: &AnalysisMetadata,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let cleaning = &metadata.cleaning;
    vec![
        Line::from(vec![
            Span::styled("Entries: ", theme.label),
            Span::styled(format_number(overview.rows as f64, 0), theme.value),
            Span::styled(
                format!("   Data columns (total {} columns)", overview.columns.len()),
                theme.label,
            ),
        ]),
        Line::from(vec![
            Span::styled("Rows read: ", theme.label),
            Span::styled(format_number(cleaning.rows_read as f64, 0), theme.value),
            Span::styled("   incomplete dropped: ", theme.label),
            Span::styled(
                format_number(cleaning.dropped_incomplete as f64, 0),
                theme.warning,
            ),
            Span::styled("   duplicates dropped: ", theme.label),
            Span::styled(
                format_number(cleaning.dropped_duplicates as f64, 0),
                theme.warning,
            ),
        ]),
    ]
}

/// Render the cleaned-table overview: per-column non-null counts and dtypes.
pub fn render_overview(
    frame: &mut Frame,
    area: Rect,
    overview: &TableOverview,
    metadata: &AnalysisMetadata,
    theme: &Theme,
) {
    let [summary_area, table_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(Text::from(overview_lines(overview, metadata, theme))),
        summary_area,
    );

    let header = Row::new(
        ["#", "Column", "Non-Null Count", "Dtype"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    );

    let rows: Vec<Row> = overview
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Row::new(vec![
                Cell::from(i.to_string()),
                Cell::from(c.name.clone()),
                Cell::from(format!("{} non-null", format_number(c.non_null as f64, 0))),
                Cell::from(c.dtype.clone()),
            ])
            .style(theme.row_style(i))
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Length(22),
        Constraint::Length(18),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Cleaned Data Overview "),
        )
        .style(theme.text);

    frame.render_widget(table, table_area);
}

/// Placeholder for chart views when cleaning left no rows.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No rows left after cleaning", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Every row was incomplete or the sheet was empty.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Sales Data Dashboard "),
        ),
        area,
    );
}

// ── Tests ──────────────────────────────────────────────────────────────────────

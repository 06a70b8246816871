use crate::themes::Theme;
use dashboard_core::formatting::format_number;
use ratatui::text::{Line, Span};

/// Mark drawn either side of the application title.
pub const TITLE_MARK: &str = "▪▪▪";

/// Width of the `=` rule under the title.
pub const SEPARATOR_WIDTH: usize = 60;

/// Dashboard header, three lines:
///
/// 1. `▪▪▪ SALES DATA DASHBOARD ▪▪▪`
/// 2. a 60-column `=` rule
/// 3. `[ sales_data.xlsx | 1,000 records ]`, or `[ no file loaded ]`
pub struct Header<'a> {
    /// Name of the loaded file, `None` in the prompt state.
    pub source: Option<&'a str>,
    /// Number of cleaned records.
    pub records: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: Option<&'a str>, records: usize, theme: &'a Theme) -> Self {
        Self {
            source,
            records,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let info = match self.source {
            Some(source) => Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(source.to_string(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} records", format_number(self.records as f64, 0)),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            None => Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled("no file loaded", self.theme.dim),
                Span::styled(" ]", self.theme.label),
            ]),
        };

        vec![
            Line::from(vec![
                Span::styled(TITLE_MARK, self.theme.header_mark),
                Span::styled(" SALES DATA DASHBOARD ", self.theme.header),
                Span::styled(TITLE_MARK, self.theme.header_mark),
            ]),
            Line::from(Span::styled(
                "=".repeat(SEPARATOR_WIDTH),
                self.theme.separator,
            )),
            info,
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

use crate::themes::Theme;
use dashboard_core::formatting::{format_number, format_percent};
use dashboard_data::aggregator::CategoryCount;
use ratatui::text::{Line, Span};

/// Glyph used for bar segments and legend swatches.
pub const SEGMENT_CHAR: char = '█';

/// A proportional multi-coloured bar showing each category's share of the
/// whole, followed by a legend with one line per category.
///
/// Stands in for a pie chart: segment `i` uses [`Theme::share_style`]`(i)`.
pub struct ShareBar<'a> {
    pub categories: &'a [CategoryCount],
    pub theme: &'a Theme,
    /// Bar width in terminal columns.
    pub width: u16,
}

impl<'a> ShareBar<'a> {
    pub fn new(categories: &'a [CategoryCount], theme: &'a Theme) -> Self {
        Self {
            categories,
            theme,
            width: 50,
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Column width of each segment.
    ///
    /// Segment ends are rounded on the running total, so the widths always
    /// sum to the full bar when the counts cover every row.
    pub fn segment_widths(&self) -> Vec<usize> {
        let total: usize = self.categories.iter().map(|c| c.count).sum();
        if total == 0 {
            return vec![0; self.categories.len()];
        }
        let width = self.width as f64;
        let mut running = 0usize;
        let mut previous_end = 0usize;
        self.categories
            .iter()
            .map(|c| {
                running += c.count;
                let end = ((running as f64 / total as f64) * width).round() as usize;
                let segment = end - previous_end;
                previous_end = end;
                segment
            })
            .collect()
    }

    /// The bar itself.
    pub fn to_line(&self) -> Line<'a> {
        let spans: Vec<Span<'a>> = self
            .segment_widths()
            .into_iter()
            .enumerate()
            .filter(|(_, w)| *w > 0)
            .map(|(i, w)| {
                Span::styled(
                    std::iter::repeat_n(SEGMENT_CHAR, w).collect::<String>(),
                    self.theme.share_style(i),
                )
            })
            .collect();
        Line::from(spans)
    }

    /// One legend line per category: swatch, name, share and count.
    pub fn legend_lines(&self) -> Vec<Line<'a>> {
        let name_width = self
            .categories
            .iter()
            .map(|c| c.key.chars().count())
            .max()
            .unwrap_or(0);

        self.categories
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Line::from(vec![
                    Span::styled(format!("{SEGMENT_CHAR}{SEGMENT_CHAR} "), self.theme.share_style(i)),
                    Span::styled(format!("{:<name_width$}", c.key), self.theme.label),
                    Span::styled(format!("  {:>6}", format_percent(c.share)), self.theme.value),
                    Span::styled(
                        format!("  ({} sales)", format_number(c.count as f64, 0)),
                        self.theme.dim,
                    ),
                ])
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn category(key: &str, count: usize, share: f64) -> CategoryCount {
        CategoryCount {
            key: key.to_string(),
            count,
            share,
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_segment_widths_fill_bar() {
        let theme = Theme::dark();
        let cats = vec![
            category("returning", 521, 52.1),
            category("new", 479, 47.9),
        ];
        let bar = ShareBar::new(&cats, &theme).with_width(40);
        let widths = bar.segment_widths();
        assert_eq!(widths.iter().sum::<usize>(), 40);
        assert_eq!(widths, vec![21, 19]);
    }

    #[test]
    fn test_segment_widths_thirds() {
        let theme = Theme::dark();
        let cats = vec![
            category("a", 1, 33.3),
            category("b", 1, 33.3),
            category("c", 1, 33.3),
        ];
        let widths = ShareBar::new(&cats, &theme).with_width(10).segment_widths();
        assert_eq!(widths.iter().sum::<usize>(), 10);
    }

    #[test]
    fn test_segment_widths_empty() {
        let theme = Theme::dark();
        let bar = ShareBar::new(&[], &theme);
        assert!(bar.segment_widths().is_empty());
        assert!(bar.to_line().spans.is_empty());
    }

    #[test]
    fn test_to_line_colours_segments() {
        let theme = Theme::dark();
        let cats = vec![category("returning", 3, 75.0), category("new", 1, 25.0)];
        let line = ShareBar::new(&cats, &theme).with_width(20).to_line();
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].style, theme.share_style(0));
        assert_eq!(line.spans[1].style, theme.share_style(1));
        assert_eq!(line_text(&line).chars().count(), 20);
    }

    #[test]
    fn test_legend_lines() {
        let theme = Theme::dark();
        let cats = vec![category("returning", 3, 75.0), category("new", 1, 25.0)];
        let legend = ShareBar::new(&cats, &theme).legend_lines();
        assert_eq!(legend.len(), 2);
        let first = line_text(&legend[0]);
        assert!(first.contains("returning"), "got: {first}");
        assert!(first.contains("75.0%"), "got: {first}");
        assert!(first.contains("(3 sales)"), "got: {first}");
        // Names are padded to a common width.
        assert!(line_text(&legend[1]).contains("new      "));
    }
}

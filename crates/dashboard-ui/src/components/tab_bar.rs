use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Single-line tab strip: ` 1 Raw Data │ 2 Overview │ … `.
///
/// The selected tab is drawn with [`Theme::tab_active`], the others with
/// [`Theme::tab_inactive`].
pub struct TabBar<'a> {
    pub titles: &'a [&'a str],
    pub selected: usize,
    pub theme: &'a Theme,
}

impl<'a> TabBar<'a> {
    pub fn new(titles: &'a [&'a str], selected: usize, theme: &'a Theme) -> Self {
        Self {
            titles,
            selected,
            theme,
        }
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(self.titles.len() * 2);
        for (i, title) in self.titles.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("│", self.theme.separator));
            }
            let style = if i == self.selected {
                self.theme.tab_active
            } else {
                self.theme.tab_inactive
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, title), style));
        }
        Line::from(spans)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const TITLES: [&str; 3] = ["Raw Data", "Overview", "Region"];

    #[test]
    fn test_tab_bar_numbers_tabs() {
        let theme = Theme::dark();
        let line = TabBar::new(&TITLES, 0, &theme).to_line();
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " 1 Raw Data │ 2 Overview │ 3 Region ");
    }

    #[test]
    fn test_tab_bar_highlights_selected() {
        let theme = Theme::dark();
        let line = TabBar::new(&TITLES, 1, &theme).to_line();
        // Spans alternate title, separator, title, ...
        assert_eq!(line.spans[0].style, theme.tab_inactive);
        assert_eq!(line.spans[2].style, theme.tab_active);
        assert_eq!(line.spans[4].style, theme.tab_inactive);
        assert_eq!(line.spans[1].style, theme.separator);
    }
}

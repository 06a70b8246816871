//! Application state and TUI event loop for the sales dashboard.
//!
//! [`App`] owns the theme, the prompt or loaded state and the selected
//! view. Loading goes through [`analyze_file`]; a failed load returns to the
//! prompt with a generic message while the detailed error is logged.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span, Text},
    widgets::Paragraph,
    Frame, Terminal,
};
use tracing::{error, info};

use dashboard_core::error::{DashboardError, Result};
use dashboard_data::analysis::{analyze_file, DashboardData};
use dashboard_data::report::LOAD_FAILED_TEXT;

use crate::chart_view::{self, ChartKind};
use crate::components::header::Header;
use crate::components::tab_bar::TabBar;
use crate::table_view;
use crate::themes::Theme;

// ── View ──────────────────────────────────────────────────────────────────────

/// The tab shown once a spreadsheet is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    RawData,
    Overview,
    Chart(ChartKind),
}

impl View {
    /// Every tab, in display order.
    pub const ALL: [View; 7] = [
        View::RawData,
        View::Overview,
        View::Chart(ChartKind::RevenueByRegion),
        View::Chart(ChartKind::TopProducts),
        View::Chart(ChartKind::RevenueByRep),
        View::Chart(ChartKind::CustomerTypes),
        View::Chart(ChartKind::DiscountVsSales),
    ];

    /// Short tab title.
    pub fn tab_title(self) -> &'static str {
        match self {
            View::RawData => "Raw Data",
            View::Overview => "Overview",
            View::Chart(ChartKind::RevenueByRegion) => "Region",
            View::Chart(ChartKind::TopProducts) => "Top Products",
            View::Chart(ChartKind::RevenueByRep) => "Sales Reps",
            View::Chart(ChartKind::CustomerTypes) => "Customers",
            View::Chart(ChartKind::DiscountVsSales) => "Discount",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ── AppState ──────────────────────────────────────────────────────────────────

/// Whether a spreadsheet has been loaded yet.
#[derive(Debug, Clone)]
pub enum AppState {
    /// Waiting for a file path.
    Prompt {
        input: String,
        error: Option<String>,
    },
    /// A spreadsheet was loaded and analysed.
    Loaded(Box<DashboardData>),
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub state: AppState,
    pub view: View,
    /// Worksheet requested on the command line.
    pub sheet: Option<String>,
    /// Raw rows kept for the preview tab.
    pub preview_rows: usize,
    /// Set to `true` to leave the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// A new application in the prompt state.
    pub fn new(theme_name: &str, sheet: Option<String>, preview_rows: usize) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            state: AppState::Prompt {
                input: String::new(),
                error: None,
            },
            view: View::RawData,
            sheet,
            preview_rows,
            should_quit: false,
        }
    }

    /// Load and analyse `path`, switching to the loaded state on success.
    ///
    /// On failure the app stays in (or returns to) the prompt, showing
    /// [`LOAD_FAILED_TEXT`] with the path still in the input.
    pub fn load(&mut self, path: &Path) {
        match analyze_file(path, self.sheet.as_deref(), self.preview_rows) {
            Ok(data) => {
                info!("Loaded {} into the dashboard", path.display());
                self.state = AppState::Loaded(Box::new(data));
                self.view = View::RawData;
            }
            Err(e) => {
                if e.is_data_error() {
                    error!("Rejected {}: {}", path.display(), e);
                } else {
                    error!("Failed to process {}: {}", path.display(), e);
                }
                self.state = AppState::Prompt {
                    input: path.display().to_string(),
                    error: Some(LOAD_FAILED_TEXT.to_string()),
                };
            }
        }
    }

    /// The loaded results, if any.
    pub fn data(&self) -> Option<&DashboardData> {
        match &self.state {
            AppState::Loaded(data) => Some(data.as_ref()),
            AppState::Prompt { .. } => None,
        }
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let AppState::Loaded(_) = self.state {
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                KeyCode::Tab | KeyCode::Right => self.view = self.view.next(),
                KeyCode::BackTab | KeyCode::Left => self.view = self.view.previous(),
                KeyCode::Char('o') | KeyCode::Char('O') => {
                    self.state = AppState::Prompt {
                        input: String::new(),
                        error: None,
                    };
                }
                KeyCode::Char(c @ '1'..='7') => {
                    let index = c as usize - '1' as usize;
                    self.view = View::ALL[index];
                }
                _ => {}
            }
            return;
        }

        let mut submitted = None;
        if let AppState::Prompt { input, error } = &mut self.state {
            match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Enter => {
                    let path = input.trim();
                    if !path.is_empty() {
                        submitted = Some(PathBuf::from(path));
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                    *error = None;
                }
                KeyCode::Char(c) => {
                    input.push(c);
                    *error = None;
                }
                _ => {}
            }
        }

        if let Some(path) = submitted {
            self.load(&path);
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until the user quits.
    ///
    /// Polls crossterm with a 250 ms timeout on the current thread.
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error)?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(terminal_error)?;

        let result = self.event_loop(&mut terminal);

        // Restore the terminal even when the loop failed.
        disable_raw_mode().map_err(terminal_error)?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen).map_err(terminal_error)?;
        terminal.show_cursor().map_err(terminal_error)?;

        result.map_err(terminal_error)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw the current state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, tabs_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        match &self.state {
            AppState::Prompt { input, error } => {
                let header = Header::new(None, 0, &self.theme);
                frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);
                table_view::render_prompt(frame, body_area, input, error.as_deref(), &self.theme);
                self.render_footer(frame, footer_area, "Enter load · Esc quit");
            }
            AppState::Loaded(data) => {
                let header = Header::new(
                    Some(data.metadata.source.as_str()),
                    data.summary.record_count,
                    &self.theme,
                );
                frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

                let titles: Vec<&str> = View::ALL.iter().map(|v| v.tab_title()).collect();
                let tabs = TabBar::new(&titles, self.view.index(), &self.theme);
                frame.render_widget(Paragraph::new(tabs.to_line()), tabs_area);

                match self.view {
                    View::RawData => table_view::render_raw_preview(
                        frame,
                        body_area,
                        &data.raw_preview,
                        &self.theme,
                    ),
                    View::Overview => table_view::render_overview(
                        frame,
                        body_area,
                        &data.overview,
                        &data.metadata,
                        &self.theme,
                    ),
                    View::Chart(kind) => {
                        chart_view::render_chart(frame, body_area, kind, &data.summary, &self.theme)
                    }
                }
                self.render_footer(
                    frame,
                    footer_area,
                    "Tab/→ next · Shift+Tab/← previous · 1-7 jump · o open file · q quit",
                );
            }
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: ratatui::layout::Rect, hint: &str) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(hint.to_string(), self.theme.dim))),
            area,
        );
    }
}

fn terminal_error(e: impl std::fmt::Display) -> DashboardError {
    DashboardError::Terminal(e.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn loaded_app() -> App {
        use dashboard_core::models::{Column, RawCell, RawTable};
        use dashboard_data::analysis::analyze_table;

        let row = |region: &str, rep: &str, amount: f64| {
            vec![
                RawCell::Text("2023-04-10".into()),
                RawCell::Int(1001),
                RawCell::Float(amount),
                RawCell::Int(2),
                RawCell::Float(10.0),
                RawCell::Float(20.0),
                RawCell::Float(0.15),
                RawCell::Text(rep.into()),
                RawCell::Text(region.into()),
                RawCell::Text("Electronics".into()),
                RawCell::Text("Returning".into()),
                RawCell::Text("Card".into()),
                RawCell::Text("Retail".into()),
                RawCell::Text(format!("{region}-{rep}")),
            ]
        };
        let raw = RawTable::new(
            Column::ALL.iter().map(|c| c.header().to_string()).collect(),
            vec![row("East", "Bob", 100.0), row("West", "Eve", 30.0)],
        );
        let mut app = App::new("dark", None, 5);
        app.state = AppState::Loaded(Box::new(
            analyze_table(&raw, "sales_data.xlsx", 5).unwrap(),
        ));
        app
    }

    // ── View ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_view_cycle_wraps() {
        assert_eq!(View::RawData.next(), View::Overview);
        assert_eq!(
            View::Chart(ChartKind::DiscountVsSales).next(),
            View::RawData
        );
        assert_eq!(
            View::RawData.previous(),
            View::Chart(ChartKind::DiscountVsSales)
        );
    }

    #[test]
    fn test_view_indices_match_order() {
        for (i, view) in View::ALL.iter().enumerate() {
            assert_eq!(view.index(), i);
        }
    }

    // ── App::new ──────────────────────────────────────────────────────────────

    #[test]
    fn test_app_starts_in_prompt() {
        let app = App::new("dark", Some("Q1".to_string()), 5);
        assert!(matches!(app.state, AppState::Prompt { .. }));
        assert!(app.data().is_none());
        assert_eq!(app.view, View::RawData);
        assert_eq!(app.sheet.as_deref(), Some("Q1"));
        assert!(!app.should_quit);
    }

    // ── Prompt input ──────────────────────────────────────────────────────────

    #[test]
    fn test_prompt_typing_and_backspace() {
        let mut app = App::new("dark", None, 5);
        type_text(&mut app, "sales.xlsxx");
        app.handle_key(key(KeyCode::Backspace));
        match &app.state {
            AppState::Prompt { input, .. } => assert_eq!(input, "sales.xlsx"),
            AppState::Loaded(_) => panic!("unexpected load"),
        }
    }

    #[test]
    fn test_prompt_q_is_typed_not_quit() {
        let mut app = App::new("dark", None, 5);
        type_text(&mut app, "q");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_prompt_escape_quits() {
        let mut app = App::new("dark", None, 5);
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = App::new("dark", None, 5);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_enter_on_empty_input_does_nothing() {
        let mut app = App::new("dark", None, 5);
        app.handle_key(key(KeyCode::Enter));
        match &app.state {
            AppState::Prompt { error, .. } => assert!(error.is_none()),
            AppState::Loaded(_) => panic!("unexpected load"),
        }
    }

    #[test]
    fn test_failed_load_shows_generic_message() {
        let mut app = App::new("dark", None, 5);
        type_text(&mut app, "/no/such/dir/sales.xlsx");
        app.handle_key(key(KeyCode::Enter));

        match &app.state {
            AppState::Prompt { input, error } => {
                assert_eq!(input, "/no/such/dir/sales.xlsx");
                assert_eq!(error.as_deref(), Some(LOAD_FAILED_TEXT));
            }
            AppState::Loaded(_) => panic!("load should fail"),
        }

        // Editing clears the message.
        app.handle_key(key(KeyCode::Backspace));
        match &app.state {
            AppState::Prompt { error, .. } => assert!(error.is_none()),
            AppState::Loaded(_) => panic!("unexpected load"),
        }
    }

    // ── Loaded navigation ─────────────────────────────────────────────────────

    #[test]
    fn test_tab_and_arrows_navigate() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.view, View::Overview);
        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.view, View::Chart(ChartKind::RevenueByRegion));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.view, View::Overview);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.view, View::RawData);
    }

    #[test]
    fn test_number_keys_jump() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Char('6')));
        assert_eq!(app.view, View::Chart(ChartKind::CustomerTypes));
        app.handle_key(key(KeyCode::Char('1')));
        assert_eq!(app.view, View::RawData);
        app.handle_key(key(KeyCode::Char('9')));
        assert_eq!(app.view, View::RawData);
    }

    #[test]
    fn test_q_quits_when_loaded() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_o_returns_to_prompt() {
        let mut app = loaded_app();
        app.handle_key(key(KeyCode::Char('o')));
        assert!(app.data().is_none());
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_prompt_state() {
        let app = App::new("dark", None, 5);
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("SALES DATA DASHBOARD"));
        assert!(text.contains("no file loaded"));
        assert!(text.contains("Please upload an Excel file to proceed."));
    }

    #[test]
    fn test_render_every_loaded_view() {
        let mut app = loaded_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        for view in View::ALL {
            app.view = view;
            terminal.draw(|frame| app.render(frame)).unwrap();
            let text = buffer_text(terminal.backend().buffer());
            assert!(text.contains("sales_data.xlsx | 2 records"), "{view:?}");
            assert!(text.contains("1 Raw Data"), "{view:?}");
        }
    }

    #[test]
    fn test_render_region_view_shows_normalised_keys() {
        let mut app = loaded_app();
        app.view = View::Chart(ChartKind::RevenueByRegion);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Revenue by Region"));
        assert!(text.contains("east"));
    }
}

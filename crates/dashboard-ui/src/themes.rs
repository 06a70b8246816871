use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Detect the terminal background from `COLORFGBG` (`"fg;bg"`).
///
/// Background colour indices 0–6 read as dark and 7–15 as light. A missing
/// or malformed variable yields `Dark`.
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    match value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok())
    {
        Some(bg) if bg > 6 => BackgroundType::Light,
        _ => BackgroundType::Dark,
    }
}

/// Every style the dashboard views draw with.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_mark: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,
    pub error: Style,

    // ── Prompt ───────────────────────────────────────────────────────────────
    pub input: Style,

    // ── Tabs ─────────────────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    pub chart_axis: Style,
    pub chart_value: Style,
    /// Bars of the revenue-by-region chart.
    pub region_bar: Style,
    /// Bars of the top-products chart.
    pub product_bar: Style,
    /// Bars of the revenue-by-rep chart.
    pub rep_bar: Style,
    /// Points of the discount scatter.
    pub scatter_point: Style,
    /// Segment colours of the customer-type share bar, cycled in order.
    pub share_palette: Vec<Style>,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            header_mark: Style::default().fg(Color::LightCyan),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            input: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::UNDERLINED),

            tab_active: Style::default()
                .fg(Color::Black)
                .bg(Color::LightBlue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            chart_axis: Style::default().fg(Color::Gray),
            chart_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            region_bar: Style::default().fg(Color::LightBlue),
            product_bar: Style::default().fg(Color::Rgb(255, 165, 0)),
            rep_bar: Style::default().fg(Color::Green),
            scatter_point: Style::default().fg(Color::Magenta),
            share_palette: vec![
                Style::default().fg(Color::LightRed),
                Style::default().fg(Color::LightBlue),
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::Green),
            ],
        }
    }

    /// Light-background terminal theme: dark text, saturated accents.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_mark: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Rgb(180, 110, 0)),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),

            input: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::UNDERLINED),

            tab_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),

            chart_axis: Style::default().fg(Color::DarkGray),
            chart_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            region_bar: Style::default().fg(Color::Blue),
            product_bar: Style::default().fg(Color::Rgb(230, 120, 0)),
            rep_bar: Style::default().fg(Color::Rgb(46, 139, 87)),
            scatter_point: Style::default().fg(Color::Rgb(128, 0, 128)),
            share_palette: vec![
                Style::default().fg(Color::Red),
                Style::default().fg(Color::Blue),
                Style::default().fg(Color::Rgb(180, 110, 0)),
                Style::default().fg(Color::Green),
            ],
        }
    }

    /// Eight-colour ANSI theme without bold or RGB colours.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_mark: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            input: Style::default().fg(Color::White),

            tab_active: Style::default().fg(Color::Black).bg(Color::Cyan),
            tab_inactive: Style::default().fg(Color::White),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),

            chart_axis: Style::default().fg(Color::White),
            chart_value: Style::default().fg(Color::White),
            region_bar: Style::default().fg(Color::Cyan),
            product_bar: Style::default().fg(Color::Yellow),
            rep_bar: Style::default().fg(Color::Green),
            scatter_point: Style::default().fg(Color::Magenta),
            share_palette: vec![
                Style::default().fg(Color::Red),
                Style::default().fg(Color::Blue),
                Style::default().fg(Color::Yellow),
                Style::default().fg(Color::Green),
            ],
        }
    }

    /// Choose a theme from the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// Construct a theme by name, falling back to [`Self::auto_detect`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Segment style for the `index`-th customer type.
    pub fn share_style(&self, index: usize) -> Style {
        if self.share_palette.is_empty() {
            return self.text;
        }
        self.share_palette[index % self.share_palette.len()]
    }

    /// Row style for zebra-striped tables.
    pub fn row_style(&self, index: usize) -> Style {
        if index % 2 == 0 {
            self.table_row
        } else {
            self.table_row_alt
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

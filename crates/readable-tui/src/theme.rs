use ratatui::style::{Color, Modifier, Style};

use readable_core::ColorScheme;

/// Color palette for one [`ColorScheme`].
pub struct Theme {
    pub scheme: ColorScheme,

    pub bg: Color,
    pub panel_bg: Color,
    pub block_bg: Color,
    pub text: Color,
    pub heading: Color,
    pub dim: Color,
    pub border: Color,

    pub accent: Color,
    pub badge_fg: Color,
    pub badge_bg: Color,
    pub active_fg: Color,
    pub active_bg: Color,

    pub error_fg: Color,
    pub error_bg: Color,
    pub error_border: Color,
    pub skeleton: Color,

    /// Starfield colors (faint, bright). `None` for schemes without stars.
    pub stars: Option<(Color, Color)>,

    pub header_fg: Color,
    pub header_bg: Color,
    pub footer_fg: Color,
}

impl Theme {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::light(),
            ColorScheme::Dark => Self::dark(),
            ColorScheme::Stars => Self::stars(),
        }
    }

    /// White page, gray text, blue accents.
    pub fn light() -> Self {
        Self {
            scheme: ColorScheme::Light,
            bg: Color::Rgb(255, 255, 255),
            panel_bg: Color::Rgb(255, 255, 255),
            block_bg: Color::Rgb(249, 250, 251),
            text: Color::Rgb(55, 65, 81),
            heading: Color::Rgb(17, 24, 39),
            dim: Color::Rgb(75, 85, 99),
            border: Color::Rgb(229, 231, 235),

            accent: Color::Rgb(37, 99, 235),
            badge_fg: Color::Rgb(29, 78, 216),
            badge_bg: Color::Rgb(239, 246, 255),
            active_fg: Color::Rgb(29, 78, 216),
            active_bg: Color::Rgb(239, 246, 255),

            error_fg: Color::Rgb(220, 38, 38),
            error_bg: Color::Rgb(254, 242, 242),
            error_border: Color::Rgb(254, 202, 202),
            skeleton: Color::Rgb(229, 231, 235),

            stars: None,

            header_fg: Color::White,
            header_bg: Color::Rgb(37, 99, 235),
            footer_fg: Color::Rgb(107, 114, 128),
        }
    }

    /// Near-black page with light gray text.
    pub fn dark() -> Self {
        Self {
            scheme: ColorScheme::Dark,
            bg: Color::Rgb(17, 24, 39),
            panel_bg: Color::Rgb(17, 24, 39),
            block_bg: Color::Rgb(31, 41, 55),
            text: Color::Rgb(209, 213, 219),
            heading: Color::White,
            dim: Color::Rgb(156, 163, 175),
            border: Color::Rgb(55, 65, 81),

            accent: Color::Rgb(59, 130, 246),
            badge_fg: Color::Rgb(147, 197, 253),
            badge_bg: Color::Rgb(30, 58, 138),
            active_fg: Color::Rgb(147, 197, 253),
            active_bg: Color::Rgb(30, 58, 138),

            error_fg: Color::Rgb(248, 113, 113),
            error_bg: Color::Rgb(69, 10, 10),
            error_border: Color::Rgb(153, 27, 27),
            skeleton: Color::Rgb(55, 65, 81),

            stars: None,

            header_fg: Color::White,
            header_bg: Color::Rgb(30, 58, 138),
            footer_fg: Color::Rgb(156, 163, 175),
        }
    }

    /// Dark page over a starfield.
    pub fn stars() -> Self {
        Self {
            scheme: ColorScheme::Stars,
            bg: Color::Rgb(3, 7, 18),
            panel_bg: Color::Rgb(8, 12, 26),
            block_bg: Color::Rgb(17, 24, 39),
            stars: Some((Color::Rgb(100, 116, 139), Color::Rgb(226, 232, 240))),
            ..Self::dark()
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    pub fn panel_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.panel_bg)
    }

    pub fn block_style(&self) -> Style {
        Style::default().fg(self.text).bg(self.block_bg)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn badge_style(&self) -> Style {
        Style::default().fg(self.badge_fg).bg(self.badge_bg)
    }

    pub fn nav_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.active_fg)
                .bg(self.active_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text)
        }
    }

    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.bg)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_fg).bg(self.error_bg)
    }

    pub fn skeleton_style(&self) -> Style {
        Style::default().fg(self.skeleton)
    }

    /// Glyph shown next to the scheme name in the header.
    pub fn icon(&self) -> &'static str {
        match self.scheme {
            ColorScheme::Light => "\u{2600}",
            ColorScheme::Dark => "\u{263E}",
            ColorScheme::Stars => "\u{2726}",
        }
    }
}

use tui::style::{Color, Modifier, Style};

pub const FRAME_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThemeColor {
    Primary,
    Accent,
    Text,
    Dim,
    Winner,
    Loser,
    Selected,
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

pub fn resolve(color: ThemeColor, theme: Theme) -> Style {
    match (color, theme) {
        (ThemeColor::Primary, Theme::Dark) => Style::default().fg(Color::Rgb(96, 165, 250)),
        (ThemeColor::Primary, Theme::Light) => Style::default().fg(Color::Rgb(37, 99, 235)),
        (ThemeColor::Accent, Theme::Dark) => {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        }
        (ThemeColor::Accent, Theme::Light) => Style::default()
            .fg(Color::Rgb(202, 138, 4))
            .add_modifier(Modifier::BOLD),
        (ThemeColor::Text, Theme::Dark) => Style::default().fg(Color::White),
        (ThemeColor::Text, Theme::Light) => Style::default().fg(Color::Black),
        (ThemeColor::Dim, Theme::Dark) => Style::default().fg(Color::Indexed(240)),
        (ThemeColor::Dim, Theme::Light) => Style::default().fg(Color::Gray),
        (ThemeColor::Winner, _) => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        (ThemeColor::Loser, Theme::Dark) => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
        (ThemeColor::Loser, Theme::Light) => Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::CROSSED_OUT),
        (ThemeColor::Selected, _) => Style::default()
            .add_modifier(Modifier::REVERSED)
            .add_modifier(Modifier::BOLD),
        (ThemeColor::Error, _) => Style::default().fg(Color::Red),
    }
}

/// Background fill for whole panes.
pub fn background(theme: Theme) -> Style {
    match theme {
        Theme::Dark => Style::default().bg(Color::Reset),
        Theme::Light => Style::default().bg(Color::White).fg(Color::Black),
    }
}

/// Triangle wave in `0..height`, one step per tick.
pub fn bounce_row(tick: u64, height: u16) -> u16 {
    let h = u64::from(height.saturating_sub(1));
    if h == 0 {
        return 0;
    }
    let t = tick % (2 * h);
    h.abs_diff(t) as u16
}

pub fn trophy_frame(frame: usize) -> [&'static str; 5] {
    const FRAMES: [[&str; 5]; FRAME_COUNT] = [
        ["*  ___  *", " |     | ", "  \\   /  ", "   | |   ", "  [___]  "],
        ["  _*_    ", " |     | ", "  \\   /  ", "   | |   ", "  [___]  "],
        ["   ___ * ", "*|     | ", "  \\   /  ", "   | |   ", "  [___]  "],
        ["   _*_   ", " |     |*", "  \\   /  ", "   | |   ", "  [___]  "],
    ];
    FRAMES[frame % FRAME_COUNT]
}

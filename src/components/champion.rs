use crate::components::theme::{Theme, ThemeColor, bounce_row, resolve, trophy_frame};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Widget};

pub use crate::components::theme::FRAME_COUNT;

/// Full banner height: border (2), hop band (1), trophy (5), name line (1).
pub const BANNER_HEIGHT: u16 = 9;

/// Animated trophy announcing the tournament winner.
pub struct ChampionBanner<'a> {
    pub champion: &'a str,
    pub tournament: &'a str,
    pub frame: usize,
    pub tick: u64,
    pub theme: Theme,
}

impl Widget for ChampionBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 3 {
            render_line(
                Line::from(Span::styled(
                    format!(" Champion: {} ", self.champion),
                    resolve(ThemeColor::Accent, self.theme),
                )),
                area.x,
                area.y,
                area.width,
                buf,
            );
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(resolve(ThemeColor::Accent, self.theme));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if inner.height < BANNER_HEIGHT - 2 {
            render_compact(&self, inner, buf);
            return;
        }
        render_full(&self, inner, buf);
    }
}

fn render_compact(banner: &ChampionBanner, inner: Rect, buf: &mut Buffer) {
    render_centered(
        Line::from(Span::styled("CHAMPION", resolve(ThemeColor::Accent, banner.theme))),
        inner,
        inner.y,
        buf,
    );
    if inner.height > 1 {
        render_centered(
            Line::from(Span::styled(
                banner.champion.to_string(),
                resolve(ThemeColor::Winner, banner.theme),
            )),
            inner,
            inner.y + 1,
            buf,
        );
    }
}

fn render_full(banner: &ChampionBanner, inner: Rect, buf: &mut Buffer) {
    let trophy = trophy_frame(banner.frame);
    // The trophy hops between the first two rows.
    let hop = bounce_row(banner.tick / 3, 2);
    let top = inner.y + 1 - hop;

    for (row, text) in trophy.iter().enumerate() {
        let y = top + row as u16;
        if y >= inner.y + inner.height {
            break;
        }
        render_centered(
            Line::from(Span::styled(text.to_string(), resolve(ThemeColor::Accent, banner.theme))),
            inner,
            y,
            buf,
        );
    }

    let name_y = inner.y + 6;
    if name_y < inner.y + inner.height {
        render_centered(
            Line::from(vec![
                Span::styled("Champion of ", resolve(ThemeColor::Dim, banner.theme)),
                Span::styled(banner.tournament.to_string(), resolve(ThemeColor::Text, banner.theme)),
                Span::styled(":  ", resolve(ThemeColor::Dim, banner.theme)),
                Span::styled(banner.champion.to_string(), resolve(ThemeColor::Winner, banner.theme)),
            ]),
            inner,
            name_y,
            buf,
        );
    }
}

fn render_centered(line: Line, area: Rect, y: u16, buf: &mut Buffer) {
    if y >= area.y + area.height {
        return;
    }
    let w = line.width() as u16;
    let x = area.x + area.width.saturating_sub(w) / 2;
    render_line(line, x, y, area.width, buf);
}

fn render_line(line: Line, x: u16, y: u16, max_width: u16, buf: &mut Buffer) {
    let mut cx = x;
    let limit = x.saturating_add(max_width);
    for span in &line.spans {
        let style: Style = span.style;
        let mut run = String::new();
        for ch in span.content.chars() {
            if cx >= limit {
                break;
            }
            run.push(ch);
            cx += 1;
        }
        let start = cx.saturating_sub(run.chars().count() as u16);
        if !run.is_empty() {
            buf.set_string(start, y, run, style);
        }
    }
}

use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::bracket::{TreeGrid, TreeView, slot_style};
use crate::components::champion::{BANNER_HEIGHT, ChampionBanner};
use crate::components::theme::{Theme, ThemeColor, background, resolve};
use crate::ui::layout::LayoutAreas;
use bracket_engine::{Bracket, Match, Slot, capacity_for};
use log::error;

static TABS: &[&str; 3] = &["Setup", "Rounds", "Tree"];

/// Rows used by one match in the round view: header, slot A, slot B, spacer.
const MATCH_ROWS: usize = 4;

pub fn draw<B>(terminal: &mut Terminal<B>, app: &App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        let theme = app.settings.theme;
        f.render_widget(Block::default().style(background(theme)), f.area());

        layout.update(f.area(), app.settings.full_screen);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        let main = if app.state.show_logs {
            let [main, logs] =
                Layout::vertical([Constraint::Percentage(70), Constraint::Percentage(30)])
                    .areas(layout.main);
            draw_logs(f, logs, theme);
            main
        } else {
            layout.main
        };

        match app.state.active_tab {
            MenuItem::Setup => draw_setup(f, main, app),
            MenuItem::Rounds => draw_rounds(f, main, app),
            MenuItem::Tree => draw_tree(f, main, app),
            MenuItem::Help => draw_help(f, main, theme),
        }

        draw_status(f, layout.status, app);

        if app.state.input.is_some() {
            draw_input(f, f.area(), app);
        }
    });
    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(style: Style) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(style)
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let theme = app.settings.theme;
    let style = resolve(ThemeColor::Text, theme);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Setup => 0,
        MenuItem::Rounds => 1,
        MenuItem::Tree => 2,
        MenuItem::Help => match app.state.previous_tab {
            MenuItem::Rounds => 1,
            MenuItem::Tree => 2,
            _ => 0,
        },
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(app.state.session.name().to_string(), resolve(ThemeColor::Accent, theme)),
        Span::styled(format!("  {}  Help: ? ", theme.label()), resolve(ThemeColor::Dim, theme)),
    ]))
    .alignment(Alignment::Right)
    .block(
        Block::default()
            .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
            .border_type(border_type),
    )
    .style(style);
    f.render_widget(title, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

fn draw_setup(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.settings.theme;
    let [roster_area, summary_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

    let session = &app.state.session;
    let block = default_border(resolve(ThemeColor::Primary, theme))
        .title(format!(" Participants ({}) ", session.roster().len()));
    let inner = block.inner(roster_area);
    f.render_widget(block, roster_area);

    if session.roster().is_empty() {
        draw_placeholder(f, inner, "No participants. Press a to add one.", theme);
    } else {
        let selected = app.state.setup.selected;
        let lines: Vec<Line> = session
            .roster()
            .participants()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let text = format!("{:>3}. {}", i + 1, p);
                if i == selected {
                    Line::from(Span::styled(format!("> {text}"), resolve(ThemeColor::Selected, theme)))
                } else {
                    Line::from(Span::styled(format!("  {text}"), resolve(ThemeColor::Text, theme)))
                }
            })
            .collect();
        let scroll = scroll_to_show(selected, 1, inner.height);
        f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
    }

    let block = default_border(resolve(ThemeColor::Dim, theme)).title(" Tournament ");
    let inner = block.inner(summary_area);
    f.render_widget(block, summary_area);

    let count = session.roster().len();
    let capacity = capacity_for(count);
    let dim = resolve(ThemeColor::Dim, theme);
    let text = resolve(ThemeColor::Text, theme);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Name: ", dim),
            Span::styled(session.name().to_string(), resolve(ThemeColor::Accent, theme)),
        ]),
        Line::from(vec![
            Span::styled("Score tracking: ", dim),
            Span::styled(if session.score_tracking() { "on" } else { "off" }, text),
        ]),
    ];
    if count >= 2 {
        lines.push(Line::from(vec![
            Span::styled("Bracket: ", dim),
            Span::styled(
                format!(
                    "{capacity} slots, {} byes, {} rounds",
                    capacity - count,
                    capacity.trailing_zeros()
                ),
                text,
            ),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "Add at least 2 participants to generate",
            resolve(ThemeColor::Error, theme),
        )));
    }
    lines.push(Line::from(""));
    if session.bracket().is_some() {
        lines.push(Line::from(Span::styled(
            "Bracket in progress. Press R to start over.",
            resolve(ThemeColor::Accent, theme),
        )));
    } else {
        for hint in [
            "a  add participant",
            "e  rename selected",
            "d  remove selected",
            "n  rename tournament",
            "s  toggle score tracking",
            "g  generate bracket",
        ] {
            lines.push(Line::from(Span::styled(hint, dim)));
        }
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

// ---------------------------------------------------------------------------
// Rounds
// ---------------------------------------------------------------------------

fn draw_rounds(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.settings.theme;
    let Some(bracket) = app.state.session.bracket() else {
        draw_placeholder(f, area, "No bracket yet. Generate one from Setup (g).", theme);
        return;
    };
    let view = &app.state.rounds;

    let (banner_area, area) = match app.state.session.champion() {
        Some(champion) if area.height > BANNER_HEIGHT + 6 => {
            let [banner, rest] =
                Layout::vertical([Constraint::Length(BANNER_HEIGHT), Constraint::Fill(1)])
                    .areas(area);
            f.render_widget(
                ChampionBanner {
                    champion: champion.name(),
                    tournament: app.state.session.name(),
                    frame: app.state.animation.frame,
                    tick: app.state.animation.tick,
                    theme,
                },
                banner,
            );
            (Some(banner), rest)
        }
        _ => (None, area),
    };

    let title = format!(
        " {}  ({} of {}) ",
        bracket.round_label(view.view_round),
        view.view_round + 1,
        bracket.round_count()
    );
    let mut block = default_border(resolve(ThemeColor::Primary, theme)).title(title);
    if banner_area.is_none()
        && let Some(champion) = app.state.session.champion()
    {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" Champion: {champion} "),
            resolve(ThemeColor::Winner, theme),
        )));
    }
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(round) = bracket.round(view.view_round) else {
        return;
    };
    let show_scores = app.state.session.score_tracking();
    let lines: Vec<Line> = round
        .matches
        .iter()
        .enumerate()
        .flat_map(|(i, m)| {
            let cursor = (i == view.selected_match).then_some(view.selected_slot);
            match_lines(i, m, cursor, show_scores, theme)
        })
        .collect();
    let scroll = scroll_to_show(view.selected_match, MATCH_ROWS, inner.height);
    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

/// Header, two slot lines and a spacer for one match. `cursor` marks the highlighted slot.
fn match_lines(
    index: usize,
    m: &Match,
    cursor: Option<Slot>,
    show_scores: bool,
    theme: Theme,
) -> Vec<Line<'static>> {
    let dim = resolve(ThemeColor::Dim, theme);
    let status = if m.is_bye() {
        "bye"
    } else if m.is_decided() {
        "decided"
    } else if m.is_playable() {
        "pick a winner"
    } else if m.is_pending() {
        "walkover"
    } else {
        "waiting"
    };
    let header_style = if cursor.is_some() {
        resolve(ThemeColor::Accent, theme)
    } else {
        dim
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(format!("Match {}", index + 1), header_style),
        Span::styled(format!("  {status}"), dim),
    ])];

    for slot in [Slot::A, Slot::B] {
        let marker = if cursor == Some(slot) { "> " } else { "  " };
        let name = m.slot(slot).map(|p| p.name().to_string()).unwrap_or_else(|| "TBD".to_string());
        let style = slot_style(m, slot, cursor == Some(slot), theme);
        let mut spans = vec![
            Span::styled(marker, resolve(ThemeColor::Accent, theme)),
            Span::styled(name, style),
        ];
        if show_scores && m.slot(slot).is_some() {
            spans.push(Span::styled(format!("  {}", m.score(slot)), dim));
        }
        if m.winning_slot() == Some(slot) {
            spans.push(Span::styled("  ✓", resolve(ThemeColor::Winner, theme)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

fn draw_tree(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.settings.theme;
    let Some(bracket) = app.state.session.bracket() else {
        draw_placeholder(f, area, "No bracket yet. Generate one from Setup (g).", theme);
        return;
    };
    let block = default_border(resolve(ThemeColor::Primary, theme)).title(" Bracket ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height < 2 {
        return;
    }

    let [labels, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(inner);
    let grid = TreeGrid::for_bracket(bracket, app.state.tree.first_round, body.width);
    draw_round_labels(f, labels, bracket, &grid, theme);

    f.render_widget(
        TreeView {
            bracket,
            grid: &grid,
            selected: Some((app.state.rounds.view_round, app.state.rounds.selected_match)),
            show_scores: app.state.session.score_tracking(),
            scroll_offset: app.state.tree.scroll_offset.min(grid.max_scroll(body.height)),
            theme,
        },
        body,
    );
}

fn draw_round_labels(f: &mut Frame, area: Rect, bracket: &Bracket, grid: &TreeGrid, theme: Theme) {
    for depth in 0..grid.column_count() {
        let Some(cell) = grid.column(depth).first() else {
            continue;
        };
        if cell.col >= area.width {
            break;
        }
        let width = grid.cell_width.min(area.width - cell.col);
        let label = Paragraph::new(format!(" {}", bracket.round_label(cell.round)))
            .style(resolve(ThemeColor::Accent, theme));
        f.render_widget(label, Rect::new(area.x + cell.col, area.y, width, 1));
    }
}

// ---------------------------------------------------------------------------
// Help, input, status, logs
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect, theme: Theme) {
    let block = default_border(resolve(ThemeColor::Dim, theme)).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let sections: [(&str, &[&str]); 4] = [
        ("Global", &[
            "1/2/3  Setup / Rounds / Tree",
            "?      help (Esc to close)",
            "t      toggle theme",
            "x      export bracket JSON",
            "f      full screen",
            "\"      log pane",
            "q      quit",
        ]),
        ("Setup", &[
            "j/k    move",
            "a      add participant",
            "e      rename selected",
            "d      remove selected",
            "n      rename tournament",
            "s      toggle score tracking",
            "g      generate bracket",
        ]),
        ("Rounds", &[
            "h/l    previous / next round",
            "j/k    previous / next match",
            "Tab    switch slot",
            "Enter  advance highlighted participant",
            "a/b    advance slot A / slot B",
            "s      enter score",
            "u      undo",
            "R      start over",
            "v      switch to tree",
        ]),
        ("Tree", &["j/k    scroll", "h/l    pan rounds", "v      switch to rounds"]),
    ];

    let mut lines = Vec::new();
    for (title, keys) in sections {
        lines.push(Line::from(Span::styled(title, resolve(ThemeColor::Accent, theme))));
        for key in keys {
            lines.push(Line::from(Span::styled(format!("  {key}"), resolve(ThemeColor::Text, theme))));
        }
        lines.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
    let Some(input) = app.state.input.as_ref() else {
        return;
    };
    let theme = app.settings.theme;
    let width = area.width.saturating_sub(4).min(50);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + area.height.saturating_sub(3) / 2,
        width,
        3.min(area.height),
    );
    f.render_widget(Clear, popup);
    let block = default_border(resolve(ThemeColor::Accent, theme))
        .title(format!(" {} ", input.kind.prompt()))
        .title_bottom(" Enter save  Esc cancel ")
        .style(background(theme));
    let inner = block.inner(popup);
    f.render_widget(block, popup);
    f.render_widget(
        Paragraph::new(format!("{}_", input.buffer)).style(resolve(ThemeColor::Text, theme)),
        inner,
    );
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.settings.theme;
    let line = match (&app.state.last_error, &app.state.status) {
        (Some(err), _) => Line::from(Span::styled(format!(" {err}"), resolve(ThemeColor::Error, theme))),
        (None, Some(status)) => Line::from(Span::styled(format!(" {status}"), resolve(ThemeColor::Dim, theme))),
        (None, None) => Line::from(""),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_logs(f: &mut Frame, area: Rect, theme: Theme) {
    let logger = TuiLoggerWidget::default()
        .block(default_border(resolve(ThemeColor::Dim, theme)).title(" Logs "))
        .style_error(resolve(ThemeColor::Error, theme))
        .style_warn(resolve(ThemeColor::Accent, theme))
        .style_info(resolve(ThemeColor::Text, theme));
    f.render_widget(logger, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str, theme: Theme) {
    let block = default_border(resolve(ThemeColor::Dim, theme));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(resolve(ThemeColor::Dim, theme))
            .alignment(Alignment::Center),
        inner,
    );
}

/// First line to show so that item `index` (each `rows` tall) stays on screen.
fn scroll_to_show(index: usize, rows: usize, height: u16) -> u16 {
    let bottom = (index + 1) * rows;
    bottom.saturating_sub(height as usize) as u16
}

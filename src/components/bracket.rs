use bracket_engine::{Bracket, LayoutMetrics, Match, Slot};
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::Style;
use tui::widgets::Widget;

use crate::components::theme::{Theme, ThemeColor, resolve};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Terminal geometry: 3-row cells (slot A, status, slot B) and one spacer row.
pub const METRICS: LayoutMetrics = LayoutMetrics::TERMINAL;

/// Width of the connector zone drawn between adjacent round columns.
pub const CONNECTOR_WIDTH: u16 = 3;

/// Maximum match cell width in wider terminals.
const CELL_W_FULL: u16 = 22;

/// Below this the names become unreadable; columns overflow and the view pans instead.
const CELL_W_MIN: u16 = 12;

// ---------------------------------------------------------------------------
// TreeCell / TreeGrid
// ---------------------------------------------------------------------------

/// Pre-computed position for one match.
#[derive(Debug, Clone)]
pub struct TreeCell {
    /// Row of the status line (middle of the 3-row cell), relative to the grid origin.
    pub center_row: u16,
    /// Starting x-column within the grid.
    pub col: u16,
    pub round: usize,
    pub index: usize,
}

/// Bracket layout for the visible rounds, leftmost first.
///
/// Center rows come from [`LayoutMetrics::center_row`] with the round
/// re-based on `first_round`, so a panned view packs its leftmost column
/// the way an unpanned view packs the first round.
#[derive(Debug, Clone)]
pub struct TreeGrid {
    pub cells: Vec<TreeCell>,
    /// Cells per visible column, in `cells` order.
    column_lens: Vec<usize>,
    pub first_round: usize,
    pub cell_width: u16,
    pub total_width: u16,
    pub total_height: u16,
}

impl TreeGrid {
    pub fn compute(round_lens: &[usize], first_round: usize, width: u16) -> Self {
        let first_round = first_round.min(round_lens.len().saturating_sub(1));
        let visible = &round_lens[first_round.min(round_lens.len())..];
        let columns = visible.len().max(1) as u16;

        let connector_total = CONNECTOR_WIDTH * (columns - 1);
        let per_col = width.saturating_sub(connector_total) / columns;
        let cell_width = per_col.clamp(CELL_W_MIN, CELL_W_FULL);
        let stride = cell_width + CONNECTOR_WIDTH;

        let mut cells = Vec::with_capacity(visible.iter().sum());
        for (depth, &len) in visible.iter().enumerate() {
            for index in 0..len {
                cells.push(TreeCell {
                    center_row: METRICS.center_row(depth, index) as u16,
                    col: stride * depth as u16,
                    round: first_round + depth,
                    index,
                });
            }
        }

        let total_height = visible
            .first()
            .map(|&len| METRICS.column_height(0, len) as u16)
            .unwrap_or(0);

        Self {
            cells,
            column_lens: visible.to_vec(),
            first_round,
            cell_width,
            total_width: stride * (columns - 1) + cell_width,
            total_height,
        }
    }

    pub fn for_bracket(bracket: &Bracket, first_round: usize, width: u16) -> Self {
        let lens: Vec<usize> = bracket.rounds.iter().map(|r| r.len()).collect();
        Self::compute(&lens, first_round, width)
    }

    /// Cells of the `depth`-th visible column.
    pub fn column(&self, depth: usize) -> &[TreeCell] {
        let start: usize = self.column_lens.iter().take(depth).sum();
        let len = self.column_lens.get(depth).copied().unwrap_or(0);
        &self.cells[start..start + len]
    }

    pub fn column_count(&self) -> usize {
        self.column_lens.len()
    }

    /// Largest useful scroll offset for a viewport of `height` rows.
    pub fn max_scroll(&self, height: u16) -> u16 {
        self.total_height.saturating_sub(height)
    }
}

// ---------------------------------------------------------------------------
// TreeView widget
// ---------------------------------------------------------------------------

/// Whole-bracket view: one column per round joined by box-drawing connectors.
pub struct TreeView<'a> {
    pub bracket: &'a Bracket,
    pub grid: &'a TreeGrid,
    /// Highlighted (round, match).
    pub selected: Option<(usize, usize)>,
    pub show_scores: bool,
    pub scroll_offset: u16,
    pub theme: Theme,
}

impl Widget for TreeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CELL_W_MIN || area.height < METRICS.match_height as u16 {
            return;
        }

        for cell in &self.grid.cells {
            let Some(m) = self.bracket.match_at(cell.round, cell.index) else {
                continue;
            };
            let selected = self.selected == Some((cell.round, cell.index));
            draw_match_cell(m, cell, &self, selected, area, buf);
        }

        let dim = resolve(ThemeColor::Dim, self.theme);
        for depth in 0..self.grid.column_count().saturating_sub(1) {
            let children = self.grid.column(depth);
            let parents = self.grid.column(depth + 1);
            let Some(first) = children.first() else {
                continue;
            };
            let conn_x = area.x + first.col + self.grid.cell_width;
            for (j, parent) in parents.iter().enumerate() {
                let (Some(top), Some(bot)) = (children.get(2 * j), children.get(2 * j + 1)) else {
                    continue;
                };
                draw_connector(
                    [top.center_row, parent.center_row, bot.center_row],
                    conn_x,
                    area,
                    self.scroll_offset,
                    dim,
                    buf,
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Drawing helpers
// ---------------------------------------------------------------------------

/// Convert a grid row to an absolute screen y, applying scroll and area bounds.
fn screen_y(grid_row: u16, scroll: u16, area: Rect) -> Option<u16> {
    let rel = grid_row.checked_sub(scroll)?;
    (rel < area.height).then_some(area.y + rel)
}

fn draw_match_cell(
    m: &Match,
    cell: &TreeCell,
    view: &TreeView,
    selected: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let x = area.x + cell.col;
    if x >= area.x + area.width {
        return;
    }
    let avail = (area.x + area.width - x) as usize;
    let width = view.grid.cell_width as usize;

    let rows = [
        (cell.center_row.saturating_sub(1), Some(Slot::A)),
        (cell.center_row, None),
        (cell.center_row + 1, Some(Slot::B)),
    ];
    for (row, slot) in rows {
        let Some(sy) = screen_y(row, view.scroll_offset, area) else {
            continue;
        };
        let (text, style) = match slot {
            Some(slot) => {
                let score = view.show_scores.then(|| m.score(slot));
                (
                    format_slot_line(m.slot(slot).map(|p| p.name()), score, width),
                    slot_style(m, slot, selected, view.theme),
                )
            }
            None => (
                format_status_line(m, width),
                resolve(ThemeColor::Dim, view.theme),
            ),
        };
        let text: String = text.chars().take(avail).collect();
        buf.set_string(x, sy, &text, style);
    }
}

pub fn slot_style(m: &Match, slot: Slot, selected: bool, theme: Theme) -> Style {
    let base = match (m.winning_slot(), m.slot(slot)) {
        (_, None) => resolve(ThemeColor::Dim, theme),
        (Some(w), _) if w == slot => resolve(ThemeColor::Winner, theme),
        (Some(_), _) => resolve(ThemeColor::Loser, theme),
        (None, _) => resolve(ThemeColor::Text, theme),
    };
    if selected {
        base.patch(resolve(ThemeColor::Selected, theme))
    } else {
        base
    }
}

/// One participant line: `" name          score "`, exactly `width` columns.
pub fn format_slot_line(name: Option<&str>, score: Option<i64>, width: usize) -> String {
    let name = name.unwrap_or("TBD");
    let line = match score {
        Some(s) => {
            let name_w = width.saturating_sub(6);
            let name: String = name.chars().take(name_w).collect();
            format!(" {name:<name_w$} {s:>3} ")
        }
        None => {
            let name_w = width.saturating_sub(1);
            let name: String = name.chars().take(name_w).collect();
            format!(" {name:<name_w$}")
        }
    };
    line.chars().take(width).collect()
}

fn format_status_line(m: &Match, width: usize) -> String {
    let raw = if m.is_bye() {
        " BYE"
    } else if m.is_decided() {
        " FINAL"
    } else if m.is_playable() {
        " vs"
    } else if m.is_pending() {
        " walkover"
    } else {
        ""
    };
    let padded = format!("{raw:<width$}");
    padded.chars().take(width).collect()
}

/// Join two feeder matches to the match they feed.
///
/// ```text
///  top     ──┐
///            │
///  parent    ├──
///            │
///  bottom  ──┘
/// ```
fn draw_connector(rows: [u16; 3], conn_x: u16, area: Rect, scroll: u16, style: Style, buf: &mut Buffer) {
    let [r_top, r_mid, r_bot] = rows;
    let limit_x = area.x + area.width;
    let mut put = |x: u16, row: u16, ch: char| {
        if x >= limit_x {
            return;
        }
        if let Some(sy) = screen_y(row, scroll, area) {
            put_char(buf, x, sy, ch, style);
        }
    };

    put(conn_x, r_top, '─');
    put(conn_x + 1, r_top, '┐');
    for row in (r_top + 1)..r_bot {
        put(conn_x + 1, row, '│');
    }
    put(conn_x + 1, r_mid, '├');
    put(conn_x + 2, r_mid, '─');
    put(conn_x, r_bot, '─');
    put(conn_x + 1, r_bot, '┘');
}

fn put_char(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_engine::{Participant, generate_seeded};

    fn centers(grid: &TreeGrid, depth: usize) -> Vec<u16> {
        grid.column(depth).iter().map(|c| c.center_row).collect()
    }

    #[test]
    fn sixteen_slot_centers() {
        let grid = TreeGrid::compute(&[8, 4, 2, 1], 0, 120);
        assert_eq!(centers(&grid, 0), vec![1, 5, 9, 13, 17, 21, 25, 29]);
        assert_eq!(centers(&grid, 1), vec![3, 11, 19, 27]);
        assert_eq!(centers(&grid, 2), vec![7, 23]);
        assert_eq!(centers(&grid, 3), vec![15]);
        assert_eq!(grid.total_height, 32);
    }

    #[test]
    fn parent_center_is_midpoint_of_children() {
        let grid = TreeGrid::compute(&[16, 8, 4, 2, 1], 0, 200);
        for depth in 0..4 {
            let children = grid.column(depth);
            for (j, parent) in grid.column(depth + 1).iter().enumerate() {
                let mid = (children[2 * j].center_row + children[2 * j + 1].center_row) / 2;
                assert_eq!(parent.center_row, mid, "depth={depth} parent={j}");
            }
        }
    }

    #[test]
    fn panning_rebases_the_leftmost_column() {
        let grid = TreeGrid::compute(&[8, 4, 2, 1], 2, 120);
        assert_eq!(grid.column_count(), 2);
        assert_eq!(centers(&grid, 0), vec![1, 5]);
        assert_eq!(centers(&grid, 1), vec![3]);
        assert_eq!(grid.column(0)[0].round, 2);
        assert_eq!(grid.total_height, 8);
    }

    #[test]
    fn pan_past_the_end_is_clamped() {
        let grid = TreeGrid::compute(&[2, 1], 9, 80);
        assert_eq!(grid.first_round, 1);
        assert_eq!(grid.cells.len(), 1);
    }

    #[test]
    fn cell_width_is_bounded() {
        assert_eq!(TreeGrid::compute(&[4, 2, 1], 0, 300).cell_width, CELL_W_FULL);
        assert_eq!(TreeGrid::compute(&[16, 8, 4, 2, 1], 0, 40).cell_width, CELL_W_MIN);
        let grid = TreeGrid::compute(&[4, 2, 1], 0, 51);
        assert_eq!(grid.cell_width, 15);
        assert_eq!(grid.total_width, 51);
    }

    #[test]
    fn slot_lines_fill_the_cell() {
        assert_eq!(format_slot_line(Some("Duke"), Some(87), 14).chars().count(), 14);
        assert_eq!(format_slot_line(Some("A very long team name"), None, 12).chars().count(), 12);
        assert_eq!(format_slot_line(None, None, 10), " TBD      ");
        assert_eq!(format_slot_line(Some("X"), Some(12345), 10).chars().count(), 10);
    }

    #[test]
    fn renders_names_and_connectors() {
        let names: Vec<Participant> = ["Ants", "Bees", "Cats", "Dogs"].map(Participant::from).to_vec();
        let bracket = generate_seeded(&names).unwrap();
        let grid = TreeGrid::for_bracket(&bracket, 0, 60);
        let area = Rect::new(0, 0, 60, grid.total_height);
        let mut buf = Buffer::empty(area);
        TreeView {
            bracket: &bracket,
            grid: &grid,
            selected: Some((0, 0)),
            show_scores: false,
            scroll_offset: 0,
            theme: Theme::Dark,
        }
        .render(area, &mut buf);
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        for name in ["Ants", "Bees", "Cats", "Dogs", "TBD", "├", "┘"] {
            assert!(text.contains(name), "missing {name}");
        }
    }
}

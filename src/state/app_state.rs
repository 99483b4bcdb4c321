use crate::app::MenuItem;
use bracket_engine::{Bracket, Participant, Slot, TournamentSession};
use chrono::Local;

// ---------------------------------------------------------------------------
// Champion banner animation state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AnimationState {
    /// Current frame index into the trophy frames array, wraps at FRAME_COUNT.
    pub frame: usize,
    /// Monotonic tick counter, drives the bounce offset.
    pub tick: u64,
}

impl AnimationState {
    pub fn advance(&mut self, frame_count: usize) {
        self.tick = self.tick.wrapping_add(1);
        self.frame = (self.frame + 1) % frame_count.max(1);
    }
}

// ---------------------------------------------------------------------------
// Setup (roster editing) state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SetupState {
    /// Highlighted roster row.
    pub selected: usize,
}

impl SetupState {
    pub fn move_down(&mut self, len: usize) {
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Keep the cursor on a valid row after the roster shrinks.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Round view state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RoundViewState {
    /// Round currently on screen (0 = first round).
    pub view_round: usize,
    /// Highlighted match within `view_round`.
    pub selected_match: usize,
    /// Highlighted side of the selected match.
    pub selected_slot: Slot,
}

impl Default for RoundViewState {
    fn default() -> Self {
        Self {
            view_round: 0,
            selected_match: 0,
            selected_slot: Slot::A,
        }
    }
}

impl RoundViewState {
    pub fn navigate_round_next(&mut self, bracket: &Bracket) {
        if self.view_round + 1 < bracket.round_count() {
            self.view_round += 1;
            self.selected_match = 0;
            self.selected_slot = Slot::A;
        }
    }

    pub fn navigate_round_prev(&mut self) {
        if self.view_round > 0 {
            self.view_round -= 1;
            self.selected_match = 0;
            self.selected_slot = Slot::A;
        }
    }

    pub fn navigate_match_down(&mut self, bracket: &Bracket) {
        let max = bracket
            .round(self.view_round)
            .map(|r| r.len().saturating_sub(1))
            .unwrap_or(0);
        if self.selected_match < max {
            self.selected_match += 1;
        }
    }

    pub fn navigate_match_up(&mut self) {
        self.selected_match = self.selected_match.saturating_sub(1);
    }

    pub fn toggle_slot(&mut self) {
        self.selected_slot = self.selected_slot.other();
    }

    /// Participant under the cursor, if that slot is filled.
    pub fn selected_participant<'a>(&self, bracket: &'a Bracket) -> Option<&'a Participant> {
        bracket
            .match_at(self.view_round, self.selected_match)?
            .slot(self.selected_slot)
    }
}

// ---------------------------------------------------------------------------
// Tree view state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TreeViewState {
    /// Vertical scroll offset in rows, for brackets taller than the terminal.
    pub scroll_offset: u16,
    /// Leftmost round column drawn, for brackets wider than the terminal.
    pub first_round: usize,
}

impl TreeViewState {
    pub fn scroll_down(&mut self, max: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(1).min(max);
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn pan_right(&mut self, round_count: usize) {
        if self.first_round + 1 < round_count {
            self.first_round += 1;
        }
    }

    pub fn pan_left(&mut self) {
        self.first_round = self.first_round.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Text entry state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum InputKind {
    AddParticipant,
    RenameParticipant { index: usize },
    RenameTournament,
    Score {
        round: usize,
        index: usize,
        participant: Participant,
    },
}

impl InputKind {
    pub fn prompt(&self) -> String {
        match self {
            InputKind::AddParticipant => "Add participant".to_string(),
            InputKind::RenameParticipant { index } => format!("Rename participant #{}", index + 1),
            InputKind::RenameTournament => "Tournament name".to_string(),
            InputKind::Score { participant, .. } => format!("Score for {participant}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextInput {
    pub kind: InputKind,
    pub buffer: String,
}

impl TextInput {
    pub fn new(kind: InputKind, initial: impl Into<String>) -> Self {
        Self {
            kind,
            buffer: initial.into(),
        }
    }

    pub fn push(&mut self, ch: char) {
        self.buffer.push(ch);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    /// Last informational message, prefixed with the time it was set.
    pub status: Option<String>,
    pub session: TournamentSession,
    pub setup: SetupState,
    pub rounds: RoundViewState,
    pub tree: TreeViewState,
    pub input: Option<TextInput>,
    pub animation: AnimationState,
}

impl AppState {
    pub fn new(session: TournamentSession) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.last_error = None;
        self.status = Some(format!("[{}] {}", Local::now().format("%H:%M"), message.into()));
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.last_error = Some(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bracket_engine::generate_seeded;

    fn bracket(n: usize) -> Bracket {
        let names: Vec<Participant> = (0..n).map(|i| Participant::new(format!("P{i}"))).collect();
        generate_seeded(&names).unwrap()
    }

    #[test]
    fn round_navigation_clamps_at_both_ends() {
        let b = bracket(8);
        let mut view = RoundViewState::default();
        view.navigate_round_prev();
        assert_eq!(view.view_round, 0);
        for _ in 0..10 {
            view.navigate_round_next(&b);
        }
        assert_eq!(view.view_round, 2);
    }

    #[test]
    fn changing_round_resets_cursor() {
        let b = bracket(8);
        let mut view = RoundViewState::default();
        view.navigate_match_down(&b);
        view.toggle_slot();
        view.navigate_round_next(&b);
        assert_eq!(view.selected_match, 0);
        assert_eq!(view.selected_slot, Slot::A);
    }

    #[test]
    fn match_cursor_stays_in_round() {
        let b = bracket(4);
        let mut view = RoundViewState::default();
        for _ in 0..5 {
            view.navigate_match_down(&b);
        }
        assert_eq!(view.selected_match, 1);
        view.navigate_match_up();
        view.navigate_match_up();
        assert_eq!(view.selected_match, 0);
    }

    #[test]
    fn selected_participant_follows_slot() {
        let b = bracket(4);
        let mut view = RoundViewState::default();
        assert_eq!(view.selected_participant(&b), Some(&Participant::from("P0")));
        view.toggle_slot();
        assert_eq!(view.selected_participant(&b), Some(&Participant::from("P1")));
        view.navigate_round_next(&b);
        assert_eq!(view.selected_participant(&b), None);
    }

    #[test]
    fn setup_cursor_clamps_after_removal() {
        let mut setup = SetupState { selected: 3 };
        setup.clamp(2);
        assert_eq!(setup.selected, 1);
        setup.clamp(0);
        assert_eq!(setup.selected, 0);
    }

    #[test]
    fn tree_scroll_is_bounded() {
        let mut tree = TreeViewState::default();
        tree.scroll_up();
        assert_eq!(tree.scroll_offset, 0);
        for _ in 0..5 {
            tree.scroll_down(3);
        }
        assert_eq!(tree.scroll_offset, 3);
        tree.pan_right(2);
        tree.pan_right(2);
        assert_eq!(tree.first_round, 1);
    }

    #[test]
    fn status_clears_error() {
        let mut state = AppState::default();
        state.set_error("boom");
        state.set_status("ok");
        assert!(state.last_error.is_none());
        assert!(state.status.as_deref().unwrap().ends_with("ok"));
    }
}

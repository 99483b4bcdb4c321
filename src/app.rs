use crate::components::bracket::TreeGrid;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, InputKind, RoundViewState, TextInput, TreeViewState};
use bracket_engine::{Bracket, BracketResult, Participant, Roster, Slot, TournamentSession};
use chrono::Local;
use log::{info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Setup,
    Rounds,
    Tree,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

/// Snapshot written by the export key.
#[derive(Debug, Serialize)]
pub struct BracketExport<'a> {
    pub name: &'a str,
    pub exported_at: String,
    pub score_tracking: bool,
    pub champion: Option<&'a Participant>,
    pub bracket: &'a Bracket,
}

impl App {
    pub fn new(roster: Roster) -> Self {
        let settings = AppSettings::load();

        if let Some(level) = settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        Self::with_settings(settings, roster)
    }

    pub fn with_settings(settings: AppSettings, roster: Roster) -> Self {
        let mut session = TournamentSession::with_roster(roster);
        session.set_score_tracking(settings.score_tracking);
        Self {
            state: AppState::new(session),
            settings,
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    /// Flip between the per-round view and the whole tree.
    pub fn toggle_view(&mut self) {
        match self.state.active_tab {
            MenuItem::Rounds => self.update_tab(MenuItem::Tree),
            MenuItem::Tree => self.update_tab(MenuItem::Rounds),
            _ => {}
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn toggle_theme(&mut self) {
        self.settings.theme = self.settings.theme.toggled();
        self.state
            .set_status(format!("{} theme", self.settings.theme.label()));
    }

    // -----------------------------------------------------------------------
    // Animation tick, every 80ms
    // -----------------------------------------------------------------------

    pub fn advance_animation(&mut self, frame_count: usize) {
        self.state.animation.advance(frame_count);
    }

    pub fn on_error(&mut self, message: String) {
        warn!("{message}");
        self.state.set_error(message);
    }

    /// Surface an engine result in the status line.
    fn report(&mut self, result: BracketResult<()>, success: impl FnOnce(&Self) -> String) {
        match result {
            Ok(()) => {
                let message = success(self);
                self.state.set_status(message);
            }
            Err(e) => self.on_error(e.to_string()),
        }
    }

    // -----------------------------------------------------------------------
    // Setup: roster, name and score-tracking edits
    // -----------------------------------------------------------------------

    fn ensure_editable(&mut self) -> bool {
        if self.state.session.bracket().is_some() {
            self.on_error("Start over (R) to edit the tournament".to_string());
            return false;
        }
        true
    }

    pub fn setup_down(&mut self) {
        let len = self.state.session.roster().len();
        self.state.setup.move_down(len);
    }

    pub fn setup_up(&mut self) {
        self.state.setup.move_up();
    }

    pub fn begin_add_participant(&mut self) {
        if self.ensure_editable() {
            self.state.input = Some(TextInput::new(InputKind::AddParticipant, ""));
        }
    }

    pub fn begin_rename_participant(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        let index = self.state.setup.selected;
        let Some(current) = self.state.session.roster().get(index) else {
            return;
        };
        let current = current.name().to_string();
        self.state.input = Some(TextInput::new(
            InputKind::RenameParticipant { index },
            current,
        ));
    }

    pub fn begin_rename_tournament(&mut self) {
        if self.ensure_editable() {
            let current = self.state.session.name().to_string();
            self.state.input = Some(TextInput::new(InputKind::RenameTournament, current));
        }
    }

    pub fn remove_selected_participant(&mut self) {
        if !self.ensure_editable() {
            return;
        }
        let index = self.state.setup.selected;
        match self.state.session.roster_mut().remove(index) {
            Ok(removed) => self.state.set_status(format!("Removed {removed}")),
            Err(e) => self.on_error(e.to_string()),
        }
        let len = self.state.session.roster().len();
        self.state.setup.clamp(len);
    }

    pub fn toggle_score_tracking(&mut self) {
        let enabled = !self.state.session.score_tracking();
        if self.state.session.set_score_tracking(enabled) {
            let word = if enabled { "on" } else { "off" };
            self.state.set_status(format!("Score tracking {word}"));
        } else {
            self.on_error("Score tracking is fixed once the bracket exists".to_string());
        }
    }

    pub fn generate_bracket(&mut self) {
        if let Err(e) = self.state.session.generate().map(|_| ()) {
            self.on_error(e.to_string());
            return;
        }
        self.state.rounds = RoundViewState::default();
        self.state.tree = TreeViewState::default();
        self.update_tab(MenuItem::Rounds);
        let count = self.state.session.roster().len();
        self.state.set_status(format!("Bracket generated for {count} participants"));
    }

    // -----------------------------------------------------------------------
    // Text entry
    // -----------------------------------------------------------------------

    pub fn input_push(&mut self, ch: char) {
        if let Some(input) = self.state.input.as_mut() {
            input.push(ch);
        }
    }

    pub fn input_backspace(&mut self) {
        if let Some(input) = self.state.input.as_mut() {
            input.backspace();
        }
    }

    pub fn input_cancel(&mut self) {
        self.state.input = None;
    }

    pub fn input_submit(&mut self) {
        let Some(TextInput { kind, buffer }) = self.state.input.take() else {
            return;
        };
        match kind {
            InputKind::AddParticipant => {
                let result = self.state.session.roster_mut().add(&buffer);
                if result.is_ok() {
                    self.state.setup.selected = self.state.session.roster().len() - 1;
                }
                self.report(result, |_| format!("Added {}", buffer.trim()));
            }
            InputKind::RenameParticipant { index } => {
                let result = self.state.session.roster_mut().rename(index, &buffer);
                self.report(result, |_| format!("Renamed to {}", buffer.trim()));
            }
            InputKind::RenameTournament => {
                if self.state.session.rename(&buffer) {
                    let name = self.state.session.name().to_string();
                    self.state.set_status(format!("Tournament renamed to {name}"));
                } else {
                    self.state.set_status("Tournament name unchanged");
                }
            }
            InputKind::Score {
                round,
                index,
                participant,
            } => {
                let result = self
                    .state
                    .session
                    .update_score(round, index, &participant, &buffer);
                self.report(result, |app| {
                    let score = app
                        .state
                        .session
                        .bracket()
                        .and_then(|b| b.match_at(round, index))
                        .and_then(|m| m.slot_of(&participant).map(|slot| m.score(slot)))
                        .unwrap_or_default();
                    format!("{participant} scored {score}")
                });
            }
        }
    }

    // -----------------------------------------------------------------------
    // Round view
    // -----------------------------------------------------------------------

    pub fn rounds_next(&mut self) {
        if let Some(bracket) = self.state.session.bracket() {
            self.state.rounds.navigate_round_next(bracket);
        }
    }

    pub fn rounds_prev(&mut self) {
        self.state.rounds.navigate_round_prev();
    }

    pub fn match_down(&mut self) {
        if let Some(bracket) = self.state.session.bracket() {
            self.state.rounds.navigate_match_down(bracket);
        }
    }

    pub fn match_up(&mut self) {
        self.state.rounds.navigate_match_up();
    }

    pub fn toggle_slot(&mut self) {
        self.state.rounds.toggle_slot();
    }

    /// Advance the participant in `slot` of the highlighted match.
    pub fn select_slot(&mut self, slot: Slot) {
        self.state.rounds.selected_slot = slot;
        self.select_highlighted_winner();
    }

    pub fn select_highlighted_winner(&mut self) {
        let Some(bracket) = self.state.session.bracket() else {
            self.on_error("No bracket yet: generate one from Setup (g)".to_string());
            return;
        };
        let Some(participant) = self.state.rounds.selected_participant(bracket).cloned() else {
            self.on_error("That slot is empty".to_string());
            return;
        };
        let (round, index) = (self.state.rounds.view_round, self.state.rounds.selected_match);
        let result = self.state.session.select_winner(round, index, &participant);
        self.report(result, |app| match app.state.session.champion() {
            Some(champion) => format!("{champion} is the champion!"),
            None => format!("{participant} advances"),
        });
    }

    pub fn begin_score_entry(&mut self) {
        if !self.state.session.score_tracking() {
            self.on_error("Score tracking is off".to_string());
            return;
        }
        let Some(bracket) = self.state.session.bracket() else {
            return;
        };
        let (round, index) = (self.state.rounds.view_round, self.state.rounds.selected_match);
        let slot = self.state.rounds.selected_slot;
        let Some(m) = bracket.match_at(round, index) else {
            return;
        };
        let current = m.score(slot).to_string();
        let Some(participant) = m.slot(slot).cloned() else {
            self.on_error("That slot is empty".to_string());
            return;
        };
        self.state.input = Some(TextInput::new(
            InputKind::Score {
                round,
                index,
                participant,
            },
            current,
        ));
    }

    pub fn undo(&mut self) {
        if self.state.session.undo() {
            self.state.set_status("Undid last change");
        } else {
            self.on_error("Nothing to undo".to_string());
        }
    }

    /// Drop the bracket and go back to editing the roster.
    pub fn start_over(&mut self) {
        if self.state.session.bracket().is_none() {
            return;
        }
        self.state.session.reset();
        self.state.rounds = RoundViewState::default();
        self.state.tree = TreeViewState::default();
        self.update_tab(MenuItem::Setup);
        self.state.set_status("Bracket cleared");
    }

    // -----------------------------------------------------------------------
    // Tree view
    // -----------------------------------------------------------------------

    pub fn tree_scroll_down(&mut self) {
        let Some(bracket) = self.state.session.bracket() else {
            return;
        };
        let grid = TreeGrid::for_bracket(bracket, self.state.tree.first_round, 0);
        self.state.tree.scroll_down(grid.total_height.saturating_sub(1));
    }

    pub fn tree_scroll_up(&mut self) {
        self.state.tree.scroll_up();
    }

    pub fn tree_pan_right(&mut self) {
        let Some(bracket) = self.state.session.bracket() else {
            return;
        };
        self.state.tree.pan_right(bracket.round_count());
        self.state.tree.scroll_offset = 0;
    }

    pub fn tree_pan_left(&mut self) {
        self.state.tree.pan_left();
        self.state.tree.scroll_offset = 0;
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    pub fn export_bracket(&mut self) {
        let path = export_path(|key| std::env::var(key).ok());
        match self.write_export(&path) {
            Ok(()) => {
                info!("exported bracket to {}", path.display());
                self.state.set_status(format!("Saved {}", path.display()));
            }
            Err(e) => self.on_error(e),
        }
    }

    pub fn write_export(&self, path: &Path) -> Result<(), String> {
        let session = &self.state.session;
        let Some(bracket) = session.bracket() else {
            return Err("Nothing to export: generate a bracket first".to_string());
        };
        let export = BracketExport {
            name: session.name(),
            exported_at: Local::now().to_rfc3339(),
            score_tracking: session.score_tracking(),
            champion: session.champion(),
            bracket,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| format!("create dir failed: {e}"))?;
        }
        let payload = serde_json::to_string_pretty(&export)
            .map_err(|e| format!("serialize bracket failed: {e}"))?;
        std::fs::write(path, payload).map_err(|e| format!("write bracket failed: {e}"))?;
        Ok(())
    }
}

fn export_path(var: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(config_dir) = var("XDG_CONFIG_HOME")
        && !config_dir.trim().is_empty()
    {
        return PathBuf::from(config_dir).join("bracketui").join("bracket.json");
    }
    if let Some(home) = var("HOME")
        && !home.trim().is_empty()
    {
        return PathBuf::from(home)
            .join(".config")
            .join("bracketui")
            .join("bracket.json");
    }
    PathBuf::from("bracket.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::with_settings(AppSettings::default(), Roster::default())
    }

    fn scoring_app() -> App {
        let settings = AppSettings {
            score_tracking: true,
            ..AppSettings::default()
        };
        App::with_settings(settings, Roster::default())
    }

    #[test]
    fn generate_switches_to_rounds() {
        let mut app = app();
        app.generate_bracket();
        assert_eq!(app.state.active_tab, MenuItem::Rounds);
        assert_eq!(app.state.session.bracket().unwrap().round_count(), 2);
        assert!(app.state.last_error.is_none());
    }

    #[test]
    fn generate_with_one_participant_reports_error() {
        let mut app = App::with_settings(AppSettings::default(), Roster::from_lines("Solo"));
        app.generate_bracket();
        assert_eq!(app.state.active_tab, MenuItem::Setup);
        assert!(app.state.session.bracket().is_none());
        assert!(app.state.last_error.is_some());
    }

    #[test]
    fn roster_is_locked_while_bracket_exists() {
        let mut app = app();
        app.generate_bracket();
        app.begin_add_participant();
        assert!(app.state.input.is_none());
        app.remove_selected_participant();
        assert_eq!(app.state.session.roster().len(), 4);
        app.start_over();
        assert_eq!(app.state.active_tab, MenuItem::Setup);
        app.remove_selected_participant();
        assert_eq!(app.state.session.roster().len(), 3);
    }

    #[test]
    fn add_and_rename_through_text_input() {
        let mut app = app();
        app.begin_add_participant();
        for ch in "Owls".chars() {
            app.input_push(ch);
        }
        app.input_submit();
        assert_eq!(app.state.session.roster().len(), 5);
        assert_eq!(app.state.setup.selected, 4);

        app.begin_rename_participant();
        app.input_backspace();
        app.input_push('!');
        app.input_submit();
        assert_eq!(app.state.session.roster().get(4).unwrap().name(), "Owl!");
    }

    #[test]
    fn blank_add_is_rejected() {
        let mut app = app();
        app.begin_add_participant();
        app.input_push(' ');
        app.input_submit();
        assert_eq!(app.state.session.roster().len(), 4);
        assert!(app.state.last_error.is_some());
    }

    #[test]
    fn play_through_to_champion() {
        let mut app = app();
        app.generate_bracket();
        app.select_highlighted_winner();
        app.match_down();
        app.select_slot(Slot::B);
        app.rounds_next();
        app.select_highlighted_winner();
        assert!(app.state.session.champion().is_some());
        assert!(app.state.status.as_deref().unwrap().ends_with("is the champion!"));
    }

    #[test]
    fn empty_slot_cannot_win() {
        let mut app = app();
        app.generate_bracket();
        app.rounds_next();
        app.select_highlighted_winner();
        assert_eq!(app.state.last_error.as_deref(), Some("That slot is empty"));
    }

    #[test]
    fn reselecting_a_decided_match_is_reported() {
        let mut app = app();
        app.generate_bracket();
        app.select_highlighted_winner();
        app.toggle_slot();
        app.select_highlighted_winner();
        assert!(app.state.last_error.is_some());
        app.undo();
        assert!(!app.state.session.bracket().unwrap().rounds[0].matches[0].is_decided());
    }

    #[test]
    fn score_entry_requires_tracking() {
        let mut app = app();
        app.generate_bracket();
        app.begin_score_entry();
        assert!(app.state.input.is_none());
        assert!(app.state.last_error.is_some());
    }

    #[test]
    fn score_entry_updates_the_match() {
        let mut app = scoring_app();
        app.generate_bracket();
        app.begin_score_entry();
        assert_eq!(app.state.input.as_ref().unwrap().buffer, "0");
        app.input_backspace();
        for ch in "21".chars() {
            app.input_push(ch);
        }
        app.input_submit();
        let m = app.state.session.bracket().unwrap().match_at(0, 0).unwrap();
        assert_eq!(m.score_a, 21);
    }

    #[test]
    fn score_tracking_toggle_is_refused_mid_tournament() {
        let mut app = app();
        app.toggle_score_tracking();
        assert!(app.state.session.score_tracking());
        app.generate_bracket();
        app.toggle_score_tracking();
        assert!(app.state.session.score_tracking());
        assert!(app.state.last_error.is_some());
    }

    #[test]
    fn view_toggle_and_help_round_trip() {
        let mut app = app();
        app.generate_bracket();
        app.toggle_view();
        assert_eq!(app.state.active_tab, MenuItem::Tree);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Tree);
        app.toggle_view();
        assert_eq!(app.state.active_tab, MenuItem::Rounds);
    }

    #[test]
    fn export_path_prefers_xdg() {
        let path = export_path(|key| match key {
            "XDG_CONFIG_HOME" => Some("/tmp/cfg".to_string()),
            "HOME" => Some("/home/me".to_string()),
            _ => None,
        });
        assert_eq!(path, PathBuf::from("/tmp/cfg/bracketui/bracket.json"));

        let path = export_path(|key| (key == "HOME").then(|| "/home/me".to_string()));
        assert_eq!(path, PathBuf::from("/home/me/.config/bracketui/bracket.json"));

        assert_eq!(export_path(|_| None), PathBuf::from("bracket.json"));
    }

    #[test]
    fn export_writes_json() {
        let mut app = app();
        let dir = std::env::temp_dir().join(format!("bracketui-test-{}", std::process::id()));
        let path = dir.join("bracket.json");
        assert!(app.write_export(&path).is_err());

        app.generate_bracket();
        app.write_export(&path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["name"], "My Tournament");
        assert_eq!(json["bracket"]["rounds"].as_array().unwrap().len(), 2);
        assert!(json["champion"].is_null());
        let _ = std::fs::remove_dir_all(dir);
    }
}

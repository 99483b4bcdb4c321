use crate::app::{App, MenuItem};
use bracket_engine::Slot;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Apply one key press to the app. Returns `true` when the user asked to quit.
pub fn handle_key_bindings(key_event: KeyEvent, app: &mut App) -> bool {
    if key_event.kind == KeyEventKind::Release {
        return false;
    }

    if app.state.input.is_some() {
        match (key_event.code, key_event.modifiers) {
            (Char('c'), KeyModifiers::CONTROL) => return true,
            (KeyCode::Enter, _) => app.input_submit(),
            (KeyCode::Esc, _) => app.input_cancel(),
            (KeyCode::Backspace, _) => app.input_backspace(),
            (Char(ch), _) => app.input_push(ch),
            _ => {}
        }
        return false;
    }

    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => return true,

        // Tab switching
        (_, Char('1'), _) => app.update_tab(MenuItem::Setup),
        (_, Char('2'), _) => app.update_tab(MenuItem::Rounds),
        (_, Char('3'), _) => app.update_tab(MenuItem::Tree),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => app.exit_help(),

        // Setup
        (MenuItem::Setup, Char('j') | KeyCode::Down, _) => app.setup_down(),
        (MenuItem::Setup, Char('k') | KeyCode::Up, _) => app.setup_up(),
        (MenuItem::Setup, Char('a'), _) => app.begin_add_participant(),
        (MenuItem::Setup, Char('e') | KeyCode::Enter, _) => app.begin_rename_participant(),
        (MenuItem::Setup, Char('d') | KeyCode::Delete, _) => app.remove_selected_participant(),
        (MenuItem::Setup, Char('n'), _) => app.begin_rename_tournament(),
        (MenuItem::Setup, Char('s'), _) => app.toggle_score_tracking(),
        (MenuItem::Setup, Char('g'), _) => app.generate_bracket(),

        // Round view
        (MenuItem::Rounds, Char('l') | KeyCode::Right, _) => app.rounds_next(),
        (MenuItem::Rounds, Char('h') | KeyCode::Left, _) => app.rounds_prev(),
        (MenuItem::Rounds, Char('j') | KeyCode::Down, _) => app.match_down(),
        (MenuItem::Rounds, Char('k') | KeyCode::Up, _) => app.match_up(),
        (MenuItem::Rounds, KeyCode::Tab, _) => app.toggle_slot(),
        (MenuItem::Rounds, KeyCode::Enter | Char('w'), _) => app.select_highlighted_winner(),
        (MenuItem::Rounds, Char('a'), _) => app.select_slot(Slot::A),
        (MenuItem::Rounds, Char('b'), _) => app.select_slot(Slot::B),
        (MenuItem::Rounds, Char('s'), _) => app.begin_score_entry(),

        // Tree view
        (MenuItem::Tree, Char('j') | KeyCode::Down, _) => app.tree_scroll_down(),
        (MenuItem::Tree, Char('k') | KeyCode::Up, _) => app.tree_scroll_up(),
        (MenuItem::Tree, Char('l') | KeyCode::Right, _) => app.tree_pan_right(),
        (MenuItem::Tree, Char('h') | KeyCode::Left, _) => app.tree_pan_left(),

        // Both bracket views
        (MenuItem::Rounds | MenuItem::Tree, Char('v'), _) => app.toggle_view(),
        (MenuItem::Rounds | MenuItem::Tree, Char('u'), _) => app.undo(),
        (MenuItem::Rounds | MenuItem::Tree, Char('R'), _) => app.start_over(),

        // Global
        (_, Char('t'), _) => app.toggle_theme(),
        (_, Char('x'), _) => app.export_bracket(),
        (_, Char('f'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }
    false
}

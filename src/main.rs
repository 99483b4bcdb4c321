mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::components::champion::FRAME_COUNT;
use crate::state::messages::UiEvent;
use anyhow::Context;
use bracket_engine::Roster;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::info;
use std::io::Stdout;
use std::path::PathBuf;
use std::{io, panic};
use tokio::sync::mpsc;
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

enum Cli {
    Run { roster: Option<PathBuf> },
    Exit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli::Run { roster } = handle_cli_args() else {
        return Ok(());
    };
    let roster = load_roster(roster)?;

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal().context("failed to prepare terminal")?;

    tui_logger::init_logger(log::LevelFilter::Info)?;
    tui_logger::set_default_level(log::LevelFilter::Info);

    let app = App::new(roster);
    info!(
        "{} participants loaded for {:?}",
        app.state.session.roster().len(),
        app.state.session.name()
    );

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Animation tick thread, 80ms ≈ 12.5 FPS
    let anim_tx = ui_event_tx.clone();
    let animation_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(80));
        loop {
            interval.tick().await;
            if anim_tx.send(UiEvent::AnimationTick).await.is_err() {
                break;
            }
        }
    });

    main_ui_loop(terminal, app, ui_event_rx).await;

    input_handler.abort();
    animation_task.abort();
    cleanup_terminal();

    Ok(())
}

fn handle_cli_args() -> Cli {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return Cli::Run { roster: None };
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            Cli::Exit
        }
        "-V" | "--version" => {
            println!("bracketui {}", env!("CARGO_PKG_VERSION"));
            Cli::Exit
        }
        flag if flag.starts_with('-') => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
        _ => {
            if let Some(extra) = args.next() {
                eprintln!("Unexpected argument: {extra}\n\n{}", usage_text());
                std::process::exit(2);
            }
            Cli::Run {
                roster: Some(PathBuf::from(arg)),
            }
        }
    }
}

fn usage_text() -> &'static str {
    "bracketui - single-elimination tournament bracket in the terminal

Usage:
  bracketui [PARTICIPANTS_FILE]
  bracketui --help
  bracketui --version

PARTICIPANTS_FILE holds one participant name per line; blank lines are skipped.
Without it the roster starts as Team 1 to Team 4.

Environment:
  BRACKETUI_LOG       Log level for the log pane (error, warn, info, debug, trace)
  BRACKETUI_THEME     dark (default) or light
  BRACKETUI_SCORING   1/true/yes/on to start with score tracking enabled"
}

fn load_roster(path: Option<PathBuf>) -> anyhow::Result<Roster> {
    let Some(path) = path else {
        return Ok(Roster::default());
    };
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read participants from {}", path.display()))?;
    Ok(Roster::from_lines(&text))
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    mut app: App,
    mut ui_events: mpsc::Receiver<UiEvent>,
) {
    draw::draw(&mut terminal, &app);

    while let Some(ui_event) = ui_events.recv().await {
        let should_redraw = match ui_event {
            UiEvent::KeyPressed(key_event) => {
                if keys::handle_key_bindings(key_event, &mut app) {
                    break;
                }
                true
            }
            UiEvent::Resize => true,
            UiEvent::AnimationTick => {
                app.advance_animation(FRAME_COUNT);
                // Only the champion banner animates.
                app.state.session.champion().is_some()
            }
        };
        if should_redraw {
            draw::draw(&mut terminal, &app);
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        // Short polls keep the task abortable once the UI loop exits.
        if !crossterm_event::poll(Duration::from_millis(50)).unwrap_or(false) {
            tokio::task::yield_now().await;
            continue;
        }
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

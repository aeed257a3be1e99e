//! Terminal setup and the inbox event loop.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::api::Classifier;
use crate::error::{AppError, AppResult};

use super::app::InboxApp;
use super::event::{HandleResult, handle_key, handle_mouse, poll_event};
use super::ui;

/// Short enough that the exit transition animates smoothly.
const POLL_INTERVAL: Duration = Duration::from_millis(30);

type InboxTerminal = Terminal<CrosstermBackend<Stdout>>;

fn init_terminal() -> AppResult<InboxTerminal> {
    enable_raw_mode().map_err(|err| terminal_error("failed to enable raw mode", err))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|err| terminal_error("failed to enter alternate screen", err))?;
    Terminal::new(CrosstermBackend::new(stdout))
        .map_err(|err| terminal_error("failed to create terminal", err))
}

fn restore_terminal(terminal: &mut InboxTerminal) -> AppResult<()> {
    disable_raw_mode().map_err(|err| terminal_error("failed to disable raw mode", err))?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(|err| terminal_error("failed to leave alternate screen", err))?;
    terminal
        .show_cursor()
        .map_err(|err| terminal_error("failed to show cursor", err))
}

fn terminal_error(context: &str, err: io::Error) -> AppError {
    AppError::Terminal(format!("{context}: {err}"))
}

pub fn run(app: &mut InboxApp, classifier: Arc<dyn Classifier>) -> AppResult<()> {
    let mut terminal = init_terminal()?;
    let width = terminal.size().map(|size| size.width)?;
    app.resize(width);

    let result = run_loop(&mut terminal, app, classifier);

    // Restore even when the loop failed.
    restore_terminal(&mut terminal)?;
    result
}

fn run_loop(
    terminal: &mut InboxTerminal,
    app: &mut InboxApp,
    classifier: Arc<dyn Classifier>,
) -> AppResult<()> {
    loop {
        let now = Instant::now();
        terminal.draw(|frame| ui::render(frame, app, now))?;

        if let Some(event) = poll_event(POLL_INTERVAL)? {
            let now = Instant::now();
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match handle_key(app, key, now) {
                        HandleResult::Continue => {}
                        HandleResult::Quit => app.should_quit = true,
                        HandleResult::Submit => app.submit(Arc::clone(&classifier)),
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse, now),
                Event::Resize(width, _) => app.resize(width),
                _ => {}
            }
        }

        app.drain_completions();
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

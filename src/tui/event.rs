//! Maps crossterm input onto inbox actions.

use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::triage::{ActiveView, Point};

use super::app::{InboxApp, InputMode};

/// Gesture units per terminal column / row.
pub const UNITS_PER_COLUMN: f32 = 8.0;
pub const UNITS_PER_ROW: f32 = 16.0;

pub enum HandleResult {
    Continue,
    Quit,
    Submit,
}

pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

pub fn cell_point(column: u16, row: u16) -> Point {
    Point::new(
        f32::from(column) * UNITS_PER_COLUMN,
        f32::from(row) * UNITS_PER_ROW,
    )
}

pub fn handle_key(app: &mut InboxApp, key: KeyEvent, now: Instant) -> HandleResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return HandleResult::Quit;
    }

    match key.code {
        KeyCode::F(1) => {
            app.switch_view(ActiveView::SubmissionForm);
            return HandleResult::Continue;
        }
        KeyCode::F(2) => {
            app.switch_view(ActiveView::ProductiveList);
            return HandleResult::Continue;
        }
        KeyCode::F(3) => {
            app.switch_view(ActiveView::UnproductiveList);
            return HandleResult::Continue;
        }
        _ => {}
    }

    if app.input_mode == InputMode::FilePath {
        return handle_file_prompt(app, key);
    }

    match app.store.active_view() {
        ActiveView::SubmissionForm => handle_form(app, key),
        ActiveView::ProductiveList | ActiveView::UnproductiveList => handle_list(app, key, now),
    }
}

fn handle_form(app: &mut InboxApp, key: KeyEvent) -> HandleResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('s') if ctrl => HandleResult::Submit,
        KeyCode::Char('o') if ctrl => {
            app.begin_file_prompt();
            HandleResult::Continue
        }
        KeyCode::Char('x') if ctrl => {
            app.detach_file();
            HandleResult::Continue
        }
        KeyCode::Char(c) if !ctrl => {
            app.type_char(c);
            HandleResult::Continue
        }
        KeyCode::Enter => {
            app.type_char('\n');
            HandleResult::Continue
        }
        KeyCode::Tab => {
            app.type_char('\t');
            HandleResult::Continue
        }
        KeyCode::Backspace => {
            app.backspace();
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}

fn handle_file_prompt(app: &mut InboxApp, key: KeyEvent) -> HandleResult {
    match key.code {
        KeyCode::Esc => app.cancel_file_prompt(),
        KeyCode::Enter => app.confirm_file_prompt(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(c) => app.type_char(c),
        _ => {}
    }
    HandleResult::Continue
}

fn handle_list(app: &mut InboxApp, key: KeyEvent, now: Instant) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => HandleResult::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_cursor(1);
            HandleResult::Continue
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_cursor(-1);
            HandleResult::Continue
        }
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => {
            app.open_highlighted();
            HandleResult::Continue
        }
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => {
            app.back(now);
            HandleResult::Continue
        }
        KeyCode::Char('c') => {
            app.copy_selected();
            HandleResult::Continue
        }
        KeyCode::Char('s') => {
            app.send_selected();
            HandleResult::Continue
        }
        KeyCode::Char('d') => {
            app.delete_selected();
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}

/// Left-button drags on the detail pane act as touch contacts.
pub fn handle_mouse(app: &mut InboxApp, mouse: MouseEvent, now: Instant) {
    let point = cell_point(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.pointer_down(point, now),
        MouseEventKind::Drag(MouseButton::Left) => app.pointer_drag(point, now),
        MouseEventKind::Up(MouseButton::Left) => app.pointer_up(now),
        _ => {}
    }
}

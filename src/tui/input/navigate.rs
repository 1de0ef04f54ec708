use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::board_ops;
use crate::tui::app::{App, Mode, PromptKind, PromptState, View};

use super::*;

/// Keys in the card list
pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if key.code == KeyCode::Char('z') {
            app.suspend_requested = true;
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('z') => app.maximized = !app.maximized,

        // Views
        KeyCode::Tab | KeyCode::BackTab => switch_view(app, app.view.other()),
        KeyCode::Char('1') | KeyCode::Left | KeyCode::Char('h') => switch_view(app, View::Tasks),
        KeyCode::Char('2') | KeyCode::Right | KeyCode::Char('l') => {
            switch_view(app, View::Completed)
        }

        // Cursor
        KeyCode::Down | KeyCode::Char('j') => move_cursor(app, 1),
        KeyCode::Up | KeyCode::Char('k') => move_cursor(app, -1),
        KeyCode::Home | KeyCode::Char('g') => set_cursor(app, 0),
        KeyCode::End | KeyCode::Char('G') => set_cursor(app, usize::MAX),

        // Cards
        KeyCode::Char('a') => begin_add(app),
        KeyCode::Char('e') | KeyCode::Enter => begin_edit(app),
        KeyCode::Char('x') | KeyCode::Char('-') => complete_selected(app),
        KeyCode::Char('r') | KeyCode::Char('+') => restore_selected(app),
        KeyCode::Char('d') | KeyCode::Delete => delete_selected(app),
        KeyCode::Char('m') => enter_move_mode(app),
        _ => {}
    }
}

pub(super) fn switch_view(app: &mut App, view: View) {
    app.view = view;
    app.clamp_cursors();
}

pub(super) fn move_cursor(app: &mut App, delta: isize) {
    let len = app.card_count();
    if len == 0 {
        return;
    }
    let state = app.view_state_mut(app.view);
    state.cursor = state.cursor.saturating_add_signed(delta).min(len - 1);
}

fn set_cursor(app: &mut App, index: usize) {
    let last = app.card_count().saturating_sub(1);
    app.view_state_mut(app.view).cursor = index.min(last);
}

pub(super) fn begin_add(app: &mut App) {
    app.prompt = Some(PromptState::new(PromptKind::Add, ""));
    app.mode = Mode::Prompt;
}

fn begin_edit(app: &mut App) {
    let Some(id) = app.cursor_card() else {
        return;
    };
    let text = app.board.get(id).map(|c| c.text.clone()).unwrap_or_default();
    app.prompt = Some(PromptState::new(PromptKind::Edit(id), &text));
    app.mode = Mode::Prompt;
}

/// Move the cursor task to the completed list and show it there
fn complete_selected(app: &mut App) {
    if app.view != View::Tasks {
        return;
    }
    let Some(id) = app.cursor_card() else {
        return;
    };
    if board_ops::complete_card(&mut app.board, id).is_err() {
        return;
    }
    app.save();
    app.view = View::Completed;
    app.select_card(View::Completed, id);
    app.clamp_cursors();
}

/// Send the cursor item back to the end of the active list
fn restore_selected(app: &mut App) {
    if app.view != View::Completed {
        return;
    }
    let Some(id) = app.cursor_card() else {
        return;
    };
    if board_ops::restore_card(&mut app.board, id).is_err() {
        return;
    }
    app.save();
    app.select_card(View::Tasks, id);
    app.clamp_cursors();
}

fn delete_selected(app: &mut App) {
    let Some(id) = app.cursor_card() else {
        return;
    };
    if board_ops::delete_card(&mut app.board, id).is_some() {
        app.save();
    }
    app.clamp_cursors();
}

use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::board_ops;
use crate::tui::app::{App, Mode, MoveState, View};

/// Enter MOVE mode for the task under the cursor (Tasks view only).
pub(super) fn enter_move_mode(app: &mut App) {
    if app.view != View::Tasks {
        return;
    }
    let Some(card) = app.cursor_card() else {
        return;
    };
    app.move_state = Some(MoveState {
        card,
        original_index: app.cursor(),
    });
    app.mode = Mode::Move;
}

/// Keys in MOVE mode. The card is reordered on every key; Enter keeps the
/// new position, Esc puts it back.
pub(super) fn handle_move(app: &mut App, key: KeyEvent) {
    let Some(state) = app.move_state else {
        app.mode = Mode::Navigate;
        return;
    };

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            move_to(app, state, app.cursor().saturating_add(1))
        }
        KeyCode::Up | KeyCode::Char('k') => move_to(app, state, app.cursor().saturating_sub(1)),
        KeyCode::Home | KeyCode::Char('g') => move_to(app, state, 0),
        KeyCode::End | KeyCode::Char('G') => move_to(app, state, usize::MAX),
        KeyCode::Enter | KeyCode::Char('m') => {
            finish_move(app);
            app.save();
        }
        KeyCode::Esc => {
            move_to(app, state, state.original_index);
            finish_move(app);
        }
        _ => {}
    }
}

fn move_to(app: &mut App, state: MoveState, target: usize) {
    if let Ok(index) = board_ops::move_card(&mut app.board, state.card, target) {
        app.tasks_state.cursor = index;
    }
}

fn finish_move(app: &mut App) {
    app.move_state = None;
    app.mode = Mode::Navigate;
}

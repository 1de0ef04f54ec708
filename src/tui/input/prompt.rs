use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::board_ops;
use crate::tui::app::{App, Mode, PromptKind, PromptState, View};
use crate::util::unicode::{
    next_grapheme_boundary, prev_grapheme_boundary, word_boundary_left, word_boundary_right,
};

/// Keys while the text prompt is open
pub(super) fn handle_prompt(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => confirm_prompt(app),
        KeyCode::Esc => close_prompt(app),
        _ => {
            if let Some(prompt) = &mut app.prompt {
                edit_buffer(prompt, key);
            }
        }
    }
}

fn close_prompt(app: &mut App) {
    app.prompt = None;
    app.mode = Mode::Navigate;
}

/// Apply the prompt. Blank text is dropped without touching the board.
fn confirm_prompt(app: &mut App) {
    let Some(prompt) = app.prompt.take() else {
        app.mode = Mode::Navigate;
        return;
    };
    app.mode = Mode::Navigate;

    match prompt.kind {
        PromptKind::Add => {
            if let Ok(id) = board_ops::add_card(&mut app.board, &prompt.buffer) {
                app.save();
                app.view = View::Tasks;
                app.select_card(View::Tasks, id);
            }
        }
        PromptKind::Edit(id) => {
            // The card may have vanished in a reload while typing
            if let Ok(true) = board_ops::edit_card(&mut app.board, id, &prompt.buffer) {
                app.save();
            }
        }
    }
}

/// Single-line editing keys
fn edit_buffer(prompt: &mut PromptState, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let buf = &mut prompt.buffer;
    let cursor = &mut prompt.cursor;

    match key.code {
        KeyCode::Char('a') if ctrl => *cursor = 0,
        KeyCode::Char('e') if ctrl => *cursor = buf.len(),
        KeyCode::Char('u') if ctrl => {
            buf.replace_range(..*cursor, "");
            *cursor = 0;
        }
        KeyCode::Char('w') if ctrl => {
            let start = word_boundary_left(buf, *cursor);
            buf.replace_range(start..*cursor, "");
            *cursor = start;
        }
        KeyCode::Char(_) if ctrl => {}
        KeyCode::Char(c) => {
            buf.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
        KeyCode::Backspace if alt => {
            let start = word_boundary_left(buf, *cursor);
            buf.replace_range(start..*cursor, "");
            *cursor = start;
        }
        KeyCode::Backspace => {
            if let Some(prev) = prev_grapheme_boundary(buf, *cursor) {
                buf.replace_range(prev..*cursor, "");
                *cursor = prev;
            }
        }
        KeyCode::Delete => {
            if let Some(next) = next_grapheme_boundary(buf, *cursor) {
                buf.replace_range(*cursor..next, "");
            }
        }
        KeyCode::Left if ctrl || alt => *cursor = word_boundary_left(buf, *cursor),
        KeyCode::Right if ctrl || alt => *cursor = word_boundary_right(buf, *cursor),
        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(buf, *cursor) {
                *cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(buf, *cursor) {
                *cursor = next;
            }
        }
        KeyCode::Home => *cursor = 0,
        KeyCode::End => *cursor = buf.len(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::super::handle_key;
    use super::super::test_support::*;
    use super::*;
    use crate::model::ListKind;
    use tempfile::TempDir;

    fn buffer(app: &App) -> (&str, usize) {
        let p = app.prompt.as_ref().unwrap();
        (p.buffer.as_str(), p.cursor)
    }

    #[test]
    fn add_appends_and_saves() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["a", "b"], &[]);
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_text(&mut app, "  Buy milk ");
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.prompt.is_none());
        assert_eq!(app.board.texts(ListKind::Active), vec!["a", "b", "Buy milk"]);
        assert_eq!(app.cursor(), 2);
        assert_eq!(
            saved(&tmp).unwrap().texts(ListKind::Active),
            vec!["a", "b", "Buy milk"]
        );
    }

    #[test]
    fn add_from_completed_view_shows_tasks() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &[], &["z"]);
        app.view = View::Completed;
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_text(&mut app, "new");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.view, View::Tasks);
        assert_eq!(app.board.texts(ListKind::Active), vec!["new"]);
    }

    #[test]
    fn blank_add_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["a"], &[]);
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_text(&mut app, "   ");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.board.active().len(), 1);
        assert!(saved(&tmp).is_none());
    }

    #[test]
    fn esc_cancels() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["a"], &[]);
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_text(&mut app, "xyz");
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.board.active().len(), 1);
    }

    #[test]
    fn edit_replaces_text() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["Buy milk"], &[]);
        handle_key(&mut app, key(KeyCode::Char('e')));
        handle_key(&mut app, ctrl('w'));
        type_text(&mut app, "bread");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.board.texts(ListKind::Active), vec!["Buy bread"]);
        assert_eq!(
            saved(&tmp).unwrap().texts(ListKind::Active),
            vec!["Buy bread"]
        );
    }

    #[test]
    fn blank_edit_keeps_text() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["Buy milk"], &[]);
        handle_key(&mut app, key(KeyCode::Char('e')));
        handle_key(&mut app, ctrl('u'));
        type_text(&mut app, "  ");
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.board.texts(ListKind::Active), vec!["Buy milk"]);
        assert!(saved(&tmp).is_none());
    }

    #[test]
    fn edit_of_vanished_card_is_ignored() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["Buy milk"], &[]);
        handle_key(&mut app, key(KeyCode::Char('e')));
        app.board = crate::model::Board::new();
        type_text(&mut app, "!");
        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.board.is_empty());
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn cursor_movement_and_deletion() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &[], &[]);
        handle_key(&mut app, key(KeyCode::Char('a')));
        type_text(&mut app, "café au lait");

        press_all(&mut app, &[KeyCode::Home]);
        assert_eq!(buffer(&app).1, 0);
        press_all(&mut app, &[KeyCode::Delete]);
        assert_eq!(buffer(&app), ("afé au lait", 0));

        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Right, KeyModifiers::CONTROL),
        );
        assert_eq!(buffer(&app).1, "afé ".len());
        press_all(&mut app, &[KeyCode::Left, KeyCode::Backspace]);
        assert_eq!(buffer(&app), ("af au lait", 2));

        press_all(&mut app, &[KeyCode::End]);
        handle_key(&mut app, KeyEvent::new(KeyCode::Backspace, KeyModifiers::ALT));
        assert_eq!(buffer(&app).0, "af au ");
        handle_key(&mut app, ctrl('a'));
        assert_eq!(buffer(&app).1, 0);
        handle_key(&mut app, ctrl('e'));
        assert_eq!(buffer(&app).1, "af au ".len());
    }
}

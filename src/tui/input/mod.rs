mod mouse;
mod move_mode;
mod navigate;
mod prompt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::app::{App, Mode};

// Submodules reach each other's handlers through `use super::*;`
#[allow(unused_imports)]
use move_mode::*;
#[allow(unused_imports)]
use navigate::*;
#[allow(unused_imports)]
use prompt::*;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    app.status_message = None;

    // Ctrl-C quits from anywhere; the final save happens on the way out
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay swallows input until dismissed
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Prompt => handle_prompt(app, key),
        Mode::Move => handle_move(app, key),
        // Keys are ignored while the mouse button is held
        Mode::Drag => {}
    }
}

/// Handle a mouse event (only delivered when mouse capture is on)
pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    mouse::handle_mouse(app, event);
}

/// Handle a bracketed paste. Only the text prompt accepts pasted text;
/// line breaks become spaces.
pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode != Mode::Prompt || text.is_empty() {
        return;
    }
    let clean = text.replace(['\r', '\n'], " ");
    if let Some(prompt) = &mut app.prompt {
        prompt.buffer.insert_str(prompt.cursor, &clean);
        prompt.cursor += clean.len();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::TempDir;

    use crate::io::board_io::{BOARD_FILE_NAME, BoardPaths, read_board};
    use crate::model::{Board, BoardConfig};
    use crate::tui::app::App;

    pub fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    pub fn press_all(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            super::handle_key(app, key(*code));
        }
    }

    pub fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            super::handle_key(app, key(KeyCode::Char(c)));
        }
    }

    /// An app whose board file lives in `tmp`
    pub fn app_in(tmp: &TempDir, tasks: &[&str], completed: &[&str]) -> App {
        let board = Board::from_texts(
            tasks.iter().map(|s| s.to_string()),
            completed.iter().map(|s| s.to_string()),
        );
        App::new(
            board,
            BoardPaths::new(tmp.path().join(BOARD_FILE_NAME)),
            BoardConfig::default(),
        )
    }

    /// The board as last written to disk
    pub fn saved(tmp: &TempDir) -> Option<Board> {
        read_board(&tmp.path().join(BOARD_FILE_NAME)).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::tui::app::{PromptKind, PromptState};
    use tempfile::TempDir;

    #[test]
    fn ctrl_c_quits_from_prompt() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["a"], &[]);
        handle_key(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.mode, Mode::Prompt);
        handle_key(&mut app, ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn help_swallows_keys() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["a"], &[]);
        handle_key(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, key(KeyCode::Char('d')));
        assert_eq!(app.board.active().len(), 1);
        handle_key(&mut app, key(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn any_key_clears_status_message() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["a"], &[]);
        app.status_message = Some("reloaded from disk".into());
        handle_key(&mut app, key(KeyCode::Char('j')));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn paste_flattens_newlines() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &[], &[]);
        app.mode = Mode::Prompt;
        app.prompt = Some(PromptState::new(PromptKind::Add, "Buy "));
        handle_paste(&mut app, "milk\nand eggs");
        let prompt = app.prompt.as_ref().unwrap();
        assert_eq!(prompt.buffer, "Buy milk and eggs");
        assert_eq!(prompt.cursor, prompt.buffer.len());
    }

    #[test]
    fn paste_ignored_outside_prompt() {
        let tmp = TempDir::new().unwrap();
        let mut app = app_in(&tmp, &["a"], &[]);
        handle_paste(&mut app, "x");
        assert!(app.prompt.is_none());
    }
}

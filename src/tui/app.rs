use std::fs;
use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use crate::io::board_io::{self, BoardPaths};
use crate::io::config_io;
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::io::watcher::BoardWatcher;
use crate::model::{Board, BoardConfig, CardId, ListKind};
use crate::ops::reorder::{CardSpan, DragState};

use super::input;
use super::render;
use super::theme::Theme;

/// Which list is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Active cards ("Tasks" tab)
    Tasks,
    /// Completed cards ("Completed Items" tab)
    Completed,
}

impl View {
    pub fn list(self) -> ListKind {
        match self {
            View::Tasks => ListKind::Active,
            View::Completed => ListKind::Completed,
        }
    }

    pub fn other(self) -> View {
        match self {
            View::Tasks => View::Completed,
            View::Completed => View::Tasks,
        }
    }
}

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing card text in the status row
    Prompt,
    /// Keyboard reordering of the cursor card
    Move,
    /// Mouse drag in progress
    Drag,
}

/// What the text prompt will do on Enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Add,
    Edit(CardId),
}

/// Single-line text prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptState {
    pub kind: PromptKind,
    pub buffer: String,
    /// Byte offset of the cursor in `buffer`, always on a grapheme boundary
    pub cursor: usize,
}

impl PromptState {
    pub fn new(kind: PromptKind, initial: &str) -> Self {
        PromptState {
            kind,
            buffer: initial.to_string(),
            cursor: initial.len(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            PromptKind::Add => "New task",
            PromptKind::Edit(_) => "Edit task",
        }
    }
}

/// Keyboard move in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveState {
    pub card: CardId,
    pub original_index: usize,
}

/// Per-view cursor and scroll
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Index of the selected card
    pub cursor: usize,
    /// Index of the first card drawn at the top of the list area
    pub first_visible: usize,
}

/// Clickable regions recorded during render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Tab(View),
    Add,
    Minimize,
    Maximize,
    Close,
}

/// Main application state
pub struct App {
    pub board: Board,
    pub paths: BoardPaths,
    pub config: BoardConfig,
    pub theme: Theme,
    pub view: View,
    pub mode: Mode,
    pub should_quit: bool,
    /// Set by the minimize action; the event loop suspends the process
    pub suspend_requested: bool,
    /// Chrome (tab bar, status row) hidden
    pub maximized: bool,
    pub show_help: bool,
    pub tasks_state: ViewState,
    pub completed_state: ViewState,
    pub prompt: Option<PromptState>,
    pub move_state: Option<MoveState>,
    pub drag: Option<DragState>,
    /// Card list area from the last render
    pub list_area: Option<Rect>,
    /// Clickable regions from the last render
    pub hit_areas: Vec<(Rect, HitTarget)>,
    /// Board file text as this process last read or wrote it
    pub disk_text: Option<String>,
    /// Transient message for the status row
    pub status_message: Option<String>,
}

impl App {
    pub fn new(board: Board, paths: BoardPaths, config: BoardConfig) -> Self {
        let theme = Theme::from_config(&config.ui);
        App {
            board,
            paths,
            config,
            theme,
            view: View::Tasks,
            mode: Mode::Navigate,
            should_quit: false,
            suspend_requested: false,
            maximized: false,
            show_help: false,
            tasks_state: ViewState::default(),
            completed_state: ViewState::default(),
            prompt: None,
            move_state: None,
            drag: None,
            list_area: None,
            hit_areas: Vec::new(),
            disk_text: None,
            status_message: None,
        }
    }

    pub fn view_state(&self, view: View) -> &ViewState {
        match view {
            View::Tasks => &self.tasks_state,
            View::Completed => &self.completed_state,
        }
    }

    pub fn view_state_mut(&mut self, view: View) -> &mut ViewState {
        match view {
            View::Tasks => &mut self.tasks_state,
            View::Completed => &mut self.completed_state,
        }
    }

    /// Number of cards in the current view
    pub fn card_count(&self) -> usize {
        self.board.list(self.view.list()).len()
    }

    pub fn cursor(&self) -> usize {
        self.view_state(self.view).cursor
    }

    /// Id of the card under the cursor in the current view
    pub fn cursor_card(&self) -> Option<CardId> {
        self.board
            .list(self.view.list())
            .get(self.cursor())
            .map(|c| c.id())
    }

    /// Point the cursor of `view` at the card with `id`, if it is in that list
    pub fn select_card(&mut self, view: View, id: CardId) {
        if let Some(index) = self.board.list(view.list()).iter().position(|c| c.id() == id) {
            self.view_state_mut(view).cursor = index;
        }
    }

    /// Keep both cursors inside their lists
    pub fn clamp_cursors(&mut self) {
        for view in [View::Tasks, View::Completed] {
            let len = self.board.list(view.list()).len();
            let state = self.view_state_mut(view);
            state.cursor = state.cursor.min(len.saturating_sub(1));
            state.first_visible = state.first_visible.min(state.cursor);
        }
    }

    /// Card spans of the current view for a list area of `width` columns
    pub fn card_spans(&self, width: u16) -> Vec<CardSpan> {
        render::board_view::card_spans(self.board.list(self.view.list()), width, self.maximized)
    }

    /// Persist the whole board. Failures are logged and otherwise ignored.
    /// Content another process wrote since our last sync is copied to the
    /// recovery log before it is overwritten.
    pub fn save(&mut self) {
        if let Some(known) = &self.disk_text
            && let Ok(current) = fs::read_to_string(&self.paths.board)
            && &current != known
        {
            recovery::log_recovery(
                &self.paths.dir,
                RecoveryEntry::now(RecoveryCategory::Write, "external change overwritten")
                    .field("File", self.paths.board.display())
                    .body(current),
            );
        }
        if let Some(text) = board_io::save_or_log(&self.paths, &self.board) {
            self.disk_text = Some(text);
        }
    }

    /// Pick up changes written by another process. Safe in every mode:
    /// cards that survive keep their ids. Missing or unreadable files, and
    /// text this process wrote itself, leave the board alone.
    pub fn reload_from_disk(&mut self) {
        let Ok(text) = fs::read_to_string(&self.paths.board) else {
            return;
        };
        if self.disk_text.as_deref() == Some(text.as_str()) {
            return;
        }
        let Ok(disk) = board_io::parse_board(&text) else {
            return;
        };
        self.disk_text = Some(text);
        if disk.same_content(&self.board) {
            return;
        }
        self.board.adopt(disk);
        self.resync_interaction();
        self.clamp_cursors();
        self.status_message = Some("reloaded from disk".into());
    }

    /// After the lists change under a move or drag, follow the card to its
    /// new slot, or drop back to Navigate if it left the active list.
    fn resync_interaction(&mut self) {
        let held = self
            .move_state
            .map(|m| m.card)
            .or(self.drag.map(|d| d.card));
        let Some(card) = held else {
            return;
        };
        match self.board.locate(card) {
            Some((ListKind::Active, index)) => {
                self.tasks_state.cursor = index;
                let last = self.board.active().len().saturating_sub(1);
                if let Some(m) = &mut self.move_state {
                    m.original_index = m.original_index.min(last);
                }
                if let Some(d) = &mut self.drag {
                    d.index = index;
                }
            }
            _ => {
                self.move_state = None;
                self.drag = None;
                self.mode = Mode::Navigate;
            }
        }
    }
}

/// Run the TUI application
pub fn run(paths: BoardPaths) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config_or_default(&paths);
    let board = board_io::load_or_seed(&paths);
    let mut app = App::new(board, paths, config);
    app.disk_text = fs::read_to_string(&app.paths.board).ok();

    // Watcher is optional: without it the TUI just won't see CLI edits
    let watcher = BoardWatcher::start(&app.paths.board, &app.paths.dir).ok();

    // Setup terminal
    let mouse = app.config.ui.mouse;
    enter_terminal(mouse)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = leave_terminal(mouse);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app, watcher.as_ref());

    // Final save before exit, whatever ended the loop
    app.save();

    leave_terminal(mouse)?;
    terminal.show_cursor()?;

    result
}

fn enter_terminal(mouse: bool) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    Ok(())
}

fn leave_terminal(mouse: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    if mouse {
        execute!(stdout, DisableMouseCapture)?;
    }
    execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen)?;
    disable_raw_mode()
}

/// Hand the terminal back to the shell and stop until resumed (`fg`).
#[cfg(unix)]
fn suspend(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mouse: bool,
) -> io::Result<()> {
    leave_terminal(mouse)?;
    terminal.show_cursor()?;
    // SAFETY: raising a job-control signal on our own process
    unsafe {
        libc::raise(libc::SIGTSTP);
    }
    enter_terminal(mouse)?;
    terminal.clear()
}

#[cfg(not(unix))]
fn suspend(
    _terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    _mouse: bool,
) -> io::Result<()> {
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&BoardWatcher>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            let event = event::read()?;
            // Catch external writes the watcher has not reported yet
            app.reload_from_disk();
            match event {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if let Some(w) = watcher
            && !w.poll().is_empty()
        {
            app.reload_from_disk();
        }

        if app.suspend_requested {
            app.suspend_requested = false;
            suspend(terminal, app.config.ui.mouse)?;
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

use std::ffi::OsString;
use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Events sent from the file watcher to the TUI event loop.
#[derive(Debug, PartialEq, Eq)]
pub enum FileEvent {
    /// The board file was created, modified, or replaced on disk.
    BoardChanged,
}

/// Watches the directory holding the board file.
pub struct BoardWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<FileEvent>,
}

impl BoardWatcher {
    /// Start watching `board_file`. Its parent directory is watched so that
    /// atomic replace-by-rename is seen.
    /// Returns a `BoardWatcher` whose `poll()` method should be called each tick.
    pub fn start(board_file: &Path, board_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let board_name: Option<OsString> = board_file.file_name().map(|n| n.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(_) => return,
                };
                if is_board_event(&event, board_name.as_deref()) {
                    let _ = tx.send(FileEvent::BoardChanged);
                }
            },
            Config::default(),
        )?;

        watcher.watch(board_dir, RecursiveMode::NonRecursive)?;
        Ok(BoardWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll for pending file events.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<FileEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

/// Creates and modifications that touch the board file by name. Paths are
/// compared by file name because the watcher may report canonicalized
/// directories.
fn is_board_event(event: &Event, board_name: Option<&std::ffi::OsStr>) -> bool {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return false;
    }
    let Some(board_name) = board_name else {
        return false;
    };
    event
        .paths
        .iter()
        .any(|p| p.file_name() == Some(board_name))
}

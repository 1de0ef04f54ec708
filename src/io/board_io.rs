use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::lock::{FileLock, LockError};
use crate::io::recovery::{self, RecoveryCategory, RecoveryEntry};
use crate::model::board::Board;
use crate::model::card::ListKind;

/// Default board file name, created next to the executable
pub const BOARD_FILE_NAME: &str = "tasks.json";

/// Config file name, looked up next to the board file
pub const CONFIG_FILE_NAME: &str = "taskboard.toml";

/// Error type for board file I/O
#[derive(Debug, thiserror::Error)]
pub enum BoardIoError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize board: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error(transparent)]
    LockError(#[from] LockError),
    #[error("could not locate the program directory: {0}")]
    NoProgramDir(std::io::Error),
}

/// On-disk shape of the board: two flat lists of card text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardFile {
    #[serde(default)]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub completed: Vec<String>,
}

impl From<&Board> for BoardFile {
    fn from(board: &Board) -> Self {
        BoardFile {
            tasks: board.texts(ListKind::Active),
            completed: board.texts(ListKind::Completed),
        }
    }
}

impl From<BoardFile> for Board {
    fn from(file: BoardFile) -> Self {
        Board::from_texts(file.tasks, file.completed)
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// Where a board and its companion files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardPaths {
    /// The board JSON file
    pub board: PathBuf,
    /// Directory holding the board, config and recovery log
    pub dir: PathBuf,
}

impl BoardPaths {
    pub fn new(board: impl Into<PathBuf>) -> Self {
        let board = board.into();
        let dir = match board.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        BoardPaths { board, dir }
    }

    /// Use `explicit` when given, otherwise `tasks.json` alongside the
    /// running executable.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, BoardIoError> {
        if let Some(path) = explicit {
            return Ok(BoardPaths::new(path));
        }
        let exe = std::env::current_exe().map_err(BoardIoError::NoProgramDir)?;
        let dir = exe.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));
        Ok(BoardPaths::new(dir.join(BOARD_FILE_NAME)))
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Pretty JSON with two-space indentation and a trailing newline
pub fn serialize_board(board: &Board) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(&BoardFile::from(board))?;
    text.push('\n');
    Ok(text)
}

/// Parse board JSON. Only an object root is a board; serde would
/// otherwise accept `[tasks, completed]` arrays for `BoardFile`.
pub fn parse_board(text: &str) -> Result<Board, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(serde::de::Error::custom("board file must be a JSON object"));
    }
    let file: BoardFile = serde_json::from_value(value)?;
    Ok(file.into())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read the board file with full error detail. `Ok(None)` means no file.
pub fn read_board(path: &Path) -> Result<Option<Board>, BoardIoError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path).map_err(|e| BoardIoError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let board = parse_board(&text).map_err(|e| BoardIoError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(board))
}

/// Load prior state. `None` means "no prior state", whether the file is
/// missing or unreadable. An unreadable file is copied aside first so the
/// defaults written next do not destroy it.
pub fn load_board(paths: &BoardPaths) -> Option<Board> {
    match read_board(&paths.board) {
        Ok(board) => board,
        Err(err) => {
            preserve_unreadable(paths, &err);
            None
        }
    }
}

/// Load the board, seeding and saving the default tasks when there is no
/// usable prior state. Save failures are logged, not returned.
pub fn load_or_seed(paths: &BoardPaths) -> Board {
    if let Some(board) = load_board(paths) {
        return board;
    }
    let board = Board::with_defaults();
    save_or_log(paths, &board);
    board
}

/// Copy an unreadable board file to `<file>.corrupt-<timestamp>` and record
/// it in the recovery log.
fn preserve_unreadable(paths: &BoardPaths, err: &BoardIoError) {
    let backup = backup_path(&paths.board);
    let mut entry = RecoveryEntry::now(RecoveryCategory::Parser, "unreadable board file")
        .field("File", paths.board.display())
        .body(err.to_string());
    entry = match fs::copy(&paths.board, &backup) {
        Ok(_) => entry.field("Backup", backup.display()),
        Err(e) => entry.field("Backup", format!("failed: {}", e)),
    };
    recovery::log_recovery(&paths.dir, entry);
}

pub(crate) fn backup_path(board_file: &Path) -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%dT%H%M%SZ");
    let mut name = board_file
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".corrupt-{}", stamp));
    let candidate = board_file.with_file_name(&name);
    if !candidate.exists() {
        return candidate;
    }
    // Same second: add a counter
    (1..)
        .map(|n| {
            let mut numbered = name.clone();
            numbered.push(format!("-{}", n));
            board_file.with_file_name(numbered)
        })
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Atomically write the board. Returns the text that was written.
pub fn write_board(path: &Path, board: &Board) -> Result<String, BoardIoError> {
    let text = serialize_board(board)?;
    recovery::atomic_write(path, text.as_bytes()).map_err(|e| BoardIoError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(text)
}

/// Take the board lock and write.
pub fn save_board(paths: &BoardPaths, board: &Board) -> Result<String, BoardIoError> {
    let _lock = FileLock::acquire_default(&paths.board)?;
    write_board(&paths.board, board)
}

/// Save, swallowing any failure into the recovery log. Returns the written
/// text on success.
pub fn save_or_log(paths: &BoardPaths, board: &Board) -> Option<String> {
    match save_board(paths, board) {
        Ok(text) => Some(text),
        Err(err) => {
            let body = serialize_board(board).unwrap_or_default();
            recovery::log_recovery(
                &paths.dir,
                RecoveryEntry::now(RecoveryCategory::Write, "board not saved")
                    .field("File", paths.board.display())
                    .field("Error", &err)
                    .body(body),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::DEFAULT_TASKS;
    use crate::ops::board_ops;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn paths_in(tmp: &TempDir) -> BoardPaths {
        BoardPaths::new(tmp.path().join(BOARD_FILE_NAME))
    }

    fn corrupt_backups(tmp: &TempDir) -> Vec<PathBuf> {
        fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.contains(".corrupt-"))
            })
            .collect()
    }

    #[test]
    fn serialized_shape() {
        let board = Board::from_texts(vec!["a".into(), "b".into()], vec!["c".into()]);
        let text = serialize_board(&board).unwrap();
        assert_eq!(
            text,
            "{\n  \"tasks\": [\n    \"a\",\n    \"b\"\n  ],\n  \"completed\": [\n    \"c\"\n  ]\n}\n"
        );
    }

    #[test]
    fn parse_missing_keys_default_to_empty() {
        let board = parse_board("{}").unwrap();
        assert!(board.is_empty());
        let board = parse_board(r#"{"completed": ["x"]}"#).unwrap();
        assert!(board.active().is_empty());
        assert_eq!(board.texts(ListKind::Completed), vec!["x"]);
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        assert!(parse_board("[]").is_err());
        assert!(parse_board(r#"[["x"], ["y"]]"#).is_err());
        assert!(parse_board("\"tasks\"").is_err());
        assert!(parse_board("null").is_err());
        assert!(parse_board(r#"{"tasks": 5}"#).is_err());
        assert!(parse_board(r#"{"tasks": [1, 2]}"#).is_err());
    }

    #[test]
    fn save_then_load_round_trips_text_and_order() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(&tmp);
        let board = Board::from_texts(
            vec!["one".into(), "two".into(), "three".into()],
            vec!["done 1".into(), "done 2".into()],
        );
        save_board(&paths, &board).unwrap();

        let loaded = load_board(&paths).unwrap();
        assert_eq!(loaded.texts(ListKind::Active), board.texts(ListKind::Active));
        assert_eq!(
            loaded.texts(ListKind::Completed),
            board.texts(ListKind::Completed)
        );
    }

    #[test]
    fn reload_gives_fresh_identity() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(&tmp);
        let mut board = Board::new();
        for text in ["a", "b"] {
            board_ops::add_card(&mut board, text).unwrap();
        }
        // Spend ids so the reloaded board cannot line up by accident
        let gone = board_ops::add_card(&mut board, "gone").unwrap();
        board_ops::delete_card(&mut board, gone);
        save_board(&paths, &board).unwrap();

        let loaded = load_board(&paths).unwrap();
        assert!(loaded.same_content(&board));
        assert!(loaded.get(gone).is_none());
    }

    #[test]
    fn load_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(load_board(&paths_in(&tmp)).is_none());
        assert!(corrupt_backups(&tmp).is_empty());
    }

    #[test]
    fn load_or_seed_missing_file_writes_defaults() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(&tmp);
        let board = load_or_seed(&paths);
        assert_eq!(board.texts(ListKind::Active), DEFAULT_TASKS.to_vec());
        assert!(board.completed().is_empty());

        let on_disk = read_board(&paths.board).unwrap().unwrap();
        assert!(on_disk.same_content(&board));
    }

    #[test]
    fn load_or_seed_corrupt_file_backs_up_and_seeds() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(&tmp);
        fs::write(&paths.board, "not json {{{").unwrap();

        let board = load_or_seed(&paths);
        assert_eq!(board.texts(ListKind::Active), DEFAULT_TASKS.to_vec());
        assert!(board.completed().is_empty());

        let backups = corrupt_backups(&tmp);
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0]).unwrap(), "not json {{{");

        let entries = recovery::read_recovery_entries(&paths.dir, None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Parser);
    }

    #[test]
    fn load_or_seed_array_root_backs_up_and_seeds() {
        let tmp = TempDir::new().unwrap();
        let paths = paths_in(&tmp);
        fs::write(&paths.board, r#"[["x"], ["y"]]"#).unwrap();

        let board = load_or_seed(&paths);
        assert_eq!(board.texts(ListKind::Active), DEFAULT_TASKS.to_vec());
        assert!(board.completed().is_empty());
        assert_eq!(corrupt_backups(&tmp).len(), 1);
    }

    #[test]
    fn backup_path_does_not_clobber() {
        let tmp = TempDir::new().unwrap();
        let board = tmp.path().join(BOARD_FILE_NAME);
        let first = backup_path(&board);
        fs::write(&first, "x").unwrap();
        let second = backup_path(&board);
        assert_ne!(first, second);
    }

    #[test]
    fn save_failure_is_logged_not_raised() {
        let tmp = TempDir::new().unwrap();
        // A directory where the board file should be makes the rename fail
        let paths = paths_in(&tmp);
        fs::create_dir(&paths.board).unwrap();
        fs::write(paths.board.join("keep"), "x").unwrap();

        let board = Board::with_defaults();
        assert!(save_or_log(&paths, &board).is_none());

        let entries = recovery::read_recovery_entries(&paths.dir, None);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, RecoveryCategory::Write);
        assert!(entries[0].body.contains("Patch proxies to 12.2.18"));
    }

    #[test]
    fn paths_new_uses_parent_dir() {
        let paths = BoardPaths::new("/tmp/x/tasks.json");
        assert_eq!(paths.dir, PathBuf::from("/tmp/x"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/x/taskboard.toml"));
        assert_eq!(BoardPaths::new("tasks.json").dir, PathBuf::from("."));
    }

    #[test]
    fn resolve_prefers_explicit_path() {
        let paths = BoardPaths::resolve(Some(Path::new("/tmp/elsewhere/b.json"))).unwrap();
        assert_eq!(paths.board, PathBuf::from("/tmp/elsewhere/b.json"));
        let fallback = BoardPaths::resolve(None).unwrap();
        assert!(fallback.board.ends_with(BOARD_FILE_NAME));
    }
}

use std::error::Error;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::board_io::{self, BoardPaths};
use crate::io::lock::FileLock;
use crate::io::recovery;
use crate::model::{Board, ListKind};
use crate::ops::board_ops;

type CmdResult = Result<(), Box<dyn Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let paths = BoardPaths::resolve(cli.file.as_deref())?;

    match cli.command {
        // main.rs launches the TUI when there is no subcommand
        None => Ok(()),
        Some(cmd) => match cmd {
            // Read commands
            Commands::List(args) => cmd_list(&paths, args, json),
            Commands::Log(args) => cmd_log(&paths, args, json),

            // Write commands
            Commands::Add(args) => cmd_add(&paths, args, json),
            Commands::Done(args) => cmd_done(&paths, args, json),
            Commands::Restore(args) => cmd_restore(&paths, args, json),
            Commands::Edit(args) => cmd_edit(&paths, args, json),
            Commands::Rm(args) => cmd_rm(&paths, args, json),
            Commands::Mv(args) => cmd_mv(&paths, args, json),
        },
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run `f` against the board under the lock, then write the result.
/// First run (or an unreadable file) starts from the default tasks.
/// Unlike the TUI, write failures are reported.
fn with_board<T>(
    paths: &BoardPaths,
    f: impl FnOnce(&mut Board) -> Result<T, Box<dyn Error>>,
) -> Result<T, Box<dyn Error>> {
    let _lock = FileLock::acquire_default(&paths.board)?;
    let mut board = board_io::load_board(paths).unwrap_or_else(Board::with_defaults);
    let out = f(&mut board)?;
    board_io::write_board(&paths.board, &board)?;
    Ok(out)
}

/// Print one card as JSON or as `<verb> <n>. <text>`
fn print_card(board: &Board, list: ListKind, index: usize, verb: &str, json: bool) -> CmdResult {
    let Some(card) = board.list(list).get(index) else {
        return Ok(());
    };
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&card_to_json(card, list, index))?
        );
    } else {
        println!("{} {}. {}", verb, index + 1, card.text);
    }
    Ok(())
}

/// Position of the card in its list after an operation
fn index_of(board: &Board, id: crate::model::CardId) -> usize {
    board.locate(id).map_or(0, |(_, i)| i)
}

fn list_for(completed: bool) -> ListKind {
    if completed {
        ListKind::Completed
    } else {
        ListKind::Active
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(paths: &BoardPaths, args: ListArgs, json: bool) -> CmdResult {
    let board = board_io::load_or_seed(paths);

    if json {
        let out = BoardListJson {
            tasks: (!args.completed).then(|| list_to_json(&board, ListKind::Active)),
            completed: (args.completed || args.all)
                .then(|| list_to_json(&board, ListKind::Completed)),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if args.all {
        println!("{}", format_board(&board));
    } else {
        println!("{}", format_list(&board, list_for(args.completed)));
    }
    Ok(())
}

fn cmd_log(paths: &BoardPaths, args: LogArgs, json: bool) -> CmdResult {
    if args.clear {
        let removed = recovery::clear_recovery(&paths.dir)?;
        if json {
            println!("{}", serde_json::json!({ "cleared": removed }));
        } else {
            println!("cleared {} entries", removed);
        }
        return Ok(());
    }

    let entries = recovery::read_recovery_entries(&paths.dir, args.limit);
    if json {
        let values: Vec<serde_json::Value> = entries.iter().map(|e| e.to_json()).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else if entries.is_empty() {
        println!("recovery log is empty");
    } else {
        for entry in &entries {
            print!("{}", entry.to_markdown());
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add(paths: &BoardPaths, args: AddArgs, json: bool) -> CmdResult {
    let text = args.text.join(" ");
    with_board(paths, |board| {
        let id = board_ops::add_card(board, &text)?;
        print_card(board, ListKind::Active, index_of(board, id), "added", json)
    })
}

fn cmd_done(paths: &BoardPaths, args: PositionArgs, json: bool) -> CmdResult {
    with_board(paths, |board| {
        let id = board_ops::card_at(board, ListKind::Active, args.position)?;
        board_ops::complete_card(board, id)?;
        print_card(board, ListKind::Completed, index_of(board, id), "completed", json)
    })
}

fn cmd_restore(paths: &BoardPaths, args: PositionArgs, json: bool) -> CmdResult {
    with_board(paths, |board| {
        let id = board_ops::card_at(board, ListKind::Completed, args.position)?;
        board_ops::restore_card(board, id)?;
        print_card(board, ListKind::Active, index_of(board, id), "restored", json)
    })
}

fn cmd_edit(paths: &BoardPaths, args: EditArgs, json: bool) -> CmdResult {
    let list = list_for(args.completed);
    let text = args.text.join(" ");
    with_board(paths, |board| {
        let id = board_ops::card_at(board, list, args.position)?;
        if !board_ops::edit_card(board, id, &text)? && text.trim().is_empty() {
            return Err(board_ops::BoardError::EmptyText.into());
        }
        print_card(board, list, index_of(board, id), "edited", json)
    })
}

fn cmd_rm(paths: &BoardPaths, args: RmArgs, json: bool) -> CmdResult {
    let list = list_for(args.completed);
    with_board(paths, |board| {
        let id = board_ops::card_at(board, list, args.position)?;
        let index = index_of(board, id);
        if let Some((list, card)) = board_ops::delete_card(board, id) {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&card_to_json(&card, list, index))?
                );
            } else {
                println!("deleted {}. {}", index + 1, card.text);
            }
        }
        Ok(())
    })
}

fn cmd_mv(paths: &BoardPaths, args: MvArgs, json: bool) -> CmdResult {
    with_board(paths, |board| {
        let id = board_ops::card_at(board, ListKind::Active, args.from)?;
        // Past the end clamps to last; zero names no position at all
        let Some(to) = args.to.checked_sub(1) else {
            return Err(board_ops::BoardError::OutOfRange {
                list: ListKind::Active,
                position: args.to,
                len: board.active().len(),
            }
            .into());
        };
        let index = board_ops::move_card(board, id, to)?;
        print_card(board, ListKind::Active, index, "moved", json)
    })
}

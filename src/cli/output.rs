use serde::Serialize;

use crate::model::{Board, Card, ListKind};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct CardJson {
    pub list: ListKind,
    /// 1-based position in its list
    pub position: usize,
    pub text: String,
}

#[derive(Serialize)]
pub struct BoardListJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<CardJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<Vec<CardJson>>,
}

pub fn card_to_json(card: &Card, list: ListKind, index: usize) -> CardJson {
    CardJson {
        list,
        position: index + 1,
        text: card.text.clone(),
    }
}

pub fn list_to_json(board: &Board, list: ListKind) -> Vec<CardJson> {
    board
        .list(list)
        .iter()
        .enumerate()
        .map(|(i, card)| card_to_json(card, list, i))
        .collect()
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Numbered lines, one per card. Wrapped continuation is left to the terminal.
pub fn format_list(board: &Board, list: ListKind) -> String {
    let cards = board.list(list);
    if cards.is_empty() {
        return "  (empty)".to_string();
    }
    let width = cards.len().to_string().len();
    let marker = match list {
        ListKind::Active => ' ',
        ListKind::Completed => '\u{2713}',
    };
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| format!("{} {:>width$}. {}", marker, i + 1, card.text, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Both lists under their tab names
pub fn format_board(board: &Board) -> String {
    format!(
        "{} ({})\n{}\n\n{} ({})\n{}",
        ListKind::Active.label(),
        board.active().len(),
        format_list(board, ListKind::Active),
        ListKind::Completed.label(),
        board.completed().len(),
        format_list(board, ListKind::Completed),
    )
}

use crate::model::board::Board;
use crate::model::card::{Card, CardId, ListKind, clean_text};

/// Error type for board operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("task text cannot be empty")]
    EmptyText,
    #[error("card {id} is not in the {list} list")]
    NotInList { id: CardId, list: ListKind },
    #[error("card {0} not found")]
    NotFound(CardId),
    #[error("no {list} task at position {position} ({len} in list)")]
    OutOfRange {
        list: ListKind,
        position: usize,
        len: usize,
    },
}

// ---------------------------------------------------------------------------
// Create / edit / delete
// ---------------------------------------------------------------------------

/// Append a new card to the end of the active list.
pub fn add_card(board: &mut Board, text: &str) -> Result<CardId, BoardError> {
    let text = clean_text(text).ok_or(BoardError::EmptyText)?;
    let card = board.alloc_card(text);
    let id = card.id();
    board.active.push(card);
    Ok(id)
}

/// Replace a card's text in place. Blank text leaves the card untouched and
/// returns `Ok(false)`.
pub fn edit_card(board: &mut Board, id: CardId, text: &str) -> Result<bool, BoardError> {
    let (kind, index) = board.locate(id).ok_or(BoardError::NotFound(id))?;
    let Some(text) = clean_text(text) else {
        return Ok(false);
    };
    let card = &mut board.list_mut(kind)[index];
    if card.text == text {
        return Ok(false);
    }
    card.text = text;
    Ok(true)
}

/// Remove a card from whichever list holds it. Returns `None` when the card
/// is already gone.
pub fn delete_card(board: &mut Board, id: CardId) -> Option<(ListKind, Card)> {
    let (kind, index) = board.locate(id)?;
    let card = board.list_mut(kind).remove(index);
    Some((kind, card))
}

// ---------------------------------------------------------------------------
// Active <-> completed transitions
// ---------------------------------------------------------------------------

/// Move an active card to the end of the completed list.
pub fn complete_card(board: &mut Board, id: CardId) -> Result<(), BoardError> {
    transfer(board, id, ListKind::Active, ListKind::Completed)
}

/// Move a completed card back to the end of the active list.
pub fn restore_card(board: &mut Board, id: CardId) -> Result<(), BoardError> {
    transfer(board, id, ListKind::Completed, ListKind::Active)
}

fn transfer(board: &mut Board, id: CardId, from: ListKind, to: ListKind) -> Result<(), BoardError> {
    let index = match board.locate(id) {
        Some((kind, index)) if kind == from => index,
        Some(_) => return Err(BoardError::NotInList { id, list: from }),
        None => return Err(BoardError::NotFound(id)),
    };
    // Validated above, so remove + push never leaves the card in zero or two lists.
    let card = board.list_mut(from).remove(index);
    board.list_mut(to).push(card);
    Ok(())
}

// ---------------------------------------------------------------------------
// Ordering
// ---------------------------------------------------------------------------

/// Move an active card to `to` (clamped to the last slot).
/// Returns the index the card ended up at.
pub fn move_card(board: &mut Board, id: CardId, to: usize) -> Result<usize, BoardError> {
    let from = match board.locate(id) {
        Some((ListKind::Active, index)) => index,
        Some(_) => {
            return Err(BoardError::NotInList {
                id,
                list: ListKind::Active,
            });
        }
        None => return Err(BoardError::NotFound(id)),
    };
    let to = to.min(board.active.len() - 1);
    if from != to {
        let card = board.active.remove(from);
        board.active.insert(to, card);
    }
    Ok(to)
}

/// Resolve a 1-based position in a list to a card id.
pub fn card_at(board: &Board, list: ListKind, position: usize) -> Result<CardId, BoardError> {
    let cards = board.list(list);
    position
        .checked_sub(1)
        .and_then(|i| cards.get(i))
        .map(|c| c.id())
        .ok_or(BoardError::OutOfRange {
            list,
            position,
            len: cards.len(),
        })
}

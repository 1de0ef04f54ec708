//! Pointer-driven reordering of the active list.
//!
//! Positions are measured in content rows (row 0 is the top of the first
//! card, regardless of scrolling). Midpoints are kept doubled so a card of
//! odd height still compares exactly against a pointer.

use crate::model::board::Board;
use crate::model::card::CardId;

use super::board_ops::move_card;

/// Vertical extent of one displayed card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpan {
    /// First content row of the card
    pub top: usize,
    /// Height in rows (border included)
    pub height: usize,
}

impl CardSpan {
    /// Twice the vertical midpoint
    pub fn midpoint2(&self) -> usize {
        2 * self.top + self.height
    }

    pub fn contains(&self, row: usize) -> bool {
        row >= self.top && row < self.top + self.height
    }
}

/// Target index for a pointer at `pointer_row`: the first card whose midpoint
/// lies below the pointer, or the last card when none does.
/// Returns `None` only for an empty list.
pub fn drop_index(spans: &[CardSpan], pointer_row: usize) -> Option<usize> {
    // The pointer sits in the middle of its row
    let pointer2 = 2 * pointer_row + 1;
    spans
        .iter()
        .position(|span| pointer2 < span.midpoint2())
        .or_else(|| spans.len().checked_sub(1))
}

/// An in-progress drag of an active card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub card: CardId,
    /// Index the card occupies right now
    pub index: usize,
}

impl DragState {
    /// Start dragging the active card at `index`
    pub fn begin(board: &Board, index: usize) -> Option<Self> {
        let card = board.active().get(index)?;
        Some(DragState {
            card: card.id(),
            index,
        })
    }
}

/// Apply one pointer movement. The board is reordered immediately so the
/// on-screen order always matches the list order. Returns true if the
/// card moved.
pub fn drag_to(board: &mut Board, drag: &mut DragState, spans: &[CardSpan], pointer_row: usize) -> bool {
    let Some(target) = drop_index(spans, pointer_row) else {
        return false;
    };
    if target == drag.index {
        return false;
    }
    match move_card(board, drag.card, target) {
        Ok(landed) if landed != drag.index => {
            drag.index = landed;
            true
        }
        _ => false,
    }
}

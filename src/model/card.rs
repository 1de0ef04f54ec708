use std::fmt;

use serde::{Deserialize, Serialize};

/// In-memory card identifier. Assigned by the board, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub(crate) u64);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which of the two board lists a card lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    Active,
    Completed,
}

impl ListKind {
    /// Label used in tabs and messages
    pub fn label(self) -> &'static str {
        match self {
            ListKind::Active => "Tasks",
            ListKind::Completed => "Completed Items",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListKind::Active => write!(f, "active"),
            ListKind::Completed => write!(f, "completed"),
        }
    }
}

/// A single task card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    /// Card text, trimmed and non-empty
    pub text: String,
}

impl Card {
    /// Only the board hands out ids, so construction stays crate-private.
    pub(crate) fn new(id: CardId, text: String) -> Self {
        Card { id, text }
    }

    pub fn id(&self) -> CardId {
        self.id
    }
}

/// Normalize user-entered card text. Returns `None` for empty or
/// whitespace-only input.
pub fn clean_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

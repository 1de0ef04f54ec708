use super::card::{Card, CardId, ListKind, clean_text};

/// Tasks seeded on first run (no board file, or an unreadable one)
pub const DEFAULT_TASKS: [&str; 4] = [
    "Patch proxies to 12.2.18",
    "Prepare AI Steering Committee slides",
    "Finish CrowdStrike DFD",
    "Schedule PCI policy review",
];

/// The whole board: an ordered active list and an append-ordered completed list.
///
/// A card id appears in at most one list. Mutations live in
/// `ops::board_ops`; this type only owns the storage and lookups.
#[derive(Debug, Clone, Default)]
pub struct Board {
    pub(crate) active: Vec<Card>,
    pub(crate) completed: Vec<Card>,
    next_id: u64,
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    /// Build a board from persisted text lists. Blank entries are skipped;
    /// every card gets a fresh id.
    pub fn from_texts<I, J>(tasks: I, completed: J) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        let mut board = Board::new();
        for text in tasks {
            if let Some(text) = clean_text(&text) {
                let card = board.alloc_card(text);
                board.active.push(card);
            }
        }
        for text in completed {
            if let Some(text) = clean_text(&text) {
                let card = board.alloc_card(text);
                board.completed.push(card);
            }
        }
        board
    }

    /// A board holding only the fixed first-run tasks
    pub fn with_defaults() -> Self {
        Board::from_texts(DEFAULT_TASKS.iter().map(|s| s.to_string()), Vec::new())
    }

    /// Take over the contents of `incoming` (typically re-read from disk).
    /// A card whose text is still on the board keeps its id, so ids held by
    /// an open prompt or drag stay valid; other cards get fresh ids.
    pub fn adopt(&mut self, incoming: Board) {
        let mut pool: Vec<Card> = std::mem::take(&mut self.active);
        pool.append(&mut self.completed);

        let mut active = Vec::with_capacity(incoming.active.len());
        for card in incoming.active {
            active.push(self.keep_or_alloc(&mut pool, card.text));
        }
        let mut completed = Vec::with_capacity(incoming.completed.len());
        for card in incoming.completed {
            completed.push(self.keep_or_alloc(&mut pool, card.text));
        }
        self.active = active;
        self.completed = completed;
    }

    fn keep_or_alloc(&mut self, pool: &mut Vec<Card>, text: String) -> Card {
        match pool.iter().position(|c| c.text == text) {
            Some(i) => pool.remove(i),
            None => self.alloc_card(text),
        }
    }

    /// Mint a card with the next id. The caller decides which list it joins.
    pub(crate) fn alloc_card(&mut self, text: String) -> Card {
        self.next_id += 1;
        Card::new(CardId(self.next_id), text)
    }

    pub fn active(&self) -> &[Card] {
        &self.active
    }

    pub fn completed(&self) -> &[Card] {
        &self.completed
    }

    pub fn list(&self, kind: ListKind) -> &[Card] {
        match kind {
            ListKind::Active => &self.active,
            ListKind::Completed => &self.completed,
        }
    }

    pub(crate) fn list_mut(&mut self, kind: ListKind) -> &mut Vec<Card> {
        match kind {
            ListKind::Active => &mut self.active,
            ListKind::Completed => &mut self.completed,
        }
    }

    /// Find which list holds `id` and at what index
    pub fn locate(&self, id: CardId) -> Option<(ListKind, usize)> {
        if let Some(i) = self.active.iter().position(|c| c.id() == id) {
            return Some((ListKind::Active, i));
        }
        self.completed
            .iter()
            .position(|c| c.id() == id)
            .map(|i| (ListKind::Completed, i))
    }

    pub fn get(&self, id: CardId) -> Option<&Card> {
        let (kind, index) = self.locate(id)?;
        self.list(kind).get(index)
    }

    /// Card texts of one list, in order
    pub fn texts(&self, kind: ListKind) -> Vec<String> {
        self.list(kind).iter().map(|c| c.text.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.completed.is_empty()
    }

    /// Same texts in the same order in both lists. Ids are ignored.
    pub fn same_content(&self, other: &Board) -> bool {
        self.texts(ListKind::Active) == other.texts(ListKind::Active)
            && self.texts(ListKind::Completed) == other.texts(ListKind::Completed)
    }
}

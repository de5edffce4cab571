use serde::{Deserialize, Serialize};

/// Value stored in a mine cell; 0..=8 are neighbour counts.
pub const MINE: u8 = 9;

/// One board square: an immutable value plus the player-visible flags.
///
/// `revealed` and `marked` are never both set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    value: u8,
    revealed: bool,
    marked: bool,
}

impl Cell {
    pub const fn mine() -> Self {
        Self::with_value(MINE)
    }

    pub const fn with_value(value: u8) -> Self {
        Self {
            value,
            revealed: false,
            marked: false,
        }
    }

    /// Neighbour count, or [`MINE`].
    pub const fn value(self) -> u8 {
        self.value
    }

    pub const fn is_mine(self) -> bool {
        self.value == MINE
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_marked(self) -> bool {
        self.marked
    }

    pub const fn is_hidden(self) -> bool {
        !self.revealed
    }

    pub(crate) fn set_revealed(&mut self) {
        self.revealed = true;
        self.marked = false;
    }

    pub(crate) fn toggle_marked(&mut self) {
        debug_assert!(!self.revealed);
        self.marked = !self.marked;
    }

    pub(crate) fn bump_count(&mut self) {
        if !self.is_mine() {
            self.value += 1;
        }
    }
}

use core::num::Saturating;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Valid transitions:
/// - Playing -> Lost
/// - Playing -> Won, only with [`WinRule::AllSafeRevealed`]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// No moves are accepted until the game is reset.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// When, if ever, a game is considered won.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinRule {
    /// The game only ends by hitting a mine.
    #[default]
    Disabled,
    /// The game is won once every safe cell has been revealed.
    AllSafeRevealed,
}

/// One game from generation to its end: the board plus its status.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    status: GameStatus,
    win_rule: WinRule,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        Self::with_win_rule(board, WinRule::default())
    }

    pub fn with_win_rule(board: Board, win_rule: WinRule) -> Self {
        let revealed = board
            .iter()
            .filter(|(_, cell)| cell.is_revealed() && !cell.is_mine())
            .count();
        let flagged = board.iter().filter(|(_, cell)| cell.is_marked()).count();
        Self {
            board,
            status: GameStatus::Playing,
            win_rule,
            revealed_count: Saturating(revealed as CellCount),
            flagged_count: Saturating(flagged as CellCount),
        }
    }

    pub fn generate(seed: u64, config: GameConfig) -> Self {
        Self::new(Board::generate(seed, config))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn win_rule(&self) -> WinRule {
        self.win_rule
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        self.board.get(coords)
    }

    /// How many mines have not been flagged yet, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.board.mine_count()) - i32::from(self.flagged_count.0)
    }

    /// Flips the mark on a hidden cell. Anything else is ignored.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.is_finished() {
            return MarkOutcome::NoChange;
        }
        let Some(cell) = self.board.get(coords) else {
            return MarkOutcome::NoChange;
        };
        if cell.is_revealed() {
            return MarkOutcome::NoChange;
        }

        self.board.cell_mut(coords).toggle_marked();
        if cell.is_marked() {
            self.flagged_count -= 1;
        } else {
            self.flagged_count += 1;
        }
        log::debug!("Toggled flag at {:?}, mines left: {}", coords, self.mines_left());
        MarkOutcome::Changed
    }

    /// Reveals a hidden, unmarked cell. Out-of-bounds, revealed and marked
    /// cells are ignored, as is everything once the game has finished.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.is_finished() {
            return RevealOutcome::NoChange;
        }
        let Some(cell) = self.board.get(coords) else {
            return RevealOutcome::NoChange;
        };
        if cell.is_revealed() || cell.is_marked() {
            return RevealOutcome::NoChange;
        }

        if cell.is_mine() {
            self.board.cell_mut(coords).set_revealed();
            self.detonate();
            log::debug!("Hit mine at {:?}", coords);
            return RevealOutcome::HitMine;
        }

        self.flood_reveal(coords);

        if self.win_rule == WinRule::AllSafeRevealed
            && self.revealed_count.0 == self.board.safe_cell_count()
        {
            self.status = GameStatus::Won;
            log::debug!("All safe cells revealed");
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Reveals `start` and, through zero cells, the connected region around it.
    fn flood_reveal(&mut self, start: Coord2) {
        let mut pending: SmallVec<[Coord2; 64]> = SmallVec::new();
        pending.push(start);

        while let Some(coords) = pending.pop() {
            let cell = self.board[coords];
            if cell.is_revealed() || cell.is_marked() {
                continue;
            }

            self.board.cell_mut(coords).set_revealed();
            self.revealed_count += 1;
            log::trace!("Revealed {:?}, value {}", coords, cell.value());

            if cell.value() == 0 {
                pending.extend(self.board.iter_neighbors(coords).filter(|&pos| {
                    let neighbor = self.board[pos];
                    neighbor.is_hidden() && !neighbor.is_marked()
                }));
            }
        }
    }

    /// Ends the game and shows every mine. Other cells keep their state.
    fn detonate(&mut self) {
        self.status = GameStatus::Lost;
        let mut flags_cleared: CellCount = 0;
        for cell in self.board.cells_mut().filter(|cell| cell.is_mine()) {
            if cell.is_marked() {
                flags_cleared += 1;
            }
            cell.set_revealed();
        }
        self.flagged_count -= flags_cleared;
    }
}

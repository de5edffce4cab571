use super::*;

/// Places mines by picking uniformly random cells and retrying on repeats.
///
/// The layout depends only on the seed and the configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RejectionSampler {
    seed: u64,
}

impl RejectionSampler {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RejectionSampler {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;

        let (rows, cols) = config.size();
        let mut mines: Array2<bool> = Array2::default(nd(config.size()));
        let mut mines_placed: CellCount = 0;
        let mut rejected: u32 = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while mines_placed < config.mines() {
            let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..cols));
            let tile = &mut mines[nd(coords)];
            if *tile {
                rejected += 1;
                continue;
            }
            *tile = true;
            mines_placed += 1;
        }
        log::trace!(
            "Placed {} mines with seed {}, {} rejected picks",
            mines_placed,
            self.seed,
            rejected
        );

        let board = Board::from_mine_mask(&mines);

        // double check mine count
        if board.mine_count() != config.mines() {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                board.mine_count(),
                config.mines()
            );
        }
        board
    }
}

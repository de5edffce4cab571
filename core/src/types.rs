/// Row or column index. Boards are at most 255 tiles on a side.
pub type Coord = u8;

/// Enough for every cell of the largest board.
pub type CellCount = u16;

/// `(row, col)`, row-major like the board storage.
pub type Coord2 = (Coord, Coord);

/// Storage index of a cell.
pub(crate) const fn nd((row, col): Coord2) -> [usize; 2] {
    [row as usize, col as usize]
}

/// Cells on a `rows`×`cols` board.
pub const fn area((rows, cols): Coord2) -> CellCount {
    (rows as CellCount).saturating_mul(cols as CellCount)
}

/// Board shape from a storage `dim()`; axes beyond [`Coord::MAX`] are cut.
pub(crate) fn shape((rows, cols): (usize, usize)) -> Coord2 {
    let axis = |len: usize| Coord::try_from(len).unwrap_or(Coord::MAX);
    (axis(rows), axis(cols))
}

// row-major, so neighbours come out in reading order
const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn step((row, col): Coord2, (d_row, d_col): (i8, i8), (rows, cols): Coord2) -> Option<Coord2> {
    let row = row.checked_add_signed(d_row).filter(|&row| row < rows)?;
    let col = col.checked_add_signed(d_col).filter(|&col| col < cols)?;
    Some((row, col))
}

/// The up-to-8 cells touching `center` that lie on a `bounds` board.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    deltas: core::slice::Iter<'static, (i8, i8)>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            deltas: DISPLACEMENTS.iter(),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        let (center, bounds) = (self.center, self.bounds);
        self.deltas.find_map(|&delta| step(center, delta, bounds))
    }
}

//! 5×7 bitmap glyphs drawn on tiles.

/// One byte per column, bit `n` lights glyph row `6 - n`.
pub type Bitmap = [u8; 5];

const DIGITS: [Bitmap; 9] = [
    [0x00, 0x00, 0x00, 0x00, 0x00],
    [0x00, 0x42, 0x7F, 0x40, 0x00],
    [0x42, 0x61, 0x51, 0x49, 0x46],
    [0x21, 0x41, 0x45, 0x4B, 0x31],
    [0x18, 0x14, 0x12, 0x7F, 0x10],
    [0x27, 0x45, 0x45, 0x45, 0x39],
    [0x3C, 0x4A, 0x49, 0x49, 0x30],
    [0x01, 0x71, 0x09, 0x05, 0x03],
    [0x36, 0x49, 0x49, 0x49, 0x36],
];

const MINE: Bitmap = [0x44, 0x28, 0x10, 0x28, 0x44];

const FLAG: Bitmap = [0x7F, 0x05, 0x09, 0x1F, 0x08];

pub const COLUMNS: i32 = 5;
pub const ROWS: i32 = 7;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Glyph {
    /// Neighbour count 1..=8; 0 draws nothing.
    Digit(u8),
    Mine,
    Flag,
}

impl Glyph {
    pub fn bitmap(self) -> &'static Bitmap {
        match self {
            Self::Digit(n) => &DIGITS[usize::from(n.min(8))],
            Self::Mine => &MINE,
            Self::Flag => &FLAG,
        }
    }

    /// Lit glyph cells as `(column, row)`, row 0 at the top.
    pub fn lit_cells(self) -> impl Iterator<Item = (i32, i32)> {
        let bitmap = *self.bitmap();
        (0..COLUMNS).flat_map(move |col| {
            let line = bitmap[col as usize];
            (0..ROWS)
                .filter(move |row| (line >> row) & 1 == 1)
                .map(move |row| (col, ROWS - 1 - row))
        })
    }
}

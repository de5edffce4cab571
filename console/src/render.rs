//! Immediate-mode drawing of the board into a [`Display`].

use sweeper_core::{Board, Cell, Coord, Coord2, GameConfig};

use crate::display::Display;
use crate::glyph::{self, Glyph};
use crate::palette::{ColorIndex, NUMBER_COLORS, color};

/// Side of a square tile, in pixels.
pub const TILE_SIZE: i32 = 16;

const BEVEL_WIDTH: i32 = 2;

/// Glyph origin inside a tile.
const GLYPH_OFFSET: (i32, i32) = (4, 2);

const GLYPH_SCALE: i32 = 2;

/// Where the grid sits on the surface. The origin may be negative when the
/// grid is larger than the surface; off-surface tiles are clipped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Geometry {
    origin: (i32, i32),
    grid: Coord2,
}

impl Geometry {
    /// The intermediate grid on the 320×200 surface.
    pub const VGA: Self = Self::centered(320, 200, GameConfig::INTERMEDIATE.size());

    /// Centres a `grid` of tiles on a `width`×`height` surface.
    pub const fn centered(width: u16, height: u16, grid: Coord2) -> Self {
        let grid_w = grid.1 as i32 * TILE_SIZE;
        let grid_h = grid.0 as i32 * TILE_SIZE;
        Self {
            origin: ((width as i32 - grid_w) / 2, (height as i32 - grid_h) / 2),
            grid,
        }
    }

    pub const fn origin(&self) -> (i32, i32) {
        self.origin
    }

    /// Top-left pixel of the tile at `(row, col)`.
    pub const fn tile_origin(&self, (row, col): Coord2) -> (i32, i32) {
        (
            self.origin.0 + col as i32 * TILE_SIZE,
            self.origin.1 + row as i32 * TILE_SIZE,
        )
    }

    /// Grid cell under the pixel `(x, y)`, if any.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Coord2> {
        let col = (x - self.origin.0).div_euclid(TILE_SIZE);
        let row = (y - self.origin.1).div_euclid(TILE_SIZE);
        let in_grid = (0..i32::from(self.grid.0)).contains(&row)
            && (0..i32::from(self.grid.1)).contains(&col);
        in_grid.then_some((row as Coord, col as Coord))
    }
}

/// Fills a tile with the face colour and a 2-pixel bevel. Raised tiles are lit
/// from the top-left, pressed tiles from the bottom-right.
pub fn draw_tile<D: Display + ?Sized>(display: &mut D, x: i32, y: i32, pressed: bool) {
    let (top_left, bottom_right) = if pressed {
        (color::BEVEL_DARK, color::BEVEL_LIGHT)
    } else {
        (color::BEVEL_LIGHT, color::BEVEL_DARK)
    };

    display.fill_rect(x, y, TILE_SIZE, TILE_SIZE, color::TILE_FACE);

    for i in 0..BEVEL_WIDTH {
        let span = TILE_SIZE - 2 * i;
        display.fill_rect(x + i, y + i, span, 1, top_left);
        display.fill_rect(x + i, y + i, 1, span, top_left);
        display.fill_rect(x + i, y + TILE_SIZE - 1 - i, span, 1, bottom_right);
        display.fill_rect(x + TILE_SIZE - 1 - i, y + i, 1, span, bottom_right);
    }
}

/// Draws a 5×7 glyph at twice its size, positioned inside the tile at `(x, y)`.
pub fn draw_glyph<D: Display + ?Sized>(display: &mut D, x: i32, y: i32, glyph: Glyph, color: ColorIndex) {
    let start_x = x + GLYPH_OFFSET.0;
    let start_y = y + GLYPH_OFFSET.1;
    for (col, row) in glyph.lit_cells() {
        let px = start_x + col * GLYPH_SCALE;
        let py = start_y + row * GLYPH_SCALE;
        display.fill_rect(px, py, GLYPH_SCALE, GLYPH_SCALE, color);
    }
}

/// Paints board cells at a fixed [`Geometry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Renderer {
    geometry: Geometry,
}

impl Renderer {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn render_tile<D: Display + ?Sized>(&self, display: &mut D, board: &Board, coords: Coord2) {
        let Some(cell) = board.get(coords) else {
            return;
        };
        let (x, y) = self.geometry.tile_origin(coords);
        draw_cell(display, x, y, cell);
    }

    /// Redraws every tile.
    pub fn render_board<D: Display + ?Sized>(&self, display: &mut D, board: &Board) {
        for (coords, cell) in board.iter() {
            let (x, y) = self.geometry.tile_origin(coords);
            draw_cell(display, x, y, cell);
        }
    }

    /// Clears to the background and redraws every tile.
    pub fn render_screen<D: Display + ?Sized>(&self, display: &mut D, board: &Board) {
        display.clear(color::BACKGROUND);
        self.render_board(display, board);
    }
}

fn draw_cell<D: Display + ?Sized>(display: &mut D, x: i32, y: i32, cell: Cell) {
    if cell.is_hidden() {
        draw_tile(display, x, y, false);
        if cell.is_marked() {
            draw_glyph(display, x, y, Glyph::Flag, color::RED);
        }
        return;
    }

    draw_tile(display, x, y, true);
    if cell.is_mine() {
        let side = TILE_SIZE - 2 * BEVEL_WIDTH;
        display.fill_rect(x + BEVEL_WIDTH, y + BEVEL_WIDTH, side, side, color::RED);
        draw_glyph(display, x, y, Glyph::Mine, color::BLACK);
    } else if let count @ 1..=8 = cell.value() {
        draw_glyph(display, x, y, Glyph::Digit(count), NUMBER_COLORS[usize::from(count)]);
    }
}

const _: () = assert!(GLYPH_OFFSET.0 + glyph::COLUMNS * GLYPH_SCALE <= TILE_SIZE);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Framebuffer;

    fn tile_pixels(fb: &Framebuffer, x: i32, y: i32) -> [[u8; 16]; 16] {
        core::array::from_fn(|dy| {
            core::array::from_fn(|dx| fb.pixel(x + dx as i32, y + dy as i32).unwrap())
        })
    }

    #[test]
    fn raised_tile_bevel() {
        let mut fb = Framebuffer::new(16, 16);
        draw_tile(&mut fb, 0, 0, false);
        let px = tile_pixels(&fb, 0, 0);

        assert_eq!(px[0][0], color::WHITE);
        assert_eq!(px[1][1], color::WHITE);
        assert_eq!(px[0][14], color::WHITE);
        assert_eq!(px[14][0], color::WHITE);
        assert_eq!(px[15][15], color::GRAY_DARK);
        assert_eq!(px[14][14], color::GRAY_DARK);
        assert_eq!(px[15][1], color::GRAY_DARK);
        assert_eq!(px[1][15], color::GRAY_DARK);
        assert_eq!(px[2][2], color::GRAY_LIGHT);
        assert_eq!(px[13][13], color::GRAY_LIGHT);
    }

    #[test]
    fn pressed_tile_swaps_bevel() {
        let mut fb = Framebuffer::new(16, 16);
        draw_tile(&mut fb, 0, 0, true);
        let px = tile_pixels(&fb, 0, 0);

        assert_eq!(px[0][0], color::GRAY_DARK);
        assert_eq!(px[1][5], color::GRAY_DARK);
        assert_eq!(px[15][15], color::WHITE);
        assert_eq!(px[5][14], color::WHITE);
        assert_eq!(px[8][8], color::GRAY_LIGHT);
    }

    #[test]
    fn glyph_is_scaled_and_offset() {
        let mut fb = Framebuffer::new(16, 16);
        draw_glyph(&mut fb, 0, 0, Glyph::Digit(1), color::BLUE);

        // middle column of "1" covers x 8..10, all 14 rows from y 2
        for y in 2..16 {
            assert_eq!(fb.read(8, y), color::BLUE);
            assert_eq!(fb.read(9, y), color::BLUE);
        }
        assert_eq!(fb.read(0, 0), 0);
        assert_eq!(fb.read(4, 2), 0);
        // "1" has its flag stroke on column 1, glyph row 5
        assert_eq!(fb.read(6, 12), color::BLUE);
    }

    #[test]
    fn geometry_centres_vga_board() {
        let geometry = Geometry::VGA;
        assert_eq!(geometry.origin(), (32, -28));
        assert_eq!(geometry.tile_origin((0, 0)), (32, -28));
        assert_eq!(geometry.tile_origin((15, 15)), (272, 212));
    }

    #[test]
    fn geometry_maps_pixels_to_cells() {
        let geometry = Geometry::VGA;
        assert_eq!(geometry.cell_at(32, 0), Some((1, 0)));
        assert_eq!(geometry.cell_at(47, 3), Some((1, 0)));
        assert_eq!(geometry.cell_at(48, 4), Some((2, 1)));
        assert_eq!(geometry.cell_at(287, 199), Some((14, 15)));
        assert_eq!(geometry.cell_at(31, 100), None);
        assert_eq!(geometry.cell_at(20, 100), None);
        assert_eq!(geometry.cell_at(288, 100), None);
    }

    #[test]
    fn render_tile_variants() {
        let board = Board::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut game = sweeper_core::Game::new(board);
        let renderer = Renderer::new(Geometry::centered(32, 32, (2, 2)));
        let mut fb = Framebuffer::new(32, 32);

        game.toggle_flag((1, 0));
        game.reveal((1, 1));
        renderer.render_board(&mut fb, game.board());

        // hidden mine: raised, nothing drawn on the face
        let hidden = tile_pixels(&fb, 0, 0);
        assert_eq!(hidden[0][0], color::WHITE);
        assert_eq!(hidden[8][8], color::GRAY_LIGHT);

        // flagged: raised with a red flag
        let flagged = tile_pixels(&fb, 0, 16);
        assert_eq!(flagged[0][0], color::WHITE);
        assert!(flagged.iter().flatten().any(|&p| p == color::RED));

        // revealed "1": sunken with a blue digit
        let one = tile_pixels(&fb, 16, 16);
        assert_eq!(one[0][0], color::GRAY_DARK);
        assert_eq!(one[8][8], color::BLUE);

        game.reveal((0, 0));
        renderer.render_tile(&mut fb, game.board(), (0, 0));
        let mine = tile_pixels(&fb, 0, 0);
        assert_eq!(mine[0][0], color::GRAY_DARK);
        assert_eq!(mine[2][2], color::RED);
        assert_eq!(mine[13][13], color::RED);
        assert!(mine.iter().flatten().any(|&p| p == color::BLACK));
    }

    #[test]
    fn revealed_zero_is_plain_sunken_tile() {
        let board = Board::from_mine_coords((1, 3), &[(0, 2)]).unwrap();
        let mut game = sweeper_core::Game::new(board);
        game.reveal((0, 0));
        let renderer = Renderer::new(Geometry::centered(48, 16, (1, 3)));
        let mut fb = Framebuffer::new(48, 16);
        renderer.render_board(&mut fb, game.board());

        let mut expected = Framebuffer::new(16, 16);
        draw_tile(&mut expected, 0, 0, true);
        assert_eq!(tile_pixels(&fb, 0, 0), tile_pixels(&expected, 0, 0));
    }

    #[test]
    fn render_screen_clears_background() {
        let board = Board::from_mine_coords((1, 1), &[]).unwrap();
        let renderer = Renderer::new(Geometry::centered(40, 20, (1, 1)));
        let mut fb = Framebuffer::new(40, 20);
        renderer.render_screen(&mut fb, &board);

        assert_eq!(fb.read(0, 0), color::BACKGROUND);
        assert_eq!(fb.read(12, 2), color::WHITE);
    }
}

//! The per-frame control loop.

use rand::prelude::*;
use sweeper_core::{Board, Coord2, Game, GameConfig, RevealOutcome, WinRule};

use crate::cursor;
use crate::display::Display;
use crate::input::InputDevice;
use crate::pointer::{Buttons, Pointer, PointerState};
use crate::render::{Geometry, Renderer};

/// How much of the surface a tick repainted, besides the cursor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Redraw {
    None,
    /// A single tile, after a flag toggle.
    Tile(Coord2),
    /// Every tile, after a reveal.
    Board,
    /// Background and every tile, after a reset.
    Screen,
}

impl Redraw {
    /// The coarser of two redraws.
    pub fn widen(self, other: Self) -> Self {
        use Redraw::*;
        match (self, other) {
            (Screen, _) | (_, Screen) => Screen,
            (Board, _) | (_, Board) => Board,
            (Tile(a), Tile(b)) if a != b => Board,
            (Tile(a), _) | (_, Tile(a)) => Tile(a),
            (None, None) => None,
        }
    }
}

/// Game rules for every board the loop creates.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    pub config: GameConfig,
    pub win_rule: WinRule,
}

/// Owns the surface, the input device and the game, and advances them one
/// frame at a time.
#[derive(Debug)]
pub struct FrameLoop<D, I> {
    display: D,
    input: I,
    settings: Settings,
    renderer: Renderer,
    game: Game,
    pointer: Pointer,
    previous: Buttons,
    cursor: Option<(i32, i32)>,
    rng: SmallRng,
}

impl<D: Display, I: InputDevice> FrameLoop<D, I> {
    pub fn new(display: D, input: I, seed: u64) -> Self {
        Self::with_settings(display, input, seed, Settings::default())
    }

    /// Generates the first board from `seed` and paints the whole screen.
    pub fn with_settings(mut display: D, input: I, seed: u64, settings: Settings) -> Self {
        let geometry = Geometry::centered(display.width(), display.height(), settings.config.size());
        let renderer = Renderer::new(geometry);
        let game = Game::with_win_rule(Board::generate(seed, settings.config), settings.win_rule);
        renderer.render_screen(&mut display, game.board());
        log::debug!("Started with seed {}", seed);

        Self {
            pointer: Pointer::new(display.width(), display.height()),
            display,
            input,
            settings,
            renderer,
            game,
            previous: Buttons::NONE,
            cursor: None,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.state()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn geometry(&self) -> &Geometry {
        self.renderer.geometry()
    }

    /// Position the cursor is currently painted at.
    pub fn cursor(&self) -> Option<(i32, i32)> {
        self.cursor
    }

    /// Runs one frame: wait, erase cursor, apply input, act on button presses,
    /// repaint, draw cursor.
    pub fn tick(&mut self) -> Redraw {
        self.input.wait_frame();

        if let Some((x, y)) = self.cursor.take() {
            cursor::toggle(&mut self.display, x, y);
        }

        while let Some(packet) = self.input.next_packet() {
            self.pointer.apply(packet);
        }

        let state = self.pointer.state();
        let pressed = state.buttons.pressed_since(self.previous);
        let target = self.geometry().cell_at(state.x, state.y);
        let mut redraw = Redraw::None;
        // a frame that starts on a finished game can only reset it
        let finished = self.game.is_finished();

        if pressed.primary {
            if finished {
                self.reset();
                redraw = Redraw::Screen;
            } else if let Some(coords) = target {
                self.reseed(state.x, state.y);
                let outcome = self.game.reveal(coords);
                log::debug!("Reveal {:?}: {:?}", coords, outcome);
                if outcome == RevealOutcome::HitMine {
                    log::debug!("Game lost");
                }
                self.renderer.render_board(&mut self.display, self.game.board());
                redraw = Redraw::Board;
            }
        }

        if pressed.secondary && !finished && !self.game.is_finished() {
            if let Some(coords) = target {
                self.game.toggle_flag(coords);
                self.renderer
                    .render_tile(&mut self.display, self.game.board(), coords);
                redraw = redraw.widen(Redraw::Tile(coords));
            }
        }

        self.previous = state.buttons;

        cursor::toggle(&mut self.display, state.x, state.y);
        self.cursor = Some((state.x, state.y));

        redraw
    }

    /// Ticks forever.
    pub fn run(mut self) -> ! {
        loop {
            self.tick();
        }
    }

    /// Replaces the game with a fresh board and repaints the screen.
    fn reset(&mut self) {
        let seed = self.rng.next_u64();
        let board = Board::generate(seed, self.settings.config);
        self.game = Game::with_win_rule(board, self.settings.win_rule);
        self.renderer.render_screen(&mut self.display, self.game.board());
        log::debug!("Reset with seed {}", seed);
    }

    /// Stirs the pointer position into the generator, so the next board
    /// depends on where the player clicked.
    fn reseed(&mut self, x: i32, y: i32) {
        let mixed = self.rng.next_u64().wrapping_add((x + y) as u64);
        self.rng = SmallRng::seed_from_u64(mixed);
    }
}

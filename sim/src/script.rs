//! Scripted pointer sessions.

use std::str::FromStr;

use anyhow::{Context, anyhow, bail};
use sweeper_console::render::TILE_SIZE;
use sweeper_console::{Buttons, Display, FrameLoop, Packet, Redraw, ScriptedInput};
use sweeper_core::Coord2;

/// One scripted player action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Primary click on the centre of a tile.
    Reveal(Coord2),
    /// Secondary click on the centre of a tile.
    Flag(Coord2),
    /// Move the pointer to a pixel without pressing anything.
    Move(i32, i32),
    /// Primary click wherever the pointer currently is.
    Click,
    /// Let frames pass with no input.
    Idle(usize),
}

fn parse_pair<T: FromStr>(arg: &str) -> anyhow::Result<(T, T)>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let (a, b) = arg
        .split_once(',')
        .ok_or_else(|| anyhow!("expected two comma-separated values, got {arg:?}"))?;
    Ok((a.trim().parse()?, b.trim().parse()?))
}

impl FromStr for Step {
    type Err = anyhow::Error;

    /// `reveal:ROW,COL`, `flag:ROW,COL`, `move:X,Y`, `click` or `idle:N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = s.split_once(':').unwrap_or((s, ""));
        let step = match kind {
            "reveal" => Step::Reveal(parse_pair(arg)?),
            "flag" => Step::Flag(parse_pair(arg)?),
            "move" => {
                let (x, y) = parse_pair(arg)?;
                Step::Move(x, y)
            }
            "click" => Step::Click,
            "idle" => Step::Idle(arg.parse().with_context(|| format!("bad idle count {arg:?}"))?),
            _ => bail!("unknown step {kind:?}"),
        };
        Ok(step)
    }
}

/// Turns steps into pointer packets and runs the frames they need.
pub struct Driver<D> {
    frame_loop: FrameLoop<D, ScriptedInput>,
    frames: u64,
}

impl<D: Display> Driver<D> {
    pub fn new(frame_loop: FrameLoop<D, ScriptedInput>) -> Self {
        Self {
            frame_loop,
            frames: 0,
        }
    }

    pub fn frame_loop(&self) -> &FrameLoop<D, ScriptedInput> {
        &self.frame_loop
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one step; returns the widest redraw it caused.
    pub fn run(&mut self, step: Step) -> Redraw {
        log::debug!("Step {:?}", step);
        match step {
            Step::Reveal(coords) => {
                self.move_to_tile(coords);
                self.press(Buttons::PRIMARY)
            }
            Step::Flag(coords) => {
                self.move_to_tile(coords);
                self.press(Buttons::SECONDARY)
            }
            Step::Move(x, y) => self.move_to(x, y),
            Step::Click => self.press(Buttons::PRIMARY),
            Step::Idle(frames) => {
                self.frame_loop.input_mut().push_idle(frames);
                self.drain()
            }
        }
    }

    fn move_to_tile(&mut self, coords: Coord2) -> Redraw {
        let (x, y) = self.frame_loop.geometry().tile_origin(coords);
        self.move_to(x + TILE_SIZE / 2, y + TILE_SIZE / 2)
    }

    fn move_to(&mut self, x: i32, y: i32) -> Redraw {
        let state = self.frame_loop.pointer();
        let mut dx = x - state.x;
        // device Y points up
        let mut dy = state.y - y;
        let mut packets = Vec::new();
        while dx != 0 || dy != 0 {
            let step_x = dx.clamp(-i32::from(Packet::MAX_DELTA), i32::from(Packet::MAX_DELTA));
            let step_y = dy.clamp(-i32::from(Packet::MAX_DELTA), i32::from(Packet::MAX_DELTA));
            packets.push(Packet::encode(step_x as i16, step_y as i16, state.buttons));
            dx -= step_x;
            dy -= step_y;
        }
        self.frame_loop.input_mut().push_frame(&packets);
        self.drain()
    }

    fn press(&mut self, buttons: Buttons) -> Redraw {
        self.frame_loop
            .input_mut()
            .push_frame(&[Packet::encode(0, 0, buttons)])
            .push_frame(&[Packet::encode(0, 0, Buttons::NONE)]);
        self.drain()
    }

    /// Ticks until every queued frame has been consumed.
    fn drain(&mut self) -> Redraw {
        let mut redraw = Redraw::None;
        while !self.frame_loop.input_mut().is_exhausted() {
            redraw = redraw.widen(self.frame_loop.tick());
            self.frames += 1;
        }
        redraw
    }
}

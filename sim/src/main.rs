//! Host-side simulator: runs the console frame loop against an in-memory
//! framebuffer and a scripted pointer, then dumps what it produced.

mod dump;
mod script;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sweeper_console::{FrameLoop, Framebuffer, Palette, ScriptedInput, Settings};
use sweeper_core::{GameConfig, WinRule};

use crate::script::{Driver, Step};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Seed for the first board
    #[arg(short, long, default_value_t = 123)]
    seed: u64,

    /// Report a win once every safe cell is revealed
    #[arg(long)]
    win: bool,

    /// Steps to play: reveal:ROW,COL flag:ROW,COL move:X,Y click idle:N
    #[arg(value_name = "STEP")]
    steps: Vec<Step>,

    /// Write the final screen as a PPM image
    #[arg(long, value_name = "PATH")]
    ppm: Option<PathBuf>,

    /// Write the final screen as raw palette indices
    #[arg(long, value_name = "PATH")]
    raw: Option<PathBuf>,

    /// Write the final screen as `$readmemh` hex text
    #[arg(long, value_name = "PATH")]
    hex: Option<PathBuf>,

    /// Write the final game state as JSON
    #[arg(long, value_name = "PATH")]
    state: Option<PathBuf>,
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .try_init()
        .context("Error initializing logger")?;

    let settings = Settings {
        config: GameConfig::INTERMEDIATE,
        win_rule: if args.win {
            WinRule::AllSafeRevealed
        } else {
            WinRule::Disabled
        },
    };
    let frame_loop =
        FrameLoop::with_settings(Framebuffer::vga(), ScriptedInput::new(), args.seed, settings);
    let mut driver = Driver::new(frame_loop);

    for &step in &args.steps {
        let redraw = driver.run(step);
        log::info!("{:?} -> {:?}", step, redraw);
    }

    let frame_loop = driver.frame_loop();
    let game = frame_loop.game();
    log::info!(
        "{:?} after {} frames, {} mines left",
        game.status(),
        driver.frames(),
        game.mines_left()
    );

    let display = frame_loop.display();
    if let Some(path) = &args.ppm {
        dump::write_ppm(display, &Palette::vga256(), create(path)?)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.raw {
        dump::write_raw(display, create(path)?).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.hex {
        dump::write_hex(display, create(path)?).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.state {
        let mut out = create(path)?;
        serde_json::to_writer_pretty(&mut out, game)
            .with_context(|| format!("writing {}", path.display()))?;
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn verbosity_flags_set_log_level() {
        let args = Args::try_parse_from(["sweeper-sim"]).unwrap();
        assert_eq!(args.verbose.log_level_filter(), LevelFilter::Error);

        let args = Args::try_parse_from(["sweeper-sim", "-vvv"]).unwrap();
        assert_eq!(args.verbose.log_level_filter(), LevelFilter::Debug);

        let args = Args::try_parse_from(["sweeper-sim", "-q"]).unwrap();
        assert_eq!(args.verbose.log_level_filter(), LevelFilter::Off);
    }

    #[test]
    fn parses_seed_and_steps() {
        let args =
            Args::try_parse_from(["sweeper-sim", "--seed", "7", "--win", "reveal:3,4", "idle:2"])
                .unwrap();
        assert_eq!(args.seed, 7);
        assert!(args.win);
        assert_eq!(args.steps, [Step::Reveal((3, 4)), Step::Idle(2)]);
        assert!(Args::try_parse_from(["sweeper-sim", "jump:1,1"]).is_err());
    }
}

//! `life-frames` — Seeds a named pattern on a toroidal grid, runs a Life-like
//! automaton and writes the generations as a looping animated PNG.
//!
//! **Usage:**
//! ```text
//! life-frames <SHUTTLES|BRAIN|SOUP> [--rule highlife] [--frames 300] [--out img/x.png] [--include-seed]
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use life_frames::config::{DEFAULT_CELL_SCALE, DEFAULT_FRAME_INTERVAL_MS, DEFAULT_GRID_SIZE};
use life_frames::rendering::{Palette, Rgb};
use life_frames::{
    Algorithm, CancelToken, ErrorKind, LifeError, PatternId, RuleTable, SeedFrame, SimulationConfig,
    simulate,
};

/// Render a Life-like cellular automaton to an animated PNG.
#[derive(Parser)]
#[command(name = "life-frames", about = "Render Life-like cellular automata to animated PNGs")]
struct Args {
    /// Initial pattern (case-insensitive): SHUTTLES, BRAIN or SOUP.
    #[arg(value_name = "PATTERN")]
    pattern: Option<PatternId>,

    /// Rule preset (life, highlife, diamoeba, daynight, seeds) or B/S notation.
    #[arg(long, default_value = "life")]
    rule: RuleTable,

    /// Grid width in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    width: usize,

    /// Grid height in cells.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    height: usize,

    /// Number of steps to render. Defaults to the pattern's own count.
    #[arg(long)]
    frames: Option<usize>,

    /// Output file. Defaults to the pattern's own target under img/.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Delay between frames in milliseconds.
    #[arg(long, default_value_t = DEFAULT_FRAME_INTERVAL_MS)]
    interval: u32,

    /// Pixels per cell side.
    #[arg(long, default_value_t = DEFAULT_CELL_SCALE)]
    scale: u32,

    /// Step implementation: serial or parallel.
    #[arg(long, default_value = "serial")]
    algorithm: Algorithm,

    /// Also render the unstepped seed as the first frame.
    #[arg(long)]
    include_seed: bool,

    /// RNG seed for the SOUP pattern.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Colour of dead cells.
    #[arg(long, default_value = "#000000")]
    dead_color: Rgb,

    /// Colour of live cells.
    #[arg(long, default_value = "#00ff00")]
    alive_color: Rgb,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn into_config(self) -> Result<SimulationConfig, LifeError> {
        let pattern = self.pattern.ok_or_else(|| LifeError::MissingPattern {
            valid: PatternId::valid_names(),
        })?;

        Ok(SimulationConfig {
            width: self.width,
            height: self.height,
            rules: self.rule,
            algorithm: self.algorithm,
            seed_frame: if self.include_seed { SeedFrame::Include } else { SeedFrame::Exclude },
            frames: self.frames,
            output: self.out,
            frame_interval_ms: self.interval,
            cell_scale: self.scale,
            palette: Palette {
                dead: self.dead_color,
                alive: self.alive_color,
            },
            random_seed: self.seed,
            ..SimulationConfig::new(pattern)
        })
    }
}

fn run(config: &SimulationConfig) -> Result<()> {
    let report = simulate(config, CancelToken::new())
        .with_context(|| format!("Failed to render {}", config.pattern))?;

    match report.output {
        Some(path) => println!("  Written: {} ({} frames)", path.display(), report.outcome.frames()),
        None => println!("  Cancelled after {} frames; nothing written", report.outcome.frames()),
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let result = args
        .into_config()
        .map_err(anyhow::Error::from)
        .and_then(|config| run(&config));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let kind = err.downcast_ref::<LifeError>().map(LifeError::kind);
            match kind {
                Some(ErrorKind::Usage | ErrorKind::Configuration) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}

mod sequencer;

pub use sequencer::{CancelToken, FrameSequencer, FrameSink, RunOutcome, SeedFrame};

use std::path::PathBuf;

use log::{info, warn};

use crate::config::SimulationConfig;
use crate::domain::Grid;
use crate::error::Result;
use crate::rendering::{AnimationExporter, FrameRenderer};

/// Result of a full pattern-to-artifact run
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// `None` when the run was cancelled and nothing was written
    pub output: Option<PathBuf>,
}

/// Build the seeded grid described by `config`
pub fn initial_grid(config: &SimulationConfig) -> Result<Grid> {
    config.validate()?;
    let pattern = config.pattern();
    let mut grid = Grid::new(config.width, config.height)?;
    grid.seed(&pattern.live_cells(config.width, config.height, config.random_seed));
    info!(
        "Seeded {} ({}) with {} live cells",
        pattern.id,
        pattern.description,
        grid.population()
    );
    Ok(grid)
}

/// Validate, seed, simulate and export one configured run
pub fn simulate(config: &SimulationConfig, cancel: CancelToken) -> Result<RunReport> {
    let grid = initial_grid(config)?;

    let sequencer = FrameSequencer::new(config.rules)
        .with_algorithm(config.algorithm)
        .with_seed_frame(config.seed_frame)
        .with_cancel_token(cancel);

    let mut exporter = AnimationExporter::new(
        config.output_path(),
        FrameRenderer::new(config.cell_scale),
        config.palette,
        config.frame_interval(),
        sequencer.emitted_frames(config.frame_count()),
    );

    let outcome = sequencer.run(grid, config.frame_count(), &mut exporter)?;

    let output = match outcome {
        RunOutcome::Completed { .. } => Some(exporter.finish()?),
        RunOutcome::Cancelled { frames } => {
            // Dropping the exporter removes the partial file
            warn!("Discarding {frames} encoded frames; {} not written", exporter.target().display());
            None
        }
    };

    Ok(RunReport { outcome, output })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Frame, PatternId};
    use crate::error::LifeError;
    use std::fs;

    fn scratch_target(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("life_frames_sim_{tag}_{}", std::process::id()))
            .join("out.png")
    }

    #[test]
    fn test_initial_grid_seeds_pattern() {
        let grid = initial_grid(&SimulationConfig::new(PatternId::Shuttles)).unwrap();
        assert_eq!(grid.population(), 21);
        assert!(grid.get(48, 33).is_alive());
    }

    #[test]
    fn test_initial_grid_rejects_bad_config() {
        let mut config = SimulationConfig::new(PatternId::Brain);
        config.width = 0;
        assert!(matches!(initial_grid(&config), Err(LifeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_default_brain_run_loops_without_repeating_a_frame() {
        let config = SimulationConfig::new(PatternId::Brain);
        let seed = initial_grid(&config).unwrap().snapshot();
        let sequencer = FrameSequencer::new(config.rules);

        let mut first = None;
        let mut last = None;
        let mut count = 0;
        let outcome = sequencer
            .run(initial_grid(&config).unwrap(), config.frame_count(), &mut |frame: Frame, generation: u64| -> Result<()> {
                count += 1;
                if first.is_none() {
                    first = Some((frame.clone(), generation));
                }
                last = Some((frame, generation));
                Ok(())
            })
            .unwrap();

        assert_eq!(outcome, RunOutcome::Completed { frames: 300 });
        assert_eq!(count, 300);
        let (first, first_generation) = first.unwrap();
        let (last, last_generation) = last.unwrap();
        assert_eq!((first_generation, last_generation), (1, 300));
        // Generation 300 is the seed again, so the loop wraps straight onto generation 1
        assert_eq!(last, seed);
        assert_ne!(first, last);
    }

    #[test]
    fn test_simulate_writes_artifact() {
        let target = scratch_target("ok");
        let mut config = SimulationConfig::new(PatternId::Soup);
        config.width = 16;
        config.height = 12;
        config.frames = Some(5);
        config.cell_scale = 2;
        config.output = Some(target.clone());

        let report = simulate(&config, CancelToken::new()).unwrap();
        assert_eq!(report.outcome, RunOutcome::Completed { frames: 5 });
        assert_eq!(report.output.as_deref(), Some(target.as_path()));
        assert!(target.exists());

        fs::remove_dir_all(target.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_cancelled_simulation_writes_nothing() {
        let target = scratch_target("cancel");
        let mut config = SimulationConfig::new(PatternId::Brain);
        config.frames = Some(3);
        config.output = Some(target.clone());

        let cancel = CancelToken::new();
        cancel.cancel();
        let report = simulate(&config, cancel).unwrap();
        assert_eq!(report.outcome, RunOutcome::Cancelled { frames: 0 });
        assert!(report.output.is_none());
        assert!(!target.exists());
    }
}

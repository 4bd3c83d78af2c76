//! Run configuration with the reference defaults.

use std::path::PathBuf;

use crate::application::SeedFrame;
use crate::domain::{Algorithm, Pattern, PatternId, RuleTable};
use crate::error::{LifeError, Result};
use crate::rendering::Palette;

pub const DEFAULT_GRID_SIZE: usize = 100;
pub const DEFAULT_FRAME_INTERVAL_MS: u32 = 88;
pub const DEFAULT_CELL_SCALE: u32 = 6;

/// Everything needed to run one pattern to an artifact
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    pub pattern: PatternId,
    pub width: usize,
    pub height: usize,
    pub rules: RuleTable,
    pub algorithm: Algorithm,
    pub seed_frame: SeedFrame,
    /// Overrides the pattern's frame count
    pub frames: Option<usize>,
    /// Overrides the pattern's output path
    pub output: Option<PathBuf>,
    pub frame_interval_ms: u32,
    pub cell_scale: u32,
    pub palette: Palette,
    /// RNG seed for random layouts
    pub random_seed: u64,
}

impl SimulationConfig {
    pub fn new(pattern: PatternId) -> Self {
        Self {
            pattern,
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
            rules: RuleTable::default(),
            algorithm: Algorithm::default(),
            seed_frame: SeedFrame::default(),
            frames: None,
            output: None,
            frame_interval_ms: DEFAULT_FRAME_INTERVAL_MS,
            cell_scale: DEFAULT_CELL_SCALE,
            palette: Palette::default(),
            random_seed: 0,
        }
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern.pattern()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.unwrap_or_else(|| self.pattern().frames)
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.pattern().output))
    }

    /// Frame delay as the APNG encoder takes it
    pub fn frame_interval(&self) -> u16 {
        self.frame_interval_ms as u16
    }

    /// Report configuration errors before anything runs
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.frame_interval_ms == 0 || self.frame_interval_ms > u16::MAX as u32 {
            return Err(LifeError::InvalidFrameInterval(self.frame_interval_ms));
        }
        if self.cell_scale == 0 {
            return Err(LifeError::InvalidScale);
        }
        self.pattern().check_fits(self.width, self.height)
    }
}

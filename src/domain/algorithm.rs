//! Selection between the serial and parallel step implementations.

use std::fmt;
use std::str::FromStr;

use super::{Grid, RuleTable, stepper};

/// Available evolution algorithms.
/// Both produce identical grids; they only differ in how the work is scheduled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Cell by cell on the calling thread
    #[default]
    Serial,
    /// Rows split across the rayon thread pool
    Parallel,
}

impl Algorithm {
    pub fn all() -> Vec<Algorithm> {
        vec![Algorithm::Serial, Algorithm::Parallel]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Serial => "serial",
            Algorithm::Parallel => "parallel",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Serial => "one cell at a time on the calling thread",
            Algorithm::Parallel => "one output row per rayon task",
        }
    }

    /// Advance `grid` by one generation
    pub fn step(&self, grid: &Grid, rules: &RuleTable) -> Grid {
        match self {
            Algorithm::Serial => stepper::step(grid, rules),
            Algorithm::Parallel => stepper::step_parallel(grid, rules),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::all()
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown algorithm '{s}'; expected serial or parallel"))
    }
}

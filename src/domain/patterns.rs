use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LifeError, Result};

/// Names accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternId {
    Shuttles,
    Brain,
    Soup,
}

impl PatternId {
    pub fn all() -> [PatternId; 3] {
        [PatternId::Shuttles, PatternId::Brain, PatternId::Soup]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternId::Shuttles => "SHUTTLES",
            PatternId::Brain => "BRAIN",
            PatternId::Soup => "SOUP",
        }
    }

    /// Comma-separated list of every accepted name
    pub fn valid_names() -> String {
        PatternId::all().map(|id| id.name()).join(", ")
    }

    pub fn pattern(&self) -> Pattern {
        match self {
            PatternId::Shuttles => presets::shuttles(),
            PatternId::Brain => presets::brain(),
            PatternId::Soup => presets::soup(),
        }
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PatternId {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        PatternId::all()
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LifeError::UnknownPattern {
                given: s.to_string(),
                valid: PatternId::valid_names(),
            })
    }
}

/// Where a pattern's initial live cells come from
#[derive(Clone, Debug)]
pub enum Layout {
    /// Fixed `(row, col)` coordinates
    Cells(&'static [(usize, usize)]),
    /// Every cell alive with the given probability
    Random { density: f64 },
}

/// A named initial configuration together with its default output settings
#[derive(Clone, Debug)]
pub struct Pattern {
    pub id: PatternId,
    pub description: &'static str,
    pub layout: Layout,
    /// Default artifact path
    pub output: &'static str,
    /// Default number of generations to render
    pub frames: usize,
}

impl Pattern {
    /// Smallest `(width, height)` grid that holds every fixed cell
    pub fn min_dimensions(&self) -> (usize, usize) {
        match self.layout {
            Layout::Cells(cells) => (
                cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(1),
                cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(1),
            ),
            Layout::Random { .. } => (1, 1),
        }
    }

    /// Check the pattern can be seeded onto a `width` x `height` grid
    pub fn check_fits(&self, width: usize, height: usize) -> Result<()> {
        let (min_width, min_height) = self.min_dimensions();
        if width < min_width || height < min_height {
            return Err(LifeError::PatternOutOfBounds {
                pattern: self.id.name(),
                min_width,
                min_height,
                width,
                height,
            });
        }
        Ok(())
    }

    /// Live `(row, col)` coordinates for a grid of the given size.
    /// `seed` only affects random layouts.
    pub fn live_cells(&self, width: usize, height: usize, seed: u64) -> Vec<(usize, usize)> {
        match self.layout {
            Layout::Cells(cells) => cells.to_vec(),
            Layout::Random { density } => {
                let mut rng = StdRng::seed_from_u64(seed);
                (0..height)
                    .flat_map(|row| (0..width).map(move |col| (row, col)))
                    .filter(|_| rng.random_bool(density))
                    .collect()
            }
        }
    }
}

/// Built-in patterns, laid out for a 100x100 grid
pub mod presets {
    use super::*;

    /// Two mirrored block-and-bar groups around a central arch
    pub fn shuttles() -> Pattern {
        Pattern {
            id: PatternId::Shuttles,
            description: "Pair of shuttles between blocks",
            layout: Layout::Cells(&[
                // Left block and shuttle
                (48, 33), (48, 34), (49, 33), (49, 34),
                (53, 38), (53, 39), (53, 40),
                // Right block and shuttle
                (48, 66), (48, 67), (49, 66), (49, 67),
                (53, 60), (53, 61), (53, 62),
                // Centre
                (54, 49), (53, 49), (52, 49), (52, 50), (52, 51), (53, 51), (54, 51),
            ]),
            output: "img/shuttles.png",
            frames: 300,
        }
    }

    /// Loops perfectly after 300 generations
    pub fn brain() -> Pattern {
        Pattern {
            id: PatternId::Brain,
            description: "Symmetric cluster that cycles back to its seed",
            layout: Layout::Cells(&[
                (45, 43), (45, 44), (45, 45), (45, 55), (45, 56), (45, 57),
                (46, 42), (46, 44), (46, 46), (46, 47), (46, 53), (46, 54), (46, 56), (46, 58),
                (47, 42), (47, 44), (47, 46), (47, 54), (47, 56), (47, 58),
                (48, 43), (48, 45), (48, 46), (48, 48), (48, 49), (48, 51), (48, 52), (48, 54), (48, 55), (48, 57),
                (49, 47), (49, 49), (49, 51), (49, 53),
                (50, 45), (50, 47), (50, 49), (50, 51), (50, 53), (50, 55),
                (51, 44), (51, 45), (51, 47), (51, 49), (51, 51), (51, 53), (51, 55), (51, 56),
                (52, 44), (52, 45), (52, 46), (52, 49), (52, 51), (52, 54), (52, 55), (52, 56),
                (53, 44), (53, 45), (53, 48), (53, 52), (53, 55), (53, 56),
                (54, 43), (54, 48), (54, 49), (54, 51), (54, 52), (54, 57),
                (55, 43), (55, 57),
            ]),
            output: "img/brain.png",
            frames: 300,
        }
    }

    /// Random soup at 30% density
    pub fn soup() -> Pattern {
        Pattern {
            id: PatternId::Soup,
            description: "Seeded random soup, 30% alive",
            layout: Layout::Random { density: 0.3 },
            output: "img/soup.png",
            frames: 300,
        }
    }

    pub fn all_patterns() -> Vec<Pattern> {
        PatternId::all().iter().map(|id| id.pattern()).collect()
    }
}

mod cell;
mod grid;
mod rules;
mod patterns;
mod algorithm;
pub mod stepper;

pub use cell::Cell;
pub use grid::{Grid, Frame};
pub use rules::{RuleTable, MAX_NEIGHBORS, all_rules};
pub use patterns::{Pattern, PatternId, Layout, presets};
pub use algorithm::Algorithm;

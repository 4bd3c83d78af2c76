// Domain layer - Automaton rules, grid and stepping
pub mod domain;

// Application layer - Frame sequencing and run orchestration
pub mod application;

// Infrastructure layer - Rendering, export and configuration
pub mod rendering;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use domain::{Cell, Grid, Frame, RuleTable, Pattern, PatternId, presets, Algorithm};
pub use application::{FrameSequencer, FrameSink, CancelToken, RunOutcome, SeedFrame, simulate};
pub use config::SimulationConfig;
pub use error::{LifeError, ErrorKind};

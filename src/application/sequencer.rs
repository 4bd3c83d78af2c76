use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::{debug, info, warn};

use crate::domain::{Algorithm, Frame, Grid, RuleTable};
use crate::error::Result;

/// Whether the unstepped seed is emitted as its own frame.
///
/// Excluding it keeps looping animations seamless: a pattern with period `p`
/// run for `p` steps ends on its seed, so an included seed frame would show
/// twice at the wrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SeedFrame {
    /// Emit generation 0, then one frame per step: `frames + 1` callbacks
    Include,
    /// Only emit stepped generations, numbered from 1: `frames` callbacks
    #[default]
    Exclude,
}

/// Shared flag that stops a run between frames
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Receiver of rendered generations
pub trait FrameSink {
    /// Called once per emitted generation, with strictly increasing indices
    fn on_frame(&mut self, frame: Frame, generation: u64) -> Result<()>;
}

impl<F> FrameSink for F
where
    F: FnMut(Frame, u64) -> Result<()>,
{
    fn on_frame(&mut self, frame: Frame, generation: u64) -> Result<()> {
        self(frame, generation)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { frames: usize },
    /// Stopped by a [`CancelToken`] after `frames` were emitted
    Cancelled { frames: usize },
}

impl RunOutcome {
    pub fn frames(&self) -> usize {
        match *self {
            RunOutcome::Completed { frames } | RunOutcome::Cancelled { frames } => frames,
        }
    }
}

/// FrameSequencer drives the simulation forward and hands each generation to a sink.
/// It owns the current grid for the whole run; nothing else holds it.
pub struct FrameSequencer {
    rules: RuleTable,
    algorithm: Algorithm,
    seed_frame: SeedFrame,
    cancel: CancelToken,
}

impl FrameSequencer {
    pub fn new(rules: RuleTable) -> Self {
        Self {
            rules,
            algorithm: Algorithm::default(),
            seed_frame: SeedFrame::default(),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_seed_frame(mut self, seed_frame: SeedFrame) -> Self {
        self.seed_frame = seed_frame;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Number of sink calls a completed run of `frame_count` steps makes
    pub fn emitted_frames(&self, frame_count: usize) -> usize {
        match self.seed_frame {
            SeedFrame::Include => frame_count + 1,
            SeedFrame::Exclude => frame_count,
        }
    }

    /// Step `initial` forward `frame_count` times, emitting snapshots to `sink`.
    ///
    /// A sink failure aborts the run and is returned as is. Cancellation is
    /// checked before every frame and is not an error.
    pub fn run<S>(&self, initial: Grid, frame_count: usize, sink: &mut S) -> Result<RunOutcome>
    where
        S: FrameSink + ?Sized,
    {
        let (width, height) = initial.dimensions();
        info!(
            "Running {} on {}x{} grid: {} steps, {} algorithm, seed frame {:?}",
            self.rules, width, height, frame_count, self.algorithm, self.seed_frame
        );

        let start = Instant::now();
        let mut grid = initial;
        let mut emitted = 0;

        if self.seed_frame == SeedFrame::Include {
            if self.cancel.is_cancelled() {
                warn!("Run cancelled before the seed frame");
                return Ok(RunOutcome::Cancelled { frames: 0 });
            }
            sink.on_frame(grid.snapshot(), 0)?;
            emitted += 1;
        }

        for generation in 1..=frame_count as u64 {
            if self.cancel.is_cancelled() {
                warn!("Run cancelled at generation {generation} after {emitted} frames");
                return Ok(RunOutcome::Cancelled { frames: emitted });
            }

            grid = self.algorithm.step(&grid, &self.rules);
            debug!("Generation {generation}: population {}", grid.population());

            sink.on_frame(grid.snapshot(), generation)?;
            emitted += 1;
        }

        info!(
            "Emitted {emitted} frames in {:.1} ms",
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(RunOutcome::Completed { frames: emitted })
    }
}

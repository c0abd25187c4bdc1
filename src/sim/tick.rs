//! Driver-facing tick
//!
//! Input handlers record one-shot commands in a [`TickInput`]; the frame
//! loop applies them with [`tick`] and asks a [`StepClock`] how many
//! generations are due.

use super::error::{SimError, SimResult};
use super::patterns::Pattern;
use super::state::Simulation;
use crate::consts::{MAX_FRAME_DT, MAX_STEPS_PER_FRAME};

/// Commands collected between frames
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Start stepping (runs one generation immediately)
    pub start: bool,
    /// Stop stepping
    pub stop: bool,
    /// Stop and empty the grid
    pub clear: bool,
    /// Place the glider at the center
    pub seed_glider: bool,
    /// Place a built-in pattern at the center
    pub pattern: Option<&'static Pattern>,
    /// Fill with a random soup from this seed
    pub randomize: Option<u64>,
    /// Cells to flip in click order, already in grid coordinates
    pub toggles: Vec<(usize, usize)>,
    /// Advance one generation while stopped
    pub step_once: bool,
}

impl TickInput {
    /// Reset one-shot commands after they have been applied
    pub fn consume(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Outcome of one [`tick`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Generations stepped this frame
    pub stepped: u32,
    /// Commands that were rejected, in the order they were applied
    pub errors: Vec<SimError>,
}

impl TickReport {
    fn record<T>(&mut self, command: &str, result: SimResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("{} rejected: {}", command, e);
                self.errors.push(e);
                None
            }
        }
    }
}

/// Apply `input` to `sim`, then run `due_steps` generations if running.
///
/// Commands apply in a fixed order: clear, seed glider, seed pattern,
/// randomize, toggles, stop, start. A rejected command is logged and
/// recorded in the report; it leaves the grid untouched and the remaining
/// commands and due steps still run.
pub fn tick(
    sim: &mut Simulation,
    input: &TickInput,
    due_steps: u32,
    density: f32,
) -> TickReport {
    let mut report = TickReport::default();

    if input.clear {
        sim.clear();
    }
    if input.seed_glider {
        report.record("Glider", sim.seed_glider());
    }
    if let Some(pattern) = input.pattern {
        report.record(pattern.name, sim.seed_pattern(pattern));
    }
    if let Some(seed) = input.randomize {
        report.record("Random soup", sim.randomize(seed, density));
    }
    for &(x, y) in &input.toggles {
        if let Some(cell) = report.record("Toggle", sim.toggle_cell(x, y)) {
            log::debug!("Toggled ({}, {}) -> {:?}", x, y, cell);
        }
    }
    if input.stop {
        sim.stop();
    }

    if input.start && !sim.is_running() {
        sim.start();
        sim.step();
        report.stepped += 1;
    }

    if sim.is_running() {
        for _ in 0..due_steps {
            sim.step();
        }
        report.stepped += due_steps;
    } else if input.step_once {
        sim.step();
        report.stepped += 1;
    }

    report
}

/// Fixed-interval step scheduler fed with frame deltas
#[derive(Debug, Clone)]
pub struct StepClock {
    /// Seconds between generations
    interval: f32,
    accumulator: f32,
}

impl StepClock {
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval: interval_ms.max(1) as f32 / 1000.0,
            accumulator: 0.0,
        }
    }

    /// Seconds between generations
    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval = interval_ms.max(1) as f32 / 1000.0;
    }

    /// Add `dt` seconds and return how many steps are due
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut due = 0;
        while self.accumulator >= self.interval && due < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.interval;
            due += 1;
        }
        // Drop backlog beyond the per-frame cap
        if due == MAX_STEPS_PER_FRAME {
            self.accumulator = self.accumulator.min(self.interval);
        }
        due
    }

    /// Discard accumulated time (e.g. when the simulation is stopped)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

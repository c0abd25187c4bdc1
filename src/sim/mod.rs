//! Deterministic simulation module
//!
//! The Game of Life engine. This module must be pure and deterministic:
//! - No timing; the driver decides cadence
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod error;
pub mod grid;
pub mod patterns;
pub mod state;
pub mod step;
pub mod tick;

pub use error::{ConfigError, SimError, SimResult};
pub use grid::{Cell, Grid};
pub use patterns::{GLIDER, PATTERNS, Pattern, place_pattern, randomize, seed_glider};
pub use state::{Simulation, grid_dimensions};
pub use step::{count_neighbors, next_state, step, step_into};
pub use tick::{StepClock, TickInput, TickReport, tick};

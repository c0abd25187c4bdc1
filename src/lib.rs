//! Life Canvas - Conway's Game of Life on a toroidal grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, step rule, patterns, state)
//! - `renderer`: WebGPU rendering of live cells
//! - `settings`: Persisted user preferences

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{Cell, Grid, SimError, Simulation};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Default cell edge in canvas pixels
    pub const DEFAULT_CELL_SIZE: u32 = 10;
    /// Default time between generations
    pub const DEFAULT_TICK_MS: u32 = 100;
    /// Largest frame delta fed to the step clock (seconds)
    pub const MAX_FRAME_DT: f32 = 0.5;
    /// Maximum generations per frame to prevent spiral of death
    pub const MAX_STEPS_PER_FRAME: u32 = 8;
    /// Live-cell probability for the random soup
    pub const DEFAULT_SOUP_DENSITY: f32 = 0.25;
    /// Soup density change per key press
    pub const SOUP_DENSITY_STEP: f32 = 0.05;
    /// Cell size range reachable from the keyboard
    pub const MIN_CELL_SIZE: u32 = 4;
    pub const MAX_CELL_SIZE: u32 = 40;
}

/// Convert a client-space pointer position to a grid cell.
///
/// `client_size` is the canvas' on-page size and `canvas_size` its backing
/// pixel size; the position is scaled between the two before dividing by the
/// cell size. Returns `None` outside the grid.
pub fn cell_at(
    pointer: Vec2,
    client_size: Vec2,
    canvas_size: Vec2,
    cell_size: u32,
    grid_dims: (usize, usize),
) -> Option<(usize, usize)> {
    if client_size.x <= 0.0 || client_size.y <= 0.0 || cell_size == 0 {
        return None;
    }

    let scaled = pointer * (canvas_size / client_size) / cell_size as f32;
    if scaled.x < 0.0 || scaled.y < 0.0 {
        return None;
    }

    let (x, y) = (scaled.x.floor() as usize, scaled.y.floor() as usize);
    let (cols, rows) = grid_dims;
    (x < cols && y < rows).then_some((x, y))
}

/// Top-left pixel of a cell on the canvas
#[inline]
pub fn cell_origin(x: usize, y: usize, cell_size: u32) -> Vec2 {
    Vec2::new(x as f32, y as f32) * cell_size as f32
}

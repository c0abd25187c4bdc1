//! Simulation state owned by the driver
//!
//! Holds the live grid plus a same-sized scratch buffer; each step writes
//! into the scratch buffer and the two are swapped.

use super::error::{ConfigError, SimResult};
use super::grid::{Cell, Grid};
use super::patterns::{self, Pattern};
use super::step::step_into;

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    current: Grid,
    scratch: Grid,
    /// Generations stepped since the last clear or reseed
    generation: u64,
    running: bool,
}

impl Simulation {
    /// Create a stopped simulation with an empty grid
    pub fn new(cols: usize, rows: usize) -> SimResult<Self> {
        let current = Grid::try_new(cols, rows)?;
        let scratch = current.clone();
        Ok(Self {
            current,
            scratch,
            generation: 0,
            running: false,
        })
    }

    /// Size the grid to fit a canvas: `floor(width / cell_size)` by
    /// `floor(height / cell_size)`
    pub fn from_canvas(width: u32, height: u32, cell_size: u32) -> SimResult<Self> {
        let (cols, rows) = grid_dimensions(width, height, cell_size)?;
        Self::new(cols, rows)
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.current.population()
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advance one generation
    pub fn step(&mut self) {
        step_into(&self.current, &mut self.scratch);
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.generation += 1;
    }

    /// Flip the cell at `(x, y)` and return its new state
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> SimResult<Cell> {
        self.current.toggle(x, y)
    }

    /// Place the glider at the grid center on top of the current cells.
    ///
    /// Like every reseed this restarts the generation count.
    pub fn seed_glider(&mut self) -> SimResult<()> {
        patterns::seed_glider(&mut self.current)?;
        self.reseeded(patterns::GLIDER.name);
        Ok(())
    }

    /// Place `pattern` at the grid center on top of the current cells and
    /// restart the generation count. Clear first for a fresh field.
    pub fn seed_pattern(&mut self, pattern: &Pattern) -> SimResult<()> {
        let anchor = patterns::center(&self.current);
        patterns::place_pattern(&mut self.current, pattern, anchor)?;
        self.reseeded(pattern.name);
        Ok(())
    }

    fn reseeded(&mut self, name: &str) {
        self.generation = 0;
        log::debug!("Seeded {}", name);
    }

    /// Fill the grid with a seeded random soup
    pub fn randomize(&mut self, seed: u64, density: f32) -> SimResult<()> {
        patterns::randomize(&mut self.current, seed, density)?;
        self.generation = 0;
        Ok(())
    }

    /// Stop and kill every cell
    pub fn clear(&mut self) {
        self.running = false;
        self.current.clear();
        self.generation = 0;
        log::debug!("Simulation cleared");
    }
}

/// Grid size that fits a `width` x `height` pixel canvas
pub fn grid_dimensions(width: u32, height: u32, cell_size: u32) -> SimResult<(usize, usize)> {
    if cell_size == 0 {
        return Err(ConfigError::InvalidCellSize.into());
    }
    let cols = (width / cell_size) as usize;
    let rows = (height / cell_size) as usize;
    if cols == 0 || rows == 0 {
        return Err(ConfigError::ZeroDimension { cols, rows }.into());
    }
    Ok((cols, rows))
}

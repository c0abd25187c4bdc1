//! Starting patterns
//!
//! Patterns are stored as offsets from an anchor cell and placed with
//! toroidal wrapping. A grid smaller than a pattern's bounding box is
//! rejected rather than letting the pattern overlap itself across the seam.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::error::{ConfigError, SimResult};
use super::grid::{Cell, Grid};

/// A named set of live cells, relative to an anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub offsets: &'static [(isize, isize)],
}

impl Pattern {
    /// Bounding box size as `(width, height)`
    pub fn extent(&self) -> (usize, usize) {
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (0isize, 0isize, 0isize, 0isize);
        for &(dx, dy) in self.offsets {
            min_x = min_x.min(dx);
            max_x = max_x.max(dx);
            min_y = min_y.min(dy);
            max_y = max_y.max(dy);
        }
        ((max_x - min_x + 1) as usize, (max_y - min_y + 1) as usize)
    }

    /// Look up a built-in pattern by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<&'static Pattern> {
        PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// Glider heading toward +x, +y (down-right on screen)
pub const GLIDER: Pattern = Pattern {
    name: "Glider",
    offsets: &[(0, -1), (1, 0), (-1, 1), (0, 1), (1, 1)],
};

pub const BLINKER: Pattern = Pattern {
    name: "Blinker",
    offsets: &[(-1, 0), (0, 0), (1, 0)],
};

pub const BLOCK: Pattern = Pattern {
    name: "Block",
    offsets: &[(0, 0), (1, 0), (0, 1), (1, 1)],
};

pub const TOAD: Pattern = Pattern {
    name: "Toad",
    offsets: &[(-1, 0), (0, 0), (1, 0), (-2, 1), (-1, 1), (0, 1)],
};

pub const BEACON: Pattern = Pattern {
    name: "Beacon",
    offsets: &[
        (-1, -1),
        (0, -1),
        (-1, 0),
        (0, 0),
        (1, 1),
        (2, 1),
        (1, 2),
        (2, 2),
    ],
};

/// Built-in patterns
pub const PATTERNS: &[Pattern] = &[GLIDER, BLINKER, BLOCK, TOAD, BEACON];

/// Center cell of a grid: `(floor(cols / 2), floor(rows / 2))`
#[inline]
pub fn center(grid: &Grid) -> (usize, usize) {
    (grid.cols() / 2, grid.rows() / 2)
}

/// Set every cell of `pattern` alive around `anchor`, leaving other cells as they are
pub fn place_pattern(grid: &mut Grid, pattern: &Pattern, anchor: (usize, usize)) -> SimResult<()> {
    let (min_cols, min_rows) = pattern.extent();
    if grid.cols() < min_cols || grid.rows() < min_rows {
        return Err(ConfigError::GridTooSmall {
            cols: grid.cols(),
            rows: grid.rows(),
            min_cols,
            min_rows,
        }
        .into());
    }

    let (ax, ay) = (anchor.0 as isize, anchor.1 as isize);
    for &(dx, dy) in pattern.offsets {
        grid.set_wrapped(ax + dx, ay + dy, Cell::Alive);
    }
    log::debug!("Placed {} at {:?}", pattern.name, anchor);
    Ok(())
}

/// Place the glider at the grid center
pub fn seed_glider(grid: &mut Grid) -> SimResult<()> {
    let anchor = center(grid);
    place_pattern(grid, &GLIDER, anchor)
}

/// Overwrite every cell with a seeded random soup; each cell is alive with
/// probability `density`
pub fn randomize(grid: &mut Grid, seed: u64, density: f32) -> SimResult<()> {
    if !(0.0..=1.0).contains(&density) {
        return Err(ConfigError::InvalidDensity(density).into());
    }

    let mut rng = Pcg32::seed_from_u64(seed);
    for cell in grid.cells_mut() {
        *cell = Cell::from_alive(rng.random_bool(density as f64));
    }
    log::debug!(
        "Randomized grid (seed {}, density {:.2}): {} alive",
        seed,
        density,
        grid.population()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::error::SimError;
    use crate::sim::step::step;

    fn alive(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = grid.alive_cells().collect();
        cells.sort();
        cells
    }

    #[test]
    fn test_seed_glider_at_center() {
        let mut grid = Grid::new(20, 20);
        seed_glider(&mut grid).unwrap();
        assert_eq!(
            alive(&grid),
            vec![(9, 11), (10, 9), (10, 11), (11, 10), (11, 11)]
        );
    }

    #[test]
    fn test_glider_translates_after_four_steps() {
        let mut grid = Grid::new(20, 20);
        seed_glider(&mut grid).unwrap();
        let start = alive(&grid);

        for _ in 0..4 {
            grid = step(&grid);
        }

        let shifted: Vec<_> = start.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        assert_eq!(alive(&grid), shifted);
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn test_seed_glider_odd_dimensions() {
        let mut grid = Grid::new(7, 5);
        seed_glider(&mut grid).unwrap();
        // center is (3, 2)
        assert_eq!(grid.get(3, 1), Ok(Cell::Alive));
        assert_eq!(grid.get(2, 3), Ok(Cell::Alive));
        assert_eq!(grid.population(), 5);
    }

    #[test]
    fn test_seed_glider_smallest_grid() {
        let mut grid = Grid::new(3, 3);
        seed_glider(&mut grid).unwrap();
        assert_eq!(grid.to_string(), ".#.\n..#\n###\n");
    }

    #[test]
    fn test_seed_glider_rejects_small_grid() {
        let mut grid = Grid::new(2, 10);
        assert_eq!(
            seed_glider(&mut grid),
            Err(SimError::Configuration(ConfigError::GridTooSmall {
                cols: 2,
                rows: 10,
                min_cols: 3,
                min_rows: 3,
            }))
        );
        assert!(grid.is_empty());
        assert!(seed_glider(&mut Grid::new(10, 1)).is_err());
    }

    #[test]
    fn test_place_pattern_wraps() {
        let mut grid = Grid::new(5, 5);
        place_pattern(&mut grid, &BLOCK, (4, 4)).unwrap();
        assert_eq!(alive(&grid), vec![(0, 0), (0, 4), (4, 0), (4, 4)]);
    }

    #[test]
    fn test_pattern_extent() {
        assert_eq!(GLIDER.extent(), (3, 3));
        assert_eq!(BLINKER.extent(), (3, 1));
        assert_eq!(TOAD.extent(), (4, 2));
        assert_eq!(BEACON.extent(), (4, 4));
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Pattern::by_name("glider"), Some(&GLIDER));
        assert_eq!(Pattern::by_name("BEACON"), Some(&BEACON));
        assert_eq!(Pattern::by_name("spaceship"), None);
    }

    #[test]
    fn test_randomize_is_deterministic() {
        let mut a = Grid::new(32, 24);
        let mut b = Grid::new(32, 24);
        randomize(&mut a, 42, 0.3).unwrap();
        randomize(&mut b, 42, 0.3).unwrap();
        assert_eq!(a, b);
        assert!(a.population() > 0);
        assert!(a.population() < 32 * 24);
    }

    #[test]
    fn test_randomize_density_bounds() {
        let mut grid = Grid::new(8, 8);
        randomize(&mut grid, 1, 1.0).unwrap();
        assert_eq!(grid.population(), 64);
        randomize(&mut grid, 1, 0.0).unwrap();
        assert!(grid.is_empty());

        assert_eq!(
            randomize(&mut grid, 1, 1.5),
            Err(SimError::Configuration(ConfigError::InvalidDensity(1.5)))
        );
        assert!(randomize(&mut grid, 1, f32::NAN).is_err());
    }
}

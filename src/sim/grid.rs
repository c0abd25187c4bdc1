//! Dense toroidal cell grid
//!
//! Cells are stored column-major in a flat buffer (`x * rows + y`), matching
//! the `[col][row]` addressing used everywhere else in the crate.

use std::fmt;

use super::error::{ConfigError, SimError, SimResult};

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    #[inline]
    pub fn from_alive(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

/// Fixed-size field of cells whose edges wrap around
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// Panics if either dimension is zero; use [`Grid::try_new`] when the
    /// dimensions come from outside the program.
    pub fn new(cols: usize, rows: usize) -> Self {
        match Self::try_new(cols, rows) {
            Ok(grid) => grid,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create an all-dead grid, rejecting zero or oversized dimensions
    pub fn try_new(cols: usize, rows: usize) -> SimResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(ConfigError::ZeroDimension { cols, rows }.into());
        }
        let len = cols
            .checked_mul(rows)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(ConfigError::TooLarge { cols, rows })?;
        Ok(Self {
            cols,
            rows,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Parse a grid from ASCII rows (`#` alive, `.` dead), top row first
    pub fn from_rows(lines: &[&str]) -> SimResult<Self> {
        let rows = lines.len();
        let cols = lines.first().map(|l| l.chars().count()).unwrap_or(0);
        let mut grid = Self::try_new(cols, rows)?;

        for (y, line) in lines.iter().enumerate() {
            if line.chars().count() != cols {
                return Err(ConfigError::MalformedText { line: y }.into());
            }
            for (x, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Alive,
                    '.' => Cell::Dead,
                    _ => return Err(ConfigError::MalformedText { line: y }.into()),
                };
                grid.cells[x * rows + y] = cell;
            }
        }

        Ok(grid)
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid dimensions as `(cols, rows)`
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.cols && y < self.rows
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> SimResult<usize> {
        if self.in_bounds(x, y) {
            Ok(x * self.rows + y)
        } else {
            Err(SimError::IndexOutOfBounds {
                x,
                y,
                cols: self.cols,
                rows: self.rows,
            })
        }
    }

    /// Read a cell; coordinates must already be in range
    pub fn get(&self, x: usize, y: usize) -> SimResult<Cell> {
        let i = self.index(x, y)?;
        Ok(self.cells[i])
    }

    /// Write a cell in place; coordinates must already be in range
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> SimResult<()> {
        let i = self.index(x, y)?;
        self.cells[i] = cell;
        Ok(())
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, x: usize, y: usize) -> SimResult<Cell> {
        let i = self.index(x, y)?;
        let cell = self.cells[i].toggled();
        self.cells[i] = cell;
        Ok(cell)
    }

    /// Map any signed coordinate onto the torus
    #[inline]
    pub fn wrap(&self, x: isize, y: isize) -> (usize, usize) {
        (
            x.rem_euclid(self.cols as isize) as usize,
            y.rem_euclid(self.rows as isize) as usize,
        )
    }

    /// Read a cell at a signed coordinate, wrapping around the edges
    #[inline]
    pub fn get_wrapped(&self, x: isize, y: isize) -> Cell {
        let (x, y) = self.wrap(x, y);
        self.cells[x * self.rows + y]
    }

    /// Write a cell at a signed coordinate, wrapping around the edges
    #[inline]
    pub fn set_wrapped(&mut self, x: isize, y: isize, cell: Cell) {
        let (x, y) = self.wrap(x, y);
        let rows = self.rows;
        self.cells[x * rows + y] = cell;
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Dead);
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|c| c.is_alive())
    }

    /// Coordinates of live cells, column by column
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let rows = self.rows;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alive())
            .map(move |(i, _)| (i / rows, i % rows))
    }

    /// Raw column-major cell buffer
    #[inline]
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let ch = if self.cells[x * self.rows + y].is_alive() {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_grid_is_dead() {
        let grid = Grid::new(7, 4);
        assert_eq!(grid.dimensions(), (7, 4));
        for x in 0..7 {
            for y in 0..4 {
                assert_eq!(grid.get(x, y), Ok(Cell::Dead));
            }
        }
        assert!(grid.is_empty());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(
            Grid::try_new(0, 5),
            Err(SimError::Configuration(ConfigError::ZeroDimension {
                cols: 0,
                rows: 5
            }))
        );
        assert!(Grid::try_new(5, 0).is_err());
    }

    #[test]
    fn test_overflowing_dimensions_rejected() {
        let cols = usize::MAX / 2 + 1;
        assert_eq!(
            Grid::try_new(cols, 2),
            Err(SimError::Configuration(ConfigError::TooLarge { cols, rows: 2 }))
        );
        assert!(matches!(
            Grid::try_new(usize::MAX, usize::MAX),
            Err(SimError::Configuration(ConfigError::TooLarge { .. }))
        ));
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_zero() {
        let _ = Grid::new(0, 0);
    }

    #[test]
    fn test_out_of_range_access() {
        let mut grid = Grid::new(3, 2);
        assert_eq!(
            grid.get(3, 0),
            Err(SimError::IndexOutOfBounds {
                x: 3,
                y: 0,
                cols: 3,
                rows: 2
            })
        );
        assert!(grid.set(0, 2, Cell::Alive).is_err());
        assert!(grid.toggle(9, 9).is_err());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_set_and_toggle() {
        let mut grid = Grid::new(4, 4);
        grid.set(1, 2, Cell::Alive).unwrap();
        assert_eq!(grid.get(1, 2), Ok(Cell::Alive));
        assert_eq!(grid.get(2, 1), Ok(Cell::Dead));

        assert_eq!(grid.toggle(1, 2), Ok(Cell::Dead));
        assert_eq!(grid.toggle(3, 3), Ok(Cell::Alive));
        assert_eq!(grid.population(), 1);
    }

    #[test]
    fn test_wrap_negative_and_overflow() {
        let grid = Grid::new(5, 3);
        assert_eq!(grid.wrap(-1, -1), (4, 2));
        assert_eq!(grid.wrap(5, 3), (0, 0));
        assert_eq!(grid.wrap(-6, 7), (4, 1));
    }

    #[test]
    fn test_set_wrapped() {
        let mut grid = Grid::new(5, 3);
        grid.set_wrapped(-1, 3, Cell::Alive);
        assert_eq!(grid.get(4, 0), Ok(Cell::Alive));
        assert_eq!(grid.get_wrapped(9, -3), Cell::Alive);
    }

    #[test]
    fn test_from_rows_and_display() {
        let text = [".#..", "..#.", "###."];
        let grid = Grid::from_rows(&text).unwrap();
        assert_eq!(grid.dimensions(), (4, 3));
        assert_eq!(grid.get(1, 0), Ok(Cell::Alive));
        assert_eq!(grid.get(0, 2), Ok(Cell::Alive));
        assert_eq!(grid.get(3, 2), Ok(Cell::Dead));
        assert_eq!(grid.to_string(), ".#..\n..#.\n###.\n");

        let alive: Vec<_> = grid.alive_cells().collect();
        assert_eq!(alive, vec![(0, 2), (1, 0), (1, 2), (2, 1), (2, 2)]);
    }

    #[test]
    fn test_from_rows_rejects_bad_text() {
        assert_eq!(
            Grid::from_rows(&["##", "#"]),
            Err(SimError::Configuration(ConfigError::MalformedText { line: 1 }))
        );
        assert!(Grid::from_rows(&["#x"]).is_err());
        assert!(Grid::from_rows(&[]).is_err());
    }

    #[test]
    fn test_clear() {
        let mut grid = Grid::from_rows(&["##", "##"]).unwrap();
        assert_eq!(grid.population(), 4);
        grid.clear();
        assert!(grid.is_empty());
    }

    proptest! {
        #[test]
        fn prop_new_grid_all_dead(cols in 1usize..40, rows in 1usize..40) {
            let grid = Grid::new(cols, rows);
            prop_assert_eq!(grid.population(), 0);
            for x in 0..cols {
                for y in 0..rows {
                    prop_assert_eq!(grid.get(x, y), Ok(Cell::Dead));
                }
            }
        }

        #[test]
        fn prop_double_toggle_restores(cols in 1usize..20, rows in 1usize..20, x in 0usize..20, y in 0usize..20) {
            let mut grid = Grid::new(cols, rows);
            let x = x % cols;
            let y = y % rows;
            grid.toggle(x, y).unwrap();
            grid.toggle(x, y).unwrap();
            prop_assert!(grid.is_empty());
        }
    }
}

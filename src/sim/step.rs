//! Generational update (B3/S23)
//!
//! The next generation is always written into a separate buffer; the grid
//! being read is never mutated mid-step.

use super::grid::{Cell, Grid};

/// Offsets of the eight Moore neighbors
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Count live neighbors of `(x, y)`, wrapping around the grid edges
pub fn count_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let (x, y) = (x as isize, y as isize);
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|(dx, dy)| grid.get_wrapped(x + dx, y + dy).is_alive())
        .count() as u8
}

/// Conway's rule for a single cell
#[inline]
pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
    match (cell, neighbors) {
        (Cell::Dead, 3) => Cell::Alive,
        (Cell::Alive, n) if !(2..=3).contains(&n) => Cell::Dead,
        (cell, _) => cell,
    }
}

/// Compute the next generation into `next`, which must match `current`'s
/// dimensions. Every cell of `next` is overwritten.
pub fn step_into(current: &Grid, next: &mut Grid) {
    assert_eq!(
        current.dimensions(),
        next.dimensions(),
        "step buffers must share dimensions"
    );

    let rows = current.rows();
    for (i, out) in next.cells_mut().iter_mut().enumerate() {
        let (x, y) = (i / rows, i % rows);
        let neighbors = count_neighbors(current, x, y);
        *out = next_state(current.cells()[i], neighbors);
    }
}

/// Compute the next generation as a fresh grid
pub fn step(current: &Grid) -> Grid {
    let mut next = Grid::new(current.cols(), current.rows());
    step_into(current, &mut next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid_with(cols: usize, rows: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(cols, rows);
        for &(x, y) in alive {
            grid.set(x, y, Cell::Alive).unwrap();
        }
        grid
    }

    fn alive(grid: &Grid) -> Vec<(usize, usize)> {
        let mut cells: Vec<_> = grid.alive_cells().collect();
        cells.sort();
        cells
    }

    #[test]
    fn test_rule_table() {
        assert_eq!(next_state(Cell::Dead, 3), Cell::Alive);
        for n in [0, 1, 2, 4, 5, 8] {
            assert_eq!(next_state(Cell::Dead, n), Cell::Dead);
        }
        assert_eq!(next_state(Cell::Alive, 2), Cell::Alive);
        assert_eq!(next_state(Cell::Alive, 3), Cell::Alive);
        for n in [0, 1, 4, 5, 6, 7, 8] {
            assert_eq!(next_state(Cell::Alive, n), Cell::Dead);
        }
    }

    #[test]
    fn test_birth_with_three_neighbors() {
        let grid = grid_with(6, 6, &[(1, 1), (2, 1), (3, 1)]);
        let next = step(&grid);
        // (2, 0) and (2, 2) each see exactly three
        assert_eq!(next.get(2, 0), Ok(Cell::Alive));
        assert_eq!(next.get(2, 2), Ok(Cell::Alive));
    }

    #[test]
    fn test_no_birth_with_two_or_four_neighbors() {
        let two = grid_with(8, 8, &[(3, 3), (5, 3)]);
        assert_eq!(count_neighbors(&two, 4, 4), 2);
        assert_eq!(step(&two).get(4, 4), Ok(Cell::Dead));

        let four = grid_with(8, 8, &[(3, 3), (5, 3), (3, 5), (5, 5)]);
        assert_eq!(count_neighbors(&four, 4, 4), 4);
        assert_eq!(step(&four).get(4, 4), Ok(Cell::Dead));
    }

    #[test]
    fn test_survival_and_death() {
        // Lone cell dies of underpopulation
        let lone = grid_with(6, 6, &[(2, 2)]);
        assert!(step(&lone).is_empty());

        // One neighbor: both die
        let pair = grid_with(6, 6, &[(2, 2), (3, 2)]);
        assert!(step(&pair).is_empty());

        // Center of a plus has four neighbors and dies
        let plus = grid_with(9, 9, &[(4, 4), (3, 4), (5, 4), (4, 3), (4, 5)]);
        assert_eq!(count_neighbors(&plus, 4, 4), 4);
        assert_eq!(step(&plus).get(4, 4), Ok(Cell::Dead));

        // Corner of an L-tromino has two neighbors and survives
        let tromino = grid_with(6, 6, &[(2, 2), (3, 2), (2, 3)]);
        assert_eq!(count_neighbors(&tromino, 2, 2), 2);
        assert_eq!(step(&tromino).get(2, 2), Ok(Cell::Alive));
    }

    #[test]
    fn test_toroidal_wraparound() {
        let grid = grid_with(10, 8, &[(0, 0), (9, 7)]);
        assert_eq!(count_neighbors(&grid, 0, 0), 1);
        assert_eq!(count_neighbors(&grid, 9, 7), 1);
        // Cell on the opposite edge sees both across the seam
        assert_eq!(count_neighbors(&grid, 9, 0), 2);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid_with(12, 12, &[(5, 5), (6, 5), (7, 5)]);
        let vertical = step(&horizontal);
        assert_eq!(alive(&vertical), vec![(6, 4), (6, 5), (6, 6)]);
        assert_eq!(step(&vertical), horizontal);
    }

    #[test]
    fn test_block_is_still_life() {
        let block = grid_with(10, 10, &[(4, 4), (5, 4), (4, 5), (5, 5)]);
        let mut grid = block.clone();
        for _ in 0..10 {
            grid = step(&grid);
            assert_eq!(grid, block);
        }
    }

    #[test]
    fn test_glider_crosses_seam() {
        // Glider near the bottom-right corner keeps its population as it wraps
        let mut grid = grid_with(8, 8, &[(6, 5), (7, 6), (5, 7), (6, 7), (7, 7)]);
        for _ in 0..16 {
            grid = step(&grid);
            assert_eq!(grid.population(), 5);
        }
        // Four periods move it (+4, +4), across both seams
        let expected = grid_with(8, 8, &[(2, 1), (3, 2), (1, 3), (2, 3), (3, 3)]);
        assert_eq!(grid, expected);
    }

    #[test]
    fn test_step_into_overwrites_buffer() {
        let grid = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
        let mut scratch = Grid::from_rows(&["#####"; 5]).unwrap();
        step_into(&grid, &mut scratch);
        assert_eq!(scratch, step(&grid));
    }

    #[test]
    #[should_panic]
    fn test_step_into_dimension_mismatch() {
        let grid = Grid::new(4, 4);
        let mut scratch = Grid::new(4, 5);
        step_into(&grid, &mut scratch);
    }

    proptest! {
        #[test]
        fn prop_empty_grid_stays_empty(cols in 1usize..30, rows in 1usize..30, steps in 1usize..6) {
            let mut grid = Grid::new(cols, rows);
            for _ in 0..steps {
                grid = step(&grid);
                prop_assert!(grid.is_empty());
            }
        }

        #[test]
        fn prop_step_is_deterministic(
            cells in proptest::collection::vec((0usize..16, 0usize..16), 0..60)
        ) {
            let grid = grid_with(16, 16, &cells);
            prop_assert_eq!(step(&grid), step(&grid));
            prop_assert_eq!(step(&grid).dimensions(), (16, 16));
        }
    }
}

//! Geometry for grid rendering
//!
//! All positions are in canvas pixels with the origin at the top-left.

use glam::Vec2;

use super::vertex::Vertex;
use crate::cell_origin;
use crate::sim::Grid;

/// Vertices per cell quad (two triangles)
pub const VERTICES_PER_CELL: usize = 6;

/// Axis-aligned filled rectangle as two triangles
pub fn quad(origin: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; VERTICES_PER_CELL] {
    let top_left = origin;
    let top_right = origin + Vec2::new(size.x, 0.0);
    let bottom_left = origin + Vec2::new(0.0, size.y);
    let bottom_right = origin + size;

    [
        Vertex::at(top_left, color),
        Vertex::at(bottom_left, color),
        Vertex::at(top_right, color),
        Vertex::at(top_right, color),
        Vertex::at(bottom_left, color),
        Vertex::at(bottom_right, color),
    ]
}

/// One quad per live cell
pub fn live_cells(grid: &Grid, cell_size: u32, color: [f32; 4]) -> Vec<Vertex> {
    let size = Vec2::splat(cell_size as f32);
    let mut vertices = Vec::with_capacity(grid.population() * VERTICES_PER_CELL);

    for (x, y) in grid.alive_cells() {
        vertices.extend_from_slice(&quad(cell_origin(x, y, cell_size), size, color));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Cell;

    const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    #[test]
    fn test_quad_corners() {
        let q = quad(Vec2::new(10.0, 20.0), Vec2::new(5.0, 5.0), BLACK);
        let xs: Vec<f32> = q.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = q.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 15.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 25.0);
    }

    #[test]
    fn test_live_cells_one_quad_each() {
        let mut grid = Grid::new(8, 8);
        assert!(live_cells(&grid, 10, BLACK).is_empty());

        grid.set(2, 3, Cell::Alive).unwrap();
        grid.set(7, 7, Cell::Alive).unwrap();
        let vertices = live_cells(&grid, 10, BLACK);
        assert_eq!(vertices.len(), 2 * VERTICES_PER_CELL);
        assert_eq!(vertices[0].position, [20.0, 30.0]);
        assert_eq!(vertices[VERTICES_PER_CELL + 5].position, [80.0, 80.0]);
    }
}

//! Simulation error types

use thiserror::Error;

/// Invalid grid or seeding configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be non-zero (got {cols}x{rows})")]
    ZeroDimension { cols: usize, rows: usize },
    /// Cell count does not fit in memory
    #[error("{cols}x{rows} grid is too large")]
    TooLarge { cols: usize, rows: usize },
    /// Grid cannot host a pattern without it overlapping itself across the wrap
    #[error("{cols}x{rows} grid is too small for a {min_cols}x{min_rows} pattern")]
    GridTooSmall {
        cols: usize,
        rows: usize,
        min_cols: usize,
        min_rows: usize,
    },
    /// ASCII grid text with uneven rows or characters other than `#` and `.`
    #[error("malformed grid text on line {line}")]
    MalformedText { line: usize },
    #[error("no built-in pattern named {0:?}")]
    UnknownPattern(String),
    #[error("cell size must be at least 1 pixel")]
    InvalidCellSize,
    #[error("fill density {0} must be between 0.0 and 1.0")]
    InvalidDensity(f32),
}

/// Errors raised by grid access and seeding
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Coordinate outside `[0, cols) x [0, rows)` passed without wrapping
    #[error("cell ({x}, {y}) is outside the {cols}x{rows} grid")]
    IndexOutOfBounds {
        x: usize,
        y: usize,
        cols: usize,
        rows: usize,
    },
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
}

pub type SimResult<T> = Result<T, SimError>;

//! Error types for grid construction, maze generation and path queries.
//!
//! Configuration problems are fatal and surface before any work starts, while query errors are
//! recoverable: the caller may simply pick other cells and ask again.

use thiserror::Error;

/// Fatal configuration and construction errors.
///
/// This enumeration covers every way a grid, generator or simulation can refuse to be built, along
/// with the tick limit imposed on generation by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The grid has a zero dimension.
    #[error("grid dimensions must be at least 1x1, got {columns}x{rows}")]
    EmptyGrid {
        /// Requested number of columns.
        columns: usize,
        /// Requested number of rows.
        rows: usize,
    },
    /// The grid has an even dimension, which leaves the validity criterion ambiguous.
    #[error("grid dimensions must be odd, got {columns}x{rows}")]
    EvenDimension {
        /// Requested number of columns.
        columns: usize,
        /// Requested number of rows.
        rows: usize,
    },
    /// The grid has more cells than can be stored, or a dimension too wide for the terminal.
    #[error("grid of {columns}x{rows} cells is too large")]
    GridTooLarge {
        /// Requested number of columns.
        columns: usize,
        /// Requested number of rows.
        rows: usize,
    },
    /// No carver was requested.
    #[error("at least one carver is required")]
    NoCarvers,
    /// Generation hit the caller's tick limit before the grid became valid.
    #[error("maze did not converge within {ticks} ticks")]
    DidNotConverge {
        /// Number of ticks performed before giving up.
        ticks: u64,
    },
    /// A textual grid layout has rows of different lengths.
    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A textual grid layout contains a symbol other than `.` or `#`.
    #[error("unknown cell symbol {symbol:?} at ({x}, {y})")]
    UnknownCell {
        /// Column of the symbol.
        x: usize,
        /// Row of the symbol.
        y: usize,
        /// The symbol itself.
        symbol: char,
    },
    /// A textual grid layout walls off the origin, which every grid keeps open.
    #[error("layout must keep the origin (0, 0) open")]
    ClosedOrigin,
}

/// Recoverable errors reported by path queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A query endpoint is a wall or lies outside the grid.
    #[error("invalid endpoint ({x}, {y}): cell is a wall or out of bounds")]
    InvalidEndpoint {
        /// Column of the rejected endpoint.
        x: usize,
        /// Row of the rejected endpoint.
        y: usize,
    },
    /// The source cannot reach the target through open cells.
    #[error("no path found from {from:?} to {to:?}")]
    NoPath {
        /// Source cell of the query.
        from: (usize, usize),
        /// Target cell of the query.
        to: (usize, usize),
    },
}

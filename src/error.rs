use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building or loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error("board {width}x{height} must be at least one cell of size {cell_size}")]
    EmptyBoard {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error("board {width}x{height} is not a multiple of cell size {cell_size}")]
    MisalignedBoard {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error("board of {columns}x{rows} cells is too large")]
    BoardTooLarge { columns: u32, rows: u32 },

    #[error("initial snake length {length} does not fit a board {columns} cells wide")]
    SnakeTooLong { length: usize, columns: i32 },

    #[error("initial snake length must be at least 1")]
    EmptySnake,

    #[error("{0} must not be empty")]
    EmptyTable(&'static str),

    #[error("speed {0} steps/s is not positive")]
    InvalidSpeed(u32),

    #[error("speed {speed} steps/s is above the maximum of {max}")]
    SpeedTooHigh { speed: u32, max: u32 },

    #[error("{field} index {index} is out of range (only {len} entries)")]
    IndexOutOfRange {
        field: &'static str,
        index: usize,
        len: usize,
    },

    #[error("failed to read config file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

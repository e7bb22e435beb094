//! Error types for grid ingestion and solution rendering

use std::path::PathBuf;
use thiserror::Error;

/// Raised when a puzzle grid cannot be built from its source
#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read grid file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("row {row} has length {found}, expected {expected} (all rows must have the same length)")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("negative clue {value} at ({row}, {col})")]
    NegativeClue { row: usize, col: usize, value: i64 },

    #[error("blank line at row {row} inside the grid")]
    BlankLine { row: usize },

    #[error("invalid token '{token}' at ({row}, {col})")]
    InvalidToken {
        row: usize,
        col: usize,
        token: String,
    },
}

/// Raised when a model cannot be mapped back onto the grid
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("model does not assign variable {variable} (cell ({row}, {col}))")]
    IncompleteModel {
        variable: i32,
        row: usize,
        col: usize,
    },
}

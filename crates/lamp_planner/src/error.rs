use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid lamp profile: {message}")]
    InvalidProfile { message: String },

    #[error("Cell ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfGrid {
        x: usize,
        y: usize,
        cols: usize,
        rows: usize,
    },

    #[error("Invalid mask at line {line}, column {column}: unexpected {found:?}")]
    MaskChar {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("Mask does not fit the {cols}x{rows} grid")]
    MaskSize { cols: usize, rows: usize },

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

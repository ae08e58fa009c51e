//! Errors surfaced by the command-line host.

use std::path::PathBuf;

use playbook_core::{BoardError, PlacementError};
use playbook_render::RendererError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Board error: {0}")]
    Board(#[from] BoardError),
    #[error("Render error: {0}")]
    Render(#[from] RendererError),
    #[error("Script step {index} failed: {source}")]
    Step {
        index: usize,
        #[source]
        source: PlacementError,
    },
    #[error("Invalid surface size {0}x{1}")]
    InvalidSize(f64, f64),
}

pub type AppResult<T> = Result<T, AppError>;

//! Error types for the CLI.

use std::path::PathBuf;

use graph_walk_core::GraphError;
use thiserror::Error;

/// CLI-specific result type.
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("no graph document specified. Use --graph or set GRAPH_WALK_GRAPH")]
    NoGraphSpecified,

    #[error("graph document not found: {0}")]
    FileNotFound(PathBuf),

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid {param} '{value}': {reason}")]
    InvalidArgument {
        param: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("loaded graph uses {used_mb}MB, exceeds max_memory_mb={max_mb}MB")]
    MemoryLimit { used_mb: usize, max_mb: u32 },
}

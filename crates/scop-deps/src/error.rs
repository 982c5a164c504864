use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("input file not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("command not found: '{tool}'")]
    ToolNotFound { tool: String },
    #[error("{tool} failed:\n{stderr}")]
    ToolFailed { tool: String, stderr: String },
    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber { line: usize, text: String },
}

pub type Result<T> = std::result::Result<T, DepsError>;

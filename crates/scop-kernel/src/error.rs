use thiserror::Error;

use crate::shape::Shape;

#[derive(Error, Debug)]
pub enum KernelError {
    #[error("shape mismatch: expected {expected} elements, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapesDiffer { expected: Shape, got: Shape },
    #[error("matmul dimension mismatch: [{m}x{k}] @ [{k2}x{n}]")]
    DimensionMismatch {
        m: usize,
        k: usize,
        k2: usize,
        n: usize,
    },
    #[error("expected a square matrix, got [{rows}x{cols}]")]
    NotSquare { rows: usize, cols: usize },
    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("invalid dimension: {0}")]
    InvalidDimension(usize),
    #[error("invalid tile size: {0}")]
    InvalidTile(usize),
    #[error("invalid thread count: {0}")]
    InvalidThreads(usize),
    #[error("unknown kernel: {0}")]
    UnknownKernel(String),
    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("{kernel} differs from reference at [{row}][{col}]: expected {expected}, got {got}")]
    NotEquivalent {
        kernel: String,
        row: usize,
        col: usize,
        expected: String,
        got: String,
    },
}

pub type Result<T> = std::result::Result<T, KernelError>;

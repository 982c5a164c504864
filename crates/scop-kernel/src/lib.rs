//! `scop-kernel` - Dense integer matrix multiplication around a delimited
//! polyhedral region.
//!
//! This crate provides:
//! - A `Matrix` type holding row-major integer data
//! - A `Kernel` trait for interchangeable loop-nest implementations
//! - The reference nest (`scop::matmul_scop`) and legal transformations of it
//!   (interchanged, tiled, parallel)
//! - A caller-owned `Workspace` replacing process-wide operand storage
//! - Equivalence checks against the mathematical definition

pub mod config;
pub mod cpu;
pub mod element;
pub mod error;
pub mod kernel;
pub mod matrix;
pub mod scop;
pub mod shape;
pub mod verify;
pub mod workspace;

// Re-export primary types at the crate root for convenience.
pub use config::MatmulConfig;
pub use cpu::{InterchangedKernel, KernelKind, ParallelKernel, ReferenceKernel, TiledKernel};
pub use element::{Element, ElementKind};
pub use error::{KernelError, Result};
pub use kernel::Kernel;
pub use matrix::Matrix;
pub use shape::Shape;
pub use verify::Mismatch;
pub use workspace::{run_config, InitPolicy, Workspace, DEFAULT_DIM};

//! `scop-deps` - Dependence-cycle detection for polyhedral regions.
//!
//! Clan extracts a SCoP from annotated C, Candl computes its data
//! dependences. This crate reads Candl's output, builds one dependence graph
//! per array variable, finds the strongly connected components, and reports
//! which statement pairs inside a cycle share loop iterators.

pub mod candl;
pub mod cycle;
pub mod error;
pub mod graph;
pub mod pipeline;

pub use candl::{Edge, StatementInfo, StatementTable};
pub use cycle::{Cell, CycleMatrix, VariableReport};
pub use error::{DepsError, Result};
pub use graph::{DependenceGraph, VariableGraphs};
pub use pipeline::{analyze_file, analyze_str, Toolchain};

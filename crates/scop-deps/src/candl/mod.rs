pub mod edge;
pub mod statement;

mod scan;

pub use edge::Edge;
pub use statement::{StatementInfo, StatementTable, STATEMENT_INFO_HEADER};

/// Statement name of a graph node id such as `S2_r1_C` (everything before
/// the first underscore).
pub fn statement_of(node: &str) -> &str {
    node.split('_').next().unwrap_or(node)
}

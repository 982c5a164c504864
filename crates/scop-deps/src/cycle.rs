use std::collections::{BTreeSet, HashMap};
use std::fmt;

use crate::candl::{statement_of, StatementTable};
use crate::graph::DependenceGraph;

/// One cell of a [`CycleMatrix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Diagonal, or both statements sit at the same loop depth. Printed `-1`.
    Excluded,
    /// The two references are not on a common cycle. Printed `0`.
    Acyclic,
    /// On a common cycle; the iterators both statements share, sorted.
    Shared(Vec<String>),
    /// On a common cycle but the statements share no iterator. Printed `-`.
    Disjoint,
}

impl Cell {
    /// True for cells that lie on a dependence cycle.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Cell::Shared(_) | Cell::Disjoint)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Excluded => f.pad("-1"),
            Cell::Acyclic => f.pad("0"),
            Cell::Shared(iters) => f.pad(&iters.join(",")),
            Cell::Disjoint => f.pad("-"),
        }
    }
}

/// Pairwise cycle relation between the references of one variable.
///
/// Rows and columns are the graph's nodes in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleMatrix {
    nodes: Vec<String>,
    cells: Vec<Cell>,
}

impl CycleMatrix {
    /// Classify every ordered pair of references of `graph`.
    ///
    /// Pairs inside a strongly connected component of more than one node get
    /// the iterators their statements have in common. Afterwards the diagonal
    /// and every pair whose statements have the same depth in `table` are
    /// marked [`Cell::Excluded`]; two statements missing from `table` count
    /// as having the same depth.
    pub fn build(graph: &DependenceGraph, table: &StatementTable) -> CycleMatrix {
        let mut nodes = graph.nodes().to_vec();
        nodes.sort();
        let n = nodes.len();
        let position: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut cells = vec![Cell::Acyclic; n * n];

        for component in graph.strongly_connected_components() {
            if component.len() < 2 {
                continue;
            }
            for &u in &component {
                for &v in &component {
                    if u == v {
                        continue;
                    }
                    let (u, v) = (graph.node(u), graph.node(v));
                    let i = position[u];
                    let j = position[v];
                    cells[i * n + j] = shared_iterators(table, u, v);
                }
            }
        }

        for i in 0..n {
            let depth_i = table.depth(statement_of(&nodes[i]));
            for j in 0..n {
                if i == j || depth_i == table.depth(statement_of(&nodes[j])) {
                    cells[i * n + j] = Cell::Excluded;
                }
            }
        }

        CycleMatrix { nodes, cells }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.nodes.len() + col]
    }

    /// Cell for the pair of node names, if both exist.
    pub fn lookup(&self, row: &str, col: &str) -> Option<&Cell> {
        let i = self.nodes.iter().position(|n| n == row)?;
        let j = self.nodes.iter().position(|n| n == col)?;
        Some(self.get(i, j))
    }

    /// Pairs that lie on a cycle and were not excluded.
    pub fn cyclic_pairs(&self) -> impl Iterator<Item = (&str, &str, &Cell)> {
        let n = self.nodes.len();
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_cyclic())
            .map(move |(idx, cell)| {
                (
                    self.nodes[idx / n].as_str(),
                    self.nodes[idx % n].as_str(),
                    cell,
                )
            })
    }
}

fn shared_iterators(table: &StatementTable, u: &str, v: &str) -> Cell {
    let iters_u: BTreeSet<&str> = table
        .iterators(statement_of(u))
        .iter()
        .map(String::as_str)
        .collect();
    let iters_v: BTreeSet<&str> = table
        .iterators(statement_of(v))
        .iter()
        .map(String::as_str)
        .collect();
    let common: Vec<String> = iters_u
        .intersection(&iters_v)
        .map(|s| s.to_string())
        .collect();
    if common.is_empty() {
        Cell::Disjoint
    } else {
        Cell::Shared(common)
    }
}

impl fmt::Display for CycleMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header: Vec<String> = self.nodes.iter().map(|n| format!("{:>10}", n)).collect();
        writeln!(f, "      {}", header.join(" "))?;

        let n = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            let row: Vec<String> = self.cells[i * n..(i + 1) * n]
                .iter()
                .map(|cell| format!("{:>10}", cell))
                .collect();
            writeln!(f, "{:>6} {}", node, row.join(" "))?;
        }
        Ok(())
    }
}

/// Cycle matrix of one variable, printed under a banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableReport {
    pub variable: String,
    pub matrix: CycleMatrix,
}

impl fmt::Display for VariableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "--- Variable '{}' ---", self.variable)?;
        write!(f, "{}", self.matrix)
    }
}

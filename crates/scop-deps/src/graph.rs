use std::collections::HashMap;

use log::trace;

use crate::candl::Edge;

/// Directed dependence graph between the array references of one variable.
///
/// Nodes are kept in first-seen order and successor lists hold each target
/// once, in the order it was first added.
#[derive(Debug, Clone, Default)]
pub struct DependenceGraph {
    nodes: Vec<String>,
    index: HashMap<String, usize>,
    successors: Vec<Vec<usize>>,
}

impl DependenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `name`, inserting it if it is new.
    pub fn add_node(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.nodes.len();
        self.nodes.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.successors.push(Vec::new());
        id
    }

    /// Add `source -> target`, creating either node if needed.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let s = self.add_node(source);
        let t = self.add_node(target);
        if !self.successors[s].contains(&t) {
            self.successors[s].push(t);
        }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> &str {
        &self.nodes[id]
    }

    pub fn id(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn successors(&self, id: usize) -> &[usize] {
        &self.successors[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Strongly connected components (Tarjan), as lists of node ids.
    ///
    /// Roots are visited in node order and successors in insertion order.
    /// Uses an explicit call stack, so graph depth is not limited by the
    /// thread's stack size.
    pub fn strongly_connected_components(&self) -> Vec<Vec<usize>> {
        let n = self.nodes.len();
        let mut index: Vec<Option<usize>> = vec![None; n];
        let mut lowlink = vec![0usize; n];
        let mut on_stack = vec![false; n];
        let mut stack: Vec<usize> = Vec::new();
        let mut sccs: Vec<Vec<usize>> = Vec::new();
        let mut next_index = 0usize;

        // (node, position of the next successor to visit)
        let mut call: Vec<(usize, usize)> = Vec::new();

        for root in 0..n {
            if index[root].is_some() {
                continue;
            }

            index[root] = Some(next_index);
            lowlink[root] = next_index;
            next_index += 1;
            stack.push(root);
            on_stack[root] = true;
            call.push((root, 0));

            while let Some(&(v, pos)) = call.last() {
                if let Some(&w) = self.successors[v].get(pos) {
                    if let Some(top) = call.last_mut() {
                        top.1 += 1;
                    }
                    match index[w] {
                        None => {
                            index[w] = Some(next_index);
                            lowlink[w] = next_index;
                            next_index += 1;
                            stack.push(w);
                            on_stack[w] = true;
                            call.push((w, 0));
                        }
                        Some(w_index) if on_stack[w] => {
                            lowlink[v] = lowlink[v].min(w_index);
                        }
                        Some(_) => {}
                    }
                    continue;
                }

                call.pop();
                if let Some(&(parent, _)) = call.last() {
                    lowlink[parent] = lowlink[parent].min(lowlink[v]);
                }

                if index[v] == Some(lowlink[v]) {
                    let mut component = Vec::new();
                    while let Some(w) = stack.pop() {
                        on_stack[w] = false;
                        component.push(w);
                        if w == v {
                            break;
                        }
                    }
                    sccs.push(component);
                }
            }
        }

        sccs
    }
}

/// One dependence graph per array variable, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct VariableGraphs {
    graphs: Vec<(String, DependenceGraph)>,
    index: HashMap<String, usize>,
}

impl VariableGraphs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build graphs from every dependence found in `text`, one line at a time.
    pub fn parse(text: &str) -> VariableGraphs {
        let mut graphs = VariableGraphs::new();
        for (idx, line) in text.lines().enumerate() {
            if let Some(edge) = Edge::find(line) {
                trace!("line {}: {:?}", idx + 1, edge);
                graphs.add(&edge);
            }
        }
        graphs
    }

    pub fn from_edges<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> VariableGraphs {
        let mut graphs = VariableGraphs::new();
        for edge in edges {
            graphs.add(edge);
        }
        graphs
    }

    /// Add `edge` to the graph of its variable.
    pub fn add(&mut self, edge: &Edge) {
        let slot = match self.index.get(&edge.variable) {
            Some(&slot) => slot,
            None => {
                let slot = self.graphs.len();
                self.graphs
                    .push((edge.variable.clone(), DependenceGraph::new()));
                self.index.insert(edge.variable.clone(), slot);
                slot
            }
        };
        self.graphs[slot]
            .1
            .add_edge(&edge.source_node(), &edge.target_node());
    }

    pub fn get(&self, variable: &str) -> Option<&DependenceGraph> {
        self.index.get(variable).map(|&slot| &self.graphs[slot].1)
    }

    /// Variables and their graphs, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DependenceGraph)> {
        self.graphs.iter().map(|(var, g)| (var.as_str(), g))
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

//! Feature graph construction, cycle detection and topological sorting.
//!
//! Keyed nodes keep their insertion order and each node's successors keep
//! edge insertion order, which makes cycle witnesses and sort results
//! reproducible for a given construction order.

use std::collections::{HashMap, HashSet};

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

/// A directed graph over feature names, backed by petgraph.
///
/// `successors(a)` lists the targets of every `a -> b` edge in the order the
/// edges were added. A name that only ever appears as an edge target is still
/// a node of the graph, but it is not keyed: it has no adjacency entry of its
/// own and is never a traversal root.
#[derive(Debug, Clone, Default)]
pub struct FeatureGraph {
    graph: DiGraph<String, ()>,
    /// Lookup from feature name to node index, keyed or not.
    index: HashMap<String, NodeIndex>,
    /// Keyed nodes in insertion order.
    keys: Vec<NodeIndex>,
}

impl FeatureGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyed node. Adding an existing keyed node is a no-op; keying a
    /// node first seen as an edge target appends it to the key order.
    pub fn add_node(&mut self, name: &str) {
        let idx = self.node_index(name);
        if !self.keys.contains(&idx) {
            self.keys.push(idx);
        }
    }

    /// Add an edge `from -> to`, keying `from` if needed.
    ///
    /// Parallel edges are kept, matching repeated declarations.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_node(from);
        let from = self.node_index(from);
        let to = self.node_index(to);
        self.graph.add_edge(from, to, ());
    }

    /// Whether `name` has its own adjacency entry.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some_and(|idx| self.keys.contains(&idx))
    }

    pub fn has_edge(&self, from: &str, to: &str) -> bool {
        match (self.find(from), self.find(to)) {
            (Some(from), Some(to)) => self.graph.find_edge(from, to).is_some(),
            _ => false,
        }
    }

    /// Successors of `name` in edge order; empty for unknown names.
    pub fn successors(&self, name: &str) -> Vec<&str> {
        match self.find(name) {
            Some(idx) => self
                .successor_indices(idx)
                .into_iter()
                .map(|t| self.graph[t].as_str())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Keyed nodes in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(move |&idx| self.graph[idx].as_str())
    }

    /// Every node: keys first, then the unkeyed edge targets in the order
    /// they entered the graph.
    pub fn nodes(&self) -> Vec<&str> {
        let keyed: HashSet<NodeIndex> = self.keys.iter().copied().collect();
        self.keys()
            .chain(
                self.graph
                    .node_indices()
                    .filter(|idx| !keyed.contains(idx))
                    .map(|idx| self.graph[idx].as_str()),
            )
            .collect()
    }

    /// `(node, successors)` pairs for keyed nodes, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<&str>)> {
        self.keys().map(move |node| (node, self.successors(node)))
    }

    /// Number of keyed nodes.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Render the graph in Graphviz DOT format, one labelled node per feature.
    pub fn to_dot(&self) -> String {
        format!("{:?}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    fn find(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    fn node_index(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    /// petgraph walks a node's edges newest first.
    fn successor_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut targets: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        targets.reverse();
        targets
    }
}

impl<K, V, T> FromIterator<(K, V)> for FeatureGraph
where
    K: AsRef<str>,
    V: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut graph = FeatureGraph::new();
        for (node, targets) in iter {
            graph.add_node(node.as_ref());
            for target in targets {
                graph.add_edge(node.as_ref(), target.as_ref());
            }
        }
        graph
    }
}

/// Search the graph for a cycle.
///
/// Returns `None` for an acyclic graph. Otherwise returns the cycle as a
/// path that starts and ends with the same node, e.g. `[a, b, a]`; a
/// self-loop yields `[a, a]`. Roots are tried in key order and successors
/// in edge order, so the same graph always yields the same witness.
pub fn detect_cycle(graph: &FeatureGraph) -> Option<Vec<String>> {
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    for &root in &graph.keys {
        if visited.contains(&root) {
            continue;
        }
        let mut path = vec![root];
        if let Some(cycle) = dfs_cycle(graph, root, &mut path, &mut visited) {
            tracing::debug!("cycle detected: {}", cycle.join(" -> "));
            return Some(cycle);
        }
    }
    None
}

fn dfs_cycle(
    graph: &FeatureGraph,
    node: NodeIndex,
    path: &mut Vec<NodeIndex>,
    visited: &mut HashSet<NodeIndex>,
) -> Option<Vec<String>> {
    visited.insert(node);
    for target in graph.successor_indices(node) {
        if let Some(start) = path.iter().position(|&n| n == target) {
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .map(|&n| graph.graph[n].clone())
                .collect();
            cycle.push(graph.graph[target].clone());
            return Some(cycle);
        }
        // Fully explored from an earlier root or sibling: no cycle through it.
        if visited.contains(&target) {
            continue;
        }
        path.push(target);
        if let Some(cycle) = dfs_cycle(graph, target, path, visited) {
            return Some(cycle);
        }
        path.pop();
    }
    None
}

/// Kahn-style sort over nodes with in-degree zero.
///
/// Free nodes are kept on a stack: the most recently freed node is emitted
/// next. For every edge `u -> v`, `u` is emitted before `v`; since resolver
/// graphs point from a feature to its prerequisites, callers reverse the
/// result to get prerequisites first.
///
/// On a cyclic graph the result is missing the nodes on or behind the
/// cycle. Run [`detect_cycle`] first.
pub fn topsort(graph: &FeatureGraph) -> Vec<String> {
    let mut count: HashMap<NodeIndex, usize> = graph
        .graph
        .node_indices()
        .map(|idx| {
            let incoming = graph
                .graph
                .neighbors_directed(idx, Direction::Incoming)
                .count();
            (idx, incoming)
        })
        .collect();

    let mut free: Vec<NodeIndex> = graph
        .keys
        .iter()
        .copied()
        .filter(|idx| count[idx] == 0)
        .collect();
    let mut result = Vec::with_capacity(graph.graph.node_count());

    while let Some(node) = free.pop() {
        result.push(graph.graph[node].clone());
        for target in graph.successor_indices(node) {
            if let Some(c) = count.get_mut(&target) {
                *c -= 1;
                if *c == 0 {
                    free.push(target);
                }
            }
        }
    }
    result
}

/// Render `graph` in Graphviz DOT format.
pub fn to_dot(graph: &FeatureGraph) -> String {
    graph.to_dot()
}

//! Path-mode labeling by depth-first edge traversal.
//!
//! A maximal chain of DFS tree edges (each starting where the previous one
//! ended) is one path mode. Any jump back to an earlier node starts a new mode.

use crate::element::ElementKind;
use crate::error::SimError;

use super::types::{Graph, NodeId};

/// DFS tree edges from `source`: successors in insertion order, an edge is
/// taken only if its target was not visited yet.
pub fn dfs_tree_edges(graph: &Graph, source: NodeId) -> Vec<usize> {
    let mut visited = vec![false; graph.nodes.len()];
    visited[source.0] = true;
    let mut tree = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = vec![(source, 0)];
    while let Some(top) = stack.last_mut() {
        let (node, cursor) = *top;
        let Some(&eidx) = graph.adj[node.0].get(cursor) else {
            stack.pop();
            continue;
        };
        top.1 += 1;
        let to = graph.edges[eidx].to;
        if !visited[to.0] {
            visited[to.0] = true;
            tree.push(eidx);
            stack.push((to, 0));
        }
    }
    tree
}

/// Assign path-mode labels to the DFS tree edges from `source`; returns the mode count.
///
/// All previous labels are cleared. Edges outside the DFS tree stay `None`.
pub fn label_paths(graph: &mut Graph, source: NodeId) -> usize {
    for e in graph.edges.iter_mut() {
        e.label = None;
    }
    let tree = dfs_tree_edges(graph, source);
    let mut label = 0usize;
    let mut prev_target: Option<NodeId> = None;
    for eidx in tree {
        let edge = &mut graph.edges[eidx];
        if prev_target.is_some_and(|t| t != edge.from) {
            label += 1;
        }
        edge.label = Some(label);
        prev_target = Some(edge.to);
    }
    let modes = label + 1;
    tracing::debug!(modes, "path modes labeled");
    modes
}

/// The single source node; labeling has no notion of several mode spaces.
pub fn unique_source(graph: &Graph) -> Result<NodeId, SimError> {
    let sources = graph.nodes_of_kind(ElementKind::Source);
    match sources.as_slice() {
        [] => Err(SimError::NoSource),
        [only] => Ok(*only),
        many => Err(SimError::MultiSourceUnsupported { count: many.len() }),
    }
}

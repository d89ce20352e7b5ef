//! Arena graph of elements and ray segments.
//!
//! Nodes and edges live in flat vectors; adjacency lists hold edge indices in
//! insertion order, which the labeler and propagator rely on.

use std::collections::HashMap;
use std::fmt;

use crate::element::{Element, ElementId, ElementKind, Orientation};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Ray segment `from → to` leaving `from` in `direction`.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub direction: Orientation,
    /// Manhattan distance between the endpoints.
    pub weight: usize,
    /// Path mode; `None` until labeled (or when the DFS never traverses it).
    pub label: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub nodes: Vec<Element>,
    pub edges: Vec<Edge>,
    pub adj: Vec<Vec<usize>>,      // edge indices out of node k
    pub incoming: Vec<Vec<usize>>, // edge indices into node k
    index: HashMap<ElementId, NodeId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `element` unless a node with the same id exists; returns its node id.
    ///
    /// Walls are never shared: every ray leaving the grid ends in its own node,
    /// even when two rays exit at the same cell. `node_id` does not index walls.
    pub fn add_element(&mut self, element: Element) -> NodeId {
        let is_wall = element.kind == ElementKind::Wall;
        if !is_wall {
            if let Some(&id) = self.index.get(&element.id()) {
                return id;
            }
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(element);
        self.adj.push(Vec::new());
        self.incoming.push(Vec::new());
        if !is_wall {
            self.index.insert(element.id(), id);
        }
        id
    }

    /// Add both endpoints (if new) and an unlabeled edge between them.
    pub fn add_connection(&mut self, from: Element, to: Element, direction: Orientation) -> usize {
        let a = self.add_element(from);
        let b = self.add_element(to);
        let eidx = self.edges.len();
        self.edges.push(Edge {
            from: a,
            to: b,
            direction,
            weight: from.pos.manhattan(&to.pos),
            label: None,
        });
        self.adj[a.0].push(eidx);
        self.incoming[b.0].push(eidx);
        eidx
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Element {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn node_id(&self, id: &ElementId) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    pub fn out_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.adj[id.0].iter().map(move |&e| &self.edges[e])
    }

    pub fn in_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.incoming[id.0].iter().map(move |&e| &self.edges[e])
    }

    /// Direct successors, one entry per outgoing edge.
    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(id).map(|e| e.to)
    }

    /// Node ids of the given kind, in insertion order.
    pub fn nodes_of_kind(&self, kind: ElementKind) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind == kind)
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    pub fn count(&self, kind: ElementKind) -> usize {
        self.nodes.iter().filter(|e| e.kind == kind).count()
    }

    pub fn sources(&self) -> Vec<NodeId> {
        self.nodes_of_kind(ElementKind::Source)
    }

    /// Edge between two nodes (first inserted, if several).
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.out_edges(from).find(|e| e.to == to)
    }

    pub fn is_acyclic(&self) -> bool {
        self.find_cycle().is_none()
    }

    /// A directed cycle as a node sequence `v0 → v1 → … → v0` (closing node omitted).
    ///
    /// Iterative three-color DFS over all nodes in index order.
    pub fn find_cycle(&self) -> Option<Vec<NodeId>> {
        #[derive(Clone, Copy, PartialEq)]
        enum Color {
            White,
            Gray,
            Black,
        }
        let n = self.nodes.len();
        let mut color = vec![Color::White; n];
        let mut parent: Vec<Option<NodeId>> = vec![None; n];
        for root in 0..n {
            if color[root] != Color::White {
                continue;
            }
            color[root] = Color::Gray;
            let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
            while let Some(top) = stack.last_mut() {
                let (u, cursor) = *top;
                let Some(&eidx) = self.adj[u].get(cursor) else {
                    color[u] = Color::Black;
                    stack.pop();
                    continue;
                };
                top.1 += 1;
                let v = self.edges[eidx].to.0;
                match color[v] {
                    Color::White => {
                        color[v] = Color::Gray;
                        parent[v] = Some(NodeId(u));
                        stack.push((v, 0));
                    }
                    Color::Gray => {
                        // Back edge u → v: walk parents from u up to v.
                        let mut cycle = vec![NodeId(u)];
                        let mut cur = NodeId(u);
                        while cur.0 != v {
                            match parent[cur.0] {
                                Some(p) => {
                                    cycle.push(p);
                                    cur = p;
                                }
                                None => break,
                            }
                        }
                        cycle.reverse();
                        return Some(cycle);
                    }
                    Color::Black => {}
                }
            }
        }
        None
    }

    /// Labels of all edges in insertion order.
    pub fn labels(&self) -> Vec<Option<usize>> {
        self.edges.iter().map(|e| e.label).collect()
    }
}

impl fmt::Display for Graph {
    /// One line per edge: `from -> to  w=<weight>  |label>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.edges {
            let label = match e.label {
                Some(l) => format!("|{l}>"),
                None => "|?>".to_string(),
            };
            writeln!(
                f,
                "{} -> {}  w={}  {}",
                self.node(e.from).id(),
                self.node(e.to).id(),
                e.weight,
                label
            )?;
        }
        Ok(())
    }
}

//! Graph construction by breadth-first ray tracing from the sources.

use std::collections::{HashSet, VecDeque};

use crate::element::{Element, ElementId, Orientation};
use crate::error::SimError;
use crate::grid::GridAccessor;

use super::types::Graph;

/// Build the connectivity graph reachable from `sources`.
///
/// Every element is expanded once, with the travel direction of the first ray
/// that reached it. Rays leaving the grid end in a `Wall` node. Fails with
/// `SimError::Topology` when the result contains a directed cycle.
pub fn build_graph<G: GridAccessor + ?Sized>(
    grid: &G,
    sources: &[Element],
) -> Result<Graph, SimError> {
    let mut graph = Graph::new();
    let mut visited: HashSet<ElementId> = HashSet::new();
    let mut queue: VecDeque<(Element, Orientation)> = VecDeque::new();
    for &source in sources {
        if visited.insert(source.id()) {
            graph.add_element(source);
            queue.push_back((source, source.orientation));
        }
        while let Some((element, travel)) = queue.pop_front() {
            for dir in element.next_directions(travel) {
                let next = scan_next(grid, &element, dir);
                let eidx = graph.add_connection(element, next, dir);
                tracing::trace!(
                    from = %element.id(),
                    to = %next.id(),
                    weight = graph.edges[eidx].weight,
                    "edge"
                );
                if visited.insert(next.id()) {
                    queue.push_back((next, dir));
                }
            }
        }
    }
    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "connectivity graph built"
    );
    if let Some(cycle) = graph.find_cycle() {
        let cycle = cycle.into_iter().map(|n| graph.node(n).id()).collect();
        return Err(SimError::Topology { cycle });
    }
    Ok(graph)
}

/// First element met when leaving `from` in `dir`, or a `Wall` on the last
/// in-bounds cell (possibly `from`'s own cell) when the ray exits the grid.
pub fn scan_next<G: GridAccessor + ?Sized>(grid: &G, from: &Element, dir: Orientation) -> Element {
    let (rows, cols) = grid.size();
    let mut pos = from.pos;
    while let Some(next) = pos.step(dir, rows, cols) {
        pos = next;
        if let Some(found) = grid.item_at(pos) {
            return found;
        }
    }
    Element::wall(pos)
}

//! A* search over the road graph, using the effective weight of each edge
//! as its cost. Unlike petgraph's own astar, the search records which of
//! several parallel edges was taken at each hop, so that the route can be
//! summarised using the edges which were actually travelled.

use ordered_float::OrderedFloat;
use petgraph::graph::{EdgeIndex, EdgeReference, NodeIndex};
use petgraph::visit::EdgeRef;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::common::error::{RoutingError, RoutingResult};
use crate::common::graph_data::{EdgeData, RoadGraph};
use crate::routing::heuristic::{Heuristic, node_data};

/// An ordered sequence of nodes from origin to destination, along with the
/// edge taken between each consecutive pair. The cost is the sum of the
/// effective edge weights at the time the route was planned.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub nodes: Vec<NodeIndex>,
    pub edges: Vec<EdgeIndex>,
    pub cost: f64,
}

impl Route {
    /// A route which starts and ends at the same node
    pub fn trivial(node: NodeIndex) -> Route {
        Route {
            nodes: vec![node],
            edges: Vec::new(),
            cost: 0.0,
        }
    }

    /// `true` if the origin and destination are the same node
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn origin(&self) -> Option<NodeIndex> {
        self.nodes.first().copied()
    }

    pub fn destination(&self) -> Option<NodeIndex> {
        self.nodes.last().copied()
    }
}

/// Frontier entries are ordered on estimated total cost, then on the order
/// in which they were pushed. Reverse turns the max-heap into a min-heap.
type FrontierEntry = Reverse<(OrderedFloat<f64>, u64, NodeIndex)>;

/// Find the cheapest route from origin to destination under the current
/// edge weights. Edge weights must not be negative, and the heuristic must
/// be admissible and consistent for the result to be optimal.
///
/// Among frontier entries with equal priority, the one pushed first is
/// expanded first. Outgoing edges are relaxed in order of target node and
/// then edge key, so the search is fully deterministic and prefers the
/// lowest keyed of several equally cheap parallel edges.
pub fn find_route<H: Heuristic>(
    graph: &RoadGraph,
    origin: NodeIndex,
    destination: NodeIndex,
    heuristic: &H,
) -> RoutingResult<Route> {
    node_data(graph, origin)?;
    node_data(graph, destination)?;

    if origin == destination {
        return Ok(Route::trivial(origin));
    }

    let node_count = graph.node_count();
    // best[n] = cheapest known cost from the origin to n
    let mut best = vec![f64::INFINITY; node_count];
    // prev_edge[n] = edge used to reach n along the cheapest known route
    let mut prev_edge: Vec<Option<EdgeIndex>> = vec![None; node_count];
    let mut closed = vec![false; node_count];

    let mut frontier = BinaryHeap::<FrontierEntry>::new();
    let mut pushed: u64 = 0;

    best[origin.index()] = 0.0;
    let estimate = heuristic.estimate(graph, origin, destination)?;
    frontier.push(Reverse((OrderedFloat(estimate), pushed, origin)));

    while let Some(Reverse((_, _, node))) = frontier.pop() {
        if node == destination {
            let cost = best[node.index()];
            return reconstruct(graph, &prev_edge, origin, destination, cost);
        }

        // Skip stale entries for nodes which have already been expanded
        if closed[node.index()] {
            continue;
        }
        closed[node.index()] = true;

        let cost_to_node = best[node.index()];

        let mut erefs: Vec<EdgeReference<EdgeData>> =
            graph.edges(node).collect();
        erefs.sort_by_key(|eref| (eref.target(), eref.weight().key));

        for eref in erefs {
            let next = eref.target();
            if closed[next.index()] {
                continue;
            }

            let cost = cost_to_node + eref.weight().weight;
            if cost < best[next.index()] {
                best[next.index()] = cost;
                prev_edge[next.index()] = Some(eref.id());

                pushed += 1;
                let estimate = heuristic.estimate(graph, next, destination)?;
                let priority = OrderedFloat(cost + estimate);
                frontier.push(Reverse((priority, pushed, next)));
            }
        }
    }

    Err(RoutingError::NoPathFound {
        from: origin.index(),
        to: destination.index(),
    })
}

/// Walk back from the destination along the recorded edges to recover the
/// full route
fn reconstruct(
    graph: &RoadGraph,
    prev_edge: &[Option<EdgeIndex>],
    origin: NodeIndex,
    destination: NodeIndex,
    cost: f64,
) -> RoutingResult<Route> {
    let mut nodes = vec![destination];
    let mut edges = Vec::new();

    let mut cur = destination;
    while cur != origin {
        let edge_inx = prev_edge[cur.index()].ok_or_else(|| {
            RoutingError::NodeNotFound(format!(
                "no predecessor for index {}",
                cur.index()
            ))
        })?;
        let (src, _) = graph
            .edge_endpoints(edge_inx)
            .ok_or(RoutingError::EdgeNotFound(edge_inx.index()))?;
        edges.push(edge_inx);
        nodes.push(src);
        cur = src;
    }

    nodes.reverse();
    edges.reverse();

    Ok(Route { nodes, edges, cost })
}

#[cfg(test)]
mod tests {

    use approx::assert_relative_eq;
    use petgraph::algo::dijkstra;

    use super::*;
    use crate::routing::fixtures::{
        add_edge, add_node, diamond_graph, grid_graph,
    };
    use crate::routing::heuristic::EuclideanHeuristic;

    /// Every hop of a route must follow the recorded edge
    fn assert_connected(graph: &RoadGraph, route: &Route) {
        assert_eq!(route.edges.len() + 1, route.nodes.len());
        for (i, edge_inx) in route.edges.iter().enumerate() {
            let (src, dst) = graph.edge_endpoints(*edge_inx).unwrap();
            assert_eq!(src, route.nodes[i]);
            assert_eq!(dst, route.nodes[i + 1]);
        }
    }

    #[test]
    fn test_shortest_route() {
        let (graph, [a, b, _, _, e]) = diamond_graph();

        let route = find_route(&graph, a, e, &EuclideanHeuristic).unwrap();

        assert_eq!(route.nodes, vec![a, b, e]);
        assert_relative_eq!(route.cost, 350.0);
        assert_connected(&graph, &route);
    }

    /// Routes always start at the origin and end at the destination
    #[test]
    fn test_endpoints() {
        let graph = grid_graph(4);
        let origin = NodeIndex::new(0);

        for target in graph.node_indices() {
            let route = find_route(&graph, origin, target, &EuclideanHeuristic)
                .unwrap();
            assert_eq!(route.origin(), Some(origin));
            assert_eq!(route.destination(), Some(target));
            assert_connected(&graph, &route);
        }
    }

    /// The cost of every route should match a full Dijkstra search from the
    /// same origin
    #[test]
    fn test_matches_dijkstra() {
        let graph = grid_graph(6);

        for origin in [0, 7, 20, 35].map(NodeIndex::new) {
            let baseline =
                dijkstra(&graph, origin, None, |eref| eref.weight().weight);

            for target in graph.node_indices() {
                let route =
                    find_route(&graph, origin, target, &EuclideanHeuristic);
                match baseline.get(&target) {
                    Some(cost) => {
                        let route = route.unwrap();
                        assert_relative_eq!(route.cost, *cost, epsilon = 1e-9);
                        let summed: f64 =
                            route.edges.iter().map(|e| graph[*e].weight).sum();
                        assert_relative_eq!(summed, *cost, epsilon = 1e-9);
                    }
                    None => assert!(matches!(
                        route,
                        Err(RoutingError::NoPathFound { .. })
                    )),
                }
            }
        }
    }

    #[test]
    fn test_trivial_route() {
        let (graph, [a, ..]) = diamond_graph();

        let route = find_route(&graph, a, a, &EuclideanHeuristic).unwrap();

        assert_eq!(route, Route::trivial(a));
        assert!(route.is_trivial());
        assert_eq!(route.cost, 0.0);
    }

    #[test]
    fn test_missing_origin() {
        let (graph, [_, _, _, _, e]) = diamond_graph();

        let result =
            find_route(&graph, NodeIndex::new(99), e, &EuclideanHeuristic);

        assert!(matches!(result, Err(RoutingError::NodeNotFound(_))));
    }

    #[test]
    fn test_missing_destination() {
        let (graph, [a, ..]) = diamond_graph();

        let result =
            find_route(&graph, a, NodeIndex::new(99), &EuclideanHeuristic);

        assert!(matches!(result, Err(RoutingError::NodeNotFound(_))));
    }

    /// Edges are directed, so the diamond cannot be travelled backwards
    #[test]
    fn test_no_path() {
        let (graph, [a, _, _, _, e]) = diamond_graph();

        let result = find_route(&graph, e, a, &EuclideanHeuristic);

        match result {
            Err(RoutingError::NoPathFound { from, to }) => {
                assert_eq!(from, e.index());
                assert_eq!(to, a.index());
            }
            _ => panic!("Should not have found a path"),
        }
    }

    #[test]
    fn test_disconnected() {
        let mut graph = RoadGraph::new();
        let a = add_node(&mut graph, 1, 0.0, 0.0);
        let b = add_node(&mut graph, 2, 10.0, 0.0);

        let result = find_route(&graph, a, b, &EuclideanHeuristic);

        assert!(matches!(result, Err(RoutingError::NoPathFound { .. })));
    }

    /// Two routes of identical cost, with no heuristic guidance. The entry
    /// pushed first is expanded first, so the route via B wins
    #[test]
    fn test_tie_break_insertion_order() {
        let mut graph = RoadGraph::new();
        let a = add_node(&mut graph, 1, 0.0, 0.0);
        let b = add_node(&mut graph, 2, 0.0, 0.0);
        let c = add_node(&mut graph, 3, 0.0, 0.0);
        let d = add_node(&mut graph, 4, 0.0, 0.0);

        // Insert C's edges first, to check that insertion into the graph
        // does not influence the outcome
        add_edge(&mut graph, a, c, 10.0);
        add_edge(&mut graph, a, b, 10.0);
        add_edge(&mut graph, c, d, 10.0);
        add_edge(&mut graph, b, d, 10.0);

        for _ in 0..3 {
            let route = find_route(&graph, a, d, &EuclideanHeuristic).unwrap();
            assert_eq!(route.nodes, vec![a, b, d]);
        }
    }

    /// X and Y are both reached at a cost of 10, but X is pushed first. Y
    /// has the lower node index, so the route via X shows that ties follow
    /// push order rather than node order
    #[test]
    fn test_tie_break_push_order_over_index() {
        let mut graph = RoadGraph::new();
        let a = add_node(&mut graph, 1, 0.0, 0.0);
        let m = add_node(&mut graph, 2, 0.0, 0.0);
        let y = add_node(&mut graph, 3, 0.0, 0.0);
        let x = add_node(&mut graph, 4, 0.0, 0.0);
        let d = add_node(&mut graph, 5, 0.0, 0.0);

        add_edge(&mut graph, a, x, 10.0);
        add_edge(&mut graph, a, m, 5.0);
        add_edge(&mut graph, m, y, 5.0);
        add_edge(&mut graph, x, d, 10.0);
        add_edge(&mut graph, y, d, 10.0);
        assert!(y.index() < x.index());

        let route = find_route(&graph, a, d, &EuclideanHeuristic).unwrap();

        assert_eq!(route.nodes, vec![a, x, d]);
        assert_relative_eq!(route.cost, 20.0);
    }

    mod test_parallel_edges {

        use super::*;

        /// The cheaper of two parallel edges is taken, even if it was not
        /// the first to be added
        #[test]
        fn test_cheaper_edge() {
            let mut graph = RoadGraph::new();
            let a = add_node(&mut graph, 1, 0.0, 0.0);
            let b = add_node(&mut graph, 2, 50.0, 0.0);
            let _slow = add_edge(&mut graph, a, b, 100.0);
            let fast = add_edge(&mut graph, a, b, 60.0);

            let route = find_route(&graph, a, b, &EuclideanHeuristic).unwrap();

            assert_eq!(route.edges, vec![fast]);
            assert_eq!(graph[fast].key, 1);
            assert_relative_eq!(route.cost, 60.0);
        }

        /// Equally cheap parallel edges resolve to the lowest key
        #[test]
        fn test_equal_edges() {
            let mut graph = RoadGraph::new();
            let a = add_node(&mut graph, 1, 0.0, 0.0);
            let b = add_node(&mut graph, 2, 50.0, 0.0);
            let first = add_edge(&mut graph, a, b, 80.0);
            let _second = add_edge(&mut graph, a, b, 80.0);

            let route = find_route(&graph, a, b, &EuclideanHeuristic).unwrap();

            assert_eq!(route.edges, vec![first]);
        }
    }
}

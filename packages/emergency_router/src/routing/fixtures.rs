//! Small hand built graphs shared by the routing tests

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::common::graph_data::{EdgeData, NodeData, RoadGraph};

/// Add a node at the provided planar position. Latitude & longitude are
/// derived from the position so that geometry can be checked too
pub fn add_node(graph: &mut RoadGraph, id: i64, x: f64, y: f64) -> NodeIndex {
    graph.add_node(NodeData {
        id,
        lat: y / 1000.0,
        lon: x / 1000.0,
        x,
        y,
    })
}

/// Add a directed edge, keyed by the number of edges which already connect
/// the same pair of nodes
pub fn add_edge(
    graph: &mut RoadGraph,
    src: NodeIndex,
    dst: NodeIndex,
    length: f64,
) -> EdgeIndex {
    let key = graph.edges_connecting(src, dst).count() as u32;
    let data = EdgeData {
        src: graph[src].id,
        dst: graph[dst].id,
        key,
        highway: "residential".to_string(),
        length,
        weight: length,
    };
    graph.add_edge(src, dst, data)
}

/// Five nodes laid out as a diamond between A and E.
///
/// ```text
///        B ----------300m---------- E
///       / 50m                      /
///      A                          /
///       \ 140m                   / 140m
///        C -------140m------- D
/// ```
///
/// The northern route A-B-E is 350m, but B-E is over the congestion
/// threshold. The southern route A-C-D-E is 420m, with every edge under the
/// threshold. Returns [A, B, C, D, E].
pub fn diamond_graph() -> (RoadGraph, [NodeIndex; 5]) {
    let mut graph = RoadGraph::new();

    let a = add_node(&mut graph, 1, 0.0, 0.0);
    let b = add_node(&mut graph, 2, 10.0, 0.0);
    let c = add_node(&mut graph, 3, 100.0, -60.0);
    let d = add_node(&mut graph, 4, 200.0, -60.0);
    let e = add_node(&mut graph, 5, 300.0, 0.0);

    add_edge(&mut graph, a, b, 50.0);
    add_edge(&mut graph, b, e, 300.0);
    add_edge(&mut graph, a, c, 140.0);
    add_edge(&mut graph, c, d, 140.0);
    add_edge(&mut graph, d, e, 140.0);

    (graph, [a, b, c, d, e])
}

/// A square grid of nodes 100m apart, connected in both directions to
/// their horizontal, vertical and diagonal neighbours. Edge lengths vary
/// deterministically but are never shorter than the straight line
/// between their ends
pub fn grid_graph(size: usize) -> RoadGraph {
    let mut graph = RoadGraph::new();

    let mut nodes = Vec::with_capacity(size * size);
    for row in 0..size {
        for col in 0..size {
            let id = (row * size + col) as i64;
            nodes.push(add_node(
                &mut graph,
                id,
                col as f64 * 100.0,
                row as f64 * 100.0,
            ));
        }
    }

    let inx = |row: usize, col: usize| nodes[row * size + col];
    for row in 0..size {
        for col in 0..size {
            let jitter = ((row * 7 + col * 13) % 11) as f64 * 17.0;
            if col + 1 < size {
                let len = 100.0 + jitter;
                add_edge(&mut graph, inx(row, col), inx(row, col + 1), len);
                let back = len + 5.0;
                add_edge(&mut graph, inx(row, col + 1), inx(row, col), back);
            }
            if row + 1 < size {
                let len = 100.0 + (jitter * 3.0) % 80.0;
                add_edge(&mut graph, inx(row, col), inx(row + 1, col), len);
                add_edge(&mut graph, inx(row + 1, col), inx(row, col), len);
            }
            if row + 1 < size && col + 1 < size {
                let len = 141.5 + jitter * 2.0;
                let (src, dst) = (inx(row, col), inx(row + 1, col + 1));
                add_edge(&mut graph, src, dst, len);
            }
        }
    }

    graph
}

use crate::common::error::{RoutingError, RoutingResult};
use crate::common::graph_data::{EdgeData, NodeData, RoadGraph};
use crate::loading::postgres::{EdgeRow, NodeRow};
use geo::{Distance, Haversine, Point};
use petgraph::graph::NodeIndex;
use petgraph::visit::IntoNodeReferences;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

/// Nodes in the graph need to have associated lat/lon data. To achieve this,
/// we keep only the node rows which are used by at least one of the edges,
/// preserving the order in which they were loaded. Nodes are projected onto
/// a plane centred on `centre` as they are unpacked.
pub fn generate_node_list(
    nodes: Vec<NodeRow>,
    edges: &[EdgeRow],
    centre: &Point,
) -> Vec<NodeData> {
    let mut used_nodes = FxHashSet::<i64>::default();

    for edge in edges {
        used_nodes.insert(edge.src);
        used_nodes.insert(edge.dst);
    }

    nodes
        .into_iter()
        .filter(|node| used_nodes.contains(&node.id))
        .map(|node| node.prepare(centre))
        .collect()
}

/// Based on the data which has been loaded in from PostgreSQL, generate a
/// petgraph graph which can be used for route planning. Parallel edges
/// between the same pair of nodes are all kept, and are keyed in the order
/// they were loaded
pub fn create_graph(
    nodes: Vec<NodeRow>,
    edges: Vec<EdgeRow>,
    centre: &Point,
) -> RoadGraph {
    let mut graph = RoadGraph::with_capacity(nodes.len(), edges.len());

    let node_list = generate_node_list(nodes, &edges, centre);

    // Add all nodes to the graph, create mapping from OSM IDs to node indexes
    let mut node_id_inx_map = FxHashMap::<i64, NodeIndex>::default();
    for node_data in node_list {
        let node_inx = graph.add_node(node_data);
        node_id_inx_map.insert(node_data.id, node_inx);
    }

    let mut next_key = FxHashMap::<(i64, i64), u32>::default();
    let mut skipped = 0;
    for edge in edges {
        // Fetch indexes for src and dst as they appear in the graph
        let (Some(src_inx), Some(dst_inx)) = (
            node_id_inx_map.get(&edge.src),
            node_id_inx_map.get(&edge.dst),
        ) else {
            skipped += 1;
            continue;
        };

        let key = next_key.entry((edge.src, edge.dst)).or_insert(0);
        let edge_data: EdgeData = edge.prepare(*key);
        *key += 1;

        graph.add_edge(*src_inx, *dst_inx, edge_data);
    }

    if skipped > 0 {
        debug!("Skipped {skipped} edges with unknown endpoints");
    }
    info!(
        "Built graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    graph
}

/// Determine the closest node in the graph to the provided point, based on
/// haversine distance. Where two nodes are equally close, the first one
/// added to the graph is returned
pub fn nearest_node(
    graph: &RoadGraph,
    point: Point,
) -> RoutingResult<NodeIndex> {
    // Set variables to keep track of the current closest node
    let mut smallest_dist = f64::MAX;
    let mut closest_inx: Option<NodeIndex> = None;

    for (node_inx, node_data) in graph.node_references() {
        let node_coords = Point::new(node_data.lon, node_data.lat);
        let dist = Haversine::distance(point, node_coords);

        if dist < smallest_dist {
            smallest_dist = dist;
            closest_inx = Some(node_inx);
        }
    }

    closest_inx.ok_or_else(|| {
        RoutingError::NodeNotFound(format!(
            "no node near ({}, {})",
            point.y(),
            point.x()
        ))
    })
}

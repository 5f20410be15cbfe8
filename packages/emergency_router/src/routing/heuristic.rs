//! Heuristics which guide the A* search towards the destination

use petgraph::graph::NodeIndex;

use crate::common::error::{RoutingError, RoutingResult};
use crate::common::graph_data::{NodeData, RoadGraph};

/// An estimate of the remaining cost between two nodes. For the search to
/// return optimal routes, implementations must never overestimate the true
/// cost (admissible) and must satisfy the triangle inequality (consistent).
pub trait Heuristic {
    fn estimate(
        &self,
        graph: &RoadGraph,
        from: NodeIndex,
        to: NodeIndex,
    ) -> RoutingResult<f64>;
}

/// Scale applied to planar distances before they are used as estimates.
/// The equirectangular projection stretches east-west distances by about
/// `tan(lat) * dlat` relative to the great circle distance, which is under
/// 0.04% within a few kilometres of the default origin. A 0.1% reduction
/// keeps estimates below the true distance for graphs up to roughly 10km
/// across at mid latitudes.
pub const PROJECTION_SLACK: f64 = 0.999;

/// Straight line distance between the planar coordinates of two nodes,
/// reduced by PROJECTION_SLACK. Road segments are never shorter than the
/// great circle distance between their ends, and congestion only increases
/// weights, so this is admissible under both the base and congested
/// weights.
#[derive(Debug, Default, Clone, Copy)]
pub struct EuclideanHeuristic;

impl EuclideanHeuristic {
    pub fn distance(a: &NodeData, b: &NodeData) -> f64 {
        (a.x - b.x).hypot(a.y - b.y)
    }
}

impl Heuristic for EuclideanHeuristic {
    fn estimate(
        &self,
        graph: &RoadGraph,
        from: NodeIndex,
        to: NodeIndex,
    ) -> RoutingResult<f64> {
        let a = node_data(graph, from)?;
        let b = node_data(graph, to)?;
        Ok(EuclideanHeuristic::distance(a, b) * PROJECTION_SLACK)
    }
}

/// Fetch the data for a node, or fail with NodeNotFound
pub(crate) fn node_data(
    graph: &RoadGraph,
    inx: NodeIndex,
) -> RoutingResult<&NodeData> {
    graph.node_weight(inx).ok_or_else(|| {
        RoutingError::NodeNotFound(format!("index {}", inx.index()))
    })
}

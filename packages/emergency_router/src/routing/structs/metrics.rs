//! Defines the struct which contains high level information about a route
//! (total distance and estimated travel time), and the functions which
//! calculate it

use serde::Serialize;

use crate::common::error::{RoutingError, RoutingResult};
use crate::common::graph_data::RoadGraph;
use crate::routing::astar::Route;

/// Container for the overall metrics of a planned route
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteMetrics {
    pub length_m: f64,
    pub time_min: f64,
}

impl RouteMetrics {
    /// Metrics for a route which never leaves the origin
    pub fn zero() -> RouteMetrics {
        RouteMetrics {
            length_m: 0.0,
            time_min: 0.0,
        }
    }
}

/// Sum the physical length of each edge travelled along the route, and
/// estimate the time taken to cover it at a constant speed in metres per
/// second. Congestion only affects the weights used while searching, so the
/// reported length is always the real distance travelled.
pub fn summarize(
    graph: &RoadGraph,
    route: &Route,
    speed_mps: f64,
) -> RoutingResult<RouteMetrics> {
    if route.nodes.len() < 2 {
        return Err(RoutingError::EmptyRoute);
    }

    let mut length_m = 0.0;
    for edge_inx in route.edges.iter() {
        let edata = graph
            .edge_weight(*edge_inx)
            .ok_or(RoutingError::EdgeNotFound(edge_inx.index()))?;
        length_m += edata.length;
    }

    Ok(RouteMetrics {
        length_m,
        time_min: length_m / speed_mps / 60.0,
    })
}

/// As summarize, but a route which starts and ends at the same node is
/// reported as zero distance and zero time rather than as an error
pub fn summarize_or_zero(
    graph: &RoadGraph,
    route: &Route,
    speed_mps: f64,
) -> RoutingResult<RouteMetrics> {
    match summarize(graph, route, speed_mps) {
        Err(RoutingError::EmptyRoute) => Ok(RouteMetrics::zero()),
        other => other,
    }
}

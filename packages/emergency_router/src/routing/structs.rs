pub mod geometry;
pub mod metrics;

use crate::routing::structs::geometry::RouteGeometry;
use crate::routing::structs::metrics::{RouteMetrics, summarize_or_zero};

use serde::Serialize;

use crate::common::error::RoutingResult;
use crate::common::graph_data::RoadGraph;
use crate::routing::astar::Route;

/// Minimal container for a planned route. This holds only the information
/// required by the webapp in order to render and describe it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    pub geometry: RouteGeometry,
    pub metrics: RouteMetrics,
}

impl RouteReport {
    /// Describe a route using the provided graph, assuming a constant travel
    /// speed in metres per second
    pub fn new(
        graph: &RoadGraph,
        route: &Route,
        speed_mps: f64,
    ) -> RoutingResult<RouteReport> {
        Ok(RouteReport {
            geometry: RouteGeometry::from_route(graph, route)?,
            metrics: summarize_or_zero(graph, route, speed_mps)?,
        })
    }
}

/// A labelled point on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

/// Everything the frontend needs to draw and compare the two routes. The
/// congested route is only worth drawing when routes_differ is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResponse {
    pub origin: Marker,
    pub destination: Marker,
    pub base: RouteReport,
    pub congested: RouteReport,
    pub routes_differ: bool,
    pub congested_edges: usize,
}

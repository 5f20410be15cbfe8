//! Plans the pair of routes shown to the user: the shortest route on the
//! physical road network, and the shortest route once simulated congestion
//! has been taken into account.

use geo::Point;
use petgraph::graph::NodeIndex;
use tracing::{debug, info};

use crate::common::config::RouteConfig;
use crate::common::error::RoutingResult;
use crate::common::graph_data::RoadGraph;
use crate::loading::petgraph::nearest_node;
use crate::routing::astar::{Route, find_route};
use crate::routing::congestion::{
    CongestionPolicy, CongestionSet, apply_congestion,
};
use crate::routing::heuristic::{EuclideanHeuristic, Heuristic};
use crate::routing::structs::{Marker, RouteReport, RouteResponse};

/// The two routes planned for a single request. Both routes use the node
/// and edge indices of the base graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub base_route: Route,
    pub congested_route: Route,
    pub congestion: CongestionSet,
}

impl RoutePlan {
    /// `true` if congestion caused a different set of roads to be used
    pub fn routes_differ(&self) -> bool {
        self.base_route.edges != self.congested_route.edges
    }
}

/// Plan a route on the untouched base graph, then plan again on a congested
/// copy of it. The base graph is never modified, so it can be shared between
/// requests.
pub fn plan_routes<H: Heuristic>(
    base: &RoadGraph,
    origin: NodeIndex,
    destination: NodeIndex,
    heuristic: &H,
    policy: &CongestionPolicy,
) -> RoutingResult<RoutePlan> {
    let base_route = find_route(base, origin, destination, heuristic)?;
    debug!(
        "Base route: {} hops, cost {:.1}",
        base_route.edges.len(),
        base_route.cost
    );

    let (congested, congestion) = apply_congestion(base, policy);
    let congested_route =
        find_route(&congested, origin, destination, heuristic)?;
    debug!(
        "Congested route: {} hops, cost {:.1}",
        congested_route.edges.len(),
        congested_route.cost
    );

    Ok(RoutePlan {
        base_route,
        congested_route,
        congestion,
    })
}

/// As plan_routes, but starting from coordinates which are first snapped to
/// the nearest node in the graph
pub fn plan_routes_between<H: Heuristic>(
    base: &RoadGraph,
    origin: Point,
    destination: Point,
    heuristic: &H,
    policy: &CongestionPolicy,
) -> RoutingResult<RoutePlan> {
    let origin_inx = nearest_node(base, origin)?;
    let destination_inx = nearest_node(base, destination)?;

    plan_routes(base, origin_inx, destination_inx, heuristic, policy)
}

/// Plan both routes for a validated request, and describe them in the
/// format expected by the frontend
pub fn plan_for_config(
    graph: &RoadGraph,
    config: &RouteConfig,
) -> RoutingResult<RouteResponse> {
    let plan = plan_routes_between(
        graph,
        config.origin,
        config.destination_point(),
        &EuclideanHeuristic,
        &config.congestion,
    )?;

    let base =
        RouteReport::new(graph, &plan.base_route, config.base_speed_mps)?;
    let congested = RouteReport::new(
        graph,
        &plan.congested_route,
        config.congested_speed_mps,
    )?;

    info!(
        "{} route to {}: {:.0}m / {:.1}min, with traffic {:.0}m / {:.1}min",
        config.service,
        config.destination.label(),
        base.metrics.length_m,
        base.metrics.time_min,
        congested.metrics.length_m,
        congested.metrics.time_min
    );

    let (dest_lat, dest_lon) = config.destination.coords();

    Ok(RouteResponse {
        origin: Marker {
            label: "Origin".to_string(),
            lat: config.origin.y(),
            lon: config.origin.x(),
        },
        destination: Marker {
            label: config.destination.label(),
            lat: dest_lat,
            lon: dest_lon,
        },
        base,
        congested,
        routes_differ: plan.routes_differ(),
        congested_edges: plan.congestion.len(),
    })
}

//! Defines the struct which contains the physical geometry of a route (i.e.
//! the points it visits), in a format the map frontend can draw directly
use serde::Serialize;

use crate::common::bbox::BBox;
use crate::common::graph_data::RoadGraph;
use crate::common::error::RoutingResult;
use crate::routing::astar::Route;
use crate::routing::heuristic::node_data;

/// Stores the geometry of each route as a polyline of (lat, lon) pairs, along
/// with the bounding box which can be used to set the map viewport
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteGeometry {
    pub coords: Vec<(f64, f64)>,
    pub bbox: Option<BBox>,
}

impl RouteGeometry {
    /// Look up the position of each node on the route
    pub fn from_route(
        graph: &RoadGraph,
        route: &Route,
    ) -> RoutingResult<RouteGeometry> {
        let coords = route
            .nodes
            .iter()
            .map(|inx| {
                node_data(graph, *inx).map(|ndata| (ndata.lat, ndata.lon))
            })
            .collect::<RoutingResult<Vec<(f64, f64)>>>()?;

        let bbox = BBox::from_coords(&coords);

        Ok(RouteGeometry { coords, bbox })
    }
}

//! This module focuses on retrieving data from a postgres database and
//! using it to generate a petgraph graph object. Built graphs are kept in
//! memory for a while, as the same area is requested over and over.

pub mod cache;
pub mod petgraph;
pub mod postgres;

use geo::Point;
use std::future::Future;

use crate::common::error::RoutingResult;
use crate::common::graph_data::RoadGraph;

/// Anything which can build the road network around a point. The graph
/// should cover at least `radius_m` metres in every direction from `centre`,
/// with all edge weights equal to their physical length.
pub trait GraphProvider: Send + Sync + 'static {
    fn build_graph(
        &self,
        centre: Point,
        radius_m: f64,
    ) -> impl Future<Output = RoutingResult<RoadGraph>> + Send;
}

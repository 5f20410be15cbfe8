//! Simulated traffic. Long road segments are assumed to be congested, and
//! the cost of travelling along them is inflated by a fixed multiplier.
//! This stands in for real traffic data, which is not ingested.

use petgraph::graph::EdgeIndex;
use std::collections::BTreeSet;
use tracing::debug;

use crate::common::graph_data::RoadGraph;

/// Edges whose weight was inflated, ordered by edge index
pub type CongestionSet = BTreeSet<EdgeIndex>;

/// Edges strictly longer than `threshold_m` metres are congested, and their
/// weight is multiplied by `multiplier`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CongestionPolicy {
    pub threshold_m: f64,
    pub multiplier: f64,
}

impl Default for CongestionPolicy {
    fn default() -> Self {
        CongestionPolicy {
            threshold_m: 150.0,
            multiplier: 3.0,
        }
    }
}

impl CongestionPolicy {
    /// Whether an edge of the provided physical length is congested
    pub fn is_congested(&self, length: f64) -> bool {
        length > self.threshold_m
    }
}

/// Inflate the weight of every congested edge in the provided graph. Note
/// that this compounds: running it twice over the same graph multiplies the
/// flagged weights twice. Use apply_congestion to derive a congested copy of
/// an untouched graph instead.
pub fn apply_congestion_in_place(
    graph: &mut RoadGraph,
    policy: &CongestionPolicy,
) -> CongestionSet {
    let mut congested = CongestionSet::new();

    for edge_inx in graph.edge_indices() {
        if let Some(edata) = graph.edge_weight_mut(edge_inx) {
            if policy.is_congested(edata.length) {
                edata.weight *= policy.multiplier;
                congested.insert(edge_inx);
            }
        }
    }

    debug!(
        "Congestion applied to {} of {} edges",
        congested.len(),
        graph.edge_count()
    );

    congested
}

/// Create a working copy of the base graph with congestion applied. The base
/// graph is left untouched, so it can be cached and reused across requests.
/// Node and edge indices are the same in both graphs.
pub fn apply_congestion(
    base: &RoadGraph,
    policy: &CongestionPolicy,
) -> (RoadGraph, CongestionSet) {
    let mut working = base.clone();
    let congested = apply_congestion_in_place(&mut working, policy);
    (working, congested)
}

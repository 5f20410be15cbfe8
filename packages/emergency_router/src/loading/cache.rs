//! In-memory cache of base road networks. Only graphs with their original
//! edge weights are stored here; congestion is always applied to a copy.

use geo::Point;
use rustc_hash::FxHashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info};

use crate::common::error::{RoutingError, RoutingResult};
use crate::common::graph_data::RoadGraph;

/// Identifies the area covered by a graph. The centre is stored to the
/// nearest micro-degree and the radius to the nearest metre, so that
/// requests for (almost) the same area share a graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GraphKey {
    lat_e6: i64,
    lon_e6: i64,
    radius_m: i64,
}

impl GraphKey {
    pub fn new(centre: Point, radius_m: f64) -> GraphKey {
        GraphKey {
            lat_e6: (centre.y() * 1e6).round() as i64,
            lon_e6: (centre.x() * 1e6).round() as i64,
            radius_m: radius_m.round() as i64,
        }
    }
}

/// A single cached graph along with the time at which it was loaded. The
/// cell is empty while the first load is in progress, or after it failed
type Slot = Arc<OnceCell<(Arc<RoadGraph>, Instant)>>;

/// Base graphs which have already been built. The map lock is only held
/// while looking up or replacing a slot; loads wait on the slot for their
/// own key, so a slow load never blocks requests for other areas. Entries
/// older than the TTL are rebuilt on next use
pub struct GraphCache {
    ttl: Duration,
    entries: RwLock<FxHashMap<GraphKey, Slot>>,
}

impl GraphCache {
    pub fn new(ttl: Duration) -> GraphCache {
        GraphCache {
            ttl,
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// A slot can be shared if it holds a fresh graph, or has no graph yet
    fn is_usable(&self, slot: &Slot) -> bool {
        match slot.get() {
            Some((_, loaded_at)) => loaded_at.elapsed() < self.ttl,
            None => true,
        }
    }

    /// Find the slot for a key, replacing it if its graph has expired
    async fn slot_for(&self, key: GraphKey) -> Slot {
        {
            let entries = self.entries.read().await;
            if let Some(slot) = entries.get(&key) {
                if self.is_usable(slot) {
                    return Arc::clone(slot);
                }
            }
        }

        let mut entries = self.entries.write().await;
        match entries.get(&key) {
            Some(slot) if self.is_usable(slot) => Arc::clone(slot),
            _ => {
                let slot = Slot::default();
                entries.insert(key, Arc::clone(&slot));
                slot
            }
        }
    }

    /// Fetch the graph for the provided key, calling `loader` to build it if
    /// it is missing or has expired. Concurrent requests for the same key
    /// share a single load. A failed load leaves the slot empty, so the next
    /// request tries again
    pub async fn get_or_load<F, Fut>(
        &self,
        key: GraphKey,
        loader: F,
    ) -> RoutingResult<Arc<RoadGraph>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RoutingResult<RoadGraph>>,
    {
        let slot = self.slot_for(key).await;

        if let Some((graph, _)) = slot.get() {
            debug!("Using cached road network for {key:?}");
            return Ok(Arc::clone(graph));
        }

        let (graph, _) = slot
            .get_or_try_init(move || async move {
                let now = Instant::now();
                let graph = Arc::new(loader().await?);
                info!(
                    "Loaded road network for {key:?} in {:.2?}",
                    now.elapsed()
                );
                Ok::<_, RoutingError>((graph, Instant::now()))
            })
            .await?;

        Ok(Arc::clone(graph))
    }

    /// Drop the graph for a single area, if present
    pub async fn invalidate(&self, key: &GraphKey) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of areas with a loaded graph
    pub async fn len(&self) -> usize {
        let entries = self.entries.read().await;
        entries.values().filter(|slot| slot.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

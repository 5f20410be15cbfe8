//! The functions defined here read in details of all of the nodes and edges
//! required to represent the road network within the search radius of the
//! origin
use crate::common::bbox::BBox;
use crate::common::error::RoutingResult;
use crate::common::graph_data::{EdgeData, NodeData, RoadGraph};
use crate::loading::GraphProvider;
use crate::loading::petgraph::create_graph;
use aho_corasick::AhoCorasick;
use geo::Point;
use sqlx::PgPool;
use tracing::{debug, info};

/// Road classes which can be driven by an emergency vehicle
pub const DRIVE_HIGHWAYS: [&str; 14] = [
    "motorway",
    "motorway_link",
    "trunk",
    "trunk_link",
    "primary",
    "primary_link",
    "secondary",
    "secondary_link",
    "tertiary",
    "tertiary_link",
    "residential",
    "living_street",
    "unclassified",
    "road",
];

/// Container for the raw output of the nodes SQL query
#[derive(sqlx::FromRow, Debug, Clone, Copy, PartialEq)]
pub struct NodeRow {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
}

impl NodeRow {
    /// Unpack the raw node data into a format which can be loaded into the
    /// graph
    pub fn prepare(self, centre: &Point) -> NodeData {
        NodeData::new(self.id, self.lat, self.lon, centre)
    }
}

/// Container for the raw output of the edges SQL query
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct EdgeRow {
    pub src: i64,
    pub dst: i64,
    pub highway: String,
    pub length: f64,
}

impl EdgeRow {
    /// Unpack the raw edge data into a format which can be loaded into the
    /// graph. Effective weight starts out as the physical length
    pub fn prepare(self, key: u32) -> EdgeData {
        EdgeData {
            src: self.src,
            dst: self.dst,
            key,
            highway: self.highway,
            length: self.length,
            weight: self.length,
        }
    }
}

/// Generate a comma-separated, quoted string containing all drivable
/// highway types
fn get_highway_str() -> String {
    let highways: Vec<String> = DRIVE_HIGHWAYS
        .iter()
        .map(|highway| format!("'{highway}'"))
        .collect();
    highways.join(", ")
}

/// Substitute the bounding box (and any extra placeholders) into one of the
/// bundled SQL templates, in a single pass over the template
fn render_query(
    template: &str,
    bbox: &BBox,
    extra: &[(&str, String)],
) -> RoutingResult<String> {
    let ptn_str = bbox.get_partition_list().join(", ");

    let mut patterns = vec![
        "< ptn_str >".to_string(),
        "< min_lat >".to_string(),
        "< min_lon >".to_string(),
        "< max_lat >".to_string(),
        "< max_lon >".to_string(),
    ];
    let mut replace_with = vec![
        ptn_str,
        bbox.min_lat.to_string(),
        bbox.min_lon.to_string(),
        bbox.max_lat.to_string(),
        bbox.max_lon.to_string(),
    ];
    for (pattern, value) in extra {
        patterns.push(pattern.to_string());
        replace_with.push(value.clone());
    }

    let ac = AhoCorasick::new(patterns)?;

    Ok(ac.replace_all(template, &replace_with))
}

/// Generate a SQL query to read in the nodes within the provided bounding box
pub fn generate_nodes_query(bbox: &BBox) -> RoutingResult<String> {
    // This brings the query into the compiled code
    let nodes_base = include_str!("sql/get_nodes.sql");

    render_query(nodes_base, bbox, &[])
}

/// Generate a SQL query to read in the drivable edges which start and end
/// within the provided bounding box
pub fn generate_edges_query(bbox: &BBox) -> RoutingResult<String> {
    let edges_base = include_str!("sql/get_edges.sql");

    render_query(edges_base, bbox, &[("< highway_str >", get_highway_str())])
}

/// Executes the nodes SQL query and returns a vector of NodeRow
pub async fn load_nodes(
    pool: &PgPool,
    bbox: &BBox,
) -> RoutingResult<Vec<NodeRow>> {
    let query = generate_nodes_query(bbox)?;
    let rows: Vec<NodeRow> = sqlx::query_as(&query).fetch_all(pool).await?;
    debug!("Loaded {} node rows", rows.len());
    Ok(rows)
}

/// Executes the edges SQL query and returns a vector of EdgeRow
pub async fn load_edges(
    pool: &PgPool,
    bbox: &BBox,
) -> RoutingResult<Vec<EdgeRow>> {
    let query = generate_edges_query(bbox)?;
    let rows: Vec<EdgeRow> = sqlx::query_as(&query).fetch_all(pool).await?;
    debug!("Loaded {} edge rows", rows.len());
    Ok(rows)
}

/// Reads the road network out of a PostgreSQL database
#[derive(Clone)]
pub struct PgGraphProvider {
    pool: PgPool,
}

impl PgGraphProvider {
    pub fn new(pool: PgPool) -> Self {
        PgGraphProvider { pool }
    }
}

impl GraphProvider for PgGraphProvider {
    async fn build_graph(
        &self,
        centre: Point,
        radius_m: f64,
    ) -> RoutingResult<RoadGraph> {
        let bbox = BBox::from_centre(centre, radius_m);
        info!(
            "Loading road network for {:.4},{:.4} to {:.4},{:.4}",
            bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
        );

        let nodes = load_nodes(&self.pool, &bbox).await?;
        let edges = load_edges(&self.pool, &bbox).await?;

        Ok(create_graph(nodes, edges, &centre))
    }
}

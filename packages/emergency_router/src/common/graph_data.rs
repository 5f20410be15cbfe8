use geo::Point;
use petgraph::{Directed, Graph};

/// Mean radius of the Earth in metres, used for the local planar projection
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Sets the data which will be stored as weights in the petgraph graph. The
/// planar coordinates are metres east (x) and north (y) of the centre point
/// the graph was loaded around
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct NodeData {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub x: f64,
    pub y: f64,
}

impl NodeData {
    /// Create node data for a source node, projecting its coordinates onto
    /// the plane centred on `centre`
    pub fn new(id: i64, lat: f64, lon: f64, centre: &Point) -> NodeData {
        let (x, y) = project(centre, lat, lon);
        NodeData { id, lat, lon, x, y }
    }
}

/// Container for edge metadata which will be stored in the graph. Length is
/// the physical length of the road segment, weight is the cost used when
/// searching and starts out equal to the length
#[derive(Default, Debug, Clone, PartialEq)]
pub struct EdgeData {
    pub src: i64,
    pub dst: i64,
    pub key: u32,
    pub highway: String,
    pub length: f64,
    pub weight: f64,
}

/// Directed multigraph of the road network surrounding the origin
pub type RoadGraph = Graph<NodeData, EdgeData, Directed, u32>;

/// Equirectangular projection of a latitude & longitude onto a plane
/// tangent at `centre`. Over the few kilometres covered by a graph the
/// distortion is well below the accuracy of the road data itself.
pub fn project(centre: &Point, lat: f64, lon: f64) -> (f64, f64) {
    let lat0 = centre.y().to_radians();
    let x = (lon - centre.x()).to_radians() * lat0.cos() * EARTH_RADIUS_M;
    let y = (lat - centre.y()).to_radians() * EARTH_RADIUS_M;
    (x, y)
}

//! Defines a struct to represent a bounding box, which is used to represent
//! a 2d square(ish) on the planet's surface. This is used when reading in
//! the road network around the origin, and also when rendering a completed
//! route, as it sets the viewport on the map

use geo::Point;
use geo::{Destination, Haversine};
use serde::Serialize;

/// A bounding box for geographical data. Contains the minimum and maximum
/// latitudes & longitudes, defining a 'rectangle' on the surface of the Earth
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BBox {
    /// Create a new bounding box based on the north-east and south-west points
    /// of a 'rectangle'
    pub fn from_points(ne: &Point, sw: &Point) -> Self {
        BBox {
            min_lat: sw.y(),
            min_lon: sw.x(),
            max_lat: ne.y(),
            max_lon: ne.x(),
        }
    }

    /// Create the smallest bounding box which contains a circle of
    /// `radius_m` metres around `centre`
    pub fn from_centre(centre: Point, radius_m: f64) -> Self {
        let dist_to_corner = radius_m * 2.0_f64.sqrt();

        let ne = Haversine::destination(centre, 45.0, dist_to_corner);
        let sw = Haversine::destination(centre, 225.0, dist_to_corner);

        BBox::from_points(&ne, &sw)
    }

    /// Create the bounding box which encloses all of the provided
    /// (lat, lon) pairs. Returns None if no coordinates are provided
    pub fn from_coords(coords: &[(f64, f64)]) -> Option<Self> {
        let (first_lat, first_lon) = *coords.first()?;

        let init = BBox {
            min_lat: first_lat,
            min_lon: first_lon,
            max_lat: first_lat,
            max_lon: first_lon,
        };

        Some(coords.iter().fold(init, |bbox, (lat, lon)| BBox {
            min_lat: bbox.min_lat.min(*lat),
            min_lon: bbox.min_lon.min(*lon),
            max_lat: bbox.max_lat.max(*lat),
            max_lon: bbox.max_lon.max(*lon),
        }))
    }

    /// Convert a latitude & longitude into a partition string, which can be
    /// used when querying data from postgres. Road data is partitioned on
    /// the integer part of each coordinate, with negative values prefixed
    /// by 'n' rather than '-'
    fn get_ptn_from_coords(lat: &f64, lon: &f64) -> String {
        let lat_i = *lat as i32;
        let lon_i = *lon as i32;
        let ptn = format!("'{lat_i}_{lon_i}'");
        ptn.replace('-', "n")
    }

    /// Get a list of all of the partitions which contain data for this
    /// bounding box. The search radius is a few kilometres, so a box never
    /// spans more than the 4 partitions touched by its corners.
    /// Partitions are returned wrapped in single quotes, ready to be used
    /// directly in SQL queries
    pub fn get_partition_list(&self) -> Vec<String> {
        let ne_ptn = BBox::get_ptn_from_coords(&self.max_lat, &self.max_lon);
        let nw_ptn = BBox::get_ptn_from_coords(&self.max_lat, &self.min_lon);
        let se_ptn = BBox::get_ptn_from_coords(&self.min_lat, &self.max_lon);
        let sw_ptn = BBox::get_ptn_from_coords(&self.min_lat, &self.min_lon);

        let mut ptn_list = Vec::with_capacity(4);
        for ptn in [ne_ptn, nw_ptn, se_ptn, sw_ptn] {
            if !ptn_list.contains(&ptn) {
                ptn_list.push(ptn);
            }
        }
        ptn_list
    }
}

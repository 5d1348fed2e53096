use geo::Point;
use serde::{Deserialize, Serialize};

/// A 2D or 3D point value of a temporal point, tagged with its spatial
/// reference system identifier.
///
/// # Examples
///
/// ```
/// use tbox_types::point::GeoPoint;
///
/// // A drone at 100 meters altitude in WGS 84
/// let drone = GeoPoint::new_3d(-74.0060, 40.7128, 100.0).with_srid(4326);
/// assert_eq!(drone.z(), Some(100.0));
/// assert_eq!(drone.srid(), 4326);
/// assert!(!GeoPoint::new(1.0, 2.0).has_z());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// The x/y (longitude/latitude) coordinates
    pub point: Point<f64>,
    /// Altitude/elevation, when the point is 3D
    pub z: Option<f64>,
    /// Spatial reference system identifier, 0 when unknown
    #[serde(default)]
    pub srid: i32,
}

impl GeoPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            point: Point::new(x, y),
            z: None,
            srid: 0,
        }
    }

    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            point: Point::new(x, y),
            z: Some(z),
            srid: 0,
        }
    }

    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    pub fn x(&self) -> f64 {
        self.point.x()
    }

    pub fn y(&self) -> f64 {
        self.point.y()
    }

    pub fn z(&self) -> Option<f64> {
        self.z
    }

    pub fn has_z(&self) -> bool {
        self.z.is_some()
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    /// Project to 2D by discarding the z coordinate.
    pub fn to_2d(&self) -> Point<f64> {
        self.point
    }

    pub fn is_finite(&self) -> bool {
        self.x().is_finite() && self.y().is_finite() && self.z.is_none_or(f64::is_finite)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(point: Point<f64>) -> Self {
        Self {
            point,
            z: None,
            srid: 0,
        }
    }
}

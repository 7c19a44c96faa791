use na::Vector2;
use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
///
/// Component order follows the dataset convention everywhere in this
/// workspace: latitude first, then longitude.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        GeoPoint { lat, lon }
    }

    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.lat, self.lon)
    }

    pub fn from_vector(v: Vector2<f64>) -> Self {
        GeoPoint { lat: v.x, lon: v.y }
    }

    /// Planar Euclidean distance, in degrees.
    pub fn distance_to(self, other: GeoPoint) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    pub fn midpoint(a: GeoPoint, b: GeoPoint) -> GeoPoint {
        GeoPoint {
            lat: (a.lat + b.lat) / 2.0,
            lon: (a.lon + b.lon) / 2.0,
        }
    }
}

/// The axis-aligned geographic extent of a map raster.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
    pub bottom_left: GeoPoint,
    pub top_right: GeoPoint,
}

impl MapBounds {
    pub fn new(bottom_left: GeoPoint, top_right: GeoPoint) -> Self {
        MapBounds {
            bottom_left,
            top_right,
        }
    }

    /// Strict interior test. Points on the boundary count as outside,
    /// matching the view transform's rejection rule.
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat > self.bottom_left.lat
            && p.lat < self.top_right.lat
            && p.lon > self.bottom_left.lon
            && p.lon < self.top_right.lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn distance_is_planar_euclidean() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(3.0, 4.0);
        assert_relative_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn bounds_are_strict() {
        let bounds = MapBounds::new(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0));
        assert!(bounds.contains(GeoPoint::new(0.5, 0.5)));
        assert!(!bounds.contains(GeoPoint::new(0.0, 0.5)));
        assert!(!bounds.contains(GeoPoint::new(0.5, 1.0)));
        assert!(!bounds.contains(GeoPoint::new(1.5, 0.5)));
    }
}

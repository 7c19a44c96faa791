use crate::{
    geo::{GeoPoint, MapBounds},
    units::{Angle, Length},
};
use na::Vector2;
use serde::{Deserialize, Serialize};

/// Linear projection constant: meters of ground distance per degree of
/// latitude. All edge-length and altitude conversions use this single
/// constant so they stay mutually consistent.
pub const METERS_PER_DEGREE: f64 = 11.13e4;

/// The quadrilateral region of the map currently observed by the agent.
///
/// Exactly four corners, counter-clockwise, with corners 0 and 1 forming
/// the front edge (the edge the window moves toward). The quadrilateral
/// may be skewed; it is not required to stay a square.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewWindow {
    corners: [GeoPoint; 4],
}

impl ViewWindow {
    pub fn from_corners(corners: [GeoPoint; 4]) -> Self {
        ViewWindow { corners }
    }

    pub fn from_vectors(vs: [Vector2<f64>; 4]) -> Self {
        ViewWindow {
            corners: vs.map(GeoPoint::from_vector),
        }
    }

    pub fn corners(&self) -> &[GeoPoint; 4] {
        &self.corners
    }

    pub fn to_vectors(&self) -> [Vector2<f64>; 4] {
        self.corners.map(GeoPoint::to_vector)
    }

    pub fn centroid(&self) -> GeoPoint {
        let sum = self
            .to_vectors()
            .iter()
            .fold(Vector2::zeros(), |acc, v| acc + v);
        GeoPoint::from_vector(sum / 4.0)
    }

    /// Midpoint of the front edge (corners 0 and 1).
    pub fn front_midpoint(&self) -> GeoPoint {
        GeoPoint::midpoint(self.corners[0], self.corners[1])
    }

    /// Midpoint of the right edge (corners 1 and 2).
    pub fn right_midpoint(&self) -> GeoPoint {
        GeoPoint::midpoint(self.corners[1], self.corners[2])
    }

    /// Length of the front edge, in degrees. This is the reference edge
    /// for zoom targets and action-distance decoding.
    pub fn edge_length(&self) -> f64 {
        self.corners[0].distance_to(self.corners[1])
    }

    /// Length of the front edge on the ground.
    pub fn edge_length_meters(&self) -> Length {
        Length::from_meters(self.edge_length() * METERS_PER_DEGREE)
    }

    /// Compass direction the window faces, recomputed from the corners:
    /// the bearing from the centroid to the front-edge midpoint, rounded
    /// to the nearest whole degree in [0, 360).
    pub fn direction(&self) -> Angle {
        let raw = compass_direction(self.centroid(), self.front_midpoint());
        Angle::from_degrees(raw.as_degrees().round().rem_euclid(360.0))
    }

    pub fn is_within(&self, bounds: &MapBounds) -> bool {
        self.corners.iter().all(|c| bounds.contains(*c))
    }
}

/// Compass bearing from `start` to `end`: 0° = north, increasing
/// clockwise, east at 90°.
///
/// The arctangent is taken of dlat/dlon, which yields a math-convention
/// angle (0° = east, counter-clockwise); the quadrant correction and the
/// final `(360 - a + 90) mod 360` remap it onto the compass.
pub fn compass_direction(start: GeoPoint, end: GeoPoint) -> Angle {
    let vec = end.to_vector() - start.to_vector();
    let math_deg = if vec.y > 0.0 {
        (vec.x / vec.y).atan().to_degrees()
    } else if vec.y < 0.0 {
        (vec.x / vec.y).atan().to_degrees() + 180.0
    } else if vec.x > 0.0 {
        90.0
    } else {
        270.0
    };
    Angle::from_degrees((360.0 - math_deg + 90.0).rem_euclid(360.0))
}

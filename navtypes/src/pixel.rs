//! Conversions between geographic coordinates and map-raster pixel
//! coordinates, plus the two bounding-box layouts used at the policy
//! boundary.

use crate::geo::{GeoPoint, MapBounds};
use serde::{Deserialize, Serialize};

/// A raster pixel position. `x` grows eastward, `y` grows southward
/// (image convention, origin at the top-left of the map raster).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// Converts a geographic point to the nearest raster pixel.
///
/// `lat_ratio` is the degrees-per-pixel resolution of the raster. For a
/// fixed `lat_ratio` this is the exact inverse of [`pixel_to_gps`].
pub fn gps_to_pixel(p: GeoPoint, bounds: &MapBounds, lat_ratio: f64) -> PixelPoint {
    PixelPoint {
        x: ((p.lon - bounds.bottom_left.lon) / lat_ratio).round() as i64,
        y: ((bounds.top_right.lat - p.lat) / lat_ratio).round() as i64,
    }
}

/// Converts a raster pixel back to the geographic point at its center.
pub fn pixel_to_gps(p: PixelPoint, bounds: &MapBounds, lat_ratio: f64) -> GeoPoint {
    GeoPoint {
        lat: bounds.top_right.lat - (p.y as f64) * lat_ratio,
        lon: bounds.bottom_left.lon + (p.x as f64) * lat_ratio,
    }
}

/// Axis-aligned box as min/max corners, `x1 < x2`, `y1 < y2`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BboxCorner {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Axis-aligned box as center plus extents.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BboxCenter {
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

/// Exact inverse of [`bbox_center_to_corner`].
pub fn bbox_corner_to_center(b: BboxCorner) -> BboxCenter {
    BboxCenter {
        cx: (b.x1 + b.x2) / 2.0,
        cy: (b.y1 + b.y2) / 2.0,
        w: b.x2 - b.x1,
        h: b.y2 - b.y1,
    }
}

/// Exact inverse of [`bbox_corner_to_center`].
pub fn bbox_center_to_corner(b: BboxCenter) -> BboxCorner {
    BboxCorner {
        x1: b.cx - 0.5 * b.w,
        y1: b.cy - 0.5 * b.h,
        x2: b.cx + 0.5 * b.w,
        y2: b.cy + 0.5 * b.h,
    }
}

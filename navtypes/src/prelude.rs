pub use crate::geo::{GeoPoint, MapBounds};
pub use crate::obs::{
    BboxGroundTruth, MapId, Observation, ReferencePath, RouteId, SaliencyMap, ViewRaster,
};
pub use crate::pixel::{
    bbox_center_to_corner, bbox_corner_to_center, gps_to_pixel, pixel_to_gps, BboxCenter,
    BboxCorner, PixelPoint,
};
pub use crate::units::{Angle, Length, Ratio};
pub use crate::window::{compass_direction, ViewWindow, METERS_PER_DEGREE};

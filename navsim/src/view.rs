//! Boundary-clipped zoom / rotate / translate of the view window.
//!
//! The transform is staged: zoom toward the altitude target, rotate by
//! the requested angle, then move forward. Each stage is all-or-nothing
//! against the map bounds -- a stage whose output would place any corner
//! outside the map is discarded and the pre-stage window survives.

use na::Vector2;
use navtypes::prelude::*;
use thiserror::Error;
use tracing::warn;

/// Asserted directions within this many degrees of the recomputed one
/// are taken as agreement; beyond it the discrepancy is folded into the
/// requested rotation.
const DIRECTION_DRIFT_TOLERANCE_DEG: f64 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The window collapsed to a zero-length edge; edge directions are
    /// undefined and no transform can be applied.
    #[error("view window has a zero-length edge")]
    DegenerateEdge,
}

/// Advances a view window by one action: zoom toward `target_altitude`,
/// rotate clockwise by `requested_angle`, move `distance` degrees along
/// the window's own front-back edges.
///
/// Returns the committed window and its new compass direction. The
/// committed window always lies strictly inside `bounds`; stages that
/// would violate this are skipped wholesale (see module docs).
///
/// When `asserted_direction` is supplied and disagrees with the
/// direction recomputed from the corners by more than the tolerance,
/// the discrepancy is added to the requested rotation so the window
/// re-converges on the asserted heading.
pub fn advance(
    window: &ViewWindow,
    requested_angle: Angle,
    distance: f64,
    target_altitude: Length,
    bounds: &MapBounds,
    asserted_direction: Option<Angle>,
) -> Result<(ViewWindow, Angle), GeometryError> {
    let corners = window.to_vectors();
    for i in 0..4 {
        if (corners[(i + 1) % 4] - corners[i]).norm() == 0.0 {
            return Err(GeometryError::DegenerateEdge);
        }
    }

    let current_direction = window.direction();
    let mut angle = requested_angle.as_degrees();
    if let Some(asserted) = asserted_direction {
        let drift = asserted.as_degrees() - current_direction.as_degrees();
        if drift.abs() > DIRECTION_DRIFT_TOLERANCE_DEG {
            warn!(
                correction = drift,
                "view direction drifted; folding correction into the rotation"
            );
            angle += drift;
        }
    }

    // -------- Zoom --------
    let edge_len_m = (corners[1] - corners[0]).norm() * METERS_PER_DEGREE;
    let zoom_step = 0.5 * (target_altitude.as_meters() - edge_len_m) / METERS_PER_DEGREE;
    let zoomed = zoom_corners(&corners, zoom_step);
    if !all_within(&zoomed, bounds) {
        return Ok((*window, current_direction));
    }

    // -------- Rotate --------
    let center = centroid(&zoomed);
    let rotated = zoomed.map(|c| center + rotate(-angle, c - center));
    if !all_within(&rotated, bounds) {
        return Ok((ViewWindow::from_vectors(zoomed), current_direction));
    }

    let new_direction =
        Angle::from_degrees((current_direction.as_degrees() + angle).rem_euclid(360.0));

    // -------- Move --------
    let moved = forward_corners(&rotated, distance);
    if !all_within(&moved, bounds) {
        return Ok((ViewWindow::from_vectors(rotated), new_direction));
    }

    Ok((ViewWindow::from_vectors(moved), new_direction))
}

fn centroid(cs: &[Vector2<f64>; 4]) -> Vector2<f64> {
    (cs[0] + cs[1] + cs[2] + cs[3]) / 4.0
}

fn all_within(cs: &[Vector2<f64>; 4], bounds: &MapBounds) -> bool {
    cs.iter()
        .all(|c| bounds.contains(GeoPoint::from_vector(*c)))
}

/// Counter-clockwise rotation by `theta` degrees.
fn rotate(theta: f64, p: Vector2<f64>) -> Vector2<f64> {
    let (sin, cos) = theta.to_radians().sin_cos();
    Vector2::new(cos * p.x + sin * p.y, -sin * p.x + cos * p.y)
}

fn unit(v: Vector2<f64>) -> Vector2<f64> {
    v / v.norm()
}

/// Pushes every corner outward (or inward, for negative `change`) along
/// the directions of its two adjacent edges. A square window grows by
/// `2 * change` per edge.
fn zoom_corners(cs: &[Vector2<f64>; 4], change: f64) -> [Vector2<f64>; 4] {
    [
        cs[0] + (unit(cs[0] - cs[1]) + unit(cs[0] - cs[3])) * change,
        cs[1] + (unit(cs[1] - cs[0]) + unit(cs[1] - cs[2])) * change,
        cs[2] + (unit(cs[2] - cs[3]) + unit(cs[2] - cs[1])) * change,
        cs[3] + (unit(cs[3] - cs[2]) + unit(cs[3] - cs[0])) * change,
    ]
}

/// Moves each corner `change` degrees along its own front-back edge:
/// corners 0 and 3 along the 3->0 edge, corners 1 and 2 along 2->1.
fn forward_corners(cs: &[Vector2<f64>; 4], change: f64) -> [Vector2<f64>; 4] {
    let left = unit(cs[0] - cs[3]);
    let right = unit(cs[1] - cs[2]);
    [
        cs[0] + left * change,
        cs[1] + right * change,
        cs[2] + right * change,
        cs[3] + left * change,
    ]
}

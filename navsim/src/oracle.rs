//! Ground-truth action synthesis from a reference route.
//!
//! Given the current view window and the route the episode is supposed
//! to follow, produces the supervised next action (a displacement ratio
//! in the window's own oblique basis), the altitude target, and the
//! progress toward the goal.

use na::Vector2;
use navtypes::prelude::*;
use ordered_float::OrderedFloat;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::{polygon, FeedbackRegime};

/// Smallest and largest view-edge ground lengths the agent may fly at.
pub const MIN_VIEW_EDGE_METERS: f64 = 40.0;
pub const MAX_VIEW_EDGE_METERS: f64 = 400.0;

/// An earlier waypoint must be closer than a later one by more than
/// this margin to win the nearest-waypoint scan; ties resolve toward
/// the goal (and coincident waypoints do not flap).
const NEAREST_WAYPOINT_MARGIN: f64 = 1e-5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The window's edge-midpoint basis is singular; the displacement
    /// ratio is undefined.
    #[error("view window basis is singular")]
    DegenerateBasis,
    /// The target line missed the window polygon even after falling
    /// back to the direct goal segment. Anomalous: the caller logs it
    /// and holds position for the step.
    #[error("target line does not intersect the view window")]
    EmptyIntersection,
}

/// The next action to execute, or the terminal sentinel.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub enum Action {
    /// No further motion: the window has reached the goal (or the
    /// episode already ended).
    Stop,
    /// Displace toward the target point. `ratio` is expressed in the
    /// window's oblique basis and satisfies max(|rx|, |ry|) <= 1.
    Move { ratio: [f64; 2] },
}

/// One oracle evaluation for one batch sample.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct OracleDecision {
    pub action: Action,
    /// Altitude target of the nearest waypoint, rescaled into [0, 1]
    /// over the [MIN, MAX] view-edge domain.
    pub altitude_ratio: Ratio,
    /// Hull-ratio overlap with the goal window.
    pub progress: Ratio,
}

/// Synthesizes the ground-truth action for one sample.
///
/// Pure function of its inputs; evaluated independently per batch
/// sample, so it is safe to call concurrently across samples.
pub fn synthesize(
    window: &ViewWindow,
    path: &ReferencePath,
    ended: bool,
    regime: FeedbackRegime,
) -> Result<OracleDecision, OracleError> {
    let current_pos = window.centroid().to_vector();
    let goal = path.last();
    let goal_center = goal.centroid().to_vector();

    let progress = Ratio::from_f64(polygon::hull_overlap(
        &window.to_vectors(),
        &goal.to_vectors(),
    ));

    // The nearest waypoint, scanned from the goal backward, supplies
    // the altitude target.
    let mut min_dist = 1000.0;
    let mut nearest = path.len() - 1;
    for j in (0..path.len()).rev() {
        let d = (path.windows()[j].centroid().to_vector() - current_pos).norm();
        if d + NEAREST_WAYPOINT_MARGIN < min_dist {
            min_dist = d;
            nearest = j;
        }
    }
    let altitude_ratio = Ratio::from_f64(
        (path.windows()[nearest].edge_length_meters().as_meters() - MIN_VIEW_EDGE_METERS)
            / (MAX_VIEW_EDGE_METERS - MIN_VIEW_EDGE_METERS),
    );

    if ended || progress.as_f64() > 0.5 {
        return Ok(OracleDecision {
            action: Action::Stop,
            altitude_ratio,
            progress,
        });
    }

    // Target point: where the regime's target line meets the window,
    // picking the meeting point nearest the goal.
    let window_poly = polygon::oriented_ccw(window.to_vectors().to_vec());
    let direct_line = [current_pos, goal_center];
    let candidates = match regime {
        FeedbackRegime::Student => polygon::polyline_intersections(&window_poly, &direct_line),
        FeedbackRegime::Teacher => {
            let route: Vec<Vector2<f64>> = path
                .windows()
                .iter()
                .map(|w| w.centroid().to_vector())
                .collect();
            let pts = polygon::polyline_intersections(&window_poly, &route);
            if pts.is_empty() {
                // The route polyline misses the window entirely; aim
                // straight for the goal instead.
                polygon::polyline_intersections(&window_poly, &direct_line)
            } else {
                pts
            }
        }
    };
    let target = candidates
        .into_iter()
        .min_by_key(|p| OrderedFloat((p - goal_center).norm()))
        .ok_or(OracleError::EmptyIntersection)?;

    // Express (target - centroid) in the window's oblique basis. The
    // basis vectors run from the centroid to the front and right edge
    // midpoints, quantized to 1e-5 degrees, so a ratio of magnitude 1
    // lands on the window edge.
    let net_target = (target - current_pos) * 1e5;
    let basis_y = ((window.front_midpoint().to_vector() - current_pos) * 1e5).map(f64::round);
    let basis_x = ((window.right_midpoint().to_vector() - current_pos) * 1e5).map(f64::round);

    // Closed-form 2x2 solve; the basis vectors are the columns.
    let det = basis_x.x * basis_y.y - basis_y.x * basis_x.y;
    if det == 0.0 {
        return Err(OracleError::DegenerateBasis);
    }
    let rx = (basis_y.y * net_target.x - basis_y.x * net_target.y) / det;
    let ry = (-basis_x.y * net_target.x + basis_x.x * net_target.y) / det;
    if rx.max(ry) > 1.1 {
        debug!(rx, ry, "oracle target fell outside the view basis");
    }

    let magnitude = rx.abs().max(ry.abs()).max(1.0);
    Ok(OracleDecision {
        action: Action::Move {
            ratio: [rx / magnitude, ry / magnitude],
        },
        altitude_ratio,
        progress,
    })
}

//! A deterministic in-memory environment over the scenario's synthetic
//! routes. Stands in for the real raster-backed environment in demos
//! and tests; rasters are flat and reference paths are straight lines.

use na::Vector2;
use navtypes::prelude::*;

use super::{RouteSpec, Scenario};
use crate::Environment;

pub struct SyntheticEnvironment {
    observations: Vec<Observation>,
}

impl SyntheticEnvironment {
    /// Panics if any route's windows leave the scenario's map bounds.
    pub fn new(scenario: &Scenario) -> Self {
        let observations = scenario
            .routes
            .iter()
            .map(|route| {
                let windows = route_windows(route);
                for w in windows.iter() {
                    if !w.is_within(&scenario.map.bounds) {
                        panic!("Route '{}' leaves the map bounds", route.id);
                    }
                }
                let start = windows[0];
                Observation {
                    map_id: MapId(scenario.name.clone()),
                    route_id: RouteId(route.id.clone()),
                    instructions: format!(
                        "head {} toward the target area",
                        cardinal(route.heading)
                    ),
                    dialog_history: String::new(),
                    bounds: scenario.map.bounds,
                    lat_ratio: scenario.map.lat_ratio,
                    reference_path: Some(ReferencePath::new(
                        windows,
                        SaliencyMap::zeros(224, 224),
                    )),
                    bbox_ground_truth: None,
                    starting_window: start,
                    starting_direction: route.heading,
                    current_view: ViewRaster::filled(224, 224, 96),
                }
            })
            .collect();

        SyntheticEnvironment { observations }
    }
}

impl Environment for SyntheticEnvironment {
    fn observations(
        &mut self,
        _windows: Option<&[ViewWindow]>,
        _directions: Option<&[Angle]>,
    ) -> Vec<Observation> {
        // Rasters here are flat, so re-rendering for the new windows is
        // a no-op; a real environment would crop the map raster.
        self.observations.clone()
    }
}

/// The route's windows: squares of `edge` degrees centered on waypoints
/// spaced along the heading, each facing the heading.
fn route_windows(route: &RouteSpec) -> Vec<ViewWindow> {
    let h = route.heading.as_radians();
    let forward = Vector2::new(h.cos(), h.sin());
    let rightward = Vector2::new(-h.sin(), h.cos());
    let half = route.edge / 2.0;

    (0..route.waypoints)
        .map(|k| {
            let center = route.start.to_vector() + forward * (k as f64 * route.spacing);
            ViewWindow::from_vectors([
                center + forward * half - rightward * half,
                center + forward * half + rightward * half,
                center - forward * half + rightward * half,
                center - forward * half - rightward * half,
            ])
        })
        .collect()
}

fn cardinal(heading: Angle) -> &'static str {
    let deg = heading.normalized().as_degrees();
    match (deg / 45.0).round() as i64 % 8 {
        0 => "north",
        1 => "north-east",
        2 => "east",
        3 => "south-east",
        4 => "south",
        5 => "south-west",
        6 => "west",
        _ => "north-west",
    }
}

//! Scenario resolution: the nominal built-in scenario, optionally
//! overridden from a TOML config file.

use std::path::Path;

use navtypes::prelude::*;
use tracing::info;

use crate::FeedbackRegime;

pub mod config;
pub mod synthetic;

use self::config::Config;

/// A fully resolved scenario: rollout settings, the map extent, and the
/// synthetic routes to fly.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub rollout: RolloutSettings,
    pub map: MapSpec,
    pub routes: Vec<RouteSpec>,
}

#[derive(Debug, Copy, Clone)]
pub struct RolloutSettings {
    pub max_steps: usize,
    pub regime: FeedbackRegime,
    pub teacher_pass_weight: f64,
    pub student_pass_weight: f64,
}

#[derive(Debug, Copy, Clone)]
pub struct MapSpec {
    pub bounds: MapBounds,
    /// Degrees per raster pixel.
    pub lat_ratio: f64,
}

/// A straight synthetic route: `waypoints` windows of edge length
/// `edge` degrees, spaced `spacing` degrees apart along `heading`.
#[derive(Debug, Clone)]
pub struct RouteSpec {
    pub id: String,
    pub start: GeoPoint,
    pub heading: Angle,
    pub waypoints: usize,
    pub spacing: f64,
    pub edge: f64,
}

impl Scenario {
    pub fn load<P: AsRef<Path>>(config: Option<P>) -> Self {
        match config {
            Some(path) => {
                info!(
                    config = %path.as_ref().display(),
                    "Loading scenario from config file",
                );
                Config::load(path).resolve()
            }
            None => {
                info!("Loading default nominal scenario");
                Self::nominal()
            }
        }
    }

    /// The built-in scenario: two eastbound routes over a small map.
    pub fn nominal() -> Self {
        Scenario {
            name: "nominal".to_string(),
            rollout: RolloutSettings {
                max_steps: 30,
                regime: FeedbackRegime::Teacher,
                teacher_pass_weight: 1.0,
                student_pass_weight: 1.0,
            },
            map: MapSpec {
                bounds: MapBounds::new(
                    GeoPoint::new(45.0, -122.0),
                    GeoPoint::new(45.1, -121.9),
                ),
                lat_ratio: 1e-5,
            },
            routes: vec![
                RouteSpec {
                    id: "eastbound-0".to_string(),
                    start: GeoPoint::new(45.02, -121.99),
                    heading: Angle::from_degrees(90.0),
                    waypoints: 4,
                    spacing: 0.003,
                    edge: 0.002,
                },
                RouteSpec {
                    id: "northeast-1".to_string(),
                    start: GeoPoint::new(45.03, -121.98),
                    heading: Angle::from_degrees(45.0),
                    waypoints: 5,
                    spacing: 0.002,
                    edge: 0.002,
                },
            ],
        }
    }
}

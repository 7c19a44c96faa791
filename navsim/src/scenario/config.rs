use std::collections::HashSet;
use std::{fs, path::Path};

use navtypes::prelude::*;
use serde::Deserialize;

use super::{MapSpec, RolloutSettings, RouteSpec, Scenario};
use crate::FeedbackRegime;

#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub name: Option<String>,
    pub rollout: Rollout,
    pub map: Option<Map>,
    #[serde(alias = "route")]
    pub routes: Vec<Route>,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Rollout {
    pub max_steps: usize,
    pub feedback: FeedbackRegime,
    pub teacher_pass_weight: f64,
    pub student_pass_weight: f64,
}

impl Default for Rollout {
    fn default() -> Self {
        let nominal = Scenario::nominal().rollout;
        Rollout {
            max_steps: nominal.max_steps,
            feedback: nominal.regime,
            teacher_pass_weight: nominal.teacher_pass_weight,
            student_pass_weight: nominal.student_pass_weight,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub bottom_left: GeoPoint,
    pub top_right: GeoPoint,
    pub lat_ratio: f64,
}

#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Route {
    pub id: String,
    pub start: GeoPoint,
    /// Compass heading in degrees.
    pub heading: f64,
    pub waypoints: usize,
    pub spacing: f64,
    pub edge: f64,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let content = fs::read_to_string(path).expect("Failed to read config file");
        Self::from_str_checked(&content)
    }

    pub fn from_str_checked(s: &str) -> Self {
        let cfg: Config = toml::from_str(s).expect("Failed to parse config file");

        if cfg.rollout.max_steps == 0 {
            panic!("rollout.max-steps must be at least 1");
        }

        let mut ids = HashSet::new();
        for route in cfg.routes.iter() {
            if !ids.insert(&route.id) {
                panic!("Duplicate configuration entry for route '{}'", route.id);
            }
            if route.waypoints == 0 {
                panic!("Route '{}' must have at least one waypoint", route.id);
            }
            if route.edge <= 0.0 {
                panic!("Route '{}' must have a positive edge length", route.id);
            }
        }

        cfg
    }

    /// Resolves into a runnable scenario, falling back to the nominal
    /// map and routes where the file is silent.
    pub fn resolve(self) -> Scenario {
        let nominal = Scenario::nominal();
        Scenario {
            name: self.name.unwrap_or(nominal.name),
            rollout: RolloutSettings {
                max_steps: self.rollout.max_steps,
                regime: self.rollout.feedback,
                teacher_pass_weight: self.rollout.teacher_pass_weight,
                student_pass_weight: self.rollout.student_pass_weight,
            },
            map: self
                .map
                .map(|m| MapSpec {
                    bounds: MapBounds::new(m.bottom_left, m.top_right),
                    lat_ratio: m.lat_ratio,
                })
                .unwrap_or(nominal.map),
            routes: if self.routes.is_empty() {
                nominal.routes
            } else {
                self.routes
                    .into_iter()
                    .map(|r| RouteSpec {
                        id: r.id,
                        start: r.start,
                        heading: Angle::from_degrees(r.heading),
                        waypoints: r.waypoints,
                        spacing: r.spacing,
                        edge: r.edge,
                    })
                    .collect()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parses_a_full_config() {
        let cfg = Config::from_str_checked(indoc! {r#"
            name = "two-routes"

            [rollout]
            max-steps = 12
            feedback = "student"
            teacher-pass-weight = 2.0
            student-pass-weight = 0.5

            [map]
            bottom-left = { lat = 10.0, lon = 20.0 }
            top-right = { lat = 10.5, lon = 20.5 }
            lat-ratio = 1e-5

            [[route]]
            id = "r0"
            start = { lat = 10.1, lon = 20.1 }
            heading = 90.0
            waypoints = 3
            spacing = 0.002
            edge = 0.001

            [[route]]
            id = "r1"
            start = { lat = 10.2, lon = 20.2 }
            heading = 180.0
            waypoints = 2
            spacing = 0.002
            edge = 0.001
        "#});

        let scenario = cfg.resolve();
        assert_eq!(scenario.name, "two-routes");
        assert_eq!(scenario.rollout.max_steps, 12);
        assert_eq!(scenario.rollout.regime, FeedbackRegime::Student);
        assert_eq!(scenario.routes.len(), 2);
        assert_eq!(scenario.map.bounds.bottom_left.lat, 10.0);
    }

    #[test]
    fn empty_config_resolves_to_nominal() {
        let scenario = Config::from_str_checked("").resolve();
        let nominal = Scenario::nominal();
        assert_eq!(scenario.name, nominal.name);
        assert_eq!(scenario.rollout.max_steps, nominal.rollout.max_steps);
        assert_eq!(scenario.routes.len(), nominal.routes.len());
    }

    #[test]
    #[should_panic(expected = "Duplicate configuration entry for route")]
    fn duplicate_route_ids_are_rejected() {
        Config::from_str_checked(indoc! {r#"
            [[route]]
            id = "r0"
            start = { lat = 10.1, lon = 20.1 }
            heading = 90.0
            waypoints = 3
            spacing = 0.002
            edge = 0.001

            [[route]]
            id = "r0"
            start = { lat = 10.2, lon = 20.2 }
            heading = 180.0
            waypoints = 2
            spacing = 0.002
            edge = 0.001
        "#});
    }

    #[test]
    #[should_panic(expected = "max-steps must be at least 1")]
    fn zero_step_budget_is_rejected() {
        Config::from_str_checked(indoc! {r#"
            [rollout]
            max-steps = 0
        "#});
    }
}

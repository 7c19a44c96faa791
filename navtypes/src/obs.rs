//! Data carried across the environment boundary: one [`Observation`]
//! per batch sample per step, plus the ground-truth reference route it
//! embeds when the environment is not blind.

use crate::{
    geo::MapBounds,
    pixel::BboxCorner,
    units::Angle,
    window::ViewWindow,
};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
pub struct MapId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From, Serialize, Deserialize)]
pub struct RouteId(pub String);

/// A single-channel attention raster, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaliencyMap {
    pub width: usize,
    pub height: usize,
    pub values: Vec<f32>,
}

impl SaliencyMap {
    pub fn zeros(width: usize, height: usize) -> Self {
        SaliencyMap {
            width,
            height,
            values: vec![0.0; width * height],
        }
    }

    pub fn sum(&self) -> f32 {
        self.values.iter().sum()
    }
}

/// The RGB raster of the current view, row-major, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRaster {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl ViewRaster {
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        ViewRaster {
            width,
            height,
            pixels: vec![value; width * height * 3],
        }
    }
}

/// The ground-truth route for one episode: an immutable ordered sequence
/// of view windows ending at the goal, plus the human-attention map that
/// supervises saliency prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePath {
    windows: Vec<ViewWindow>,
    pub saliency: SaliencyMap,
}

impl ReferencePath {
    /// Panics if `windows` is empty; a route always has at least a goal.
    pub fn new(windows: Vec<ViewWindow>, saliency: SaliencyMap) -> Self {
        assert!(!windows.is_empty(), "reference path must not be empty");
        ReferencePath { windows, saliency }
    }

    pub fn windows(&self) -> &[ViewWindow] {
        &self.windows
    }

    pub fn first(&self) -> &ViewWindow {
        &self.windows[0]
    }

    /// The goal window.
    pub fn last(&self) -> &ViewWindow {
        self.windows.last().unwrap()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Ground-truth target box for the policy's detection head.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BboxGroundTruth {
    pub label: f64,
    pub bbox: BboxCorner,
}

/// Everything the environment reports for one batch sample at one step.
#[derive(Debug, Clone)]
pub struct Observation {
    pub map_id: MapId,
    pub route_id: RouteId,

    /// The current navigation instruction.
    pub instructions: String,
    /// Prior dialog rounds, concatenated, `[QUE]`-delimited.
    pub dialog_history: String,

    pub bounds: MapBounds,
    /// Degrees-per-pixel resolution of the map raster.
    pub lat_ratio: f64,

    /// Absent in blind (held-out test) environments.
    pub reference_path: Option<ReferencePath>,
    pub bbox_ground_truth: Option<BboxGroundTruth>,

    /// Where the episode begins. Equals the first reference window when
    /// ground truth is present; blind environments still supply it.
    pub starting_window: ViewWindow,
    pub starting_direction: Angle,
    pub current_view: ViewRaster,
}

impl Observation {
    /// Identifier used to key trajectory records.
    pub fn episode_id(&self) -> String {
        format!("{}__{}", self.map_id, self.route_id)
    }
}

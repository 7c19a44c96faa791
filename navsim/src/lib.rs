pub extern crate nalgebra as na;

pub mod oracle;
pub mod policy;
pub mod polygon;
pub mod rollout;
pub mod scenario;
pub mod view;

use navtypes::prelude::*;
use serde::{Deserialize, Serialize};

use crate::oracle::OracleDecision;

/// Which action stream drives the simulator during a rollout.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackRegime {
    /// Execute the oracle action; oracle progress is the termination
    /// signal.
    Teacher,
    /// Execute the model-predicted action; predicted progress is the
    /// termination signal.
    Student,
}

/// One prediction from the policy collaborator for one batch sample.
#[derive(Debug, Clone)]
pub struct PolicyOutput {
    /// Displacement ratio in the window's oblique basis, nominally in
    /// [-1, 1] per component (renormalized by the controller).
    pub action_ratio: [f64; 2],
    pub altitude_ratio: Ratio,
    pub progress: Ratio,
    pub saliency: SaliencyMap,
    /// Four box coordinates plus one presence logit.
    pub bbox_logits: [f64; 5],
}

/// Per-step features accumulated by the rollout controller and handed
/// to the policy at every step. Outer vectors are indexed by step,
/// inner by batch sample.
#[derive(Debug, Clone, Default)]
pub struct FeatureHistory {
    pub instructions: Vec<String>,
    pub dialog_history: Vec<String>,
    pub frames: Vec<Vec<ViewRaster>>,
    /// (sin, cos) of the compass direction.
    pub directions: Vec<Vec<[f64; 2]>>,
    /// (start centroid - current centroid) / 0.001, in degrees.
    pub positions: Vec<Vec<[f64; 2]>>,
    /// Number of steps each sample has spent un-ended.
    pub lengths: Vec<usize>,
}

/// The environment collaborator: owns the map rasters and ground-truth
/// routes and renders one observation per batch sample.
pub trait Environment {
    /// Called with `None` to (re)start the episode batch and obtain the
    /// initial observations; thereafter called with the batch's current
    /// windows and directions.
    fn observations(
        &mut self,
        windows: Option<&[ViewWindow]>,
        directions: Option<&[Angle]>,
    ) -> Vec<Observation>;
}

/// The policy collaborator. Model internals (encoders, weights,
/// devices) are opaque to this crate; only plain numeric outputs cross
/// the boundary.
pub trait Policy {
    /// One output per batch sample.
    fn predict(&mut self, features: &FeatureHistory, step: usize) -> Vec<PolicyOutput>;
}

/// Caller-supplied loss functions. The controller sums whatever terms
/// these return into the rollout objective; terms that evaluate to NaN
/// are logged and excluded.
pub trait Objective {
    fn step_terms(
        &mut self,
        sample: usize,
        prediction: &PolicyOutput,
        oracle: Option<&OracleDecision>,
        observation: &Observation,
    ) -> Vec<f64>;
}

//! A deterministic stand-in for the neural policy collaborator, used by
//! the demo binary and the test suite. Real policies live outside this
//! crate and only meet it through the [`Policy`] trait.

use navtypes::prelude::*;

use crate::{FeatureHistory, Policy, PolicyOutput};

/// Emits the same prediction for every sample at every step.
#[derive(Debug, Clone)]
pub struct ScriptedPolicy {
    pub action_ratio: [f64; 2],
    pub altitude_ratio: f64,
    pub progress: f64,
}

impl ScriptedPolicy {
    /// A policy that never moves and never claims progress.
    pub fn hold() -> Self {
        ScriptedPolicy {
            action_ratio: [0.0, 0.0],
            altitude_ratio: 0.5,
            progress: 0.0,
        }
    }

    /// A policy that always drives straight ahead.
    pub fn forward() -> Self {
        ScriptedPolicy {
            action_ratio: [0.0, 1.0],
            altitude_ratio: 0.5,
            progress: 0.0,
        }
    }
}

impl Policy for ScriptedPolicy {
    fn predict(&mut self, features: &FeatureHistory, _step: usize) -> Vec<PolicyOutput> {
        features
            .lengths
            .iter()
            .map(|_| PolicyOutput {
                action_ratio: self.action_ratio,
                altitude_ratio: Ratio::from_f64(self.altitude_ratio),
                progress: Ratio::from_f64(self.progress),
                saliency: SaliencyMap::zeros(224, 224),
                bbox_logits: [0.0; 5],
            })
            .collect()
    }
}

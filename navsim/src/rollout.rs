//! The episode rollout state machine.
//!
//! Drives a batch of episodes step by step: pulls observations from the
//! environment, predictions from the policy, ground truth from the
//! oracle, then advances every running sample's view window under the
//! active feedback regime until all samples end or the step budget is
//! exhausted. Accumulates the caller's training objective on the side.

use std::f64::consts::PI;

use na::Vector2;
use navtypes::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    oracle::{self, Action, OracleDecision, MAX_VIEW_EDGE_METERS, MIN_VIEW_EDGE_METERS},
    view, Environment, FeatureHistory, FeedbackRegime, Objective, Policy, PolicyOutput,
};

/// Episodes end when the effective progress clears this threshold.
const PROGRESS_DONE_THRESHOLD: f64 = 0.5;

#[derive(Debug, Copy, Clone)]
pub struct RolloutConfig {
    /// Hard step budget per episode.
    pub max_steps: usize,
}

/// A predicted action as recorded in the trajectory: the displacement
/// ratio pair plus the altitude ratio.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct RecordedAction {
    pub ratio: [f64; 2],
    pub altitude_ratio: Ratio,
}

/// Mutable per-sample episode state. Lives in the batch arena for the
/// duration of one rollout call and is consumed into a [`Trajectory`]
/// when the rollout returns.
#[derive(Debug, Clone)]
pub struct EpisodeState {
    pub id: String,
    pub window: ViewWindow,
    pub direction: Angle,
    pub ended: bool,
    pub dialog_rounds: usize,
    /// Committed (window, direction) pairs, starting entry included.
    pub path: Vec<(ViewWindow, Angle)>,
    pub predicted_actions: Vec<RecordedAction>,
    pub predicted_progress: Vec<Ratio>,
    /// Oracle decisions per step; `None` for steps where synthesis
    /// failed (or ground truth was absent).
    pub oracle_actions: Vec<Option<OracleDecision>>,
    pub oracle_progress: Vec<Option<Ratio>>,
}

impl EpisodeState {
    fn from_observation(ob: &Observation, budget: usize) -> Self {
        let mut path = Vec::with_capacity(budget + 1);
        path.push((ob.starting_window, ob.starting_direction));
        EpisodeState {
            id: ob.episode_id(),
            window: ob.starting_window,
            direction: ob.starting_direction,
            ended: false,
            dialog_rounds: dialog_rounds(&format!("{}{}", ob.dialog_history, ob.instructions)),
            path,
            predicted_actions: Vec::with_capacity(budget),
            predicted_progress: Vec::with_capacity(budget),
            oracle_actions: Vec::with_capacity(budget),
            oracle_progress: Vec::with_capacity(budget),
        }
    }

    fn into_trajectory(self) -> Trajectory {
        Trajectory {
            id: self.id,
            dialog_rounds: self.dialog_rounds,
            path: self.path,
            predicted_actions: self.predicted_actions,
            predicted_progress: self.predicted_progress,
            oracle_actions: self.oracle_actions,
            oracle_progress: self.oracle_progress,
        }
    }
}

/// Fixed-capacity, index-addressed arena of episode states. Allocated
/// once per rollout (histories sized to the step budget) and mutated in
/// place by the step loop.
#[derive(Debug)]
pub struct EpisodeBatch {
    states: Vec<EpisodeState>,
}

impl EpisodeBatch {
    fn from_observations(obs: &[Observation], budget: usize) -> Self {
        EpisodeBatch {
            states: obs
                .iter()
                .map(|ob| EpisodeState::from_observation(ob, budget))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn all_ended(&self) -> bool {
        self.states.iter().all(|s| s.ended)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EpisodeState> {
        self.states.iter()
    }

    fn get_mut(&mut self, i: usize) -> &mut EpisodeState {
        &mut self.states[i]
    }

    fn into_trajectories(self) -> Vec<Trajectory> {
        self.states
            .into_iter()
            .map(EpisodeState::into_trajectory)
            .collect()
    }
}

/// The finished record of one episode, as handed to callers (and, in
/// debug runs, to the visualization side).
#[derive(Debug, Clone, Serialize)]
pub struct Trajectory {
    pub id: String,
    pub dialog_rounds: usize,
    pub path: Vec<(ViewWindow, Angle)>,
    pub predicted_actions: Vec<RecordedAction>,
    pub predicted_progress: Vec<Ratio>,
    pub oracle_actions: Vec<Option<OracleDecision>>,
    pub oracle_progress: Vec<Option<Ratio>>,
}

impl Trajectory {
    /// Number of committed movement steps (the starting entry does not
    /// count).
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

#[derive(Debug)]
pub struct RolloutOutcome {
    /// Sum of the caller's per-step, per-sample loss terms (NaN terms
    /// excluded). Zero when no objective was supplied.
    pub objective: f64,
    pub trajectories: Vec<Trajectory>,
}

/// Drives one batch of episodes to completion. Logically
/// single-threaded per batch; suspends only at the environment and
/// policy boundaries.
#[derive(Debug, Clone)]
pub struct RolloutController {
    config: RolloutConfig,
}

impl RolloutController {
    pub fn new(config: RolloutConfig) -> Self {
        RolloutController { config }
    }

    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Rolls the batch out under `regime`. Every sample's `ended` flag
    /// transitions exactly once; the loop exits early once all samples
    /// have ended.
    pub fn rollout(
        &self,
        env: &mut dyn Environment,
        policy: &mut dyn Policy,
        mut objective: Option<&mut dyn Objective>,
        regime: FeedbackRegime,
    ) -> RolloutOutcome {
        let mut observations = env.observations(None, None);
        let batch_size = observations.len();
        let mut batch = EpisodeBatch::from_observations(&observations, self.config.max_steps);
        let start_centroids: Vec<Vector2<f64>> = batch
            .iter()
            .map(|s| s.window.centroid().to_vector())
            .collect();

        let mut features = FeatureHistory {
            instructions: observations.iter().map(|o| o.instructions.clone()).collect(),
            dialog_history: observations
                .iter()
                .map(|o| o.dialog_history.clone())
                .collect(),
            frames: Vec::with_capacity(self.config.max_steps),
            directions: Vec::with_capacity(self.config.max_steps),
            positions: Vec::with_capacity(self.config.max_steps),
            lengths: vec![0; batch_size],
        };

        let mut objective_total = 0.0;

        for t in 0..self.config.max_steps {
            self.accumulate_features(&mut features, &observations, &batch, &start_centroids);

            let predictions: Vec<PolicyOutput> = policy
                .predict(&features, t)
                .into_iter()
                .map(normalize_prediction)
                .collect();
            assert_eq!(
                predictions.len(),
                batch_size,
                "policy must return one output per batch sample"
            );

            // Ground truth, when the environment carries it.
            let has_ground_truth = observations.iter().all(|o| o.reference_path.is_some());
            let oracle_decisions: Vec<Option<OracleDecision>> = if has_ground_truth {
                observations
                    .iter()
                    .enumerate()
                    .map(|(i, ob)| {
                        let state = &batch.states[i];
                        let path = ob
                            .reference_path
                            .as_ref()
                            .expect("ground truth presence checked for the whole batch");
                        match oracle::synthesize(&state.window, path, state.ended, regime) {
                            Ok(d) => Some(d),
                            Err(e) => {
                                warn!(
                                    sample = i,
                                    step = t,
                                    error = %e,
                                    "oracle synthesis failed; sample holds position this step"
                                );
                                None
                            }
                        }
                    })
                    .collect()
            } else {
                vec![None; batch_size]
            };

            // Objective accumulation, guarding against NaN terms.
            if has_ground_truth {
                if let Some(obj) = objective.as_deref_mut() {
                    for i in 0..batch_size {
                        let terms = obj.step_terms(
                            i,
                            &predictions[i],
                            oracle_decisions[i].as_ref(),
                            &observations[i],
                        );
                        for term in terms {
                            if term.is_nan() {
                                warn!(sample = i, step = t, "discarding NaN objective term");
                            } else {
                                objective_total += term;
                            }
                        }
                    }
                }
            }

            // Record this step for every still-running sample.
            for i in 0..batch_size {
                let state = batch.get_mut(i);
                if state.ended {
                    continue;
                }
                state.predicted_actions.push(RecordedAction {
                    ratio: predictions[i].action_ratio,
                    altitude_ratio: predictions[i].altitude_ratio,
                });
                state.predicted_progress.push(predictions[i].progress);
                if has_ground_truth {
                    state.oracle_actions.push(oracle_decisions[i]);
                    state
                        .oracle_progress
                        .push(oracle_decisions[i].map(|d| d.progress));
                }
            }

            // Choose the effective action per the regime and advance.
            let last_step = t + 1 == self.config.max_steps;
            for i in 0..batch_size {
                if batch.states[i].ended {
                    continue;
                }

                let effective = match regime {
                    FeedbackRegime::Teacher => match oracle_decisions[i] {
                        Some(d) => Some((d.progress, d.action, d.altitude_ratio)),
                        // Oracle failed (or ground truth is absent):
                        // nothing to execute this step.
                        None => None,
                    },
                    FeedbackRegime::Student => Some((
                        predictions[i].progress,
                        Action::Move {
                            ratio: predictions[i].action_ratio,
                        },
                        predictions[i].altitude_ratio,
                    )),
                };

                let Some((progress, action, altitude_ratio)) = effective else {
                    if last_step {
                        batch.get_mut(i).ended = true;
                    }
                    continue;
                };

                if progress.as_f64() > PROGRESS_DONE_THRESHOLD {
                    batch.get_mut(i).ended = true;
                    continue;
                }
                if last_step {
                    batch.get_mut(i).ended = true;
                    continue;
                }

                if let Action::Move { ratio } = action {
                    let bounds = observations[i].bounds;
                    execute_move(batch.get_mut(i), ratio, altitude_ratio, &bounds);
                } else {
                    debug!(sample = i, step = t, "terminal action; holding position");
                }
            }

            // Commit the step to the trajectory of every running sample.
            for i in 0..batch_size {
                let state = batch.get_mut(i);
                if !state.ended {
                    state.path.push((state.window, state.direction));
                }
            }

            let windows: Vec<ViewWindow> = batch.iter().map(|s| s.window).collect();
            let directions: Vec<Angle> = batch.iter().map(|s| s.direction).collect();
            observations = env.observations(Some(&windows), Some(&directions));

            if batch.all_ended() {
                break;
            }
        }

        RolloutOutcome {
            objective: objective_total,
            trajectories: batch.into_trajectories(),
        }
    }

    fn accumulate_features(
        &self,
        features: &mut FeatureHistory,
        observations: &[Observation],
        batch: &EpisodeBatch,
        start_centroids: &[Vector2<f64>],
    ) {
        features
            .frames
            .push(observations.iter().map(|o| o.current_view.clone()).collect());
        features.directions.push(
            batch
                .iter()
                .map(|s| {
                    let r = s.direction.as_radians();
                    [r.sin(), r.cos()]
                })
                .collect(),
        );
        features.positions.push(
            batch
                .iter()
                .enumerate()
                .map(|(i, s)| {
                    let rel = (start_centroids[i] - s.window.centroid().to_vector()) / 0.001;
                    [rel.x, rel.y]
                })
                .collect(),
        );
        for (i, s) in batch.iter().enumerate() {
            if !s.ended {
                features.lengths[i] += 1;
            }
        }
    }
}

/// Decodes a displacement-ratio action into (rotation, distance,
/// altitude) and advances the sample's window. A failed transform is
/// local to the sample: it logs and holds position.
fn execute_move(state: &mut EpisodeState, ratio: [f64; 2], altitude_ratio: Ratio, bounds: &MapBounds) {
    let bearing_turns = ((ratio[0].atan2(ratio[1]) / PI + 2.0) / 2.0) % 1.0;
    let angle = Angle::from_degrees((bearing_turns * 360.0).round());
    let distance = ratio[0].hypot(ratio[1]) * (state.window.edge_length() / 2.0);
    let altitude = Length::from_meters(
        (altitude_ratio.as_f64() * (MAX_VIEW_EDGE_METERS - MIN_VIEW_EDGE_METERS)).round()
            + MIN_VIEW_EDGE_METERS,
    );

    match view::advance(
        &state.window,
        angle,
        distance,
        altitude,
        bounds,
        Some(state.direction),
    ) {
        Ok((window, direction)) => {
            state.window = window;
            state.direction = direction;
        }
        Err(e) => {
            warn!(id = %state.id, error = %e, "view transform failed; sample holds position");
        }
    }
}

/// Renormalizes the action ratio so neither component exceeds unit
/// magnitude, and clips altitude and progress into [0, 1].
fn normalize_prediction(mut p: PolicyOutput) -> PolicyOutput {
    let m = p.action_ratio[0].abs().max(p.action_ratio[1].abs()).max(1.0);
    p.action_ratio[0] /= m;
    p.action_ratio[1] /= m;
    p.altitude_ratio = p.altitude_ratio.clamped_unit();
    p.progress = p.progress.clamped_unit();
    p
}

/// Number of dialog rounds in an instruction transcript: `[QUE]`-split
/// rounds, minus those opening with an affirmation (those rounds asked
/// nothing new).
fn dialog_rounds(text: &str) -> usize {
    let rounds: Vec<&str> = text.split("[QUE]").collect();
    let affirmed = rounds
        .iter()
        .filter(|r| r.chars().take(5).collect::<String>().contains("Yes"))
        .count();
    rounds.len() - affirmed
}

/// One outer training iteration: a teacher-forced pass and a
/// student-driven pass against the same batch, each with its own fresh
/// episode set. `ended` state never crosses the regime switch.
#[derive(Debug, Clone)]
pub struct Trainer {
    pub controller: RolloutController,
    pub teacher_pass_weight: f64,
    pub student_pass_weight: f64,
}

#[derive(Debug)]
pub struct TrainOutcome {
    /// Weighted, batch-normalized sum of both passes' objectives.
    pub objective: f64,
    pub teacher_pass: RolloutOutcome,
    pub student_pass: RolloutOutcome,
}

impl Trainer {
    pub fn train_iteration(
        &self,
        env: &mut dyn Environment,
        policy: &mut dyn Policy,
        objective: &mut dyn Objective,
    ) -> TrainOutcome {
        let teacher_pass =
            self.controller
                .rollout(env, policy, Some(&mut *objective), FeedbackRegime::Teacher);
        let student_pass =
            self.controller
                .rollout(env, policy, Some(&mut *objective), FeedbackRegime::Student);

        let batch_size = teacher_pass.trajectories.len().max(1) as f64;
        let combined = self.teacher_pass_weight * teacher_pass.objective / batch_size
            + self.student_pass_weight * student_pass.objective / batch_size;

        TrainOutcome {
            objective: combined,
            teacher_pass,
            student_pass,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::ScriptedPolicy;
    use approx::assert_relative_eq;

    /// An east-facing square window, consistent with the 90° starting
    /// direction the test environment reports.
    fn window_at(lat: f64, lon: f64, edge: f64) -> ViewWindow {
        let h = edge / 2.0;
        ViewWindow::from_corners([
            GeoPoint::new(lat + h, lon + h),
            GeoPoint::new(lat - h, lon + h),
            GeoPoint::new(lat - h, lon - h),
            GeoPoint::new(lat + h, lon - h),
        ])
    }

    /// Deterministic in-memory environment: straight eastbound routes,
    /// constant rasters.
    struct LineEnv {
        samples: usize,
        blind: bool,
    }

    impl LineEnv {
        fn observation(&self, k: usize) -> Observation {
            let edge = 0.002;
            let windows: Vec<ViewWindow> = (0..4)
                .map(|j| window_at(0.01 * k as f64, 0.003 * j as f64, edge))
                .collect();
            let start = windows[0];
            Observation {
                map_id: MapId("synthmap".to_string()),
                route_id: RouteId(format!("route-{k}")),
                instructions: "head east to the parking lot".to_string(),
                dialog_history: String::new(),
                bounds: MapBounds::new(GeoPoint::new(-1.0, -1.0), GeoPoint::new(1.0, 1.0)),
                lat_ratio: 1e-5,
                reference_path: (!self.blind)
                    .then(|| ReferencePath::new(windows, SaliencyMap::zeros(4, 4))),
                bbox_ground_truth: None,
                starting_window: start,
                starting_direction: Angle::from_degrees(90.0),
                current_view: ViewRaster::filled(8, 8, 127),
            }
        }
    }

    impl Environment for LineEnv {
        fn observations(
            &mut self,
            _windows: Option<&[ViewWindow]>,
            _directions: Option<&[Angle]>,
        ) -> Vec<Observation> {
            (0..self.samples).map(|k| self.observation(k)).collect()
        }
    }

    /// Counts terms and injects one NaN to exercise the guard.
    struct CountingObjective {
        calls: usize,
        nan_at_call: Option<usize>,
    }

    impl Objective for CountingObjective {
        fn step_terms(
            &mut self,
            _sample: usize,
            _prediction: &PolicyOutput,
            oracle: Option<&OracleDecision>,
            _observation: &Observation,
        ) -> Vec<f64> {
            self.calls += 1;
            let term = if self.nan_at_call == Some(self.calls) {
                f64::NAN
            } else {
                1.0
            };
            match oracle {
                Some(_) => vec![term],
                None => vec![],
            }
        }
    }

    #[test]
    fn teacher_rollout_reaches_the_goal() {
        let mut env = LineEnv {
            samples: 2,
            blind: false,
        };
        let mut policy = ScriptedPolicy::hold();
        let controller = RolloutController::new(RolloutConfig { max_steps: 30 });
        let outcome = controller.rollout(
            &mut env,
            &mut policy,
            None,
            FeedbackRegime::Teacher,
        );

        assert_eq!(outcome.trajectories.len(), 2);
        for traj in &outcome.trajectories {
            assert!(traj.steps() <= 30);
            // the last recorded oracle progress must have cleared the
            // goal threshold or the budget must have been hit
            let final_progress = traj
                .oracle_progress
                .iter()
                .flatten()
                .last()
                .map(|r| r.as_f64());
            assert!(final_progress.is_some());
            // an eastbound straight route is reachable well within the
            // budget
            assert!(traj.steps() < 30, "route should finish early");
        }
    }

    #[test]
    fn budget_bounds_the_rollout_and_ended_transitions_once() {
        let mut env = LineEnv {
            samples: 3,
            blind: false,
        };
        // A policy that never moves: under the student regime nothing
        // terminates until the budget.
        let mut policy = ScriptedPolicy::hold();
        let budget = 5;
        let controller = RolloutController::new(RolloutConfig { max_steps: budget });
        let outcome = controller.rollout(
            &mut env,
            &mut policy,
            None,
            FeedbackRegime::Student,
        );

        for traj in &outcome.trajectories {
            assert!(traj.steps() <= budget);
            // one prediction recorded per pre-termination step, and no
            // appends after the sample ended
            assert_eq!(traj.predicted_actions.len(), budget);
            assert_eq!(traj.path.len(), budget); // start + (budget-1) moves
        }
    }

    #[test]
    fn student_regime_executes_model_actions() {
        let mut env = LineEnv {
            samples: 1,
            blind: false,
        };
        // drive straight ahead (east, since the start faces 90°)
        let mut policy = ScriptedPolicy {
            action_ratio: [0.0, 1.0],
            altitude_ratio: 0.5,
            progress: 0.0,
        };
        let controller = RolloutController::new(RolloutConfig { max_steps: 4 });
        let outcome = controller.rollout(
            &mut env,
            &mut policy,
            None,
            FeedbackRegime::Student,
        );

        let traj = &outcome.trajectories[0];
        let (first, _) = traj.path.first().unwrap();
        let (last, _) = traj.path.last().unwrap();
        assert!(
            last.centroid().lon > first.centroid().lon + 1e-4,
            "window should have moved east"
        );
        assert_relative_eq!(last.centroid().lat, first.centroid().lat, epsilon = 1e-6);
    }

    #[test]
    fn nan_objective_terms_are_excluded() {
        let mut env = LineEnv {
            samples: 1,
            blind: false,
        };
        let mut policy = ScriptedPolicy::hold();
        let controller = RolloutController::new(RolloutConfig { max_steps: 3 });

        let mut clean = CountingObjective {
            calls: 0,
            nan_at_call: None,
        };
        let baseline = controller.rollout(
            &mut env,
            &mut policy,
            Some(&mut clean),
            FeedbackRegime::Student,
        );

        let mut poisoned = CountingObjective {
            calls: 0,
            nan_at_call: Some(2),
        };
        let poisoned_outcome = controller.rollout(
            &mut env,
            &mut policy,
            Some(&mut poisoned),
            FeedbackRegime::Student,
        );

        assert!(baseline.objective.is_finite());
        assert!(poisoned_outcome.objective.is_finite());
        assert_relative_eq!(poisoned_outcome.objective, baseline.objective - 1.0);
    }

    #[test]
    fn blind_environment_skips_oracle_and_objective() {
        let mut env = LineEnv {
            samples: 2,
            blind: true,
        };
        let mut policy = ScriptedPolicy::hold();
        let controller = RolloutController::new(RolloutConfig { max_steps: 3 });
        let mut objective = CountingObjective {
            calls: 0,
            nan_at_call: None,
        };
        let outcome = controller.rollout(
            &mut env,
            &mut policy,
            Some(&mut objective),
            FeedbackRegime::Student,
        );

        assert_eq!(objective.calls, 0);
        assert_relative_eq!(outcome.objective, 0.0);
        for traj in &outcome.trajectories {
            assert!(traj.oracle_actions.is_empty());
        }
    }

    #[test]
    fn oracle_failure_is_local_to_the_sample() {
        // Sample 1 starts on a self-intersecting (bowtie) window: the
        // oracle fails every step. Sample 0 must still finish its route
        // and the batch must terminate at the budget without panicking.
        struct MixedEnv {
            inner: LineEnv,
        }

        impl Environment for MixedEnv {
            fn observations(
                &mut self,
                windows: Option<&[ViewWindow]>,
                directions: Option<&[Angle]>,
            ) -> Vec<Observation> {
                let mut obs = self.inner.observations(windows, directions);
                obs[1].starting_window = ViewWindow::from_corners([
                    GeoPoint::new(0.01, 0.0),
                    GeoPoint::new(0.011, 0.001),
                    GeoPoint::new(0.011, 0.0),
                    GeoPoint::new(0.01, 0.001),
                ]);
                obs
            }
        }

        let mut env = MixedEnv {
            inner: LineEnv {
                samples: 2,
                blind: false,
            },
        };
        let mut policy = ScriptedPolicy::hold();
        let budget = 15;
        let controller = RolloutController::new(RolloutConfig { max_steps: budget });
        let outcome = controller.rollout(
            &mut env,
            &mut policy,
            None,
            FeedbackRegime::Teacher,
        );

        // sample 0 reached its goal early
        assert!(outcome.trajectories[0].steps() < budget);
        // sample 1 held position for the whole budget; every oracle
        // record is the failure marker
        let stuck = &outcome.trajectories[1];
        assert!(stuck.oracle_actions.iter().all(|d| d.is_none()));
        let (first, _) = stuck.path.first().unwrap();
        let (last, _) = stuck.path.last().unwrap();
        assert_eq!(first.corners(), last.corners());
    }

    #[test]
    fn train_iteration_runs_independent_passes() {
        let mut env = LineEnv {
            samples: 2,
            blind: false,
        };
        let mut policy = ScriptedPolicy::hold();
        let trainer = Trainer {
            controller: RolloutController::new(RolloutConfig { max_steps: 10 }),
            teacher_pass_weight: 1.0,
            student_pass_weight: 0.5,
        };
        let mut objective = CountingObjective {
            calls: 0,
            nan_at_call: None,
        };
        let outcome = trainer.train_iteration(&mut env, &mut policy, &mut objective);

        // the student pass starts from scratch: its trajectories begin
        // at the route start, not where the teacher pass ended
        let t0 = outcome.teacher_pass.trajectories[0].path[0].0;
        let s0 = outcome.student_pass.trajectories[0].path[0].0;
        assert_eq!(t0.corners(), s0.corners());
        assert!(outcome.objective.is_finite());
    }

    #[test]
    fn dialog_round_counting() {
        assert_eq!(dialog_rounds("go north"), 1);
        assert_eq!(dialog_rounds("go north[QUE]is it the red roof?"), 2);
        assert_eq!(dialog_rounds("go north[QUE]Yes, keep going"), 1);
        assert_eq!(dialog_rounds("a[QUE]Yes b[QUE]turn left"), 2);
    }
}

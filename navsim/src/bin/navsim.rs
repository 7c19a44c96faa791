use clap::Parser;
use std::fs;
use std::path::PathBuf;

use navsim_lib::{
    policy::ScriptedPolicy,
    rollout::{RolloutConfig, RolloutController},
    scenario::{synthetic::SyntheticEnvironment, Scenario},
    FeedbackRegime,
};

#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scenario configuration toml file.
    ///
    /// The default nominal scenario is used when not provided.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the scenario's feedback regime
    #[arg(long, value_enum)]
    regime: Option<FeedbackRegime>,

    /// Override the scenario's step budget
    #[arg(long)]
    steps: Option<usize>,

    /// Write trajectory records to this JSON file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opts = Opts::parse();

    let mut scenario = Scenario::load(opts.scenario.as_ref());
    if let Some(steps) = opts.steps {
        scenario.rollout.max_steps = steps;
    }
    let regime = opts.regime.unwrap_or(scenario.rollout.regime);

    let mut env = SyntheticEnvironment::new(&scenario);
    let mut policy = ScriptedPolicy::forward();
    let controller = RolloutController::new(RolloutConfig {
        max_steps: scenario.rollout.max_steps,
    });

    let outcome = controller.rollout(&mut env, &mut policy, None, regime);

    for traj in outcome.trajectories.iter() {
        let final_progress = traj
            .oracle_progress
            .iter()
            .flatten()
            .last()
            .map(|r| r.as_f64())
            .unwrap_or(f64::NAN);
        println!(
            "{}: {} steps, final progress {:.3}",
            traj.id,
            traj.steps(),
            final_progress
        );
    }

    let json = serde_json::to_string_pretty(&outcome.trajectories)?;
    match opts.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}

// cargo run --bin route-profile --release -- --route eastbound-0 /tmp/route_profile.txt

use clap::Parser;
use std::io::prelude::*;
use std::path::PathBuf;
use std::{fs::File, io};

use navsim_lib::{
    oracle, scenario::synthetic::SyntheticEnvironment, scenario::Scenario, Environment,
    FeedbackRegime,
};
use navtypes::window::METERS_PER_DEGREE;

/// Print the oracle progress/altitude profile along a scenario route:
/// one line per waypoint, as seen from that waypoint's window.
#[derive(Parser, Debug)]
#[command(version)]
struct Opts {
    /// Scenario configuration toml file.
    ///
    /// The default nominal scenario is used when not provided.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Profile only this route id (all routes when not provided)
    #[arg(short = 'r', long)]
    route: Option<String>,

    /// Output file path to write (stdout when not provided)
    output: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Opts::parse();

    let scenario = Scenario::load(opts.scenario);
    let mut env = SyntheticEnvironment::new(&scenario);
    let observations = env.observations(None, None);

    let mut output: Box<dyn Write> = match opts.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    for ob in observations.iter() {
        if let Some(only) = opts.route.as_ref() {
            if ob.route_id.0 != *only {
                continue;
            }
        }

        let path = ob
            .reference_path
            .as_ref()
            .expect("Synthetic routes always carry ground truth");

        writeln!(&mut output, "# route {}", ob.route_id)?;
        for (idx, window) in path.windows().iter().enumerate() {
            let decision = oracle::synthesize(window, path, false, FeedbackRegime::Teacher)
                .expect("Waypoint windows are never degenerate");
            let goal_distance_m =
                window.centroid().distance_to(path.last().centroid()) * METERS_PER_DEGREE;
            writeln!(
                &mut output,
                "{} {} {} {}",
                idx,
                goal_distance_m,
                decision.progress.as_f64(),
                decision.altitude_ratio.as_f64(),
            )?;
        }
    }

    Ok(())
}

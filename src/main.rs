//! Schwefel-function annealing run driven by a JSON parameter file.

use adaptive_anneal::params::Params;
use adaptive_anneal::sa::SaEngine;
use adaptive_anneal::schwefel::{self, Acceptance, SchwefelProblem};
use anyhow::Result;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    match args.as_slice() {
        [_, path] => match run(path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
        [name, ..] if args.len() > 2 => {
            println!("too many arguments\nusage: {name} <parameters.json>");
            ExitCode::from(2)
        }
        _ => {
            println!("missing parameters.json file\nusage: anneal-schwefel <parameters.json>");
            ExitCode::from(2)
        }
    }
}

fn run(path: &str) -> Result<()> {
    let params = Params::from_json_file(path)?;

    let dimension = params.get("dimension").map_or(2, |d| d as usize);
    let acceptance = if params.flag("distance scaled acceptance") {
        Acceptance::DistanceScaled
    } else {
        Acceptance::Metropolis
    };
    let problem = SchwefelProblem::new(dimension).with_acceptance(acceptance);

    let print_results = params.flag("print results");
    let seed = params.get("seed").map(|s| s as u64);

    let mut engine = SaEngine::new(problem, params)?.with_trajectory(print_results);
    if let Some(seed) = seed {
        engine = engine.with_seed(seed);
    }

    let start = Instant::now();
    let outcome = engine.optimise();
    println!("Optimisation took {}ms", start.elapsed().as_millis());

    println!("number of function evaluations: {}", engine.policy().evaluations());
    println!("iterations: {}", outcome.iterations);
    println!("accepted moves: {}", outcome.accepted_moves);
    println!("restarts: {}", outcome.restarts);
    println!("final temperature: {}", outcome.final_temperature);
    println!("current solution: {}", outcome.current);
    println!("best solution: {}", outcome.best);

    if let Some(trajectory) = &outcome.trajectory {
        // Trajectory dumps are best-effort: a failed write must not void
        // the optimization result.
        if let Err(err) = schwefel::write_trajectory("trajectory.txt", trajectory) {
            log::warn!("cannot write trajectory.txt: {err}");
        }
        if let Err(err) = schwefel::write_accepted("accepted.txt", trajectory) {
            log::warn!("cannot write accepted.txt: {err}");
        }
    }

    Ok(())
}

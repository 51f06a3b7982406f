//! SA execution loop.

use super::runtime::RuntimeInfo;
use super::types::SaPolicy;
use crate::params::Params;
use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hard ceiling on outer-loop iterations, enforced regardless of what the
/// parameter file says. A missing or absurd `max iterations` must never
/// leave the loop unbounded.
pub const ITERATION_CEILING: u64 = 50_000_000;

/// Parallel per-iteration logs of a run: every visited solution, the
/// temperature and acceptance probability at that iteration, and the
/// subsequence of accepted proposals.
#[derive(Debug, Clone)]
pub struct Trajectory<S> {
    /// Current solution at each iteration, recorded before the acceptance
    /// decision takes effect.
    pub visited: Vec<S>,

    /// Accepted proposals only, in acceptance order.
    pub accepted: Vec<S>,

    /// Temperature used at each iteration.
    pub temperatures: Vec<f64>,

    /// Acceptance probability computed at each iteration (unclamped, may
    /// exceed 1 for improving moves).
    pub accept_probabilities: Vec<f64>,
}

impl<S> Default for Trajectory<S> {
    fn default() -> Self {
        Self {
            visited: Vec::new(),
            accepted: Vec::new(),
            temperatures: Vec::new(),
            accept_probabilities: Vec::new(),
        }
    }
}

/// Result of one annealing run.
#[derive(Debug, Clone)]
pub struct SaOutcome<S: Clone> {
    /// Best solution ever produced, by the policy's comparison.
    pub best: S,

    /// Current solution when the run terminated.
    pub current: S,

    /// Temperature when the run terminated.
    pub final_temperature: f64,

    /// Schedule advances taken (starts at 1 before the first advance).
    pub temperature_steps: u64,

    /// Outer-loop iterations executed.
    pub iterations: u64,

    /// Accepted moves (including improvements).
    pub accepted_moves: u64,

    /// Improving moves.
    pub improving_moves: u64,

    /// Stagnation restarts taken.
    pub restarts: u64,

    /// Per-iteration logs, present when trajectory recording was enabled.
    pub trajectory: Option<Trajectory<S>>,
}

/// Simulated Annealing engine, generic over the problem policy.
///
/// One engine drives one chain: it exclusively owns its generator, its
/// parameters, and the policy for its entire lifetime. Multiple chains run
/// as multiple engines with nothing shared (see [`multi_start`]).
///
/// # Examples
///
/// ```
/// use adaptive_anneal::params::Params;
/// use adaptive_anneal::sa::SaEngine;
/// use adaptive_anneal::schwefel::SchwefelProblem;
///
/// let params = Params::from_pairs(&[
///     ("initial temperature", 100.0),
///     ("initial max change", 250.0),
///     ("min xi", -500.0),
///     ("max xi", 500.0),
///     ("alpha", 0.1),
///     ("w", 1.0),
///     ("temperature scaling", 0.95),
///     ("min accepted at each temperature", 10.0),
///     ("max same temperature chain", 50.0),
///     ("max iterations", 2000.0),
///     ("max eval", 5000.0),
///     ("max temperature steps", 100.0),
/// ]);
/// let mut engine = SaEngine::new(SchwefelProblem::new(2), params)
///     .unwrap()
///     .with_seed(42);
/// let outcome = engine.optimise();
/// assert!(outcome.iterations > 0);
/// ```
pub struct SaEngine<P: SaPolicy, R: Rng = StdRng> {
    policy: P,
    params: Params,
    rng: R,
    record_trajectory: bool,
}

impl<P: SaPolicy> SaEngine<P, StdRng> {
    /// Builds an engine with an entropy-seeded generator, validating the
    /// policy's required parameters up front.
    pub fn new(policy: P, params: Params) -> Result<Self> {
        Self::with_rng(policy, params, StdRng::seed_from_u64(rand::random()))
    }

    /// Reseeds the engine's generator for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl<P: SaPolicy, R: Rng> SaEngine<P, R> {
    /// Builds an engine around a caller-supplied generator.
    pub fn with_rng(policy: P, params: Params, rng: R) -> Result<Self> {
        params.validate(policy.required_params())?;
        Ok(Self {
            policy,
            params,
            rng,
            record_trajectory: false,
        })
    }

    /// Enables or disables per-iteration trajectory recording.
    pub fn with_trajectory(mut self, record: bool) -> Self {
        self.record_trajectory = record;
        self
    }

    /// The problem policy driving this engine.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The parameter map this engine runs with.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Runs the annealing loop to termination.
    ///
    /// Every call starts a fresh run: a new random current solution and a
    /// freshly initialized schedule state. The loop ends when the iteration
    /// cap is hit or the policy's termination predicate fires; the cap check
    /// comes first, so the engine never relies on the policy to bound the
    /// loop.
    pub fn optimise(&mut self) -> SaOutcome<P::Solution> {
        let cap = iteration_cap(&self.params);

        let mut curr = self.policy.random_solution(&self.params, &mut self.rng);
        let mut info = self.policy.init_runtime(&self.params, &mut self.rng);
        let mut best = curr.clone();

        let mut trajectory = self.record_trajectory.then(Trajectory::default);
        let mut iterations = 0u64;
        let mut accepted_moves = 0u64;
        let mut improving_moves = 0u64;
        let mut restarts = 0u64;

        while iterations < cap && !self.policy.end_search(&self.params, &info) {
            if self.policy.restart(&self.params, &info) {
                curr = self.policy.random_solution(&self.params, &mut self.rng);
                if self.policy.is_better(&curr, &best) {
                    best = curr.clone();
                }
                info.reset_no_progress();
                restarts += 1;
                log::debug!("restart {restarts} after stagnation");
            }

            let new = self.policy.neighbor(&self.params, &info, &curr, &mut self.rng);
            let p = self.policy.accept_probability(&self.params, &info, &new, &curr);
            let u: f64 = self.rng.random_range(0.0..1.0);
            // p >= 1 for improving moves, so the unclamped comparison
            // already accepts them unconditionally.
            let accepted = u < p;

            if let Some(t) = trajectory.as_mut() {
                t.visited.push(curr.clone());
                t.temperatures.push(info.temperature);
                t.accept_probabilities.push(p);
                if accepted {
                    t.accepted.push(new.clone());
                }
            }

            self.policy
                .update_runtime(&self.params, &mut info, &new, &curr, accepted);

            if accepted {
                accepted_moves += 1;
                if self.policy.is_better(&new, &curr) {
                    improving_moves += 1;
                }
                curr = new;
                if self.policy.is_better(&curr, &best) {
                    best = curr.clone();
                }
            }

            iterations += 1;
        }

        SaOutcome {
            best,
            current: curr,
            final_temperature: info.temperature,
            temperature_steps: info.num_temp_steps,
            iterations,
            accepted_moves,
            improving_moves,
            restarts,
            trajectory,
        }
    }
}

/// The engine-enforced iteration cap: the configured `max iterations` when
/// present and sane, clipped to [`ITERATION_CEILING`].
fn iteration_cap(params: &Params) -> u64 {
    match params.get("max iterations") {
        Some(v) if v.is_finite() && v >= 1.0 => (v as u64).min(ITERATION_CEILING),
        _ => ITERATION_CEILING,
    }
}

/// Runs independent annealing chains in parallel, one engine per seed.
///
/// Each worker builds its own engine inside the closure, so chains share no
/// generator, runtime state, or counters; the returned vector is the single
/// aggregation point. Pick the winner with the policy's own comparison.
#[cfg(feature = "parallel")]
pub fn multi_start<P, F>(build: F, seeds: &[u64]) -> Vec<SaOutcome<P::Solution>>
where
    P: SaPolicy,
    P::Solution: Send,
    F: Fn(u64) -> SaEngine<P> + Sync,
{
    use rayon::prelude::*;

    seeds.par_iter().map(|&seed| build(seed).optimise()).collect()
}

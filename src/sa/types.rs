//! Core trait for the annealing engine.

use super::runtime::RuntimeInfo;
use crate::params::Params;
use rand::Rng;

/// Bundle of problem-specific operations driving a Simulated Annealing run.
///
/// The engine holds no knowledge of the objective: neighbor construction,
/// the acceptance criterion, the schedule update, and termination all flow
/// through this trait. Randomness is supplied by the engine's own generator,
/// passed into every stochastic operation — implementations must not keep a
/// generator of their own, so independent chains never share entropy.
///
/// # Minimization
///
/// The convention is minimization: [`SaPolicy::is_better`] should treat the
/// lower objective as the winner. For maximization, negate the objective.
///
/// # References
///
/// Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing";
/// Corana et al. (1987), "Minimizing Multimodal Functions of Continuous
/// Variables with the Simulated Annealing Algorithm" (adaptive step-size).
pub trait SaPolicy {
    /// The solution representation: coordinates plus cached objective value.
    type Solution: Clone;

    /// Parameter keys this policy reads. The engine validates them before
    /// the run starts so a missing key fails fast instead of degenerating
    /// the search mid-flight.
    fn required_params(&self) -> &[&str];

    /// Builds the starting schedule state. May run a bounded sampling
    /// warm-up (e.g. probing the objective to estimate an initial
    /// temperature); this is one-time cost, not part of the hot loop.
    fn init_runtime<R: Rng>(&self, params: &Params, rng: &mut R) -> RuntimeInfo;

    /// Produces a uniformly sampled, feasible, already-evaluated solution.
    fn random_solution<R: Rng>(&self, params: &Params, rng: &mut R) -> Self::Solution;

    /// Proposes an evaluated neighbor of `curr`, perturbing at the scale of
    /// the current `max_change` and resampling until the proposal satisfies
    /// the box constraints (rejection sampling, never clamping — clamping
    /// would pile probability mass onto the boundary).
    fn neighbor<R: Rng>(
        &self,
        params: &Params,
        info: &RuntimeInfo,
        curr: &Self::Solution,
        rng: &mut R,
    ) -> Self::Solution;

    /// Metropolis-style acceptance probability for replacing `curr` with
    /// `new`. Must return at least 1 for any improving move and decrease as
    /// the cost delta grows or the temperature drops.
    fn accept_probability(
        &self,
        params: &Params,
        info: &RuntimeInfo,
        new: &Self::Solution,
        curr: &Self::Solution,
    ) -> f64;

    /// Adaptive-control step run once per iteration: trial bookkeeping,
    /// step-size smoothing on acceptance, and the Markov-chain-length check
    /// that advances the temperature schedule.
    fn update_runtime(
        &self,
        params: &Params,
        info: &mut RuntimeInfo,
        new: &Self::Solution,
        curr: &Self::Solution,
        accepted: bool,
    );

    /// Strict "a is better than b" comparison.
    fn is_better(&self, a: &Self::Solution, b: &Self::Solution) -> bool;

    /// Global termination predicate, polled once per iteration after the
    /// engine's own iteration-cap check.
    fn end_search(&self, params: &Params, info: &RuntimeInfo) -> bool;

    /// Stagnation-triggered restart predicate. When it returns `true` the
    /// engine abandons the current point for a fresh random solution while
    /// keeping the schedule and the best-known solution.
    fn restart(&self, _params: &Params, _info: &RuntimeInfo) -> bool {
        false
    }
}

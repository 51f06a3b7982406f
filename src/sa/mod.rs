//! Simulated Annealing (SA) with adaptive step-size control.
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases over time (temperature), allowing the search to escape
//! local optima. The proposal radius self-tunes: accepted move magnitudes
//! are folded into a per-dimension step-size by exponential smoothing, and
//! the cooling schedule advances on observed mixing rather than on a fixed
//! iteration count.
//!
//! All problem knowledge — objective, neighborhood, acceptance criterion,
//! schedule update, termination — is injected through the [`SaPolicy`]
//! trait; the engine itself is a pure orchestration loop.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Corana, Marchesi, Martini & Ridella (1987), "Minimizing Multimodal
//!   Functions of Continuous Variables with the Simulated Annealing Algorithm"

mod runner;
mod runtime;
mod types;

#[cfg(feature = "parallel")]
pub use runner::multi_start;
pub use runner::{SaEngine, SaOutcome, Trajectory, ITERATION_CEILING};
pub use runtime::RuntimeInfo;
pub use types::SaPolicy;

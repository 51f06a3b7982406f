//! Generic Simulated Annealing engine with adaptive step-size control.
//!
//! The crate separates the reusable optimization loop from everything
//! problem-specific:
//!
//! - **[`sa`]**: the engine itself — the main loop, the
//!   [`RuntimeInfo`](sa::RuntimeInfo) schedule state (temperature,
//!   per-dimension adaptive step-size, acceptance counters), and the
//!   [`SaPolicy`](sa::SaPolicy) contract through which all domain logic is
//!   injected. The step-size tracks accepted move magnitudes by exponential
//!   smoothing, and cooling advances on observed mixing (enough acceptances
//!   or an exhausted patience budget) rather than a fixed count.
//! - **[`params`]**: the flat named-parameter mapping every run is tuned
//!   with, loaded once from flat JSON and validated before the run starts.
//! - **[`schwefel`]**: a complete example policy for the Schwefel benchmark
//!   function, plus line-oriented trajectory persistence.
//!
//! # Architecture
//!
//! The engine holds no objective-specific knowledge; a chain is one engine
//! instance owning its policy, parameters, and seeded generator, so
//! independent chains share nothing. The optional `parallel` feature adds
//! rayon-based multi-start over independent seeds.

pub mod params;
pub mod sa;
pub mod schwefel;

//! Schwefel test function as an annealing policy.
//!
//! The Schwefel function is a standard continuous benchmark, highly
//! multimodal with its global minimum far from the origin — at
//! `x_i ≈ 420.9687` with objective `≈ -418.9829·D` — which punishes
//! schedules that cool too fast. This module provides the full
//! [`SaPolicy`](crate::sa::SaPolicy) wiring for it: evaluation with an
//! infeasibility sentinel, rejection-sampled box-constrained neighbors, two
//! acceptance variants, the adaptive schedule update, and line-oriented
//! trajectory dumps.

use crate::params::Params;
use crate::sa::{RuntimeInfo, SaPolicy, Trajectory};
use rand::Rng;
use std::cell::Cell;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Random probes used to estimate an initial temperature when the
/// configured one is not positive.
const TEMPERATURE_PROBES: usize = 32;

/// A fixed-dimension point with its cached objective value.
///
/// The objective is evaluated exactly once, when the candidate is built;
/// candidates are never mutated afterwards, so the cache cannot go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    x: Vec<f64>,
    f: f64,
}

impl Candidate {
    /// Coordinates of this candidate.
    pub fn coords(&self) -> &[f64] {
        &self.x
    }

    /// Cached objective value. `f64::INFINITY` marks an infeasible point.
    pub fn objective(&self) -> f64 {
        self.f
    }

    /// Euclidean distance to another candidate.
    pub fn distance(&self, other: &Candidate) -> f64 {
        self.x
            .iter()
            .zip(&other.x)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x: [")?;
        for (i, c) in self.x.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "] f: {}", self.f)
    }
}

/// Acceptance criterion variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Acceptance {
    /// Plain Metropolis ratio `exp(-Δf / T)`.
    #[default]
    Metropolis,

    /// Distance-normalized ratio `exp(-Δf / (T·‖Δx‖₂))`: the cost delta is
    /// taken per unit of move length, so a given worsening counts for less
    /// when the proposal moved far.
    DistanceScaled,
}

/// Schwefel minimization problem of a fixed dimensionality.
///
/// Owns the objective-evaluation counter for its runs; independent chains
/// use independent problem instances and never share counts.
///
/// # Examples
///
/// ```
/// use adaptive_anneal::schwefel::SchwefelProblem;
///
/// let problem = SchwefelProblem::new(2);
/// let optimum = problem.evaluate(&[420.9687, 420.9687], -500.0, 500.0);
/// assert!((optimum.objective() + 837.9658).abs() < 1e-2);
/// assert_eq!(problem.evaluations(), 1);
/// ```
#[derive(Debug)]
pub struct SchwefelProblem {
    dimension: usize,
    acceptance: Acceptance,
    evaluations: Cell<u64>,
}

const REQUIRED: &[&str] = &[
    "initial temperature",
    "initial max change",
    "min xi",
    "max xi",
    "alpha",
    "w",
    "temperature scaling",
    "min accepted at each temperature",
    "max same temperature chain",
    "max eval",
    "max temperature steps",
];

impl SchwefelProblem {
    /// Creates a problem of the given dimensionality.
    ///
    /// # Panics
    ///
    /// Panics if `dimension` is zero.
    pub fn new(dimension: usize) -> Self {
        assert!(dimension > 0, "dimension must be at least 1");
        Self {
            dimension,
            acceptance: Acceptance::default(),
            evaluations: Cell::new(0),
        }
    }

    /// Selects the acceptance criterion variant.
    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    /// Problem dimensionality.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Objective evaluations performed so far, warm-up probes included.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }

    /// Evaluates the Schwefel objective `f(x) = -Σ x_i·sin(√|x_i|)` at the
    /// given coordinates under box bounds `[lo, hi]`.
    ///
    /// Any out-of-bounds coordinate makes the whole point infeasible and
    /// maps it to `f64::INFINITY`, so acceptance logic rejects it without
    /// special-casing feasibility. Every call counts one evaluation.
    pub fn evaluate(&self, coords: &[f64], lo: f64, hi: f64) -> Candidate {
        self.evaluations.set(self.evaluations.get() + 1);
        let mut total = 0.0;
        for &xi in coords {
            if xi < lo || xi > hi {
                return Candidate {
                    x: coords.to_vec(),
                    f: f64::INFINITY,
                };
            }
            total -= xi * xi.abs().sqrt().sin();
        }
        Candidate {
            x: coords.to_vec(),
            f: total,
        }
    }

    /// Standard deviation of the objective over a fixed number of random
    /// probes. One-time warm-up cost when no usable initial temperature was
    /// configured.
    fn estimate_temperature<R: Rng>(&self, params: &Params, rng: &mut R) -> f64 {
        let samples: Vec<f64> = (0..TEMPERATURE_PROBES)
            .map(|_| self.random_solution(params, rng).f)
            .collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let var = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>()
            / samples.len() as f64;
        let sd = var.sqrt();
        if sd.is_finite() && sd > 0.0 {
            sd
        } else {
            1.0
        }
    }
}

impl SaPolicy for SchwefelProblem {
    type Solution = Candidate;

    fn required_params(&self) -> &[&str] {
        REQUIRED
    }

    fn init_runtime<R: Rng>(&self, params: &Params, rng: &mut R) -> RuntimeInfo {
        let configured = params["initial temperature"];
        let temperature = if configured > 0.0 {
            configured
        } else {
            let estimated = self.estimate_temperature(params, rng);
            log::debug!("estimated initial temperature {estimated:.4}");
            estimated
        };
        RuntimeInfo::new(temperature, vec![params["initial max change"]; self.dimension])
    }

    fn random_solution<R: Rng>(&self, params: &Params, rng: &mut R) -> Candidate {
        let lo = params["min xi"];
        let hi = params["max xi"];
        let coords: Vec<f64> = (0..self.dimension)
            .map(|_| rng.random_range(lo..hi))
            .collect();
        self.evaluate(&coords, lo, hi)
    }

    fn neighbor<R: Rng>(
        &self,
        params: &Params,
        info: &RuntimeInfo,
        curr: &Candidate,
        rng: &mut R,
    ) -> Candidate {
        let lo = params["min xi"];
        let hi = params["max xi"];
        // x_new = x_curr + D * u, with D the diagonal of per-dimension max
        // change and u uniform in [-1, 1]; out-of-bounds coordinates are
        // resampled rather than clamped.
        let coords: Vec<f64> = (0..self.dimension)
            .map(|i| loop {
                let cand = curr.x[i] + rng.random_range(-1.0..1.0) * info.max_change[i];
                if (lo..=hi).contains(&cand) {
                    break cand;
                }
            })
            .collect();
        self.evaluate(&coords, lo, hi)
    }

    fn accept_probability(
        &self,
        _params: &Params,
        info: &RuntimeInfo,
        new: &Candidate,
        curr: &Candidate,
    ) -> f64 {
        let delta = new.f - curr.f;
        match self.acceptance {
            Acceptance::Metropolis => (-delta / info.temperature).exp(),
            Acceptance::DistanceScaled => {
                let dist = new.distance(curr);
                if dist <= f64::EPSILON {
                    // Zero-length move: fall back to the plain ratio.
                    (-delta / info.temperature).exp()
                } else {
                    (-delta / (info.temperature * dist)).exp()
                }
            }
        }
    }

    fn update_runtime(
        &self,
        params: &Params,
        info: &mut RuntimeInfo,
        new: &Candidate,
        curr: &Candidate,
        accepted: bool,
    ) {
        info.record_trial(accepted);
        if accepted {
            info.smooth_max_change(params["alpha"], params["w"], &new.x, &curr.x);
        }
        if info.chain_complete(
            params["min accepted at each temperature"],
            params["max same temperature chain"],
        ) {
            info.advance_schedule(params["temperature scaling"]);
        }
    }

    fn is_better(&self, a: &Candidate, b: &Candidate) -> bool {
        a.f < b.f
    }

    fn end_search(&self, params: &Params, info: &RuntimeInfo) -> bool {
        self.evaluations.get() as f64 > params["max eval"]
            || info.num_temp_steps as f64 > params["max temperature steps"]
    }

    fn restart(&self, params: &Params, info: &RuntimeInfo) -> bool {
        params
            .get("restart threshold")
            .is_some_and(|t| info.num_no_progress as f64 > t)
    }
}

/// Writes the full visited trajectory, one line per iteration:
/// `c0, c1, ..., objective, temperature, acceptProbability`.
pub fn write_trajectory<P: AsRef<Path>>(path: P, t: &Trajectory<Candidate>) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for ((s, &temp), &p) in t
        .visited
        .iter()
        .zip(&t.temperatures)
        .zip(&t.accept_probabilities)
    {
        for c in s.coords() {
            write!(out, "{c}, ")?;
        }
        writeln!(out, "{}, {temp}, {p}", s.objective())?;
    }
    out.flush()
}

/// Writes accepted solutions only: `c0, c1, ..., objective` per line.
pub fn write_accepted<P: AsRef<Path>>(path: P, t: &Trajectory<Candidate>) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for s in &t.accepted {
        for c in s.coords() {
            write!(out, "{c}, ")?;
        }
        writeln!(out, "{}", s.objective())?;
    }
    out.flush()
}

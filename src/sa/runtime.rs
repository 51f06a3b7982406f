//! Mutable schedule state evolved across a single annealing chain.

/// Per-chain runtime state: current temperature, adaptive per-dimension
/// step-size, and the trial bookkeeping that drives schedule advances.
///
/// One instance belongs to exactly one chain; it is rebuilt by the policy's
/// initializer at the start of every run and mutated once per iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeInfo {
    /// Current temperature. Strictly positive.
    pub temperature: f64,

    /// Per-dimension radius of the proposal perturbation ("max change").
    /// Shrinks and grows with the magnitude of recently accepted moves.
    pub max_change: Vec<f64>,

    /// Accepted trials at the current temperature.
    pub num_accepted_curr_temp: u64,

    /// Total trials at the current temperature.
    pub num_curr_temp: u64,

    /// Schedule advances taken so far. Starts at 1.
    pub num_temp_steps: u64,

    /// Consecutive rejections since the last accepted move. Feeds the
    /// optional restart predicate.
    pub num_no_progress: u64,
}

impl RuntimeInfo {
    /// Creates the state for a fresh chain.
    ///
    /// # Panics
    ///
    /// Panics if `temperature` is not strictly positive or any step-size
    /// entry is negative.
    pub fn new(temperature: f64, max_change: Vec<f64>) -> Self {
        assert!(temperature > 0.0, "temperature must be positive");
        assert!(
            max_change.iter().all(|&m| m >= 0.0),
            "max change entries must be non-negative"
        );
        Self {
            temperature,
            max_change,
            num_accepted_curr_temp: 0,
            num_curr_temp: 0,
            num_temp_steps: 1,
            num_no_progress: 0,
        }
    }

    /// Counter bookkeeping for one trial. Every trial bumps the
    /// per-temperature count; accepted trials additionally bump the
    /// acceptance count and clear the no-progress streak, rejected ones
    /// extend it.
    pub fn record_trial(&mut self, accepted: bool) {
        self.num_curr_temp += 1;
        if accepted {
            self.num_accepted_curr_temp += 1;
            self.num_no_progress = 0;
        } else {
            self.num_no_progress += 1;
        }
    }

    /// Exponential smoothing of the step-size toward the observed accepted
    /// move, dimension by dimension:
    ///
    /// `m[i] <- m[i]*(1 - alpha) + alpha*w*|new[i] - curr[i]|`
    ///
    /// Only accepted evidence informs the step-size; rejections leave it
    /// untouched.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate slices do not match the step-size dimension.
    pub fn smooth_max_change(&mut self, alpha: f64, w: f64, new_x: &[f64], curr_x: &[f64]) {
        assert_eq!(new_x.len(), self.max_change.len(), "dimension mismatch");
        assert_eq!(curr_x.len(), self.max_change.len(), "dimension mismatch");
        for (m, (&n, &c)) in self.max_change.iter_mut().zip(new_x.iter().zip(curr_x)) {
            *m = *m * (1.0 - alpha) + alpha * w * (n - c).abs();
        }
    }

    /// Markov-chain-length policy: the chain at the current temperature is
    /// done once enough moves were accepted (fast mixing) or the patience
    /// budget is spent (slow mixing), whichever comes first. Strict `>`
    /// comparisons on both counters.
    pub fn chain_complete(&self, min_accepted: f64, max_chain: f64) -> bool {
        self.num_accepted_curr_temp as f64 > min_accepted || self.num_curr_temp as f64 > max_chain
    }

    /// Advances the annealing schedule: scales the temperature, counts the
    /// step, and resets the per-temperature counters.
    pub fn advance_schedule(&mut self, scaling: f64) {
        self.temperature *= scaling;
        self.num_temp_steps += 1;
        self.num_accepted_curr_temp = 0;
        self.num_curr_temp = 0;
        log::debug!(
            "schedule advance {}: temperature {:.6e}",
            self.num_temp_steps,
            self.temperature
        );
    }

    /// Clears the no-progress streak, e.g. after a restart.
    pub fn reset_no_progress(&mut self) {
        self.num_no_progress = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn info(dim: usize) -> RuntimeInfo {
        RuntimeInfo::new(100.0, vec![1.0; dim])
    }

    #[test]
    fn test_new_starts_at_step_one() {
        let info = info(2);
        assert_eq!(info.num_temp_steps, 1);
        assert_eq!(info.num_accepted_curr_temp, 0);
        assert_eq!(info.num_curr_temp, 0);
        assert_eq!(info.num_no_progress, 0);
    }

    #[test]
    #[should_panic(expected = "temperature must be positive")]
    fn test_new_rejects_zero_temperature() {
        RuntimeInfo::new(0.0, vec![1.0]);
    }

    #[test]
    fn test_record_trial_counters() {
        let mut info = info(1);
        info.record_trial(false);
        info.record_trial(false);
        info.record_trial(true);
        assert_eq!(info.num_curr_temp, 3);
        assert_eq!(info.num_accepted_curr_temp, 1);
        assert_eq!(info.num_no_progress, 0);

        info.record_trial(false);
        assert_eq!(info.num_no_progress, 1);
    }

    #[test]
    fn test_advance_schedule_scales_and_resets() {
        let mut info = info(1);
        info.record_trial(true);
        info.record_trial(false);
        info.advance_schedule(0.95);
        assert!((info.temperature - 95.0).abs() < 1e-12);
        assert_eq!(info.num_temp_steps, 2);
        assert_eq!(info.num_accepted_curr_temp, 0);
        assert_eq!(info.num_curr_temp, 0);
    }

    #[test]
    fn test_chain_complete_either_counter() {
        let mut info = info(1);
        assert!(!info.chain_complete(2.0, 5.0));

        info.num_accepted_curr_temp = 3;
        assert!(info.chain_complete(2.0, 5.0));

        let mut info = RuntimeInfo::new(1.0, vec![0.0]);
        info.num_curr_temp = 6;
        assert!(info.chain_complete(2.0, 5.0));
    }

    #[test]
    fn test_chain_complete_is_strict() {
        let mut info = info(1);
        info.num_accepted_curr_temp = 2;
        info.num_curr_temp = 5;
        assert!(!info.chain_complete(2.0, 5.0));
    }

    #[test]
    fn test_smooth_tracks_accepted_move() {
        let mut info = RuntimeInfo::new(1.0, vec![10.0, 10.0]);
        info.smooth_max_change(0.5, 1.0, &[3.0, -4.0], &[1.0, 0.0]);
        assert!((info.max_change[0] - 6.0).abs() < 1e-12);
        assert!((info.max_change[1] - 7.0).abs() < 1e-12);
    }

    proptest! {
        // Smoothing is a convex combination: the new radius never leaves
        // the interval spanned by the prior radius and w*|dx|.
        #[test]
        fn prop_smooth_is_convex_combination(
            m0 in 0.0f64..1e6,
            alpha in 0.0f64..=1.0,
            w in 0.0f64..100.0,
            curr in -500.0f64..500.0,
            new in -500.0f64..500.0,
        ) {
            let mut info = RuntimeInfo::new(1.0, vec![m0]);
            info.smooth_max_change(alpha, w, &[new], &[curr]);
            let target = w * (new - curr).abs();
            let lo = m0.min(target) - 1e-9;
            let hi = m0.max(target) + 1e-9;
            prop_assert!(info.max_change[0] >= lo && info.max_change[0] <= hi);
        }

        // A schedule advance always moves the step count by exactly one.
        #[test]
        fn prop_advance_increments_once(scaling in 0.01f64..0.999, advances in 1u64..50) {
            let mut info = RuntimeInfo::new(100.0, vec![1.0]);
            for _ in 0..advances {
                info.advance_schedule(scaling);
            }
            prop_assert_eq!(info.num_temp_steps, 1 + advances);
            prop_assert!(info.temperature > 0.0);
        }
    }
}

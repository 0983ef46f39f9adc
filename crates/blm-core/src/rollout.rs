//! Whole-episode drivers: fixed rotations and seeded random play.
//!
//! [`evaluate_rotation`] scores a hand-written or searched rotation by
//! potency per second. [`random_episode`] plays uniformly random actions from
//! a seeded `ChaCha8Rng`, so the same seed always yields the same trajectory.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::env::{Environment, StepOutcome, StepResult, TerminationCause};
use crate::error::EnvError;

/// Totals for one played episode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationReport {
    /// Sum of unshaped potency over successful casts.
    pub total_potency: f64,
    /// Sum of rewards as the agent would see them.
    pub total_reward: f64,
    /// Elapsed episode time at the end.
    pub elapsed: f64,
    /// Actions taken.
    pub steps: usize,
    /// Successful casts.
    pub casts: usize,
    /// Actions that resolved without casting.
    pub rejected: usize,
    /// Action indices taken, in order.
    pub actions: Vec<usize>,
    /// Set if the episode ended before the driver stopped.
    pub terminated_by: Option<TerminationCause>,
}

impl RotationReport {
    /// Potency per unit of elapsed time, zero if no time passed.
    #[must_use]
    pub fn potency_per_second(&self) -> f64 {
        if self.elapsed > 0.0 {
            self.total_potency / self.elapsed
        } else {
            0.0
        }
    }

    fn record(&mut self, action: usize, result: &StepResult) {
        self.steps += 1;
        self.actions.push(action);
        self.total_reward += result.reward;
        self.total_potency += result.info.potency;
        self.elapsed = result.info.elapsed;
        match result.info.outcome {
            StepOutcome::Cast => self.casts += 1,
            StepOutcome::Rejected(_) => self.rejected += 1,
        }
        self.terminated_by = result.info.termination;
    }
}

/// Resets `env` and plays `actions` in order until they run out or the
/// episode ends.
///
/// # Errors
///
/// Returns [`EnvError::InvalidAction`] for an out-of-range action. Actions
/// before it have already been applied to `env`.
pub fn evaluate_rotation(
    env: &mut Environment,
    actions: &[usize],
) -> Result<RotationReport, EnvError> {
    env.reset();
    let mut report = RotationReport::default();
    for &action in actions {
        let result = env.step(action)?;
        report.record(action, &result);
        if result.done {
            break;
        }
    }
    Ok(report)
}

/// Resets `env` and plays uniformly random actions until the episode ends
/// or `max_steps` actions have been taken.
pub fn random_episode(env: &mut Environment, seed: u64, max_steps: usize) -> RotationReport {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let action_count = env.action_space().n;
    env.reset();
    let mut report = RotationReport::default();
    while report.steps < max_steps && !env.is_terminal() {
        let action = rng.gen_range(0..action_count);
        // In-range actions on an active episode never fail.
        let Ok(result) = env.step(action) else {
            break;
        };
        report.record(action, &result);
    }
    report
}

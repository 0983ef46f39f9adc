//! Vectorised environments for parallel rollouts.
//!
//! Each slot is an independent [`Environment`]; nothing is shared, so
//! stepping them on rayon's pool needs no synchronisation. Results are
//! returned in slot order regardless of scheduling.

use rayon::prelude::*;

use crate::ability::AbilityCatalog;
use crate::config::SimulationConfig;
use crate::env::{Environment, StepResult};
use crate::error::{ConfigError, EnvError};
use crate::observation::Observation;

/// A batch of independent environments stepped together.
#[derive(Debug, Clone)]
pub struct VecEnv {
    envs: Vec<Environment>,
}

impl VecEnv {
    /// Creates `count` environments sharing one config and catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn new(
        count: usize,
        config: &SimulationConfig,
        catalog: &AbilityCatalog,
    ) -> Result<Self, ConfigError> {
        let template = Environment::new(config.clone(), catalog.clone())?;
        Ok(Self {
            envs: vec![template; count],
        })
    }

    /// Number of environments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.envs.len()
    }

    /// No environments in the batch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.envs.is_empty()
    }

    /// Resets every environment.
    pub fn reset_all(&mut self) -> Vec<Observation> {
        self.envs.par_iter_mut().map(Environment::reset).collect()
    }

    /// Resets a single environment, typically after it reported `done`.
    pub fn reset_one(&mut self, index: usize) -> Option<Observation> {
        self.envs.get_mut(index).map(Environment::reset)
    }

    /// Steps environment `i` with `actions[i]`, all in parallel.
    ///
    /// Per-environment failures (invalid action, stepping a finished
    /// episode) are reported in that slot and leave the others unaffected.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::BatchSize`] if `actions.len() != self.len()`.
    pub fn step_all(
        &mut self,
        actions: &[usize],
    ) -> Result<Vec<Result<StepResult, EnvError>>, EnvError> {
        if actions.len() != self.envs.len() {
            return Err(EnvError::BatchSize {
                actions: actions.len(),
                envs: self.envs.len(),
            });
        }
        Ok(self
            .envs
            .par_iter_mut()
            .zip(actions.par_iter())
            .map(|(env, &action)| env.step(action))
            .collect())
    }

    /// The environments, in slot order.
    #[must_use]
    pub fn envs(&self) -> &[Environment] {
        &self.envs
    }
}

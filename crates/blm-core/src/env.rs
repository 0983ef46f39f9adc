//! Gym-style environment facade.
//!
//! [`Environment`] owns one episode and exposes the RL contract:
//!
//! - `reset() -> Observation`
//! - `step(action) -> (observation, reward, done, info)`
//!
//! Each `step` is one atomic transition: resolve the ability (legality,
//! clock, regeneration, scaling, polarity), update cooldowns, then check for
//! termination. The episode is a two-state machine, Active then Terminal,
//! and Terminal only leaves through `reset`.
//!
//! # Example
//!
//! ```
//! use blm_core::{Environment, SimulationConfig};
//!
//! let mut env = Environment::with_default_catalog(SimulationConfig::default()).unwrap();
//! let fire_1 = env.catalog().index_of("Fire 1").unwrap();
//!
//! let result = env.step(fire_1).unwrap();
//! assert_eq!(result.reward, 180.0);
//! assert_eq!(result.observation.polarity, 1);
//! assert!(!result.done);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ability::AbilityCatalog;
use crate::config::SimulationConfig;
use crate::error::{ConfigError, EnvError};
use crate::observation::{ActionSpace, Observation, ObservationSpace};
use crate::resolver::{AbilityResolver, RejectReason, Resolution};
use crate::state::EpisodeState;

// =============================================================================
// Step Output
// =============================================================================

/// Lifecycle of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodePhase {
    /// Accepting steps.
    Active,
    /// Ended; only `reset` is accepted.
    Terminal,
}

/// Why an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminationCause {
    /// Mana went negative.
    ManaExhausted,
    /// Elapsed time reached the episode horizon.
    HorizonReached,
}

/// How the chosen action resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The ability was cast.
    Cast,
    /// The ability was not cast.
    Rejected(RejectReason),
}

/// Diagnostics returned alongside each step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Name of the chosen ability.
    pub ability_name: String,
    /// Whether it was cast.
    pub outcome: StepOutcome,
    /// Scaled potency before reward shaping. Zero when rejected.
    pub potency: f64,
    /// Mana paid. Zero when rejected.
    pub mana_cost: f64,
    /// Time the step consumed.
    pub duration: f64,
    /// Regeneration ticks applied during the step.
    pub regen_ticks: u32,
    /// Elapsed episode time after the step.
    pub elapsed: f64,
    /// Set on the step that ended the episode.
    pub termination: Option<TerminationCause>,
}

/// Result of a single environment step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Observation after the step.
    pub observation: Observation,
    /// Reward for the step.
    pub reward: f64,
    /// The episode has ended.
    pub done: bool,
    /// Step diagnostics.
    pub info: StepInfo,
}

// =============================================================================
// Environment
// =============================================================================

/// Single-episode Black Mage rotation environment.
///
/// Instances share nothing, so parallel rollouts just use one instance each.
#[derive(Debug, Clone)]
pub struct Environment {
    config: SimulationConfig,
    catalog: AbilityCatalog,
    state: EpisodeState,
    phase: EpisodePhase,
}

impl Environment {
    /// Creates an environment, already reset and Active.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` or `catalog` fails validation.
    pub fn new(config: SimulationConfig, catalog: AbilityCatalog) -> Result<Self, ConfigError> {
        config.validate()?;
        catalog.validate()?;
        let state = EpisodeState::fresh(&config, catalog.len());
        Ok(Self {
            config,
            catalog,
            state,
            phase: EpisodePhase::Active,
        })
    }

    /// Creates an environment with the Black Mage catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `config` fails validation.
    pub fn with_default_catalog(config: SimulationConfig) -> Result<Self, ConfigError> {
        Self::new(config, AbilityCatalog::black_mage())
    }

    /// Starts a fresh episode and returns its first observation.
    pub fn reset(&mut self) -> Observation {
        self.state = EpisodeState::fresh(&self.config, self.catalog.len());
        self.phase = EpisodePhase::Active;
        debug!(
            mana = self.state.mana.current(),
            next_tick = self.state.clock.next_tick(),
            "episode reset"
        );
        self.observation()
    }

    /// Advances the episode by one action.
    ///
    /// Rejected actions (cooldown, mana, polarity gate) are `Ok` with a
    /// penalty or zero reward.
    ///
    /// # Errors
    ///
    /// - [`EnvError::StepAfterTerminal`] if the episode already ended.
    /// - [`EnvError::InvalidAction`] if `action` is not a catalog index.
    ///
    /// Neither error changes state.
    pub fn step(&mut self, action: usize) -> Result<StepResult, EnvError> {
        if self.phase == EpisodePhase::Terminal {
            return Err(EnvError::StepAfterTerminal);
        }
        let ability = self.catalog.get(action).ok_or(EnvError::InvalidAction {
            action,
            action_count: self.catalog.len(),
        })?;

        let resolution =
            AbilityResolver::new(&self.config).resolve(&mut self.state, action, ability);

        let (outcome, reward, potency, mana_cost) = match resolution {
            Resolution::Cast(cast) => {
                if self.config.cooldowns_enabled {
                    let cooldown = ability.cooldown_after_cast(cast.duration);
                    self.state.cooldowns.record_cast(action, cooldown, cast.duration);
                }
                (
                    StepOutcome::Cast,
                    self.config.reward_shaping.apply(cast.potency),
                    cast.potency,
                    cast.mana_cost,
                )
            }
            Resolution::Rejected {
                reason: RejectReason::PolarityGated,
                ..
            } => (StepOutcome::Rejected(RejectReason::PolarityGated), 0.0, 0.0, 0.0),
            Resolution::Rejected { reason, .. } => (
                StepOutcome::Rejected(reason),
                self.config.no_op_reward,
                0.0,
                0.0,
            ),
        };

        let termination = self.termination_cause();
        let done = termination.is_some();
        if let Some(cause) = termination {
            self.phase = EpisodePhase::Terminal;
            info!(
                ?cause,
                elapsed = self.state.clock.elapsed(),
                mana = self.state.mana.current(),
                "episode ended"
            );
        }

        debug!(
            action,
            ability = %ability.name,
            ?outcome,
            reward,
            mana = self.state.mana.current(),
            polarity = %self.state.polarity,
            done,
            "step"
        );

        Ok(StepResult {
            observation: self.observation(),
            reward,
            done,
            info: StepInfo {
                ability_name: ability.name.clone(),
                outcome,
                potency,
                mana_cost,
                duration: resolution.duration(),
                regen_ticks: resolution.regen_ticks(),
                elapsed: self.state.clock.elapsed(),
                termination,
            },
        })
    }

    fn termination_cause(&self) -> Option<TerminationCause> {
        if self.state.mana.is_exhausted() {
            Some(TerminationCause::ManaExhausted)
        } else if self.state.clock.horizon_reached() {
            Some(TerminationCause::HorizonReached)
        } else {
            None
        }
    }

    /// Agent-visible snapshot of the current state.
    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation::from_state(&self.state)
    }

    /// Full internal state, including clock bookkeeping.
    #[must_use]
    pub fn state(&self) -> &EpisodeState {
        &self.state
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// The episode has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == EpisodePhase::Terminal
    }

    /// Configuration this environment was built with.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Ability table; index = action.
    #[must_use]
    pub fn catalog(&self) -> &AbilityCatalog {
        &self.catalog
    }

    /// Declared action space.
    #[must_use]
    pub fn action_space(&self) -> ActionSpace {
        ActionSpace {
            n: self.catalog.len(),
        }
    }

    /// Declared observation space.
    #[must_use]
    pub fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::new(&self.config, self.catalog.len())
    }
}

// =============================================================================
// Tests
// =============================================================================

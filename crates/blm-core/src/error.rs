//! Error types for environment construction and stepping.
//!
//! Only contract violations are errors. An action that is on cooldown, short
//! on mana, or gated by polarity is a legal step with a penalty or zero
//! reward, and exhausting mana is the designed terminal condition.

use thiserror::Error;

/// Errors surfaced by [`Environment::step`](crate::env::Environment::step)
/// and [`VecEnv::step_all`](crate::vec_env::VecEnv::step_all).
///
/// None of these mutate environment state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// The action index is not a catalog entry.
    #[error("invalid action {action}: expected an index in 0..{action_count}")]
    InvalidAction {
        /// The rejected index.
        action: usize,
        /// Number of abilities in the catalog.
        action_count: usize,
    },

    /// The episode already ended; `reset` must be called first.
    #[error("step called on a terminal episode; call reset first")]
    StepAfterTerminal,

    /// A batched step received the wrong number of actions.
    #[error("batch size mismatch: {actions} actions for {envs} environments")]
    BatchSize {
        /// Number of actions supplied.
        actions: usize,
        /// Number of environments in the batch.
        envs: usize,
    },
}

/// Errors raised while validating a [`SimulationConfig`](crate::config::SimulationConfig)
/// or an [`AbilityCatalog`](crate::ability::AbilityCatalog).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Polarity bound outside the tiers the scaling tables cover.
    #[error("outer polarity bound must be within 1..=3, got {0}")]
    PolarityBound(i8),

    /// A numeric setting that must be strictly positive and finite.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The tick interval is too small for the horizon to be simulated.
    #[error("tick interval {tick_interval} spans too many ticks over horizon {episode_horizon}")]
    TickInterval {
        /// The rejected interval.
        tick_interval: f64,
        /// Configured episode horizon.
        episode_horizon: f64,
    },

    /// The first regeneration tick would land at or before time zero.
    #[error("first tick lead must be within [0, {tick_interval}), got {lead}")]
    FirstTickLead {
        /// The rejected lead.
        lead: f64,
        /// Configured tick interval.
        tick_interval: f64,
    },

    /// The catalog has no abilities, so the action space would be empty.
    #[error("ability catalog is empty")]
    EmptyCatalog,

    /// An ability carries a negative or non-finite numeric field.
    #[error("ability {name:?} has invalid {field}: {value}")]
    InvalidAbility {
        /// Ability name.
        name: String,
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// JSON configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

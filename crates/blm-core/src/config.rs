//! Simulation configuration.
//!
//! One immutable [`SimulationConfig`] describes both the game constants
//! (mana pool, polarity bound, tick cadence) and the switches that select
//! between the historical environment variants (cooldowns, cast-time scaling,
//! mana gating, reward shaping).

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Most regeneration ticks an episode horizon may span.
pub const MAX_TICKS_PER_EPISODE: f64 = 1_000_000.0;

/// How raw potency is turned into reward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum RewardShaping {
    /// Reward equals potency.
    #[default]
    Identity,
    /// Reward is `(potency / scale)^3`.
    CubicNormalized {
        /// Potency that maps to a reward of 1.
        scale: f64,
    },
}

impl RewardShaping {
    /// Shapes a potency value.
    #[must_use]
    pub fn apply(self, potency: f64) -> f64 {
        match self {
            Self::Identity => potency,
            Self::CubicNormalized { scale } => (potency / scale).powi(3),
        }
    }
}

/// Configuration for an [`Environment`](crate::env::Environment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Maximum polarity depth `L`, in `1..=3`.
    pub outer_polarity_bound: i8,
    /// Mana cap.
    pub max_mana: f64,
    /// Spacing between regeneration ticks.
    pub tick_interval: f64,
    /// The first tick fires this long before one full interval has elapsed.
    pub first_tick_lead: f64,
    /// Elapsed time at which the episode ends.
    pub episode_horizon: f64,
    /// Clock advance for an action that could not be cast.
    pub wasted_decision_time: f64,
    /// Track and enforce per-ability cooldowns.
    pub cooldowns_enabled: bool,
    /// Halve cast time at the matching third tier and advance the clock by
    /// the scaled time. When off, the nominal cast time is used.
    pub cast_time_scaling_enabled: bool,
    /// Reject casts the current mana cannot cover. When off, a cast may drive
    /// mana negative, which ends the episode.
    pub mana_gate_enabled: bool,
    /// Potency-to-reward transform for successful casts.
    pub reward_shaping: RewardShaping,
    /// Reward for an action rejected by cooldown or mana. Not shaped.
    pub no_op_reward: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            outer_polarity_bound: 3,
            max_mana: 15480.0,
            tick_interval: 3.0,
            first_tick_lead: 0.1,
            episode_horizon: 45.0,
            wasted_decision_time: 0.75,
            cooldowns_enabled: true,
            cast_time_scaling_enabled: false,
            mana_gate_enabled: true,
            reward_shaping: RewardShaping::Identity,
            no_op_reward: -100.0,
        }
    }
}

impl SimulationConfig {
    /// Parses a JSON config and validates it. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any validation
    /// error from [`validate`](Self::validate).
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every setting is usable.
    ///
    /// # Errors
    ///
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=3).contains(&self.outer_polarity_bound) {
            return Err(ConfigError::PolarityBound(self.outer_polarity_bound));
        }
        let positive = [
            ("max_mana", self.max_mana),
            ("tick_interval", self.tick_interval),
            ("episode_horizon", self.episode_horizon),
            ("wasted_decision_time", self.wasted_decision_time),
        ];
        for (field, value) in positive {
            require_positive(field, value)?;
        }
        if self.episode_horizon / self.tick_interval > MAX_TICKS_PER_EPISODE {
            return Err(ConfigError::TickInterval {
                tick_interval: self.tick_interval,
                episode_horizon: self.episode_horizon,
            });
        }
        if !(0.0..self.tick_interval).contains(&self.first_tick_lead) {
            return Err(ConfigError::FirstTickLead {
                lead: self.first_tick_lead,
                tick_interval: self.tick_interval,
            });
        }
        if let RewardShaping::CubicNormalized { scale } = self.reward_shaping {
            require_positive("reward_shaping.scale", scale)?;
        }
        Ok(())
    }

    /// Time of the first regeneration tick after a reset.
    #[must_use]
    pub fn first_tick_at(&self) -> f64 {
        self.tick_interval - self.first_tick_lead
    }
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

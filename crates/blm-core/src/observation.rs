//! Observation vector and action/observation space declarations.
//!
//! The flattened layout is
//! `[cooldown_0 .. cooldown_{K-1}, buff_0 .. buff_{B-1}, mana, polarity]`.
//! No buffs are modelled yet, so `B` is zero and the buff block is empty.

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::state::EpisodeState;

/// Upper bound declared for cooldown and buff timers.
pub const TIMER_UPPER_BOUND: f64 = 180.0;

/// What the agent sees after `reset` or `step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Remaining cooldown per ability, in action-index order.
    pub cooldowns: Vec<f64>,
    /// Remaining buff durations.
    pub buffs: Vec<f64>,
    /// Current mana. Negative only on the step that exhausted it.
    pub mana: f64,
    /// Signed polarity.
    pub polarity: i8,
}

impl Observation {
    /// Snapshot of the agent-visible part of `state`.
    #[must_use]
    pub fn from_state(state: &EpisodeState) -> Self {
        Self {
            cooldowns: state.cooldowns.as_slice().to_vec(),
            buffs: Vec::new(),
            mana: state.mana.current(),
            polarity: state.polarity.value(),
        }
    }

    /// Flattens into the declared vector layout.
    #[must_use]
    pub fn to_vec(&self) -> Vec<f64> {
        let mut flat = Vec::with_capacity(self.cooldowns.len() + self.buffs.len() + 2);
        flat.extend_from_slice(&self.cooldowns);
        flat.extend_from_slice(&self.buffs);
        flat.push(self.mana);
        flat.push(f64::from(self.polarity));
        flat
    }
}

/// Discrete action space: one action per catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    /// Number of actions `K`.
    pub n: usize,
}

impl ActionSpace {
    /// The index is a valid action.
    #[must_use]
    pub fn contains(&self, action: usize) -> bool {
        action < self.n
    }
}

/// Inclusive bounds for one observation component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Lower bound.
    pub low: f64,
    /// Upper bound.
    pub high: f64,
}

/// Declared observation space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpace {
    /// Number of cooldown entries `K`.
    pub cooldowns: usize,
    /// Number of buff entries `B`.
    pub buffs: usize,
    /// Bounds shared by every cooldown and buff timer.
    pub timer: Bounds,
    /// Mana bounds, `[0, max_mana]`.
    pub mana: Bounds,
    /// Polarity bounds, `[-L, L]`.
    pub polarity: Bounds,
}

impl ObservationSpace {
    /// Space for a catalog of `ability_count` abilities under `config`.
    #[must_use]
    pub fn new(config: &SimulationConfig, ability_count: usize) -> Self {
        let bound = f64::from(config.outer_polarity_bound);
        Self {
            cooldowns: ability_count,
            buffs: 0,
            timer: Bounds {
                low: 0.0,
                high: TIMER_UPPER_BOUND,
            },
            mana: Bounds {
                low: 0.0,
                high: config.max_mana,
            },
            polarity: Bounds {
                low: -bound,
                high: bound,
            },
        }
    }

    /// Length of the flattened observation.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cooldowns + self.buffs + 2
    }

    /// Never empty: mana and polarity are always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Per-component `(low, high)` bounds in flattened order.
    #[must_use]
    pub fn bounds(&self) -> Vec<Bounds> {
        let mut bounds = vec![self.timer; self.cooldowns + self.buffs];
        bounds.push(self.mana);
        bounds.push(self.polarity);
        bounds
    }
}

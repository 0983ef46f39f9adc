//! Mutable per-episode state.

use serde::{Deserialize, Serialize};

use crate::clock::SimulationClock;
use crate::config::SimulationConfig;
use crate::mana::ManaLedger;
use crate::polarity::Polarity;

/// Remaining cooldown per ability, indexed by action id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CooldownTable {
    remaining: Vec<f64>,
}

impl CooldownTable {
    /// All abilities ready.
    #[must_use]
    pub fn ready(len: usize) -> Self {
        Self {
            remaining: vec![0.0; len],
        }
    }

    /// Remaining cooldown for an ability, zero for unknown indices.
    #[must_use]
    pub fn remaining(&self, index: usize) -> f64 {
        self.remaining.get(index).copied().unwrap_or(0.0)
    }

    /// The ability cannot be cast yet.
    #[must_use]
    pub fn is_cooling_down(&self, index: usize) -> bool {
        self.remaining(index) > 0.0
    }

    /// Records a cast: the cast ability gets `cooldown`, every other ability
    /// ticks down by `elapsed`, floored at zero.
    pub fn record_cast(&mut self, index: usize, cooldown: f64, elapsed: f64) {
        for (i, remaining) in self.remaining.iter_mut().enumerate() {
            *remaining = if i == index {
                cooldown.max(0.0)
            } else {
                (*remaining - elapsed).max(0.0)
            };
        }
    }

    /// Cooldowns in action-index order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.remaining
    }
}

/// Everything the environment tracks for one episode.
///
/// The agent sees cooldowns, mana and polarity. The clock is internal
/// bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeState {
    /// Per-ability cooldowns.
    pub cooldowns: CooldownTable,
    /// Mana pool.
    pub mana: ManaLedger,
    /// Current polarity.
    pub polarity: Polarity,
    /// Elapsed time and regeneration schedule.
    pub clock: SimulationClock,
}

impl EpisodeState {
    /// Fresh state: cooldowns clear, mana full, neutral, clock at zero.
    #[must_use]
    pub fn fresh(config: &SimulationConfig, ability_count: usize) -> Self {
        Self {
            cooldowns: CooldownTable::ready(ability_count),
            mana: ManaLedger::full(config.max_mana),
            polarity: Polarity::NEUTRAL,
            clock: SimulationClock::new(config),
        }
    }

    /// Mana exhausted or horizon reached.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.clock.is_terminal(&self.mana)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_matches_reset_contract() {
        let config = SimulationConfig::default();
        let state = EpisodeState::fresh(&config, 6);
        assert_eq!(state.cooldowns.as_slice(), &[0.0; 6]);
        assert!((state.mana.current() - config.max_mana).abs() < f64::EPSILON);
        assert!(state.polarity.is_neutral());
        assert!(state.clock.elapsed().abs() < f64::EPSILON);
        assert!((state.clock.next_tick() - 2.9).abs() < 1e-12);
        assert!(!state.is_terminal());
    }

    #[test]
    fn record_cast_sets_cast_and_decays_others() {
        let mut table = CooldownTable::ready(3);
        table.record_cast(2, 12.15, 0.75);
        assert_eq!(table.as_slice(), &[0.0, 0.0, 12.15]);

        table.record_cast(0, 0.0, 2.5);
        assert!(table.remaining(0).abs() < f64::EPSILON);
        assert!((table.remaining(2) - 9.65).abs() < 1e-9);
        assert!(table.is_cooling_down(2));

        table.record_cast(1, 0.0, 20.0);
        assert!(table.remaining(2).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_index_is_ready() {
        let table = CooldownTable::ready(1);
        assert!(!table.is_cooling_down(5));
    }
}

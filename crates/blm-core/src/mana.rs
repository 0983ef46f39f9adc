//! Mana pool with capped regeneration.

use serde::{Deserialize, Serialize};

use crate::polarity::Polarity;

/// Fraction of max mana restored per tick, indexed by Umbral Ice depth.
///
/// Index 0 is neutral. Fire tiers never reach this table; callers skip
/// regeneration entirely while in Fire.
const ICE_REGEN_RATES: [f64; 4] = [0.02, 0.32, 0.47, 0.62];

/// Tracks current mana against a fixed cap.
///
/// Mana never rises above `max`. It may drop below zero only through
/// [`spend`](Self::spend), which is the episode's exhaustion signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManaLedger {
    current: f64,
    max: f64,
}

impl ManaLedger {
    /// Creates a full ledger.
    #[must_use]
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    /// Current mana.
    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Mana cap.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Mana restored by one regeneration tick at the given polarity.
    #[must_use]
    pub fn regen_amount(&self, polarity: Polarity) -> f64 {
        if polarity.is_fire() {
            return 0.0;
        }
        let tier = usize::from(polarity.tier()).min(ICE_REGEN_RATES.len() - 1);
        self.max * ICE_REGEN_RATES[tier]
    }

    /// Applies one regeneration tick, clamped to the cap.
    ///
    /// Returns the mana actually gained.
    pub fn regen_tick(&mut self, polarity: Polarity) -> f64 {
        let before = self.current;
        self.spend(-self.regen_amount(polarity));
        self.current - before
    }

    /// Subtracts `cost`, clamping the result to the cap.
    ///
    /// A negative cost is a refund; it can never lift mana above the cap.
    pub fn spend(&mut self, cost: f64) {
        self.current = (self.current - cost).min(self.max);
    }

    /// Mana went negative.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current < 0.0
    }
}

//! Ability resolution: legality, scaling and state transition.
//!
//! Resolving an ability is one atomic transition of [`EpisodeState`]:
//!
//! 1. **Legality**: the ability must be off cooldown and affordable at the
//!    current polarity. A failed check only burns the wasted decision time.
//! 2. **Gate**: fire-gated abilities additionally need Astral Fire.
//! 3. **Clock**: time advances by the cast duration and overdue regeneration
//!    ticks are applied at the pre-cast polarity.
//! 4. **Apply**: the scaled cost is deducted, potency and duration are read
//!    against the pre-cast polarity, then the polarity effect runs.
//!
//! Cooldown bookkeeping is left to the [`Environment`](crate::env::Environment).
//!
//! # Scaling tables
//!
//! | polarity | Fire cost | Ice cost | Fire potency | Ice potency |
//! |----------|-----------|----------|--------------|-------------|
//! | Fire 3   | ×2        | ×0.25    | ×1.8         | ×0.7        |
//! | Fire 2   | ×2        | ×0.25    | ×1.6         | ×0.8        |
//! | Fire 1   | ×2        | ×0.5     | ×1.4         | ×0.9        |
//! | Neutral  | ×1        | ×1       | ×1           | ×1          |
//! | Ice 1    | ×0.5      | ×1       | ×0.9         | ×1          |
//! | Ice 2    | ×0.25     | ×1       | ×0.8         | ×1          |
//! | Ice 3    | ×0.25     | ×1       | ×0.7         | ×1          |
//!
//! Cast time halves for Fire abilities at Fire 3 and Ice abilities at Ice 3.
//! Neither-type abilities are never scaled.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ability::{AbilityDefinition, DamageType};
use crate::config::SimulationConfig;
use crate::polarity::Polarity;
use crate::state::EpisodeState;

/// Potency multiplier by tier, index 0 = neutral.
const AFFINITY_POTENCY: [f64; 4] = [1.0, 1.4, 1.6, 1.8];
const OPPOSED_POTENCY: [f64; 4] = [1.0, 0.9, 0.8, 0.7];

/// Cost multiplier by tier of the opposing element, index 0 = neutral.
const OPPOSED_COST: [f64; 4] = [1.0, 0.5, 0.25, 0.25];
const AFFINITY_COST: f64 = 2.0;

/// Cast-time multiplier at the deepest matching tier.
const MAX_TIER_CAST_SCALE: f64 = 0.5;
const MAX_TIER: usize = 3;

fn tier_index(polarity: Polarity) -> usize {
    usize::from(polarity.tier()).min(MAX_TIER)
}

/// Polarity relative to an ability's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Alignment {
    Unscaled,
    Neutral,
    Matching(usize),
    Opposed(usize),
}

impl Alignment {
    fn of(damage_type: DamageType, polarity: Polarity) -> Self {
        let tier = tier_index(polarity);
        match damage_type {
            DamageType::Neither => Self::Unscaled,
            _ if polarity.is_neutral() => Self::Neutral,
            DamageType::Fire if polarity.is_fire() => Self::Matching(tier),
            DamageType::Ice if polarity.is_ice() => Self::Matching(tier),
            DamageType::Fire | DamageType::Ice => Self::Opposed(tier),
        }
    }
}

/// Mana cost of `ability` at `polarity`.
#[must_use]
pub fn scaled_cost(ability: &AbilityDefinition, polarity: Polarity) -> f64 {
    let multiplier = match Alignment::of(ability.damage_type, polarity) {
        Alignment::Unscaled | Alignment::Neutral => 1.0,
        // Fire costs double in Fire; Ice costs base in Ice.
        Alignment::Matching(_) if ability.damage_type == DamageType::Fire => AFFINITY_COST,
        Alignment::Matching(_) => 1.0,
        Alignment::Opposed(tier) => OPPOSED_COST[tier],
    };
    ability.mana_cost * multiplier
}

/// Potency of `ability` at `polarity`.
#[must_use]
pub fn scaled_potency(ability: &AbilityDefinition, polarity: Polarity) -> f64 {
    let multiplier = match Alignment::of(ability.damage_type, polarity) {
        Alignment::Unscaled | Alignment::Neutral => 1.0,
        // Ice potency is not boosted by Umbral Ice.
        Alignment::Matching(_) if ability.damage_type == DamageType::Ice => 1.0,
        Alignment::Matching(tier) => AFFINITY_POTENCY[tier],
        Alignment::Opposed(tier) => OPPOSED_POTENCY[tier],
    };
    ability.potency * multiplier
}

/// Cast time of `ability` at `polarity`.
#[must_use]
pub fn scaled_cast_time(ability: &AbilityDefinition, polarity: Polarity) -> f64 {
    match Alignment::of(ability.damage_type, polarity) {
        Alignment::Matching(tier) if tier == MAX_TIER => {
            ability.cast_time * MAX_TIER_CAST_SCALE
        }
        _ => ability.cast_time,
    }
}

/// Why an action resolved without casting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// Cooldown has not expired.
    OnCooldown,
    /// Not enough mana for the scaled cost.
    InsufficientMana,
    /// A fire-gated ability was chosen outside Astral Fire.
    PolarityGated,
}

/// A successful cast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastOutcome {
    /// Polarity-scaled potency.
    pub potency: f64,
    /// Mana deducted.
    pub mana_cost: f64,
    /// Time the cast consumed.
    pub duration: f64,
    /// Polarity before the cast, which all scaling was read against.
    pub polarity_before: Polarity,
    /// Regeneration ticks applied while casting.
    pub regen_ticks: u32,
}

/// Result of resolving one action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// The ability was cast.
    Cast(CastOutcome),
    /// Nothing was cast. Only the clock and regeneration moved.
    Rejected {
        /// Which check failed.
        reason: RejectReason,
        /// Time consumed.
        duration: f64,
        /// Regeneration ticks applied while waiting.
        regen_ticks: u32,
    },
}

impl Resolution {
    /// Time this resolution consumed.
    #[must_use]
    pub fn duration(&self) -> f64 {
        match self {
            Self::Cast(cast) => cast.duration,
            Self::Rejected { duration, .. } => *duration,
        }
    }

    /// Regeneration ticks applied.
    #[must_use]
    pub fn regen_ticks(&self) -> u32 {
        match self {
            Self::Cast(cast) => cast.regen_ticks,
            Self::Rejected { regen_ticks, .. } => *regen_ticks,
        }
    }
}

/// Resolves abilities against an [`EpisodeState`] under one configuration.
#[derive(Debug, Clone, Copy)]
pub struct AbilityResolver<'a> {
    config: &'a SimulationConfig,
}

impl<'a> AbilityResolver<'a> {
    /// Creates a resolver for `config`.
    #[must_use]
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    /// Checks whether `ability` may be cast right now.
    ///
    /// # Errors
    ///
    /// Returns the reason the ability cannot be cast.
    pub fn check(
        &self,
        state: &EpisodeState,
        index: usize,
        ability: &AbilityDefinition,
    ) -> Result<(), RejectReason> {
        if self.config.cooldowns_enabled && state.cooldowns.is_cooling_down(index) {
            return Err(RejectReason::OnCooldown);
        }
        if self.config.mana_gate_enabled
            && state.mana.current() < scaled_cost(ability, state.polarity)
        {
            return Err(RejectReason::InsufficientMana);
        }
        if ability.requires_fire && !state.polarity.is_fire() {
            return Err(RejectReason::PolarityGated);
        }
        Ok(())
    }

    /// Cast duration the clock advances by for `ability` at `polarity`.
    #[must_use]
    pub fn cast_duration(&self, ability: &AbilityDefinition, polarity: Polarity) -> f64 {
        if self.config.cast_time_scaling_enabled {
            scaled_cast_time(ability, polarity)
        } else {
            ability.cast_time
        }
    }

    /// Resolves `ability` (at action `index`) against `state`.
    ///
    /// Mutates mana, polarity and the clock. Cooldowns are untouched.
    pub fn resolve(
        &self,
        state: &mut EpisodeState,
        index: usize,
        ability: &AbilityDefinition,
    ) -> Resolution {
        let polarity = state.polarity;

        if let Err(reason) = self.check(state, index, ability) {
            let duration = self.config.wasted_decision_time;
            let regen_ticks = state
                .clock
                .advance_with_regen(duration, &mut state.mana, polarity);
            trace!(ability = %ability.name, ?reason, "action rejected");
            return Resolution::Rejected {
                reason,
                duration,
                regen_ticks,
            };
        }

        let duration = self.cast_duration(ability, polarity);
        let regen_ticks = state
            .clock
            .advance_with_regen(duration, &mut state.mana, polarity);

        let mana_cost = scaled_cost(ability, polarity);
        state.mana.spend(mana_cost);
        let potency = scaled_potency(ability, polarity);
        state.polarity = polarity.apply(ability.effect, self.config.outer_polarity_bound);

        Resolution::Cast(CastOutcome {
            potency,
            mana_cost,
            duration,
            polarity_before: polarity,
            regen_ticks,
        })
    }
}

//! Astral Fire / Umbral Ice polarity.
//!
//! Polarity is a signed stack count in `[-L, L]`: positive values are Astral
//! Fire depth, negative values Umbral Ice depth and zero is neutral. Every
//! transition saturates at the bound instead of overshooting.
//!
//! Abilities do not carry transition callbacks. They name a
//! [`PolarityEffect`] and [`Polarity::apply`] dispatches it through one
//! exhaustive match.

use serde::{Deserialize, Serialize};

/// Transition an ability applies to polarity after it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolarityEffect {
    /// One step deeper into Fire; cancels Ice back to neutral.
    IncreaseFire,
    /// One step deeper into Ice; cancels Fire back to neutral.
    IncreaseIce,
    /// Jump to the Fire bound.
    MaxFire,
    /// Jump to the Ice bound.
    MaxIce,
    /// Flip to one stack of the opposite element. Neutral stays neutral.
    Swap,
    /// Leave polarity untouched.
    None,
}

/// Signed polarity value.
///
/// The bound is not stored; it comes from the simulation config and is passed
/// to each transition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Polarity(i8);

impl Polarity {
    /// Neutral polarity.
    pub const NEUTRAL: Self = Self(0);

    /// Creates a polarity clamped into `[-bound, bound]`.
    #[must_use]
    pub fn new(value: i8, bound: i8) -> Self {
        Self(value.clamp(-bound, bound))
    }

    /// Raw signed value.
    #[must_use]
    pub fn value(self) -> i8 {
        self.0
    }

    /// Stack depth regardless of element.
    #[must_use]
    pub fn tier(self) -> u8 {
        self.0.unsigned_abs()
    }

    /// In Astral Fire.
    #[must_use]
    pub fn is_fire(self) -> bool {
        self.0 > 0
    }

    /// In Umbral Ice.
    #[must_use]
    pub fn is_ice(self) -> bool {
        self.0 < 0
    }

    /// Neither Fire nor Ice.
    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.0 == 0
    }

    /// Moves one step toward Fire, or cancels Ice to neutral.
    ///
    /// Casting Fire while in Ice does not enter Fire on the same cast.
    #[must_use]
    pub fn increase_fire(self, bound: i8) -> Self {
        if self.is_ice() {
            Self::NEUTRAL
        } else {
            Self(self.0.saturating_add(1).min(bound))
        }
    }

    /// Moves one step toward Ice, or cancels Fire to neutral.
    #[must_use]
    pub fn increase_ice(self, bound: i8) -> Self {
        if self.is_fire() {
            Self::NEUTRAL
        } else {
            Self(self.0.saturating_sub(1).max(-bound))
        }
    }

    /// Full Astral Fire.
    #[must_use]
    pub fn max_fire(bound: i8) -> Self {
        Self(bound)
    }

    /// Full Umbral Ice.
    #[must_use]
    pub fn max_ice(bound: i8) -> Self {
        Self(-bound)
    }

    /// Ice becomes Fire-1, Fire becomes Ice-1, neutral is unchanged.
    #[must_use]
    pub fn swap(self) -> Self {
        match self.0.signum() {
            -1 => Self(1),
            1 => Self(-1),
            _ => self,
        }
    }

    /// Applies a transition effect, saturating at `±bound`.
    #[must_use]
    pub fn apply(self, effect: PolarityEffect, bound: i8) -> Self {
        match effect {
            PolarityEffect::IncreaseFire => self.increase_fire(bound),
            PolarityEffect::IncreaseIce => self.increase_ice(bound),
            PolarityEffect::MaxFire => Self::max_fire(bound),
            PolarityEffect::MaxIce => Self::max_ice(bound),
            PolarityEffect::Swap => self.swap(),
            PolarityEffect::None => self,
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.signum() {
            1 => write!(f, "Astral Fire {}", self.tier()),
            -1 => write!(f, "Umbral Ice {}", self.tier()),
            _ => write!(f, "Neutral"),
        }
    }
}

//! Static ability table.
//!
//! The catalog is immutable once built. An ability's position in the catalog
//! is its action index, so order is part of the action-space contract.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::polarity::PolarityEffect;

/// Element an ability is scaled by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    /// Unaffected by polarity.
    Neither,
    /// Scaled by Astral Fire.
    Fire,
    /// Scaled by Umbral Ice.
    Ice,
}

/// One ability's base numbers, before polarity scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    /// Display name, reported back in step diagnostics.
    pub name: String,
    /// Potency at neutral polarity.
    pub potency: f64,
    /// Mana cost at neutral polarity.
    pub mana_cost: f64,
    /// Time to cast.
    pub cast_time: f64,
    /// Time before the ability can be used again, measured from cast start.
    pub refresh_time: f64,
    /// Element used for cost, potency and cast-time scaling.
    pub damage_type: DamageType,
    /// Polarity transition applied after the cast.
    pub effect: PolarityEffect,
    /// Only castable while in Astral Fire.
    pub requires_fire: bool,
}

impl AbilityDefinition {
    /// Creates an ability with no polarity gate.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        potency: f64,
        mana_cost: f64,
        cast_time: f64,
        refresh_time: f64,
        damage_type: DamageType,
        effect: PolarityEffect,
    ) -> Self {
        Self {
            name: name.into(),
            potency,
            mana_cost,
            cast_time,
            refresh_time,
            damage_type,
            effect,
            requires_fire: false,
        }
    }

    /// Marks the ability as castable only in Astral Fire.
    #[must_use]
    pub fn fire_gated(mut self) -> Self {
        self.requires_fire = true;
        self
    }

    /// Cooldown left on this ability right after casting it for `duration`.
    #[must_use]
    pub fn cooldown_after_cast(&self, duration: f64) -> f64 {
        (self.refresh_time - duration).max(0.0)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("potency", self.potency),
            ("mana_cost", self.mana_cost),
            ("cast_time", self.cast_time),
            ("refresh_time", self.refresh_time),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidAbility {
                    name: self.name.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Ordered, read-only set of abilities. Index = action id.
///
/// Deserializing goes through [`AbilityCatalog::new`], so a catalog loaded
/// from JSON is validated the same way as one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CatalogRepr")]
pub struct AbilityCatalog {
    abilities: Vec<AbilityDefinition>,
}

#[derive(Deserialize)]
struct CatalogRepr {
    abilities: Vec<AbilityDefinition>,
}

impl TryFrom<CatalogRepr> for AbilityCatalog {
    type Error = ConfigError;

    fn try_from(repr: CatalogRepr) -> Result<Self, Self::Error> {
        Self::new(repr.abilities)
    }
}

impl AbilityCatalog {
    /// Builds a catalog, rejecting empty tables and invalid numbers.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCatalog`] or [`ConfigError::InvalidAbility`].
    pub fn new(abilities: Vec<AbilityDefinition>) -> Result<Self, ConfigError> {
        let catalog = Self { abilities };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parses and validates a catalog from JSON of the form
    /// `{"abilities": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, otherwise the same
    /// errors as [`AbilityCatalog::new`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let repr: CatalogRepr = serde_json::from_str(json)?;
        Self::new(repr.abilities)
    }

    /// Checks the catalog is non-empty and every ability is well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCatalog`] or [`ConfigError::InvalidAbility`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.abilities.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        self.abilities.iter().try_for_each(AbilityDefinition::validate)
    }

    /// The Black Mage rotation kit, with mana costs against a 15480 pool.
    #[must_use]
    pub fn black_mage() -> Self {
        use DamageType::{Fire, Ice, Neither};
        use PolarityEffect as E;

        Self {
            abilities: vec![
                AbilityDefinition::new("Blizzard 1", 180.0, 480.0, 2.5, 2.49, Ice, E::IncreaseIce),
                AbilityDefinition::new("Fire 1", 180.0, 1200.0, 2.5, 2.49, Fire, E::IncreaseFire),
                AbilityDefinition::new("Transpose", 0.0, 0.0, 0.75, 12.9, Neither, E::Swap),
                AbilityDefinition::new("Fire 3", 240.0, 2400.0, 3.5, 2.5, Fire, E::MaxFire),
                AbilityDefinition::new("Blizzard 3", 240.0, 1440.0, 3.5, 2.5, Ice, E::MaxIce),
                AbilityDefinition::new("Fire 4", 260.0, 1200.0, 2.8, 2.5, Fire, E::None)
                    .fire_gated(),
            ],
        }
    }

    /// Looks up an ability by action index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&AbilityDefinition> {
        self.abilities.get(index)
    }

    /// Action index of the ability with this name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.abilities.iter().position(|a| a.name == name)
    }

    /// Number of abilities (the action-space size).
    #[must_use]
    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    /// Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }

    /// Iterates abilities in action-index order.
    pub fn iter(&self) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.iter()
    }
}

impl Default for AbilityCatalog {
    fn default() -> Self {
        Self::black_mage()
    }
}

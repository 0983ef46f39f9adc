//! # BLM Core
//!
//! Black Mage rotation simulator exposed as a reinforcement-learning
//! environment.
//!
//! Damage output depends on two resources: a bounded polarity (Astral Fire /
//! Umbral Ice) that scales cost, potency and cast time, and a mana pool that
//! regenerates on a fixed tick cadence. An external agent picks one ability
//! per step; the environment advances time, settles regeneration, applies
//! the ability and returns a reward.
//!
//! ## Architecture
//!
//! - [`polarity`]: the bounded Fire/Ice stance and its transitions
//! - [`mana`]: the mana pool and regeneration tick
//! - [`ability`]: the static ability table (index = action)
//! - [`resolver`]: legality, scaling and the per-cast state transition
//! - [`clock`]: elapsed time, catch-up regeneration and termination
//! - [`env`]: the `reset`/`step` facade owning one episode
//! - [`vec_env`]: independent environments stepped in parallel
//! - [`rollout`]: fixed-rotation scoring and seeded random play
//!
//! ## Usage
//!
//! ```
//! use blm_core::{Environment, SimulationConfig};
//!
//! let mut env = Environment::with_default_catalog(SimulationConfig::default()).unwrap();
//! let mut observation = env.reset();
//!
//! loop {
//!     let action = if observation.polarity > 0 { 5 } else { 3 };
//!     let result = env.step(action).unwrap();
//!     observation = result.observation;
//!     if result.done {
//!         break;
//!     }
//! }
//! assert!(env.is_terminal());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod ability;
pub mod clock;
pub mod config;
pub mod env;
pub mod error;
pub mod mana;
pub mod observation;
pub mod polarity;
pub mod resolver;
pub mod rollout;
pub mod state;
pub mod vec_env;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use ability::{AbilityCatalog, AbilityDefinition, DamageType};
pub use clock::SimulationClock;
pub use config::{RewardShaping, SimulationConfig};
pub use env::{
    EpisodePhase, Environment, StepInfo, StepOutcome, StepResult, TerminationCause,
};
pub use error::{ConfigError, EnvError};
pub use mana::ManaLedger;
pub use observation::{ActionSpace, Observation, ObservationSpace};
pub use polarity::{Polarity, PolarityEffect};
pub use resolver::{AbilityResolver, CastOutcome, RejectReason, Resolution};
pub use rollout::{evaluate_rotation, random_episode, RotationReport};
pub use state::{CooldownTable, EpisodeState};
pub use vec_env::VecEnv;

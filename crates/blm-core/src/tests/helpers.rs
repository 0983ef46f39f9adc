//! Test helper functions for building environments and checking results.

use crate::ability::AbilityCatalog;
use crate::config::SimulationConfig;
use crate::env::{Environment, StepResult};

// =============================================================================
// Action indices in the Black Mage catalog
// =============================================================================

pub const BLIZZARD_1: usize = 0;
pub const FIRE_1: usize = 1;
pub const TRANSPOSE: usize = 2;
pub const FIRE_3: usize = 3;
pub const BLIZZARD_3: usize = 4;
pub const FIRE_4: usize = 5;

pub const MAX_MANA: f64 = 15480.0;

// =============================================================================
// Setup
// =============================================================================

/// Installs a fmt subscriber writing through the test harness.
///
/// Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

/// Environment with the default config and Black Mage catalog.
pub fn default_env() -> Environment {
    env_with(SimulationConfig::default())
}

/// Environment with the Black Mage catalog and a custom config.
pub fn env_with(config: SimulationConfig) -> Environment {
    Environment::new(config, AbilityCatalog::black_mage()).unwrap()
}

/// Legacy variant: no mana gate, so casts can overdraw and end the episode.
pub fn ungated_env() -> Environment {
    env_with(SimulationConfig {
        mana_gate_enabled: false,
        ..Default::default()
    })
}

/// Steps through `actions`, panicking on any error.
pub fn play(env: &mut Environment, actions: &[usize]) -> Vec<StepResult> {
    actions.iter().map(|&a| env.step(a).unwrap()).collect()
}

// =============================================================================
// Assertions
// =============================================================================

/// Asserts two floats agree to within `1e-9`.
#[track_caller]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

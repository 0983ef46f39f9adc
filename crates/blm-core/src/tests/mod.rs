//! Cross-module tests for the environment.
//!
//! - `determinism.rs`: identical inputs give identical trajectories
//! - `integration.rs`: end-to-end episodes through `Environment::step`
//! - `properties.rs`: proptest invariants over arbitrary action sequences
//! - `helpers.rs`: environment factories and assertions

mod helpers;
mod integration;

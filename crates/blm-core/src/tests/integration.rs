//! End-to-end episodes through `Environment::step`.

use crate::config::SimulationConfig;
use crate::env::{EpisodePhase, StepOutcome, TerminationCause};
use crate::error::EnvError;
use crate::resolver::RejectReason;

use super::helpers::{
    assert_close, default_env, env_with, init_tracing, play, ungated_env, BLIZZARD_1, BLIZZARD_3,
    FIRE_1, FIRE_3, FIRE_4, MAX_MANA, TRANSPOSE,
};

// =============================================================================
// Resource economy
// =============================================================================

#[test]
fn fire_fire_blizzard_economy() {
    init_tracing();
    let mut env = default_env();

    let results = play(&mut env, &[FIRE_1, FIRE_1]);
    assert_close(results[0].info.mana_cost, 1200.0);
    assert_close(results[0].reward, 180.0);
    assert_eq!(results[0].observation.polarity, 1);
    assert_close(results[1].info.mana_cost, 2400.0);
    assert_close(results[1].reward, 252.0);
    assert_eq!(results[1].observation.polarity, 2);

    // Blizzard 1 at Fire 2: quarter cost, 0.8 potency, cancels Fire.
    let blizzard = env.step(BLIZZARD_1).unwrap();
    assert_close(blizzard.info.mana_cost, 120.0);
    assert_close(blizzard.reward, 144.0);
    assert_eq!(blizzard.observation.polarity, 0);
    assert_close(blizzard.observation.mana, MAX_MANA - 1200.0 - 2400.0 - 120.0);
}

#[test]
fn fire_is_silent_on_regeneration_until_it_ends() {
    init_tracing();
    let mut env = default_env();

    // Fire 3 (3.5) crosses the 2.9 tick at neutral, then Fire 3.
    let fire_3 = env.step(FIRE_3).unwrap();
    assert_eq!(fire_3.info.regen_ticks, 1);
    assert_eq!(fire_3.observation.polarity, 3);

    // Two Fire 4s move the clock to 9.1 with no regeneration.
    let results = play(&mut env, &[FIRE_4, FIRE_4]);
    assert!(results.iter().all(|r| r.info.regen_ticks == 0));
    assert_close(results[1].observation.mana, MAX_MANA - 2400.0 - 2400.0 - 2400.0);

    // Transpose swaps to Ice 1 but is resolved at Fire 3, so still no ticks.
    let transpose = env.step(TRANSPOSE).unwrap();
    assert_eq!(transpose.info.regen_ticks, 0);
    assert_eq!(transpose.observation.polarity, -1);

    // The next action catches up the ticks at 5.9, 8.9 and 11.9 in one go.
    let blizzard = env.step(BLIZZARD_1).unwrap();
    assert_close(blizzard.info.elapsed, 9.85 + 2.5);
    assert_eq!(blizzard.info.regen_ticks, 3);
}

#[test]
fn umbral_ice_refills_mana() {
    let mut env = default_env();
    play(&mut env, &[FIRE_3, FIRE_4, FIRE_4, FIRE_4]);
    let drained = env.observation().mana;

    let blizzard_3 = env.step(BLIZZARD_3).unwrap();
    // Blizzard 3 at Fire 3 costs a quarter and drops straight to Ice 3.
    assert_close(blizzard_3.info.mana_cost, 1440.0 * 0.25);
    assert_eq!(blizzard_3.observation.polarity, -3);

    // Blizzard 1 in Ice 3 catches up deferred ticks at 62% each.
    let blizzard_1 = env.step(BLIZZARD_1).unwrap();
    assert!(blizzard_1.info.regen_ticks > 0);
    assert!(blizzard_1.observation.mana > drained);
    assert!(blizzard_1.observation.mana <= MAX_MANA);
    assert_eq!(blizzard_1.observation.polarity, -3);
}

// =============================================================================
// Rejected actions
// =============================================================================

#[test]
fn rejected_action_changes_only_clock_and_regen() {
    let mut env = default_env();
    env.step(TRANSPOSE).unwrap();
    let before = env.state().clone();

    let result = env.step(TRANSPOSE).unwrap();
    assert_eq!(
        result.info.outcome,
        StepOutcome::Rejected(RejectReason::OnCooldown)
    );
    assert_close(result.reward, -100.0);
    assert_eq!(env.state().polarity, before.polarity);
    assert_eq!(env.state().cooldowns, before.cooldowns);
    assert_close(env.state().clock.elapsed(), before.clock.elapsed() + 0.75);
}

#[test]
fn rejected_action_crossing_a_tick_regenerates() {
    let mut env = default_env();
    env.step(TRANSPOSE).unwrap();

    // Rejections at 1.5 and 2.25 stay short of the 2.9 tick; 3.0 crosses it.
    let results = play(&mut env, &[TRANSPOSE; 3]);
    assert!(results[..2].iter().all(|r| r.info.regen_ticks == 0));
    let crossing = &results[2];
    assert_eq!(
        crossing.info.outcome,
        StepOutcome::Rejected(RejectReason::OnCooldown)
    );
    assert_close(crossing.info.elapsed, 3.0);
    assert_eq!(crossing.info.regen_ticks, 1);
    assert_close(crossing.reward, -100.0);
}

#[test]
fn rejected_action_catches_up_deferred_regen() {
    let mut env = default_env();
    // Fire 1 drains 1200; Transpose crosses 2.9 in Fire and lands in Ice 1.
    let setup = play(&mut env, &[FIRE_1, TRANSPOSE]);
    assert_eq!(setup[1].info.regen_ticks, 0);
    assert_eq!(setup[1].observation.polarity, -1);
    let drained = setup[1].observation.mana;
    assert_close(drained, MAX_MANA - 1200.0);

    let rejected = env.step(TRANSPOSE).unwrap();
    assert_eq!(
        rejected.info.outcome,
        StepOutcome::Rejected(RejectReason::OnCooldown)
    );
    assert_eq!(rejected.info.regen_ticks, 1);
    assert!(rejected.observation.mana > drained);
    assert_close(rejected.observation.mana, MAX_MANA);
}

#[test]
fn fire_gated_rejection_still_regenerates() {
    let mut env = default_env();
    play(&mut env, &[FIRE_1, TRANSPOSE]);
    let before = env.observation();

    let gated = env.step(FIRE_4).unwrap();
    assert_eq!(
        gated.info.outcome,
        StepOutcome::Rejected(RejectReason::PolarityGated)
    );
    assert_close(gated.reward, 0.0);
    assert_close(gated.info.elapsed, 3.25 + 0.75);
    assert_eq!(gated.info.regen_ticks, 1);
    assert!(gated.observation.mana > before.mana);
    assert_eq!(gated.observation.polarity, before.polarity);
    assert_eq!(gated.observation.cooldowns, before.cooldowns);
}

#[test]
fn insufficient_mana_is_a_penalized_step() {
    let mut env = default_env();
    play(&mut env, &[FIRE_3]);
    // Fire 4 costs 2400 at Fire 3; 13080 mana covers five casts.
    let results = play(&mut env, &[FIRE_4; 6]);
    assert!(results[..5]
        .iter()
        .all(|r| r.info.outcome == StepOutcome::Cast));
    assert_eq!(
        results[5].info.outcome,
        StepOutcome::Rejected(RejectReason::InsufficientMana)
    );
    assert_close(results[5].reward, -100.0);
    assert!(!results[5].done);
}

// =============================================================================
// Termination
// =============================================================================

#[test]
fn terminates_on_the_step_mana_goes_negative() {
    init_tracing();
    let mut env = ungated_env();
    let mut steps = 0;
    loop {
        let result = env.step(FIRE_1).unwrap();
        steps += 1;
        if result.observation.mana < 0.0 {
            assert!(result.done);
            assert_eq!(result.info.termination, Some(TerminationCause::ManaExhausted));
            break;
        }
        assert!(!result.done, "done before mana went negative at step {steps}");
    }
    // 1200 + 2400 * n exceeds 15480 on the seventh cast.
    assert_eq!(steps, 7);
    assert_eq!(env.phase(), EpisodePhase::Terminal);
    assert_eq!(env.step(FIRE_1), Err(EnvError::StepAfterTerminal));
}

#[test]
fn terminates_at_horizon() {
    let mut env = default_env();
    let mut last = None;
    for _ in 0..100 {
        let result = env.step(TRANSPOSE).unwrap();
        let done = result.done;
        last = Some(result);
        if done {
            break;
        }
    }
    let last = last.unwrap();
    assert!(last.done);
    assert_eq!(last.info.termination, Some(TerminationCause::HorizonReached));
    assert!(last.info.elapsed >= 45.0);
    assert!(last.info.elapsed < 45.0 + 0.75 + 1e-9);
}

#[test]
fn cast_time_scaling_shortens_deep_fire() {
    let config = SimulationConfig {
        cast_time_scaling_enabled: true,
        ..Default::default()
    };
    let mut env = env_with(config);
    play(&mut env, &[FIRE_3]);
    let fire_4 = env.step(FIRE_4).unwrap();
    assert_close(fire_4.info.duration, 1.4);
    assert_close(fire_4.info.elapsed, 3.5 + 1.4);
    assert_close(fire_4.observation.cooldowns[FIRE_4], 2.5 - 1.4);
}

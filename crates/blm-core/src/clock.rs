//! Episode clock and regeneration tick scheduling.
//!
//! Actions take variable time, while mana regenerates on a fixed cadence.
//! The clock reconciles the two by catching up: after each advance it applies
//! every tick whose timestamp has been passed, one at a time, so a long cast
//! never skips a tick.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::SimulationConfig;
use crate::mana::ManaLedger;
use crate::polarity::Polarity;

/// Elapsed time plus the timestamp of the next regeneration tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    elapsed: f64,
    next_tick: f64,
    tick_interval: f64,
    horizon: f64,
}

impl SimulationClock {
    /// A clock at time zero with the first tick scheduled per `config`.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            elapsed: 0.0,
            next_tick: config.first_tick_at(),
            tick_interval: config.tick_interval,
            horizon: config.episode_horizon,
        }
    }

    /// Time elapsed since reset.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Timestamp of the next pending regeneration tick.
    #[must_use]
    pub fn next_tick(&self) -> f64 {
        self.next_tick
    }

    /// Moves time forward.
    pub fn advance(&mut self, duration: f64) {
        self.elapsed += duration;
    }

    /// Applies every regeneration tick the clock has passed.
    ///
    /// Ticks only run while polarity is neutral or Ice. In Fire the pending
    /// tick is left in place and is caught up once polarity leaves Fire.
    /// Returns the number of ticks applied.
    pub fn catch_up_regen(&mut self, mana: &mut ManaLedger, polarity: Polarity) -> u32 {
        if polarity.is_fire() {
            return 0;
        }
        let mut ticks = 0;
        while self.elapsed > self.next_tick {
            let gained = mana.regen_tick(polarity);
            trace!(
                tick_at = self.next_tick,
                gained,
                mana = mana.current(),
                %polarity,
                "regeneration tick"
            );
            let next_tick = self.next_tick + self.tick_interval;
            ticks += 1;
            if next_tick <= self.next_tick {
                // Interval is below float resolution here; the schedule cannot move.
                break;
            }
            self.next_tick = next_tick;
        }
        ticks
    }

    /// Advances by `duration`, then catches up regeneration.
    pub fn advance_with_regen(
        &mut self,
        duration: f64,
        mana: &mut ManaLedger,
        polarity: Polarity,
    ) -> u32 {
        self.advance(duration);
        self.catch_up_regen(mana, polarity)
    }

    /// The horizon has been reached.
    #[must_use]
    pub fn horizon_reached(&self) -> bool {
        self.elapsed >= self.horizon
    }

    /// Episode is over: mana went negative or the horizon was reached.
    #[must_use]
    pub fn is_terminal(&self, mana: &ManaLedger) -> bool {
        mana.is_exhausted() || self.horizon_reached()
    }
}

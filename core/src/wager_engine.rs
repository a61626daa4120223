//! The wipe bomb: a repeatable stochastic wager.
//!
//! Precondition order is part of the contract: missing account, bad
//! stake, insufficient funds, then band configuration. The first
//! failure wins and nothing is written on any denial path.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    clock::{day_start, Clock},
    config::{RewardBand, WipeBombConfig},
    error::{Denial, GameResult},
    models::WipeBombLog,
    notifier::{OutcomeNotifier, WipeBombReport},
    rng::GameRng,
    sampler,
    store::GameStore,
};

/// Success payload for one wipe bomb attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct WipeBombReceipt {
    pub contribution: i64,
    pub multiplier:   f64,
    pub reward:       i64,
    pub profit:       i64,
    /// Attempts by this user since UTC midnight, this one included.
    /// Informational only; attempts are unlimited.
    pub attempts_today: i64,
}

/// Outcome of one `perform_wipe_bomb` call. Denials are expected
/// business results, not errors.
#[derive(Debug, Clone, PartialEq)]
pub enum WipeBombOutcome {
    Success(WipeBombReceipt),
    Denied(Denial),
}

pub struct WagerEngine {
    store:    Arc<Mutex<GameStore>>,
    clock:    Arc<dyn Clock>,
    bands:    Vec<RewardBand>,
    rng:      Mutex<GameRng>,
    notifier: Option<OutcomeNotifier>,
}

impl WagerEngine {
    /// Build an engine over a validated configuration. A band table
    /// that cannot be sampled is rejected here, before any wager runs.
    pub fn new(
        store: Arc<Mutex<GameStore>>,
        clock: Arc<dyn Clock>,
        config: WipeBombConfig,
        notifier: Option<OutcomeNotifier>,
    ) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            clock,
            bands: config.reward_bands,
            rng: Mutex::new(GameRng::from_entropy()),
            notifier,
        })
    }

    /// Swap in a seeded RNG. Tests and offline tooling only.
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn perform_wipe_bomb(
        &self,
        user_id: &str,
        contribution: i64,
    ) -> GameResult<WipeBombOutcome> {
        let now = self.clock.now();

        // The store lock is held for the whole read-modify-write span:
        // concurrent wagers against the same account cannot interleave.
        let store = self.store.lock();

        let Some(user) = store.get_user(user_id)? else {
            return Ok(WipeBombOutcome::Denied(Denial::AccountNotFound(
                user_id.to_string(),
            )));
        };
        if contribution <= 0 {
            return Ok(WipeBombOutcome::Denied(Denial::InvalidStake));
        }
        if !user.can_afford(contribution) {
            return Ok(WipeBombOutcome::Denied(Denial::InsufficientFunds {
                balance: user.coins,
            }));
        }
        if sampler::total_weight(&self.bands) <= 0.0 {
            return Ok(WipeBombOutcome::Denied(Denial::ConfigurationError));
        }

        let multiplier = sampler::sample(&self.bands, &mut self.rng.lock());
        let reward = (contribution as f64 * multiplier).floor() as i64;
        let profit = reward - contribution;

        store.update_user_coins(user_id, profit)?;
        store.append_wipe_bomb_log(&WipeBombLog {
            log_id: 0,
            user_id: user_id.to_string(),
            contribution_amount: contribution,
            reward_multiplier: multiplier,
            reward_amount: reward,
            timestamp: now,
        })?;
        let attempts_today = store.wipe_bomb_count_since(user_id, day_start(now))?;
        drop(store);

        log::debug!(
            "wipe bomb: user={user_id} stake={contribution} x{multiplier:.2} profit={profit}"
        );

        if let Some(notifier) = &self.notifier {
            notifier.dispatch(WipeBombReport {
                user_id: user_id.to_string(),
                contribution_amount: contribution,
                reward_multiplier: multiplier,
                reward_amount: reward,
                profit,
                timestamp: now.to_rfc3339(),
            });
        }

        Ok(WipeBombOutcome::Success(WipeBombReceipt {
            contribution,
            multiplier,
            reward,
            profit,
            attempts_today,
        }))
    }

    /// Most-recent-first wipe bomb history for one user.
    pub fn history(&self, user_id: &str, limit: u32) -> GameResult<Vec<WipeBombLog>> {
        self.store.lock().list_wipe_bomb_logs(user_id, limit)
    }
}

//! Fish theft: a cooldown-gated inventory transfer.
//!
//! Preconditions are read-only and checked in a fixed order: self
//! target, missing accounts, cooldown, empty pond. Only the final
//! transfer writes, and it commits as a single transaction.

use std::sync::Arc;

use chrono::Duration;
use parking_lot::Mutex;

use crate::{
    clock::Clock,
    config::StealConfig,
    error::{Denial, GameError, GameResult},
    rng::GameRng,
    store::GameStore,
    types::FishId,
};

/// Success payload: what was taken and from whom.
#[derive(Debug, Clone, PartialEq)]
pub struct StealReceipt {
    pub fish_id:         FishId,
    pub fish_name:       String,
    pub rarity:          u8,
    pub base_value:      i64,
    pub victim_nickname: String,
}

/// Outcome of one `steal_fish` call.
#[derive(Debug, Clone, PartialEq)]
pub enum StealOutcome {
    Success(StealReceipt),
    Denied(Denial),
}

pub struct TheftEngine {
    store:    Arc<Mutex<GameStore>>,
    clock:    Arc<dyn Clock>,
    cooldown: Duration,
    rng:      Mutex<GameRng>,
}

impl TheftEngine {
    pub fn new(
        store: Arc<Mutex<GameStore>>,
        clock: Arc<dyn Clock>,
        config: StealConfig,
    ) -> GameResult<Self> {
        config.validate()?;
        Ok(Self {
            store,
            clock,
            cooldown: Duration::seconds(config.cooldown_seconds),
            rng: Mutex::new(GameRng::from_entropy()),
        })
    }

    /// Swap in a seeded RNG. Tests and offline tooling only.
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn steal_fish(&self, thief_id: &str, victim_id: &str) -> GameResult<StealOutcome> {
        // Checked before any store access.
        if thief_id == victim_id {
            return Ok(StealOutcome::Denied(Denial::SelfTarget));
        }

        let now = self.clock.now();
        let store = self.store.lock();

        let Some(thief) = store.get_user(thief_id)? else {
            return Ok(StealOutcome::Denied(Denial::AccountNotFound(
                thief_id.to_string(),
            )));
        };
        let Some(victim) = store.get_user(victim_id)? else {
            return Ok(StealOutcome::Denied(Denial::AccountNotFound(
                victim_id.to_string(),
            )));
        };

        if let Some(last) = thief.last_steal_time {
            let elapsed = now - last;
            if elapsed < self.cooldown {
                let remaining = self.cooldown - elapsed;
                return Ok(StealOutcome::Denied(Denial::CooldownActive {
                    remaining_minutes: remaining.num_seconds() / 60,
                }));
            }
        }

        let inventory = store.get_fish_inventory(victim_id)?;
        if inventory.is_empty() {
            return Ok(StealOutcome::Denied(Denial::EmptyTarget {
                victim: victim.nickname,
            }));
        }

        // Each held slot is an equally weighted candidate, regardless
        // of quantity or rarity.
        let pick = self.rng.lock().below(inventory.len());
        let slot = &inventory[pick];

        let Some(template) = store.get_fish_template(&slot.fish_id)? else {
            log::error!(
                "inventory of {victim_id} references unknown fish {}",
                slot.fish_id
            );
            return Err(GameError::InternalInconsistency(format!(
                "fish {} held by {victim_id} is missing from the catalog",
                slot.fish_id
            )));
        };

        store.transfer_fish(victim_id, thief_id, &slot.fish_id, template.base_value, now)?;
        drop(store);

        log::info!(
            "steal: {thief_id} took {} ({}★) from {victim_id}",
            template.name,
            template.rarity
        );

        Ok(StealOutcome::Success(StealReceipt {
            fish_id: template.fish_id,
            fish_name: template.name,
            rarity: template.rarity,
            base_value: template.base_value,
            victim_nickname: victim.nickname,
        }))
    }
}

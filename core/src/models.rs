//! Domain records shared by the engines and the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{FishId, LogId, UserId};

/// A player account. Owned by the store; engines hold a copy only for
/// the duration of one operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub user_id:         UserId,
    pub nickname:        String,
    pub coins:           i64,
    pub last_steal_time: Option<DateTime<Utc>>,
}

impl User {
    pub fn can_afford(&self, amount: i64) -> bool {
        self.coins >= amount
    }
}

/// One wipe bomb attempt. Append-only; never mutated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WipeBombLog {
    pub log_id:              LogId,
    pub user_id:             UserId,
    pub contribution_amount: i64,
    pub reward_multiplier:   f64,
    pub reward_amount:       i64,
    pub timestamp:           DateTime<Utc>,
}

/// One inventory slot: how many units of a species a player holds.
/// `actual_value` is the appraised per-unit value recorded when the
/// stack was first acquired.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRow {
    pub user_id:      UserId,
    pub fish_id:      FishId,
    pub quantity:     i64,
    pub actual_value: i64,
}

/// A catalog entry describing a fish species.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FishTemplate {
    pub fish_id:    FishId,
    pub name:       String,
    /// 1 (common) through 5 (legendary).
    pub rarity:     u8,
    pub base_value: i64,
}

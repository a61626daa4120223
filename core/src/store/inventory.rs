use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use super::GameStore;
use crate::{
    error::{GameError, GameResult},
    models::InventoryRow,
};

impl GameStore {
    // ── Inventory ─────────────────────────────────────────────

    /// All non-empty inventory slots for one user, stable order.
    pub fn get_fish_inventory(&self, user_id: &str) -> GameResult<Vec<InventoryRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT user_id, fish_id, quantity, actual_value
             FROM user_fish_inventory
             WHERE user_id = ?1 AND quantity > 0
             ORDER BY fish_id ASC",
        )?;
        let rows = stmt
            .query_map(params![user_id], |row| {
                Ok(InventoryRow {
                    user_id: row.get(0)?,
                    fish_id: row.get(1)?,
                    quantity: row.get(2)?,
                    actual_value: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Adjust one slot by `delta` units. Positive deltas create the row
    /// if absent, recording `unit_value` as the appraised per-unit
    /// value. Negative deltas must not take the quantity below zero;
    /// that is a data defect, not a business failure. Slots that reach
    /// zero are removed.
    pub fn adjust_fish_quantity(
        &self,
        user_id: &str,
        fish_id: &str,
        delta: i64,
        unit_value: i64,
    ) -> GameResult<()> {
        bump_quantity(&self.conn, user_id, fish_id, delta, unit_value)
    }

    /// Move one unit of `fish_id` from victim to thief and stamp the
    /// thief's cooldown. Commits as a single transaction: either every
    /// mutation lands or none do.
    pub fn transfer_fish(
        &self,
        victim_id: &str,
        thief_id: &str,
        fish_id: &str,
        unit_value: i64,
        now: DateTime<Utc>,
    ) -> GameResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        bump_quantity(&tx, victim_id, fish_id, -1, unit_value)?;
        bump_quantity(&tx, thief_id, fish_id, 1, unit_value)?;
        tx.execute(
            "UPDATE user SET last_steal_time = ?1 WHERE user_id = ?2",
            params![now.timestamp(), thief_id],
        )?;
        tx.commit()?;
        Ok(())
    }
}

fn bump_quantity(
    conn: &Connection,
    user_id: &str,
    fish_id: &str,
    delta: i64,
    unit_value: i64,
) -> GameResult<()> {
    if delta >= 0 {
        conn.execute(
            "INSERT INTO user_fish_inventory (user_id, fish_id, quantity, actual_value)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, fish_id) DO UPDATE SET quantity = quantity + ?3",
            params![user_id, fish_id, delta, unit_value],
        )?;
        return Ok(());
    }

    let changed = conn.execute(
        "UPDATE user_fish_inventory SET quantity = quantity + ?1
         WHERE user_id = ?2 AND fish_id = ?3 AND quantity + ?1 >= 0",
        params![delta, user_id, fish_id],
    )?;
    if changed != 1 {
        return Err(GameError::InternalInconsistency(format!(
            "cannot remove {} unit(s) of {fish_id} from {user_id}",
            -delta
        )));
    }
    conn.execute(
        "DELETE FROM user_fish_inventory
         WHERE user_id = ?1 AND fish_id = ?2 AND quantity <= 0",
        params![user_id, fish_id],
    )?;
    Ok(())
}

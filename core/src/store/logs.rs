use chrono::{DateTime, Utc};
use rusqlite::params;

use super::GameStore;
use crate::{error::GameResult, models::WipeBombLog};

impl GameStore {
    // ── Wipe bomb log ─────────────────────────────────────────

    /// Append one log row; returns the entry with its assigned id.
    pub fn append_wipe_bomb_log(&self, entry: &WipeBombLog) -> GameResult<WipeBombLog> {
        self.conn.execute(
            "INSERT INTO wipe_bomb_log
                 (user_id, contribution_amount, reward_multiplier, reward_amount, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.user_id,
                entry.contribution_amount,
                entry.reward_multiplier,
                entry.reward_amount,
                entry.timestamp.timestamp(),
            ],
        )?;
        let mut stored = entry.clone();
        stored.log_id = self.conn.last_insert_rowid();
        Ok(stored)
    }

    pub fn wipe_bomb_count_since(
        &self,
        user_id: &str,
        since: DateTime<Utc>,
    ) -> GameResult<i64> {
        let n = self.conn.query_row(
            "SELECT COUNT(*) FROM wipe_bomb_log
             WHERE user_id = ?1 AND timestamp >= ?2",
            params![user_id, since.timestamp()],
            |row| row.get(0),
        )?;
        Ok(n)
    }

    /// Most-recent-first log rows for one user, bounded by `limit`.
    pub fn list_wipe_bomb_logs(
        &self,
        user_id: &str,
        limit: u32,
    ) -> GameResult<Vec<WipeBombLog>> {
        let mut stmt = self.conn.prepare(
            "SELECT log_id, user_id, contribution_amount, reward_multiplier,
                    reward_amount, timestamp
             FROM wipe_bomb_log
             WHERE user_id = ?1
             ORDER BY log_id DESC
             LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(params![user_id, limit], |row| {
                Ok(WipeBombLog {
                    log_id: row.get(0)?,
                    user_id: row.get(1)?,
                    contribution_amount: row.get(2)?,
                    reward_multiplier: row.get(3)?,
                    reward_amount: row.get(4)?,
                    timestamp: DateTime::from_timestamp(row.get(5)?, 0)
                        .unwrap_or(DateTime::UNIX_EPOCH),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

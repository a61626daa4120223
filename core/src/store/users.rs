use chrono::DateTime;
use rusqlite::{params, OptionalExtension};

use super::GameStore;
use crate::{error::GameResult, models::User};

impl GameStore {
    // ── User ──────────────────────────────────────────────────

    pub fn insert_user(&self, user: &User) -> GameResult<()> {
        self.conn.execute(
            "INSERT INTO user (user_id, nickname, coins, last_steal_time)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.user_id,
                user.nickname,
                user.coins,
                user.last_steal_time.map(|t| t.timestamp()),
            ],
        )?;
        Ok(())
    }

    pub fn get_user(&self, user_id: &str) -> GameResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                "SELECT user_id, nickname, coins, last_steal_time
                 FROM user WHERE user_id = ?1",
                params![user_id],
                |row| {
                    Ok(User {
                        user_id: row.get(0)?,
                        nickname: row.get(1)?,
                        coins: row.get(2)?,
                        last_steal_time: row
                            .get::<_, Option<i64>>(3)?
                            .and_then(|t| DateTime::from_timestamp(t, 0)),
                    })
                },
            )
            .optional()?;
        Ok(user)
    }

    /// Overwrite all mutable fields of one user.
    pub fn update_user(&self, user: &User) -> GameResult<()> {
        self.conn.execute(
            "UPDATE user SET nickname = ?1, coins = ?2, last_steal_time = ?3
             WHERE user_id = ?4",
            params![
                user.nickname,
                user.coins,
                user.last_steal_time.map(|t| t.timestamp()),
                user.user_id,
            ],
        )?;
        Ok(())
    }

    /// Apply a coin delta in place. The single balance mutation used by
    /// the wager path.
    pub fn update_user_coins(&self, user_id: &str, delta: i64) -> GameResult<()> {
        self.conn.execute(
            "UPDATE user SET coins = coins + ?1 WHERE user_id = ?2",
            params![delta, user_id],
        )?;
        Ok(())
    }
}

use rusqlite::{params, OptionalExtension};

use super::GameStore;
use crate::{error::GameResult, models::FishTemplate};

impl GameStore {
    // ── Fish catalog ──────────────────────────────────────────

    pub fn get_fish_template(&self, fish_id: &str) -> GameResult<Option<FishTemplate>> {
        let template = self
            .conn
            .query_row(
                "SELECT fish_id, name, rarity, base_value
                 FROM fish_template WHERE fish_id = ?1",
                params![fish_id],
                |row| {
                    Ok(FishTemplate {
                        fish_id: row.get(0)?,
                        name: row.get(1)?,
                        rarity: row.get(2)?,
                        base_value: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(template)
    }

    pub fn insert_fish_template(&self, template: &FishTemplate) -> GameResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO fish_template (fish_id, name, rarity, base_value)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                template.fish_id,
                template.name,
                template.rarity,
                template.base_value,
            ],
        )?;
        Ok(())
    }

    pub fn all_fish_templates(&self) -> GameResult<Vec<FishTemplate>> {
        let mut stmt = self.conn.prepare(
            "SELECT fish_id, name, rarity, base_value
             FROM fish_template ORDER BY rarity ASC, fish_id ASC",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(FishTemplate {
                    fish_id: row.get(0)?,
                    name: row.get(1)?,
                    rarity: row.get(2)?,
                    base_value: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

//! Knowledge base build metadata.

use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, DbResult};
use crate::models::BuildStats;

impl Database {
    /// Stats of the most recent stored build, if any.
    pub fn get_build_stats(&self) -> DbResult<Option<BuildStats>> {
        let stats = self
            .conn
            .query_row(
                r#"
                SELECT built_at, catalog_rows, dropped_rows, unreadable_rows,
                       duplicate_names, medicines, interaction_pairs, indexed_ingredients
                FROM knowledge_base_meta
                WHERE id = 1
                "#,
                [],
                |row| {
                    Ok(BuildStats {
                        built_at: Some(row.get(0)?),
                        catalog_rows: row.get::<_, i64>(1)? as usize,
                        dropped_rows: row.get::<_, i64>(2)? as usize,
                        unreadable_rows: row.get::<_, i64>(3)? as usize,
                        duplicate_names: row.get::<_, i64>(4)? as usize,
                        medicines: row.get::<_, i64>(5)? as usize,
                        interaction_pairs: row.get::<_, i64>(6)? as usize,
                        indexed_ingredients: row.get::<_, i64>(7)? as usize,
                    })
                },
            )
            .optional()?;
        Ok(stats)
    }
}

pub(super) fn write_build_stats(conn: &Connection, stats: &BuildStats) -> DbResult<()> {
    conn.execute(
        r#"
        INSERT OR REPLACE INTO knowledge_base_meta (
            id, built_at, catalog_rows, dropped_rows, unreadable_rows,
            duplicate_names, medicines, interaction_pairs, indexed_ingredients
        ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            stats.built_at.clone().unwrap_or_default(),
            stats.catalog_rows as i64,
            stats.dropped_rows as i64,
            stats.unreadable_rows as i64,
            stats.duplicate_names as i64,
            stats.medicines as i64,
            stats.interaction_pairs as i64,
            stats.indexed_ingredients as i64,
        ],
    )?;
    Ok(())
}

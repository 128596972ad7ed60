//! Medicine database operations.

use std::collections::HashSet;

use rusqlite::{params, Connection, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{BuildStats, Medicine};

const SELECT_MEDICINE: &str = r#"
    SELECT name, manufacturer_name, all_components, interaction_warning,
           interaction_description, side_effects
    FROM medicines
"#;

impl Database {
    /// Insert or update a medicine, keyed by name.
    pub fn upsert_medicine(&self, medicine: &Medicine) -> DbResult<()> {
        upsert_medicine(&self.conn, medicine)
    }

    /// Get a medicine by its normalized name.
    pub fn get_medicine(&self, name: &str) -> DbResult<Option<Medicine>> {
        let result = self
            .conn
            .query_row(
                &format!("{} WHERE name = ?", SELECT_MEDICINE),
                [name],
                MedicineRow::from_row,
            )
            .optional()?;

        result.map(|row| row.try_into()).transpose()
    }

    /// Get the stored medicines matching `names`.
    ///
    /// Returns at most one record per distinct name, in first-request order;
    /// names with no stored medicine are skipped.
    pub fn get_multiple_drugs<S: AsRef<str>>(&self, names: &[S]) -> DbResult<Vec<Medicine>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{} WHERE name = ?", SELECT_MEDICINE))?;

        let mut seen = HashSet::new();
        let mut medicines = Vec::new();
        for name in names {
            let name = name.as_ref();
            if !seen.insert(name) {
                continue;
            }
            if let Some(row) = stmt.query_row([name], MedicineRow::from_row).optional()? {
                medicines.push(row.try_into()?);
            }
        }
        Ok(medicines)
    }

    /// Get all medicines ordered by name.
    pub fn list_medicines(&self) -> DbResult<Vec<Medicine>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY name", SELECT_MEDICINE))?;
        let rows = stmt.query_map([], MedicineRow::from_row)?;

        let mut medicines = Vec::new();
        for row in rows {
            medicines.push(row?.try_into()?);
        }
        Ok(medicines)
    }

    /// Number of stored medicines.
    pub fn medicine_count(&self) -> DbResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM medicines", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Replace the whole knowledge base with a freshly built dataset.
    ///
    /// Runs in one transaction; on error the previous contents are kept.
    /// Returns `stats` stamped with the build time, with `medicines` set to
    /// the number of records actually stored.
    pub fn replace_knowledge_base(
        &mut self,
        medicines: &[Medicine],
        stats: &BuildStats,
    ) -> DbResult<BuildStats> {
        let tx = self.transaction()?;
        tx.execute("DELETE FROM medicines", [])?;
        for medicine in medicines {
            upsert_medicine(&tx, medicine)?;
        }

        let stored: i64 = tx.query_row("SELECT COUNT(*) FROM medicines", [], |row| row.get(0))?;
        let stats = BuildStats {
            medicines: stored as usize,
            built_at: Some(chrono::Utc::now().to_rfc3339()),
            ..stats.clone()
        };
        super::metadata::write_build_stats(&tx, &stats)?;
        tx.commit()?;

        Ok(stats)
    }
}

fn upsert_medicine(conn: &Connection, medicine: &Medicine) -> DbResult<()> {
    let components_json = serde_json::to_string(&medicine.components)?;
    let side_effects_json = serde_json::to_string(&medicine.side_effects)?;

    conn.execute(
        r#"
        INSERT INTO medicines (
            name, manufacturer_name, all_components, interaction_warning,
            interaction_description, side_effects
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(name) DO UPDATE SET
            manufacturer_name = excluded.manufacturer_name,
            all_components = excluded.all_components,
            interaction_warning = excluded.interaction_warning,
            interaction_description = excluded.interaction_description,
            side_effects = excluded.side_effects
        "#,
        params![
            medicine.name,
            medicine.manufacturer,
            components_json,
            medicine.interaction_warning,
            medicine.interaction_description,
            side_effects_json,
        ],
    )?;
    Ok(())
}

/// Intermediate row struct for database mapping.
struct MedicineRow {
    name: String,
    manufacturer_name: String,
    all_components: String,
    interaction_warning: String,
    interaction_description: Option<String>,
    side_effects: String,
}

impl MedicineRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            name: row.get(0)?,
            manufacturer_name: row.get(1)?,
            all_components: row.get(2)?,
            interaction_warning: row.get(3)?,
            interaction_description: row.get(4)?,
            side_effects: row.get(5)?,
        })
    }
}

impl TryFrom<MedicineRow> for Medicine {
    type Error = DbError;

    fn try_from(row: MedicineRow) -> Result<Self, Self::Error> {
        Ok(Medicine {
            name: row.name,
            manufacturer: row.manufacturer_name,
            components: serde_json::from_str(&row.all_components)?,
            interaction_warning: row.interaction_warning,
            interaction_description: row.interaction_description,
            side_effects: serde_json::from_str(&row.side_effects)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NO_KNOWN_INTERACTION;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn medicine(name: &str, components: &[&str]) -> Medicine {
        let mut medicine = Medicine::new(name.into(), "acme".into());
        medicine.components = components.iter().map(|c| c.to_string()).collect();
        medicine
    }

    #[test]
    fn test_upsert_and_get() {
        let db = setup_db();
        let mut item = medicine("augmentin 625 duo tablet", &["amoxycillin", "clavulanic acid"]);
        item.side_effects = vec!["diarrhea".into(), "nausea".into()];
        item.interaction_description = Some("Additive effect".into());

        db.upsert_medicine(&item).unwrap();

        let retrieved = db.get_medicine("augmentin 625 duo tablet").unwrap().unwrap();
        assert_eq!(retrieved, item);
        assert!(db.get_medicine("unknown").unwrap().is_none());
    }

    #[test]
    fn test_upsert_updates() {
        let db = setup_db();

        let mut item = medicine("crocin", &["paracetamol"]);
        db.upsert_medicine(&item).unwrap();

        item.interaction_warning = "caffeine interacts with paracetamol".into();
        db.upsert_medicine(&item).unwrap();

        let retrieved = db.get_medicine("crocin").unwrap().unwrap();
        assert_eq!(retrieved.interaction_warning, "caffeine interacts with paracetamol");
        assert_eq!(db.medicine_count().unwrap(), 1);
    }

    #[test]
    fn test_get_multiple_drugs() {
        let db = setup_db();
        db.upsert_medicine(&medicine("a", &["x"])).unwrap();
        db.upsert_medicine(&medicine("b", &["y"])).unwrap();
        db.upsert_medicine(&medicine("c", &["z"])).unwrap();

        let found = db.get_multiple_drugs(&["c", "missing", "a", "c"]).unwrap();
        let names: Vec<&str> = found.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a"]);

        let none: Vec<String> = Vec::new();
        assert!(db.get_multiple_drugs(&none).unwrap().is_empty());
    }

    #[test]
    fn test_list_medicines_sorted() {
        let db = setup_db();
        db.upsert_medicine(&medicine("zinc", &[])).unwrap();
        db.upsert_medicine(&medicine("aspirin", &[])).unwrap();

        let names: Vec<String> = db.list_medicines().unwrap().into_iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["aspirin", "zinc"]);
    }

    #[test]
    fn test_replace_knowledge_base() {
        let mut db = setup_db();
        db.upsert_medicine(&medicine("stale", &["old"])).unwrap();

        let medicines = vec![medicine("a", &["x"]), medicine("b", &["y"])];
        let stats = BuildStats {
            catalog_rows: 3,
            dropped_rows: 1,
            medicines: 2,
            ..Default::default()
        };
        let stored = db.replace_knowledge_base(&medicines, &stats).unwrap();

        assert!(stored.built_at.is_some());
        assert_eq!(db.medicine_count().unwrap(), 2);
        assert!(db.get_medicine("stale").unwrap().is_none());
        assert_eq!(
            db.get_medicine("a").unwrap().unwrap().interaction_warning,
            NO_KNOWN_INTERACTION
        );
    }

    #[test]
    fn test_replace_counts_stored_medicines() {
        let mut db = setup_db();

        let medicines = vec![
            medicine("dolo 650", &["paracetamol"]),
            medicine("dolo 650", &["ibuprofen"]),
        ];
        let stats = BuildStats {
            catalog_rows: 2,
            medicines: 2,
            ..Default::default()
        };
        let stored = db.replace_knowledge_base(&medicines, &stats).unwrap();

        assert_eq!(stored.medicines, db.medicine_count().unwrap());
        assert_eq!(db.get_build_stats().unwrap().unwrap().medicines, 1);
        assert_eq!(
            db.get_medicine("dolo 650").unwrap().unwrap().components,
            vec!["ibuprofen"]
        );
    }

    #[test]
    fn test_corrupt_json_is_error() {
        let db = setup_db();
        db.conn()
            .execute(
                "INSERT INTO medicines (name, all_components, interaction_warning) VALUES ('bad', 'not json', '')",
                [],
            )
            .unwrap();

        assert!(matches!(db.get_medicine("bad"), Err(DbError::Json(_))));
    }
}

//! Cleaned master dataset export (CSV and JSON).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::{Database, DbError};
use crate::models::Medicine;

/// CSV column order of the cleaned master dataset.
pub const DATASET_COLUMNS: [&str; 6] = [
    "name",
    "manufacturer_name",
    "all_components",
    "interaction_warning",
    "interaction_description",
    "side_effects",
];

/// Export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Snapshot of the whole knowledge base for export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetExport {
    /// Export timestamp
    pub exported_at: String,
    /// Build timestamp of the exported knowledge base, if recorded
    pub built_at: Option<String>,
    /// Medicines ordered by name
    pub medicines: Vec<Medicine>,
}

impl DatasetExport {
    pub fn new(medicines: Vec<Medicine>, built_at: Option<String>) -> Self {
        Self {
            exported_at: chrono::Utc::now().to_rfc3339(),
            built_at,
            medicines,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV. List columns are JSON-encoded arrays; a missing
    /// interaction description is an empty cell.
    pub fn to_csv(&self) -> ExportResult<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(DATASET_COLUMNS)?;

        for medicine in &self.medicines {
            writer.write_record([
                medicine.name.clone(),
                medicine.manufacturer.clone(),
                serde_json::to_string(&medicine.components)?,
                medicine.interaction_warning.clone(),
                medicine.interaction_description.clone().unwrap_or_default(),
                serde_json::to_string(&medicine.side_effects)?,
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}

/// Exporter reading from the knowledge base.
pub struct DatasetExporter<'a> {
    db: &'a Database,
}

impl<'a> DatasetExporter<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Export every stored medicine.
    pub fn export_all(&self) -> ExportResult<DatasetExport> {
        let medicines = self.db.list_medicines()?;
        let built_at = self.db.get_build_stats()?.and_then(|s| s.built_at);
        Ok(DatasetExport::new(medicines, built_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NO_KNOWN_INTERACTION, NO_MAJOR_SIDE_EFFECTS};

    fn sample() -> DatasetExport {
        let mut augmentin = Medicine::new("augmentin 625 duo tablet".into(), "glaxo".into());
        augmentin.components = vec!["amoxycillin".into(), "clavulanic acid".into()];
        augmentin.side_effects = vec!["diarrhea".into(), "nausea, vomiting".into()];

        DatasetExport::new(vec![augmentin], None)
    }

    #[test]
    fn test_csv_export() {
        let csv = sample().to_csv().unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "name,manufacturer_name,all_components,interaction_warning,interaction_description,side_effects"
        );
        assert_eq!(
            lines.next().unwrap(),
            r#"augmentin 625 duo tablet,glaxo,"[""amoxycillin"",""clavulanic acid""]",No known interaction,,"[""diarrhea"",""nausea, vomiting""]""#
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_csv_reads_back() {
        let csv = sample().to_csv().unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader.records().next().unwrap().unwrap();

        let components: Vec<String> = serde_json::from_str(&record[2]).unwrap();
        assert_eq!(components, vec!["amoxycillin", "clavulanic acid"]);
        assert_eq!(&record[3], NO_KNOWN_INTERACTION);
        assert_eq!(&record[4], "");
    }

    #[test]
    fn test_csv_carries_interaction_description() {
        let mut ecosprin = Medicine::new("ecosprin av".into(), String::new());
        ecosprin.components = vec!["aspirin".into(), "clopidogrel".into()];
        ecosprin.interaction_warning = "aspirin interacts with clopidogrel".into();
        ecosprin.interaction_description = Some("Increased bleeding risk".into());

        let csv = DatasetExport::new(vec![ecosprin], None).to_csv().unwrap();
        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let record = reader.records().next().unwrap().unwrap();

        assert_eq!(&record[3], "aspirin interacts with clopidogrel");
        assert_eq!(&record[4], "Increased bleeding risk");
    }

    #[test]
    fn test_json_export() {
        let json = sample().to_json().unwrap();
        let parsed: DatasetExport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.medicines.len(), 1);
        assert_eq!(parsed.medicines[0].name, "augmentin 625 duo tablet");
    }

    #[test]
    fn test_export_all_from_database() {
        let mut db = Database::open_in_memory().unwrap();
        let medicines = vec![
            Medicine::new("zincovit".into(), String::new()),
            Medicine::new("allegra".into(), String::new()),
        ];
        db.replace_knowledge_base(&medicines, &Default::default()).unwrap();

        let export = DatasetExporter::new(&db).export_all().unwrap();

        assert!(export.built_at.is_some());
        assert_eq!(export.medicines[0].name, "allegra");
        assert_eq!(export.medicines[1].side_effects, vec![NO_MAJOR_SIDE_EFFECTS]);
    }
}

//! CSV source tables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};

use super::{ColumnMapping, Field, SourceKind, SourceResult};

/// One loosely-typed row. Empty or whitespace-only cells are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    values: Vec<Option<String>>,
}

impl RawRecord {
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Build a record from cell text, treating blank cells as absent.
    pub fn from_cells<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values = cells
            .into_iter()
            .map(|cell| {
                let cell = cell.as_ref();
                (!cell.trim().is_empty()).then(|| cell.to_string())
            })
            .collect();
        Self { values }
    }

    /// Cell at `index`; short rows read as absent.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A loaded source table with cleaned headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    headers: Vec<String>,
    rows: Vec<RawRecord>,
    skipped_rows: usize,
}

impl SourceTable {
    /// Build a table from in-memory headers and rows.
    pub fn new(headers: Vec<String>, rows: Vec<RawRecord>) -> Self {
        Self {
            headers: headers.iter().map(|h| clean_header(h)).collect(),
            rows,
            skipped_rows: 0,
        }
    }

    /// Read a CSV table. Rows that fail to decode are skipped.
    pub fn from_reader<R: Read>(reader: R) -> SourceResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();
        debug!("Source headers: {}", headers.join(", "));

        let mut rows = Vec::new();
        let mut skipped_rows = 0;
        for (line, result) in reader.records().enumerate() {
            match result {
                Ok(record) => rows.push(RawRecord::from_cells(record.iter())),
                Err(e) => {
                    // +2: one for the header row, one for 1-based numbering
                    warn!("Skipping unreadable row {}: {}", line + 2, e);
                    skipped_rows += 1;
                }
            }
        }

        Ok(Self {
            headers,
            rows,
            skipped_rows,
        })
    }

    /// Open and read a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RawRecord] {
        &self.rows
    }

    /// Rows dropped while reading because they could not be decoded.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Reconcile headers for `kind`, failing if a required field is missing.
    pub fn reconcile(&self, kind: SourceKind) -> SourceResult<ReconciledTable<'_>> {
        let mapping = ColumnMapping::reconcile(kind, &self.headers)?;
        Ok(ReconciledTable {
            kind,
            table: self,
            mapping,
        })
    }
}

/// A table whose headers have been mapped to canonical fields.
#[derive(Debug, Clone)]
pub struct ReconciledTable<'a> {
    kind: SourceKind,
    table: &'a SourceTable,
    mapping: ColumnMapping,
}

impl<'a> ReconciledTable<'a> {
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    /// Iterate rows with field-level access.
    pub fn rows(&self) -> impl Iterator<Item = ReconciledRow<'_>> {
        let mapping = &self.mapping;
        self.table
            .rows
            .iter()
            .map(move |record| ReconciledRow { record, mapping })
    }
}

/// A row viewed through a [`ColumnMapping`].
#[derive(Debug, Clone, Copy)]
pub struct ReconciledRow<'a> {
    record: &'a RawRecord,
    mapping: &'a ColumnMapping,
}

impl<'a> ReconciledRow<'a> {
    /// Value of the first column bound to `field`.
    pub fn get(&self, field: Field) -> Option<&'a str> {
        self.mapping
            .column(field)
            .and_then(|index| self.record.get(index))
    }

    /// Values of every column bound to `field`, in header order.
    pub fn get_all(&self, field: Field) -> Vec<Option<&'a str>> {
        self.mapping
            .columns(field)
            .iter()
            .map(|&index| self.record.get(index))
            .collect()
    }
}

fn clean_header(header: &str) -> String {
    header.trim().to_lowercase()
}

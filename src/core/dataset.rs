use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::record::{DataQualityIssue, Record, coerce_integer};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_KEY_COLUMN: &str = "country";

/// Outcome details of a dataset load besides the records themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub skipped_empty_keys: usize,
    pub duplicate_keys: Vec<String>,
    pub issues: Vec<DataQualityIssue>,
}

impl LoadReport {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped_empty_keys == 0 && self.duplicate_keys.is_empty() && self.issues.is_empty()
    }
}

/// Parsed, typed dataset with unique keys in load order.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    key_column: String,
    columns: Vec<String>,
    records: Vec<Record>,
    positions: HashMap<String, usize>,
    report: LoadReport,
}

impl Dataset {
    /// Builds a dataset from already-typed records.
    ///
    /// Numeric columns are taken from the first record's field order. Later
    /// records with an already-seen key are dropped, as in CSV loading.
    #[must_use]
    pub fn from_records(key_column: impl Into<String>, records: Vec<Record>) -> Self {
        let mut dataset = Self {
            key_column: key_column.into(),
            columns: records
                .first()
                .map(|record| record.fields().keys().cloned().collect())
                .unwrap_or_default(),
            ..Self::default()
        };
        dataset.report.rows_read = records.len();
        for record in records {
            dataset.push_unique(record);
        }
        dataset
    }

    pub fn from_csv_path(path: impl AsRef<Path>, key_column: &str) -> ChartResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening csv dataset");
        let file = File::open(path)?;
        Self::from_csv_reader(file, key_column)
    }

    pub fn from_csv_str(input: &str, key_column: &str) -> ChartResult<Self> {
        Self::from_csv_reader(input.as_bytes(), key_column)
    }

    /// Parses CSV with one header row.
    ///
    /// Every column other than `key_column` is coerced to `i64`; defective
    /// cells become `0` and are reported in [`LoadReport::issues`].
    pub fn from_csv_reader<R: Read>(reader: R, key_column: &str) -> ChartResult<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();

        let key_idx = headers
            .iter()
            .position(|h| h == key_column)
            .ok_or_else(|| ChartError::MissingColumn {
                column: key_column.to_owned(),
            })?;
        let numeric_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != key_idx)
            .map(|(idx, name)| (idx, name.to_owned()))
            .collect();

        let mut dataset = Self {
            key_column: key_column.to_owned(),
            columns: numeric_columns.iter().map(|(_, name)| name.clone()).collect(),
            ..Self::default()
        };

        for (row, result) in rdr.records().enumerate() {
            let csv_record = result?;
            dataset.report.rows_read += 1;

            let key = csv_record.get(key_idx).unwrap_or("").trim();
            if key.is_empty() {
                warn!(row, "skipping dataset row with empty key");
                dataset.report.skipped_empty_keys += 1;
                continue;
            }

            let mut record = Record::new(key);
            for (idx, field) in &numeric_columns {
                let raw = csv_record.get(*idx).unwrap_or("");
                let value = match coerce_integer(raw) {
                    Some(value) => value,
                    None => {
                        warn!(
                            row,
                            key,
                            field = field.as_str(),
                            raw,
                            "non-numeric dataset value treated as zero"
                        );
                        dataset.report.issues.push(DataQualityIssue {
                            row,
                            key: key.to_owned(),
                            field: field.clone(),
                            raw: raw.to_owned(),
                        });
                        0
                    }
                };
                record.set_field(field.clone(), value);
            }
            dataset.push_unique(record);
        }

        debug!(
            rows = dataset.report.rows_read,
            records = dataset.records.len(),
            issues = dataset.report.issues.len(),
            "loaded csv dataset"
        );
        Ok(dataset)
    }

    fn push_unique(&mut self, record: Record) {
        if self.positions.contains_key(record.key()) {
            warn!(key = record.key(), "dropping record with duplicate key");
            self.report.duplicate_keys.push(record.key().to_owned());
            return;
        }
        self.positions
            .insert(record.key().to_owned(), self.records.len());
        self.records.push(record);
    }

    #[must_use]
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Numeric column names in header order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn record(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Case-sensitive exact key lookup.
    #[must_use]
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// All unique keys in load order, as consumed by search collaborators.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.records.iter().map(Record::key).collect()
    }

    #[must_use]
    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

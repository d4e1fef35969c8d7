//! Labelled dataset loading and preparation.
//!
//! Datasets are delimited text files with a header row containing at least a `text` and a
//! `label` column. Other columns are ignored. Comma is the default delimiter; files with a
//! `.tsv` extension are read as tab-delimited.

use crate::normalise::clean_value;
use crate::{ClassifierError, ClassifierResult};
use std::collections::BTreeSet;
use std::path::Path;

const TEXT_COLUMN: &str = "text";
const LABEL_COLUMN: &str = "label";

/// A single labelled training example.
///
/// `text` is `None` when the cell was empty; it normalises to the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRecord {
    pub text: Option<String>,
    pub label: String,
}

/// Cleaned texts and their labels, index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedData {
    pub texts: Vec<String>,
    pub labels: Vec<String>,
}

impl PreparedData {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

fn delimiter_for(path: &Path) -> ClassifierResult<u8> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("tsv") => Ok(b'\t'),
        Some("xlsx") | Some("xls") => Err(ClassifierError::DatasetLoad(format!(
            "spreadsheet datasets are not supported, export {} as CSV",
            path.display()
        ))),
        _ => Ok(b','),
    }
}

/// Load a labelled dataset from a delimited text file.
///
/// # Errors
///
/// Returns a dataset load error if:
/// - the file does not exist or cannot be read,
/// - the header row lacks a `text` or `label` column,
/// - a row cannot be parsed.
pub fn load_dataset(path: &Path) -> ClassifierResult<Vec<DatasetRecord>> {
    if !path.is_file() {
        return Err(ClassifierError::DatasetLoad(format!(
            "dataset file not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_for(path)?)
        .flexible(true)
        .from_path(path)
        .map_err(ClassifierError::DatasetRead)?;

    let headers = reader
        .headers()
        .map_err(ClassifierError::DatasetRead)?
        .clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| {
                ClassifierError::DatasetLoad(format!("missing required column '{name}'"))
            })
    };
    let text_idx = column(TEXT_COLUMN)?;
    let label_idx = column(LABEL_COLUMN)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = row.map_err(ClassifierError::DatasetRead)?;

        let label = row.get(label_idx).map(str::trim).unwrap_or_default();
        if label.is_empty() {
            skipped += 1;
            continue;
        }

        let text = row
            .get(text_idx)
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string);

        records.push(DatasetRecord {
            text,
            label: label.to_string(),
        });
    }

    if skipped > 0 {
        tracing::warn!("skipped {} rows without a label", skipped);
    }

    let unique: BTreeSet<&str> = records.iter().map(|r| r.label.as_str()).collect();
    tracing::info!("Dataset loaded from {}", path.display());
    tracing::info!("Shape: ({}, {})", records.len(), headers.len());
    tracing::info!("Columns: {:?}", headers.iter().collect::<Vec<_>>());
    tracing::info!("Unique conditions: {}", unique.len());

    Ok(records)
}

/// Normalise every record and drop those whose cleaned text is empty.
///
/// Order is preserved.
pub fn prepare_training_data(records: &[DatasetRecord]) -> PreparedData {
    let mut prepared = PreparedData::default();

    for record in records {
        let cleaned = clean_value(record.text.as_deref());
        if cleaned.is_empty() {
            continue;
        }
        prepared.texts.push(cleaned);
        prepared.labels.push(record.label.clone());
    }

    tracing::info!("After cleaning: {} samples", prepared.len());
    if let Some(first) = prepared.texts.first() {
        tracing::debug!("Sample cleaned text: {}", first);
    }

    prepared
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_csv_dataset() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "data.csv",
            "id,label,text\n1,Flu,\"Fever, chills and cough\"\n2,Migraine,Throbbing headache\n",
        );

        let records = load_dataset(&path).unwrap();

        assert_eq!(
            records,
            vec![
                DatasetRecord {
                    text: Some("Fever, chills and cough".into()),
                    label: "Flu".into(),
                },
                DatasetRecord {
                    text: Some("Throbbing headache".into()),
                    label: "Migraine".into(),
                },
            ]
        );
    }

    #[test]
    fn test_load_tsv_dataset() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "data.tsv", "text\tlabel\nitchy red skin\tPsoriasis\n");

        let records = load_dataset(&path).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].label, "Psoriasis");
    }

    #[test]
    fn test_empty_text_cell_becomes_none() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "data.csv", "text,label\n,Flu\nfever,Flu\n");

        let records = load_dataset(&path).unwrap();

        assert_eq!(records[0].text, None);
        assert_eq!(records[1].text.as_deref(), Some("fever"));
    }

    #[test]
    fn test_missing_file_is_dataset_error() {
        let result = load_dataset(Path::new("/non-existent/data.csv"));
        assert!(matches!(result, Err(ClassifierError::DatasetLoad(_))));
    }

    #[test]
    fn test_missing_column_is_dataset_error() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "data.csv", "symptoms,label\nfever,Flu\n");

        let result = load_dataset(&path);

        assert!(result.as_ref().is_err_and(|e| e.is_dataset_load()));
        assert!(result.unwrap_err().to_string().contains("'text'"));
    }

    #[test]
    fn test_spreadsheet_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "data.xlsx", "not really a workbook");

        let result = load_dataset(&path);

        assert!(matches!(result, Err(ClassifierError::DatasetLoad(_))));
    }

    #[test]
    fn test_prepare_drops_empty_and_keeps_order() {
        let records = vec![
            DatasetRecord {
                text: Some("High fever!".into()),
                label: "Flu".into(),
            },
            DatasetRecord {
                text: Some("I am ok".into()),
                label: "Healthy".into(),
            },
            DatasetRecord {
                text: None,
                label: "Flu".into(),
            },
            DatasetRecord {
                text: Some("Throbbing headache".into()),
                label: "Migraine".into(),
            },
        ];

        let prepared = prepare_training_data(&records);

        assert_eq!(prepared.texts, vec!["high fever", "throbbing headache"]);
        assert_eq!(prepared.labels, vec!["Flu", "Migraine"]);
    }
}

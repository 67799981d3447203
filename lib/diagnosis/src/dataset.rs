// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Training data ingestion.
//!
//! Two CSV layouts are supported:
//! - `binary`: one 0/1 column per symptom plus a target column. The symptom columns, in
//!   file order, become the vocabulary.
//! - `free_text`: a symptom sentence column and a label column. Sentences go through the
//!   free-text pipeline; the vocabulary is every normalized token in first-appearance order.
//!
//! Rows are encoded with the same [`FeatureVectorBuilder`] / matcher that serve requests.

use std::collections::HashSet;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::symptoms::{
    match_symptoms, split_free_text, FeatureVector, FeatureVectorBuilder, Vocabulary,
    VocabularyError,
};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to open dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column '{column}' not found; available columns: {available:?}")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("invalid value '{value}' in row {row}, column '{column}'")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("dataset has no rows")]
    Empty,

    #[error(transparent)]
    Vocabulary(#[from] VocabularyError),

    #[error("dataset columns do not match the trained vocabulary (missing: {missing:?}, unexpected: {unexpected:?})")]
    VocabularyDrift {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    #[error("training set has {rows} rows but {labels} labels")]
    RowLabelMismatch { rows: usize, labels: usize },

    #[error("row {row} has {actual} columns, vocabulary has {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DatasetFormat {
    #[default]
    Binary,
    FreeText,
}

/// Where the training data lives and how to read it.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DatasetConfig {
    /// Training CSV.
    #[serde(default = "default_path")]
    pub path: PathBuf,

    /// Optional holdout CSV, same layout as `path`. When set, no rows are split off.
    #[serde(default)]
    pub evaluation_path: Option<PathBuf>,

    /// Share of the training rows held out for evaluation when no `evaluation_path` is
    /// given. `0` trains on every row.
    #[validate(range(min = 0.0, max = 0.5))]
    #[serde(default = "default_holdout_fraction")]
    pub holdout_fraction: f64,

    /// Seed for the holdout shuffle.
    #[serde(default = "default_split_seed")]
    pub split_seed: u64,

    #[serde(default)]
    pub format: DatasetFormat,

    /// Label column for `binary` datasets.
    #[validate(length(min = 1))]
    #[serde(default = "default_target_column")]
    pub target_column: String,

    /// Columns whose header starts with this prefix are dropped from `binary` datasets.
    #[serde(default = "default_drop_prefix")]
    pub drop_prefix: String,

    /// Sentence column for `free_text` datasets.
    #[validate(length(min = 1))]
    #[serde(default = "default_symptoms_column")]
    pub symptoms_column: String,

    /// Label column for `free_text` datasets.
    #[validate(length(min = 1))]
    #[serde(default = "default_label_column")]
    pub label_column: String,
}

fn default_path() -> PathBuf {
    PathBuf::from("data/Training.csv")
}

fn default_holdout_fraction() -> f64 {
    0.2
}

fn default_split_seed() -> u64 {
    42
}

fn default_target_column() -> String {
    "prognosis".to_string()
}

fn default_drop_prefix() -> String {
    "Unnamed".to_string()
}

fn default_symptoms_column() -> String {
    "Symptoms".to_string()
}

fn default_label_column() -> String {
    "Disease".to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            evaluation_path: None,
            holdout_fraction: default_holdout_fraction(),
            split_seed: default_split_seed(),
            format: DatasetFormat::default(),
            target_column: default_target_column(),
            drop_prefix: default_drop_prefix(),
            symptoms_column: default_symptoms_column(),
            label_column: default_label_column(),
        }
    }
}

/// Encoded rows and their labels over one vocabulary.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    vocabulary: Arc<Vocabulary>,
    rows: Vec<FeatureVector>,
    labels: Vec<String>,
}

impl TrainingSet {
    pub fn new(
        vocabulary: Arc<Vocabulary>,
        rows: Vec<FeatureVector>,
        labels: Vec<String>,
    ) -> Result<Self, DatasetError> {
        if rows.len() != labels.len() {
            return Err(DatasetError::RowLabelMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if let Some((row, vector)) = rows
            .iter()
            .enumerate()
            .find(|(_, v)| v.len() != vocabulary.len())
        {
            return Err(DatasetError::WidthMismatch {
                row,
                expected: vocabulary.len(),
                actual: vector.len(),
            });
        }
        Ok(Self {
            vocabulary,
            rows,
            labels,
        })
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FeatureVector, &str)> {
        self.rows.iter().zip(self.labels.iter().map(String::as_str))
    }

    /// Shuffle with `seed` and move `ceil(len * fraction)` rows into a holdout set.
    ///
    /// Returns the set unchanged with no holdout when the split would leave either side
    /// empty.
    pub fn split_holdout(self, fraction: f64, seed: u64) -> (TrainingSet, Option<TrainingSet>) {
        let holdout = (self.len() as f64 * fraction).ceil() as usize;
        if holdout == 0 || holdout >= self.len() {
            return (self, None);
        }

        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(&mut StdRng::seed_from_u64(seed));

        let take = |indices: &[usize]| TrainingSet {
            vocabulary: self.vocabulary.clone(),
            rows: indices.iter().map(|i| self.rows[*i].clone()).collect(),
            labels: indices.iter().map(|i| self.labels[*i].clone()).collect(),
        };
        let (held, kept) = order.split_at(holdout);
        (take(kept), Some(take(held)))
    }
}

/// Load the training set described by `config`.
pub fn load_training_set(config: &DatasetConfig) -> Result<TrainingSet, DatasetError> {
    let reader = open(&config.path)?;
    let set = match config.format {
        DatasetFormat::Binary => read_binary(reader, &config.target_column, &config.drop_prefix)?,
        DatasetFormat::FreeText => {
            read_free_text(reader, &config.symptoms_column, &config.label_column, None)?
        }
    };
    tracing::info!(
        path = %config.path.display(),
        rows = set.len(),
        symptoms = set.width(),
        "loaded training dataset"
    );
    Ok(set)
}

/// Load the holdout set, encoded over the trained vocabulary. `None` when not configured.
pub fn load_evaluation_set(
    config: &DatasetConfig,
    vocabulary: &Arc<Vocabulary>,
) -> Result<Option<TrainingSet>, DatasetError> {
    let Some(path) = config.evaluation_path.as_ref() else {
        return Ok(None);
    };
    let reader = open(path)?;
    let set = match config.format {
        DatasetFormat::Binary => read_binary_aligned(
            reader,
            vocabulary,
            &config.target_column,
            &config.drop_prefix,
        )?,
        DatasetFormat::FreeText => read_free_text(
            reader,
            &config.symptoms_column,
            &config.label_column,
            Some(vocabulary),
        )?,
    };
    tracing::info!(path = %path.display(), rows = set.len(), "loaded evaluation dataset");
    Ok(Some(set))
}

/// Training rows plus the rows to evaluate on: the `evaluation_path` file when configured,
/// otherwise a seeded holdout split of the training file.
pub fn load_datasets(
    config: &DatasetConfig,
) -> Result<(TrainingSet, Option<TrainingSet>), DatasetError> {
    let set = load_training_set(config)?;
    if let Some(evaluation) = load_evaluation_set(config, set.vocabulary())? {
        return Ok((set, Some(evaluation)));
    }

    let (training, holdout) = set.split_holdout(config.holdout_fraction, config.split_seed);
    match &holdout {
        Some(holdout) => tracing::info!(
            training_rows = training.len(),
            holdout_rows = holdout.len(),
            seed = config.split_seed,
            "split holdout from training dataset"
        ),
        None => tracing::info!(
            rows = training.len(),
            fraction = config.holdout_fraction,
            "no holdout split; evaluating on training rows"
        ),
    }
    Ok((training, holdout))
}

fn open(path: &Path) -> Result<std::fs::File, DatasetError> {
    std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Header layout of a binary dataset after dropping ignored columns.
struct BinaryHeader {
    /// `(csv column, symptom name)` in file order.
    symptoms: Vec<(usize, String)>,
    target: usize,
}

fn binary_header(
    headers: &csv::StringRecord,
    target_column: &str,
    drop_prefix: &str,
) -> Result<BinaryHeader, DatasetError> {
    let kept: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| drop_prefix.is_empty() || !name.starts_with(drop_prefix))
        .collect();

    let target = kept
        .iter()
        .find(|(_, name)| *name == target_column)
        .map(|(i, _)| *i)
        .ok_or_else(|| DatasetError::MissingColumn {
            column: target_column.to_string(),
            available: kept.iter().map(|(_, name)| name.to_string()).collect(),
        })?;

    let symptoms = kept
        .into_iter()
        .filter(|(i, _)| *i != target)
        .map(|(i, name)| (i, name.to_string()))
        .collect();

    Ok(BinaryHeader { symptoms, target })
}

fn parse_flag(value: &str, row: usize, column: &str) -> Result<bool, DatasetError> {
    let invalid = || DatasetError::InvalidCell {
        row,
        column: column.to_string(),
        value: value.to_string(),
    };
    let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
    if parsed == 0.0 {
        Ok(false)
    } else if parsed == 1.0 {
        Ok(true)
    } else {
        Err(invalid())
    }
}

fn parse_label(
    record: &csv::StringRecord,
    column: usize,
    name: &str,
    row: usize,
) -> Result<String, DatasetError> {
    let value = record.get(column).unwrap_or_default().trim();
    if value.is_empty() {
        return Err(DatasetError::InvalidCell {
            row,
            column: name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value.to_string())
}

/// Read a binary dataset; its symptom columns become the vocabulary.
pub fn read_binary<R: Read>(
    reader: R,
    target_column: &str,
    drop_prefix: &str,
) -> Result<TrainingSet, DatasetError> {
    let mut csv = csv::ReaderBuilder::new().flexible(false).from_reader(reader);
    let header = binary_header(csv.headers()?, target_column, drop_prefix)?;
    let vocabulary = Arc::new(Vocabulary::new(
        header.symptoms.iter().map(|(_, name)| name.clone()),
    )?);
    // columns map one to one onto vocabulary positions
    let columns: Vec<(usize, usize)> = header
        .symptoms
        .iter()
        .enumerate()
        .map(|(position, (csv_column, _))| (*csv_column, position))
        .collect();

    read_binary_rows(&mut csv, vocabulary, &columns, header.target, target_column)
}

/// Read a binary dataset whose symptom columns must be exactly `vocabulary`, in any order.
pub fn read_binary_aligned<R: Read>(
    reader: R,
    vocabulary: &Arc<Vocabulary>,
    target_column: &str,
    drop_prefix: &str,
) -> Result<TrainingSet, DatasetError> {
    let mut csv = csv::ReaderBuilder::new().flexible(false).from_reader(reader);
    let header = binary_header(csv.headers()?, target_column, drop_prefix)?;

    let present: HashSet<&str> = header.symptoms.iter().map(|(_, n)| n.as_str()).collect();
    let missing: Vec<String> = vocabulary
        .entries()
        .iter()
        .filter(|e| !present.contains(e.as_str()))
        .cloned()
        .collect();
    let unexpected: Vec<String> = header
        .symptoms
        .iter()
        .filter(|(_, n)| !vocabulary.contains(n))
        .map(|(_, n)| n.clone())
        .collect();
    if !missing.is_empty() || !unexpected.is_empty() {
        return Err(DatasetError::VocabularyDrift {
            missing,
            unexpected,
        });
    }

    let mut columns = Vec::with_capacity(header.symptoms.len());
    for (csv_column, name) in &header.symptoms {
        if let Some(position) = vocabulary.position(name) {
            columns.push((*csv_column, position));
        }
    }

    read_binary_rows(
        &mut csv,
        vocabulary.clone(),
        &columns,
        header.target,
        target_column,
    )
}

fn read_binary_rows<R: Read>(
    csv: &mut csv::Reader<R>,
    vocabulary: Arc<Vocabulary>,
    columns: &[(usize, usize)],
    target: usize,
    target_column: &str,
) -> Result<TrainingSet, DatasetError> {
    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for (row, record) in csv.records().enumerate() {
        let record = record?;
        let mut builder = FeatureVectorBuilder::new(&vocabulary);
        for (csv_column, position) in columns {
            let value = record.get(*csv_column).unwrap_or_default();
            let name = vocabulary.get(*position).unwrap_or_default();
            if parse_flag(value, row, name)? {
                builder.mark(*position);
            }
        }
        rows.push(builder.build());
        labels.push(parse_label(&record, target, target_column, row)?);
    }

    if rows.is_empty() {
        return Err(DatasetError::Empty);
    }
    TrainingSet::new(vocabulary, rows, labels)
}

/// Read a free-text dataset.
///
/// With `vocabulary` the rows are encoded against it (unknown tokens are dropped by the
/// matcher, exactly as at serving time); without it the vocabulary is built from the file.
pub fn read_free_text<R: Read>(
    reader: R,
    symptoms_column: &str,
    label_column: &str,
    vocabulary: Option<&Arc<Vocabulary>>,
) -> Result<TrainingSet, DatasetError> {
    let mut csv = csv::ReaderBuilder::new().flexible(false).from_reader(reader);
    let headers = csv.headers()?.clone();
    let find = |column: &str| {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| DatasetError::MissingColumn {
                column: column.to_string(),
                available: headers.iter().map(str::to_string).collect(),
            })
    };
    let symptoms_at = find(symptoms_column)?;
    let label_at = find(label_column)?;

    let mut sentences = Vec::new();
    let mut labels = Vec::new();
    for (row, record) in csv.records().enumerate() {
        let record = record?;
        sentences.push(split_free_text(record.get(symptoms_at).unwrap_or_default()));
        labels.push(parse_label(&record, label_at, label_column, row)?);
    }
    if sentences.is_empty() {
        return Err(DatasetError::Empty);
    }

    let vocabulary = match vocabulary {
        Some(vocabulary) => vocabulary.clone(),
        None => {
            let mut seen = HashSet::new();
            let mut entries = Vec::new();
            for token in sentences.iter().flatten() {
                let normalized = token.normalized();
                if !normalized.is_empty() && seen.insert(normalized.clone()) {
                    entries.push(normalized);
                }
            }
            Arc::new(Vocabulary::new(entries)?)
        }
    };

    let rows = sentences
        .iter()
        .map(|tokens| match_symptoms(tokens, &vocabulary).features)
        .collect();

    TrainingSet::new(vocabulary, rows, labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BINARY: &str = "\
itching,skin_rash,cough,high_fever,prognosis,Unnamed: 5
1,1,0,0,Fungal infection,
1,0,0,0,Fungal infection,
0,0,1,1,Common Cold,
0,0,0,1.0,Malaria,
";

    #[test]
    fn test_read_binary() {
        let set = read_binary(BINARY.as_bytes(), "prognosis", "Unnamed").unwrap();

        assert_eq!(
            set.vocabulary().entries(),
            &["itching", "skin_rash", "cough", "high_fever"]
        );
        assert_eq!(set.len(), 4);
        assert_eq!(set.rows()[0].as_slice(), &[1, 1, 0, 0]);
        assert_eq!(set.rows()[3].as_slice(), &[0, 0, 0, 1]);
        assert_eq!(set.labels()[2], "Common Cold");
    }

    #[test]
    fn test_missing_target_column() {
        let err = read_binary(BINARY.as_bytes(), "diagnosis", "Unnamed").unwrap_err();
        match err {
            DatasetError::MissingColumn { column, available } => {
                assert_eq!(column, "diagnosis");
                assert!(available.contains(&"prognosis".to_string()));
                assert!(!available.iter().any(|c| c.starts_with("Unnamed")));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_non_binary_cell() {
        let data = "itching,cough,prognosis\n1,2,Flu\n";
        let err = read_binary(data.as_bytes(), "prognosis", "Unnamed").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidCell { row: 0, ref column, ref value } if column == "cough" && value == "2"
        ));
    }

    #[test]
    fn test_rejects_blank_label() {
        let data = "itching,prognosis\n1, \n";
        let err = read_binary(data.as_bytes(), "prognosis", "Unnamed").unwrap_err();
        assert!(matches!(err, DatasetError::InvalidCell { .. }));
    }

    #[test]
    fn test_rejects_empty_and_duplicate() {
        let err = read_binary("itching,prognosis\n".as_bytes(), "prognosis", "").unwrap_err();
        assert!(matches!(err, DatasetError::Empty));

        let data = "itching,itching,prognosis\n1,1,Flu\n";
        let err = read_binary(data.as_bytes(), "prognosis", "").unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Vocabulary(VocabularyError::Duplicate(_))
        ));
    }

    #[test]
    fn test_only_target_column() {
        let err = read_binary("prognosis\nFlu\n".as_bytes(), "prognosis", "").unwrap_err();
        assert!(matches!(err, DatasetError::Vocabulary(VocabularyError::Empty)));
    }

    #[test]
    fn test_aligned_reorders_columns() {
        let set = read_binary(BINARY.as_bytes(), "prognosis", "Unnamed").unwrap();
        let holdout = "prognosis,high_fever,cough,skin_rash,itching\nMalaria,1,0,0,0\n";
        let eval =
            read_binary_aligned(holdout.as_bytes(), set.vocabulary(), "prognosis", "Unnamed")
                .unwrap();
        assert_eq!(eval.rows()[0].as_slice(), &[0, 0, 0, 1]);
        assert_eq!(eval.labels(), &["Malaria"]);
    }

    #[test]
    fn test_aligned_detects_drift() {
        let set = read_binary(BINARY.as_bytes(), "prognosis", "Unnamed").unwrap();
        let holdout = "itching,skin_rash,cough,chills,prognosis\n1,0,0,0,Flu\n";
        let err = read_binary_aligned(holdout.as_bytes(), set.vocabulary(), "prognosis", "Unnamed")
            .unwrap_err();
        match err {
            DatasetError::VocabularyDrift {
                missing,
                unexpected,
            } => {
                assert_eq!(missing, vec!["high_fever"]);
                assert_eq!(unexpected, vec!["chills"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    const FREE_TEXT: &str = "\
Age,Symptoms,Disease
34,\"Fever; Headache, Body Ache\",Flu
52,\"chest pain,  shortness of breath\",Angina
29,\"fever, cough\",Flu
";

    #[test]
    fn test_read_free_text_builds_vocabulary() {
        let set = read_free_text(FREE_TEXT.as_bytes(), "Symptoms", "Disease", None).unwrap();
        assert_eq!(
            set.vocabulary().entries(),
            &[
                "fever",
                "headache",
                "body_ache",
                "chest_pain",
                "shortness_of_breath",
                "cough"
            ]
        );
        assert_eq!(set.rows()[2].as_slice(), &[1, 0, 0, 0, 0, 1]);
        assert_eq!(set.labels(), &["Flu", "Angina", "Flu"]);
    }

    #[test]
    fn test_read_free_text_with_vocabulary() {
        let vocab = Arc::new(Vocabulary::new(["cough", "fever"]).unwrap());
        let set =
            read_free_text(FREE_TEXT.as_bytes(), "Symptoms", "Disease", Some(&vocab)).unwrap();
        assert_eq!(set.width(), 2);
        // "Fever; Headache, Body Ache" keeps only fever
        assert_eq!(set.rows()[0].as_slice(), &[0, 1]);
        assert_eq!(set.rows()[1].as_slice(), &[0, 0]);
    }

    #[test]
    fn test_free_text_missing_column() {
        let err = read_free_text(FREE_TEXT.as_bytes(), "Text", "Disease", None).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { ref column, .. } if column == "Text"));
    }

    #[test]
    fn test_load_from_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BINARY.as_bytes()).unwrap();

        let config = DatasetConfig {
            path: file.path().to_path_buf(),
            evaluation_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let set = load_training_set(&config).unwrap();
        let eval = load_evaluation_set(&config, set.vocabulary()).unwrap().unwrap();
        assert_eq!(eval.len(), set.len());
    }

    #[test]
    fn test_split_holdout_is_seeded() {
        let set = read_binary(BINARY.as_bytes(), "prognosis", "Unnamed").unwrap();

        let (training, holdout) = set.clone().split_holdout(0.25, 42);
        let holdout = holdout.unwrap();
        assert_eq!(training.len(), 3);
        assert_eq!(holdout.len(), 1);
        assert_eq!(holdout.vocabulary(), set.vocabulary());

        // same seed, same partition
        let (again, _) = set.clone().split_holdout(0.25, 42);
        assert_eq!(again.labels(), training.labels());

        // every row lands on exactly one side
        let mut labels: Vec<String> = training
            .labels()
            .iter()
            .chain(holdout.labels())
            .cloned()
            .collect();
        let mut expected = set.labels().to_vec();
        labels.sort();
        expected.sort();
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_split_holdout_skips_degenerate_splits() {
        let set = read_binary(BINARY.as_bytes(), "prognosis", "Unnamed").unwrap();
        assert!(set.clone().split_holdout(0.0, 1).1.is_none());
        // one row would leave nothing to train on
        let one = TrainingSet::new(
            set.vocabulary().clone(),
            vec![set.rows()[0].clone()],
            vec![set.labels()[0].clone()],
        )
        .unwrap();
        let (training, holdout) = one.split_holdout(0.2, 1);
        assert!(holdout.is_none());
        assert_eq!(training.len(), 1);
    }

    #[test]
    fn test_load_datasets_prefers_evaluation_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BINARY.as_bytes()).unwrap();

        let config = DatasetConfig {
            path: file.path().to_path_buf(),
            ..Default::default()
        };
        let (training, holdout) = load_datasets(&config).unwrap();
        assert_eq!(training.len(), 3);
        assert_eq!(holdout.unwrap().len(), 1);

        let config = DatasetConfig {
            evaluation_path: Some(file.path().to_path_buf()),
            ..config
        };
        let (training, holdout) = load_datasets(&config).unwrap();
        assert_eq!(training.len(), 4);
        assert_eq!(holdout.unwrap().len(), 4);
    }

    #[test]
    fn test_load_missing_file() {
        let config = DatasetConfig {
            path: PathBuf::from("/definitely/not/here.csv"),
            ..Default::default()
        };
        assert!(matches!(
            load_training_set(&config).unwrap_err(),
            DatasetError::Io { .. }
        ));
    }

    #[test]
    fn test_training_set_checks_shape() {
        let vocab = Arc::new(Vocabulary::new(["a", "b"]).unwrap());
        let err = TrainingSet::new(vocab.clone(), vec![FeatureVector::zeros(2)], vec![])
            .unwrap_err();
        assert!(matches!(err, DatasetError::RowLabelMismatch { .. }));

        let err = TrainingSet::new(vocab, vec![FeatureVector::zeros(3)], vec!["x".into()])
            .unwrap_err();
        assert!(matches!(err, DatasetError::WidthMismatch { row: 0, .. }));
    }
}

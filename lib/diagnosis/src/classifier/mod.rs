// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Label predictors.
//!
//! The service treats the classifier as an opaque capability: a [`Trainer`] turns a
//! [`TrainingSet`] into a [`Classifier`], and a classifier turns a [`FeatureVector`] into a
//! label plus a probability [`Distribution`] over every label it knows.

use std::sync::Arc;

use thiserror::Error;

use crate::dataset::TrainingSet;
use crate::symptoms::FeatureVector;

pub mod factory;
pub mod forest;
pub mod prior;

pub use factory::{create_trainer, ClassifierBackend, ClassifierConfig};
pub use forest::{RandomForest, RandomForestTrainer};
pub use prior::{PriorClassifier, PriorTrainer};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClassifierError {
    #[error("feature vector has {actual} columns, classifier was trained on {expected}")]
    WidthMismatch { expected: usize, actual: usize },

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("training set has {rows} rows but {labels} labels")]
    RowLabelMismatch { rows: usize, labels: usize },

    #[error("invalid probability distribution: {0}")]
    InvalidDistribution(String),

    #[error("invalid classifier parameter: {0}")]
    InvalidParameter(String),

    #[error("classifier backend failed: {0}")]
    Backend(String),
}

/// Probabilities over a classifier's labels, aligned by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    labels: Arc<[String]>,
    probabilities: Vec<f64>,
}

impl Distribution {
    /// Every probability must be finite and within `[0, 1]`.
    pub fn new(labels: Arc<[String]>, probabilities: Vec<f64>) -> Result<Self, ClassifierError> {
        if labels.is_empty() {
            return Err(ClassifierError::InvalidDistribution(
                "no labels".to_string(),
            ));
        }
        if labels.len() != probabilities.len() {
            return Err(ClassifierError::InvalidDistribution(format!(
                "{} labels but {} probabilities",
                labels.len(),
                probabilities.len()
            )));
        }
        if let Some((i, p)) = probabilities
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0 || **p > 1.0)
        {
            return Err(ClassifierError::InvalidDistribution(format!(
                "probability {p} for label '{}' is outside [0, 1]",
                labels[i]
            )));
        }
        Ok(Self {
            labels,
            probabilities,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    pub fn probability(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.probabilities[i])
    }

    /// Position of the most probable label; ties go to the earlier label.
    pub fn argmax(&self) -> usize {
        let mut best = 0;
        for (i, p) in self.probabilities.iter().enumerate().skip(1) {
            if *p > self.probabilities[best] {
                best = i;
            }
        }
        best
    }

    /// The maximum posterior; this is what the service reports as confidence.
    pub fn max(&self) -> f64 {
        self.probabilities[self.argmax()]
    }

    pub fn top_label(&self) -> &str {
        &self.labels[self.argmax()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.probabilities.iter().copied())
    }
}

/// A predicted label with the distribution it was taken from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub distribution: Distribution,
}

pub trait Classifier: Send + Sync {
    fn name(&self) -> &'static str;

    /// Labels in the order used by every [`Distribution`] this classifier returns.
    fn labels(&self) -> &[String];

    /// Number of feature columns the classifier was trained on.
    fn width(&self) -> usize;

    fn predict_distribution(&self, features: &FeatureVector)
        -> Result<Distribution, ClassifierError>;

    fn predict(&self, features: &FeatureVector) -> Result<Prediction, ClassifierError> {
        let distribution = self.predict_distribution(features)?;
        Ok(Prediction {
            label: distribution.top_label().to_string(),
            distribution,
        })
    }
}

pub trait Trainer: Send + Sync {
    fn name(&self) -> &'static str;

    fn train(&self, training_set: &TrainingSet) -> Result<Arc<dyn Classifier>, ClassifierError>;
}

pub(crate) fn check_width(expected: usize, features: &FeatureVector) -> Result<(), ClassifierError> {
    if features.len() != expected {
        return Err(ClassifierError::WidthMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Sorted unique labels and, for each row, the index of its label.
pub(crate) fn encode_labels(
    training_set: &TrainingSet,
) -> Result<(Arc<[String]>, Vec<usize>), ClassifierError> {
    if training_set.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }
    if training_set.rows().len() != training_set.labels().len() {
        return Err(ClassifierError::RowLabelMismatch {
            rows: training_set.rows().len(),
            labels: training_set.labels().len(),
        });
    }

    let classes: std::collections::BTreeSet<&str> =
        training_set.labels().iter().map(String::as_str).collect();
    let classes: Arc<[String]> = classes.into_iter().map(str::to_string).collect();

    let targets = training_set
        .labels()
        .iter()
        .map(|label| {
            classes
                .binary_search_by(|c| c.as_str().cmp(label.as_str()))
                .map_err(|_| ClassifierError::InvalidParameter(format!("unknown label '{label}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((classes, targets))
}

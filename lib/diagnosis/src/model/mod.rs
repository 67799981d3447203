// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! The trained model: a vocabulary plus the classifier fitted over it.
//!
//! A [`DiagnosisModel`] is built once and never mutated afterwards. Requests share it
//! through an `Arc` handed out by [`ModelHandle`]; each prediction builds its own
//! feature vector.

mod lifecycle;

pub use lifecycle::{ModelHandle, ModelStatus};

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::classifier::{create_trainer, Classifier, ClassifierConfig, ClassifierError, Trainer};
use crate::dataset::{load_datasets, DatasetConfig, DatasetError, TrainingSet};
use crate::symptoms::{match_symptoms, split_free_text, RawSymptom, Vocabulary};

#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("model is not ready (status: {0})")]
    NotReady(ModelStatus),

    #[error("No symptoms provided")]
    EmptySymptoms,

    #[error("{0}")]
    InvalidInput(String),

    #[error("model training already started (status: {0})")]
    AlreadyInitialized(ModelStatus),

    #[error(transparent)]
    Classifier(#[from] ClassifierError),

    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("invalid model configuration: {0}")]
    Configuration(String),
}

/// What training produced, for `/model-info` and the startup log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    pub backend: &'static str,
    pub rows: usize,
    pub classes: usize,
    pub training_accuracy: f64,
    pub holdout_accuracy: Option<f64>,
    pub holdout_rows: Option<usize>,
}

impl TrainingReport {
    /// Holdout accuracy when an evaluation set was scored, else training accuracy.
    pub fn reported_accuracy(&self) -> f64 {
        self.holdout_accuracy.unwrap_or(self.training_accuracy)
    }
}

/// Result of one prediction, shaped for the HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub predicted_disease: String,
    pub confidence: f64,
    /// Vocabulary entries the tokens resolved to.
    pub matched_symptoms: Vec<String>,
    /// Caller tokens, as sent, that resolved to nothing.
    pub unmatched_symptoms: Vec<String>,
}

pub struct DiagnosisModel {
    vocabulary: Arc<Vocabulary>,
    classifier: Arc<dyn Classifier>,
    report: TrainingReport,
}

impl std::fmt::Debug for DiagnosisModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosisModel")
            .field("symptoms", &self.vocabulary.len())
            .field("classifier", &self.classifier.name())
            .field("report", &self.report)
            .finish()
    }
}

impl DiagnosisModel {
    /// Fit `trainer` on `training_set` and score it on the same rows.
    pub fn train(training_set: &TrainingSet, trainer: &dyn Trainer) -> Result<Self, DiagnosisError> {
        let classifier = trainer.train(training_set)?;
        let training_accuracy = accuracy(classifier.as_ref(), training_set)?;
        let report = TrainingReport {
            backend: classifier.name(),
            rows: training_set.len(),
            classes: classifier.labels().len(),
            training_accuracy,
            holdout_accuracy: None,
            holdout_rows: None,
        };
        Self::from_parts(training_set.vocabulary().clone(), classifier, report)
    }

    pub fn from_parts(
        vocabulary: Arc<Vocabulary>,
        classifier: Arc<dyn Classifier>,
        report: TrainingReport,
    ) -> Result<Self, DiagnosisError> {
        if classifier.width() != vocabulary.len() {
            return Err(DiagnosisError::Configuration(format!(
                "classifier expects {} features but the vocabulary has {} symptoms",
                classifier.width(),
                vocabulary.len()
            )));
        }
        Ok(Self {
            vocabulary,
            classifier,
            report,
        })
    }

    /// Score the model on a holdout set encoded over this model's vocabulary.
    pub fn with_evaluation(mut self, evaluation: &TrainingSet) -> Result<Self, DiagnosisError> {
        if evaluation.vocabulary().as_ref() != self.vocabulary.as_ref() {
            return Err(DiagnosisError::Configuration(
                "evaluation set was encoded over a different vocabulary".to_string(),
            ));
        }
        self.report.holdout_accuracy = Some(accuracy(self.classifier.as_ref(), evaluation)?);
        self.report.holdout_rows = Some(evaluation.len());
        Ok(self)
    }

    pub fn vocabulary(&self) -> &Arc<Vocabulary> {
        &self.vocabulary
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }

    pub fn report(&self) -> &TrainingReport {
        &self.report
    }

    /// Predict from a checklist of symptoms.
    pub fn predict(&self, symptoms: &[RawSymptom]) -> Result<PredictionOutcome, DiagnosisError> {
        if symptoms.is_empty() {
            return Err(DiagnosisError::EmptySymptoms);
        }

        let matches = match_symptoms(symptoms, &self.vocabulary);
        let prediction = self.classifier.predict(&matches.features)?;
        let confidence = prediction.distribution.max();

        tracing::debug!(
            matched = matches.matched.len(),
            unmatched = matches.unmatched.len(),
            predicted = %prediction.label,
            confidence,
            "prediction"
        );

        Ok(PredictionOutcome {
            predicted_disease: prediction.label,
            confidence,
            matched_symptoms: matches.matched_entries(),
            unmatched_symptoms: matches.unmatched,
        })
    }

    /// Predict from one comma or semicolon separated sentence.
    pub fn predict_text(&self, text: &str) -> Result<PredictionOutcome, DiagnosisError> {
        self.predict(&split_free_text(text))
    }
}

/// Fraction of rows in `set` whose label `classifier` predicts.
pub fn accuracy(classifier: &dyn Classifier, set: &TrainingSet) -> Result<f64, ClassifierError> {
    if set.is_empty() {
        return Err(ClassifierError::EmptyTrainingSet);
    }
    let mut correct = 0usize;
    for (features, label) in set.iter() {
        if classifier.predict(features)?.label == label {
            correct += 1;
        }
    }
    Ok(correct as f64 / set.len() as f64)
}

/// Load the configured dataset, train the configured backend and score it.
///
/// Blocking; run it on a blocking thread.
pub fn build_model(
    dataset: &DatasetConfig,
    classifier: &ClassifierConfig,
) -> Result<DiagnosisModel, DiagnosisError> {
    let (training_set, holdout) = load_datasets(dataset)?;
    let trainer = create_trainer(classifier)?;

    tracing::info!(
        backend = trainer.name(),
        rows = training_set.len(),
        symptoms = training_set.width(),
        "training classifier"
    );

    let mut model = DiagnosisModel::train(&training_set, trainer.as_ref())?;
    if let Some(holdout) = holdout {
        model = model.with_evaluation(&holdout)?;
    }

    let report = model.report();
    tracing::info!(
        classes = report.classes,
        training_accuracy = report.training_accuracy,
        holdout_accuracy = ?report.holdout_accuracy,
        "model trained"
    );

    Ok(model)
}

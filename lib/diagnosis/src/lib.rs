// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Symptom-based disease prediction.
//!
//! Caller symptoms are normalized, matched against the vocabulary the model was trained
//! on, encoded as a 0/1 feature vector and handed to a classifier. The same matcher and
//! encoder ingest the training data, so training rows and requests always agree on width
//! and column order.

pub mod classifier;
pub mod config;
pub mod dataset;
pub mod http;
pub mod model;
pub mod symptoms;

pub use classifier::{Classifier, ClassifierBackend, ClassifierConfig, Distribution, Trainer};
pub use config::{ConfigError, ServiceConfig};
pub use dataset::{DatasetConfig, DatasetFormat, TrainingSet};
pub use model::{
    build_model, DiagnosisError, DiagnosisModel, ModelHandle, ModelStatus, PredictionOutcome,
};
pub use symptoms::{RawSymptom, Vocabulary};

// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Baseline classifier that ignores symptoms.
//!
//! Useful for smoke-testing a deployment and for spotting vocabulary problems: if the real
//! backend does no better than the label frequencies, the features are probably not
//! reaching it.

use std::sync::Arc;

use super::{check_width, encode_labels, Classifier, ClassifierError, Distribution, Trainer};
use crate::dataset::TrainingSet;
use crate::symptoms::FeatureVector;

pub struct PriorClassifier {
    labels: Arc<[String]>,
    frequencies: Vec<f64>,
    width: usize,
}

impl Classifier for PriorClassifier {
    fn name(&self) -> &'static str {
        "prior"
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn width(&self) -> usize {
        self.width
    }

    fn predict_distribution(
        &self,
        features: &FeatureVector,
    ) -> Result<Distribution, ClassifierError> {
        check_width(self.width, features)?;
        Distribution::new(self.labels.clone(), self.frequencies.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct PriorTrainer;

impl Trainer for PriorTrainer {
    fn name(&self) -> &'static str {
        "prior"
    }

    fn train(&self, training_set: &TrainingSet) -> Result<Arc<dyn Classifier>, ClassifierError> {
        let (labels, targets) = encode_labels(training_set)?;
        let mut counts = vec![0usize; labels.len()];
        for class in targets.iter() {
            counts[*class] += 1;
        }
        let total = targets.len() as f64;
        let frequencies = counts.iter().map(|n| *n as f64 / total).collect();

        Ok(Arc::new(PriorClassifier {
            labels,
            frequencies,
            width: training_set.width(),
        }))
    }
}

// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Random forest backend built on `linfa-trees`.
//!
//! Each tree is a linfa CART [`DecisionTree`] fitted on a seeded bootstrap sample of the
//! training rows. linfa's trees consider every column at each split, so the randomness
//! comes from the row samples. The probability of a label is the share of trees that vote
//! for it.
//!
//! With `balanced` set, rows are weighted inversely to their label frequency, scaled so the
//! most common label has weight 1.

use std::sync::Arc;

use linfa::traits::{Fit, Predict};
use linfa::Dataset;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{check_width, encode_labels, Classifier, ClassifierError, Distribution, Trainer};
use crate::dataset::TrainingSet;
use crate::symptoms::FeatureVector;

pub const DEFAULT_TREES: usize = 200;
pub const DEFAULT_SEED: u64 = 42;

pub struct RandomForest {
    labels: Arc<[String]>,
    trees: Vec<DecisionTree<f64, usize>>,
    width: usize,
}

impl RandomForest {
    fn votes(&self, features: &FeatureVector) -> Vec<usize> {
        let records = features.to_f64().insert_axis(Axis(0));
        let mut votes = vec![0usize; self.labels.len()];
        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(&records);
            if let Some(class) = predicted.get(0) {
                votes[*class] += 1;
            }
        }
        votes
    }
}

impl Classifier for RandomForest {
    fn name(&self) -> &'static str {
        "random_forest"
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

        let votes = self.votes(features);
        let total = self.trees.len() as f64;
        let probabilities = votes.iter().map(|v| *v as f64 / total).collect();

        Distribution::new(self.labels.clone(), probabilities)
    }
}

/// Trains [`RandomForest`].
#[derive(Debug, Clone)]
pub struct RandomForestTrainer {
    n_trees: usize,
    max_depth: Option<usize>,
    balanced: bool,
    seed: u64,
}

impl RandomForestTrainer {
    pub fn new(
        n_trees: usize,
        max_depth: Option<usize>,
        balanced: bool,
        seed: u64,
    ) -> Result<Self, ClassifierError> {
        if n_trees == 0 {
            return Err(ClassifierError::InvalidParameter(
                "a forest needs at least one tree".to_string(),
            ));
        }
        if max_depth == Some(0) {
            return Err(ClassifierError::InvalidParameter(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            n_trees,
            max_depth,
            balanced,
            seed,
        })
    }
}

impl Default for RandomForestTrainer {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREES,
            max_depth: None,
            balanced: true,
            seed: DEFAULT_SEED,
        }
    }
}

/// Per-row weights; uniform unless `balanced`.
fn row_weights(targets: &[usize], n_classes: usize, balanced: bool) -> Array1<f32> {
    if !balanced {
        return Array1::ones(targets.len());
    }
    let mut counts = vec![0usize; n_classes];
    for class in targets {
        counts[*class] += 1;
    }
    let largest = counts.iter().copied().max().unwrap_or(1) as f32;
    targets
        .iter()
        .map(|class| largest / counts[*class] as f32)
        .collect()
}

impl Trainer for RandomForestTrainer {
    fn name(&self) -> &'static str {
        "random_forest"
    }

    fn train(&self, training_set: &TrainingSet) -> Result<Arc<dyn Classifier>, ClassifierError> {
        let (labels, targets) = encode_labels(training_set)?;
        let width = training_set.width();
        let n_rows = training_set.len();

        let mut records = Array2::<f64>::zeros((n_rows, width));
        for (i, row) in training_set.rows().iter().enumerate() {
            check_width(width, row)?;
            for column in row.active() {
                records[[i, column]] = 1.0;
            }
        }
        let weights = row_weights(&targets, labels.len(), self.balanced);
        let targets = Array1::from(targets);

        let params = DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(self.max_depth);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut trees = Vec::with_capacity(self.n_trees);
        for _ in 0..self.n_trees {
            let sample: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
            let dataset = Dataset::new(
                records.select(Axis(0), &sample),
                targets.select(Axis(0), &sample),
            )
            .with_weights(weights.select(Axis(0), &sample));

            let tree = params
                .fit(&dataset)
                .map_err(|e| ClassifierError::Backend(e.to_string()))?;
            trees.push(tree);
        }

        tracing::debug!(
            classes = labels.len(),
            columns = width,
            trees = trees.len(),
            balanced = self.balanced,
            seed = self.seed,
            "trained random forest"
        );

        Ok(Arc::new(RandomForest {
            labels,
            trees,
            width,
        }))
    }
}

// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Trainer factory for creating label predictors from configuration
//!
//! Keeps backend-specific construction out of the service: configuration picks a backend and
//! the factory returns a trait object that can train it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::forest::{DEFAULT_SEED, DEFAULT_TREES};
use super::{ClassifierError, PriorTrainer, RandomForestTrainer, Trainer};

/// Classifier backend type
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierBackend {
    /// Bagged linfa decision trees
    #[default]
    RandomForest,
    /// Label frequencies only
    Prior,
}

impl FromStr for ClassifierBackend {
    type Err = ClassifierError;

    /// Accepts the same names as the configuration file.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_string()))
            .map_err(|_| ClassifierError::InvalidParameter(format!("unknown backend '{s}'")))
    }
}

impl fmt::Display for ClassifierBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::String(name)) => f.write_str(&name),
            _ => write!(f, "{self:?}"),
        }
    }
}

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClassifierConfig {
    /// Backend type
    #[serde(default)]
    pub backend: ClassifierBackend,

    /// Number of trees in the forest
    #[validate(range(min = 1, max = 10000))]
    #[serde(default = "default_trees")]
    pub trees: usize,

    /// Depth limit per tree; unlimited when unset
    #[validate(range(min = 1))]
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Weight rows inversely to their label frequency
    #[serde(default = "default_balanced")]
    pub balanced: bool,

    /// Seed for the bootstrap samples
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_trees() -> usize {
    DEFAULT_TREES
}

fn default_balanced() -> bool {
    true
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::default(),
            trees: default_trees(),
            max_depth: None,
            balanced: default_balanced(),
            seed: default_seed(),
        }
    }
}

/// Create a trainer from configuration
pub fn create_trainer(config: &ClassifierConfig) -> Result<Box<dyn Trainer>, ClassifierError> {
    match config.backend {
        ClassifierBackend::RandomForest => {
            tracing::info!(
                trees = config.trees,
                max_depth = ?config.max_depth,
                balanced = config.balanced,
                seed = config.seed,
                "Creating RandomForestTrainer"
            );
            Ok(Box::new(RandomForestTrainer::new(
                config.trees,
                config.max_depth,
                config.balanced,
                config.seed,
            )?))
        }
        ClassifierBackend::Prior => {
            tracing::info!("Creating PriorTrainer");
            Ok(Box::new(PriorTrainer))
        }
    }
}

// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! Service configuration.
//!
//! Sources, lowest to highest priority:
//! 1. code defaults
//! 2. `/opt/medpredict/etc/medpredict.toml`
//! 3. the TOML file named by `MEDPREDICT_CONFIG_PATH`
//! 4. `MEDPREDICT_HTTP_*`, `MEDPREDICT_DATASET_*`, `MEDPREDICT_CLASSIFIER_*` and
//!    `MEDPREDICT_MODEL_*` environment variables
//! 5. whatever the caller merges on top with [`ServiceConfig::figment_with`]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment, Provider,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::classifier::ClassifierConfig;
use crate::dataset::DatasetConfig;

pub const CONFIG_PATH_ENV: &str = "MEDPREDICT_CONFIG_PATH";
pub const SYSTEM_CONFIG_PATH: &str = "/opt/medpredict/etc/medpredict.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extraction(#[from] Box<figment::Error>),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ServiceConfig {
    #[validate(nested)]
    #[serde(default)]
    pub http: HttpConfig,

    #[validate(nested)]
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[validate(nested)]
    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct HttpConfig {
    #[validate(length(min = 1))]
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// How many symptoms `/model-info` lists.
    #[validate(range(min = 1, max = 10000))]
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,

    /// Allow any origin, method and header.
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8001
}

fn default_preview_limit() -> usize {
    50
}

fn default_true() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            preview_limit: default_preview_limit(),
            cors_permissive: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Exit the process when startup training fails instead of serving 503s.
    #[serde(default)]
    pub exit_on_training_failure: bool,
}

impl ServiceConfig {
    pub fn figment() -> Figment {
        let config_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::figment_for(config_path.as_deref())
    }

    /// Like [`ServiceConfig::figment`], with the config file path given explicitly.
    pub fn figment_for(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(ServiceConfig::default()))
            .merge(Toml::file(SYSTEM_CONFIG_PATH));
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
            // MEDPREDICT_HTTP_HOST, MEDPREDICT_HTTP_PORT, ...
            .merge(
                Env::prefixed("MEDPREDICT_HTTP_")
                    .map(|k| format!("http.{}", k.as_str().to_lowercase()).into()),
            )
            // MEDPREDICT_DATASET_PATH, MEDPREDICT_DATASET_FORMAT, ...
            .merge(
                Env::prefixed("MEDPREDICT_DATASET_")
                    .map(|k| format!("dataset.{}", k.as_str().to_lowercase()).into()),
            )
            .merge(
                Env::prefixed("MEDPREDICT_CLASSIFIER_")
                    .map(|k| format!("classifier.{}", k.as_str().to_lowercase()).into()),
            )
            .merge(
                Env::prefixed("MEDPREDICT_MODEL_")
                    .map(|k| format!("model.{}", k.as_str().to_lowercase()).into()),
            )
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::extract_from(Self::figment())
    }

    /// Extract and validate from any provider.
    pub fn extract_from<T: Provider>(provider: T) -> Result<Self, ConfigError> {
        let config: Self = Figment::from(provider)
            .extract()
            .map_err(|e| ConfigError::Extraction(Box::new(e)))?;
        config.validate()?;
        Ok(config)
    }

    /// [`ServiceConfig::figment`] with `extra` merged at the highest priority.
    pub fn figment_with<T: Provider>(extra: T) -> Figment {
        Self::figment().merge(extra)
    }
}

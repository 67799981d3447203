// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{DiagnosisError, DiagnosisModel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelStatus {
    Uninitialized,
    Training,
    Ready,
}

impl std::fmt::Display for ModelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ModelStatus::Uninitialized => "uninitialized",
            ModelStatus::Training => "training",
            ModelStatus::Ready => "ready",
        };
        f.write_str(s)
    }
}

enum ModelState {
    Uninitialized,
    Training,
    Ready(Arc<DiagnosisModel>),
}

impl ModelState {
    fn status(&self) -> ModelStatus {
        match self {
            ModelState::Uninitialized => ModelStatus::Uninitialized,
            ModelState::Training => ModelStatus::Training,
            ModelState::Ready(_) => ModelStatus::Ready,
        }
    }
}

/// Shared slot for the one model a process serves.
///
/// Moves `Uninitialized -> Training -> Ready` exactly once. A failed or panicking training
/// run puts the slot back to `Uninitialized`. The lock only guards the transition; readers
/// clone the `Arc` out and predict without holding it.
#[derive(Clone)]
pub struct ModelHandle {
    state: Arc<RwLock<ModelState>>,
}

impl Default for ModelHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("status", &self.status())
            .finish()
    }
}

impl ModelHandle {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(ModelState::Uninitialized)),
        }
    }

    /// A handle that is already `Ready`.
    pub fn with_model(model: DiagnosisModel) -> Self {
        Self {
            state: Arc::new(RwLock::new(ModelState::Ready(Arc::new(model)))),
        }
    }

    pub fn status(&self) -> ModelStatus {
        self.state.read().status()
    }

    pub fn is_ready(&self) -> bool {
        self.status() == ModelStatus::Ready
    }

    /// The trained model, or [`DiagnosisError::NotReady`].
    pub fn model(&self) -> Result<Arc<DiagnosisModel>, DiagnosisError> {
        match &*self.state.read() {
            ModelState::Ready(model) => Ok(model.clone()),
            other => Err(DiagnosisError::NotReady(other.status())),
        }
    }

    /// Run `train` and publish its model.
    ///
    /// Only one training run is ever accepted; calling this on a handle that is training or
    /// ready returns [`DiagnosisError::AlreadyInitialized`] without running `train`.
    pub fn train_with<F>(&self, train: F) -> Result<Arc<DiagnosisModel>, DiagnosisError>
    where
        F: FnOnce() -> Result<DiagnosisModel, DiagnosisError>,
    {
        let guard = self.begin()?;
        let model = Arc::new(train()?);
        guard.finish(model.clone());
        Ok(model)
    }

    fn begin(&self) -> Result<TrainingGuard<'_>, DiagnosisError> {
        let mut state = self.state.write();
        match &*state {
            ModelState::Uninitialized => {
                *state = ModelState::Training;
                Ok(TrainingGuard {
                    handle: self,
                    done: false,
                })
            }
            other => Err(DiagnosisError::AlreadyInitialized(other.status())),
        }
    }
}

/// Resets the handle to `Uninitialized` unless training finished.
struct TrainingGuard<'a> {
    handle: &'a ModelHandle,
    done: bool,
}

impl TrainingGuard<'_> {
    fn finish(mut self, model: Arc<DiagnosisModel>) {
        *self.handle.state.write() = ModelState::Ready(model);
        self.done = true;
    }
}

impl Drop for TrainingGuard<'_> {
    fn drop(&mut self) {
        if !self.done {
            *self.handle.state.write() = ModelState::Uninitialized;
        }
    }
}

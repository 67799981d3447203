// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::{extract, http::Method, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use super::{HttpError, RouteDoc, State};
use crate::model::ModelStatus;

pub const ROOT_MESSAGE: &str = "Disease Prediction API is running";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub total_symptoms: usize,
    pub available_symptoms: Vec<String>,
    pub model_accuracy: f64,
    pub is_trained: bool,
    pub status: ModelStatus,
}

impl ModelInfo {
    fn untrained(status: ModelStatus) -> Self {
        Self {
            total_symptoms: 0,
            available_symptoms: Vec::new(),
            model_accuracy: 0.0,
            is_trained: false,
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymptomsResponse {
    pub symptoms: Vec<String>,
}

pub fn model_info_router(state: Arc<State>, path: Option<String>) -> (Vec<RouteDoc>, Router) {
    let path = path.unwrap_or_else(|| "/model-info".to_string());
    let docs = vec![RouteDoc::new(Method::GET, &path)];
    let router = Router::new()
        .route(&path, get(model_info_handler))
        .with_state(state);
    (docs, router)
}

pub fn symptoms_router(state: Arc<State>, path: Option<String>) -> (Vec<RouteDoc>, Router) {
    let path = path.unwrap_or_else(|| "/symptoms".to_string());
    let docs = vec![RouteDoc::new(Method::GET, &path)];
    let router = Router::new()
        .route(&path, get(symptoms_handler))
        .with_state(state);
    (docs, router)
}

pub fn root_router(path: Option<String>) -> (Vec<RouteDoc>, Router) {
    let path = path.unwrap_or_else(|| "/".to_string());
    let docs = vec![RouteDoc::new(Method::GET, &path)];
    let router = Router::new().route(&path, get(root_handler));
    (docs, router)
}

/// Always 200; an untrained model reports zeros and its lifecycle status.
async fn model_info_handler(extract::State(state): extract::State<Arc<State>>) -> Json<ModelInfo> {
    let info = match state.model().model() {
        Ok(model) => ModelInfo {
            total_symptoms: model.vocabulary().len(),
            available_symptoms: model.vocabulary().preview(state.preview_limit()).to_vec(),
            model_accuracy: model.report().reported_accuracy(),
            is_trained: true,
            status: ModelStatus::Ready,
        },
        Err(_) => ModelInfo::untrained(state.model().status()),
    };
    Json(info)
}

async fn symptoms_handler(
    extract::State(state): extract::State<Arc<State>>,
) -> Result<Json<SymptomsResponse>, HttpError> {
    let model = state.model().model()?;
    Ok(Json(SymptomsResponse {
        symptoms: model.vocabulary().entries().to_vec(),
    }))
}

async fn root_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": ROOT_MESSAGE }))
}

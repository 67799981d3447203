// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::{extract, http::Method, routing::post, Json, Router};
use serde::Deserialize;

use super::{HttpError, JsonPath, RouteDoc, State};
use crate::model::{DiagnosisError, PredictionOutcome};
use crate::symptoms::{split_free_text, RawSymptom};

pub const MAX_AGE: i64 = 150;

/// `symptoms` is either a checklist or a single free-text sentence.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionRequest {
    #[serde(default)]
    pub age: Option<i64>,
    pub symptoms: SymptomInput,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SymptomInput {
    List(Vec<RawSymptom>),
    Text(String),
}

impl SymptomInput {
    /// Raw tokens for the matcher. Free text is cleaned and split on commas.
    pub fn into_tokens(self) -> Vec<RawSymptom> {
        match self {
            SymptomInput::List(tokens) => tokens,
            SymptomInput::Text(text) => split_free_text(&text),
        }
    }
}

pub fn predict_router(state: Arc<State>, path: Option<String>) -> (Vec<RouteDoc>, Router) {
    let path = path.unwrap_or_else(|| "/predict".to_string());
    let docs = vec![RouteDoc::new(Method::POST, &path)];
    let router = Router::new()
        .route(&path, post(predict_handler))
        .with_state(state);
    (docs, router)
}

fn check_age(age: Option<i64>) -> Result<(), DiagnosisError> {
    match age {
        Some(age) if !(0..=MAX_AGE).contains(&age) => Err(DiagnosisError::InvalidInput(format!(
            "age must be between 0 and {MAX_AGE}, got {age}"
        ))),
        _ => Ok(()),
    }
}

async fn predict_handler(
    extract::State(state): extract::State<Arc<State>>,
    JsonPath(request): JsonPath<PredictionRequest>,
) -> Result<Json<PredictionOutcome>, HttpError> {
    let tokens = request.symptoms.into_tokens();
    // input problems are reported even while the model is still training
    if tokens.is_empty() {
        return Err(DiagnosisError::EmptySymptoms.into());
    }
    check_age(request.age)?;

    let model = state.model().model()?;
    let outcome = model.predict(&tokens)?;

    tracing::info!(
        age = ?request.age,
        matched = outcome.matched_symptoms.len(),
        unmatched = outcome.unmatched_symptoms.len(),
        predicted = %outcome.predicted_disease,
        confidence = outcome.confidence,
        "prediction served"
    );

    Ok(Json(outcome))
}

// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::{
    extract, http::Method, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde_json::json;

use super::{RouteDoc, State};
use crate::model::ModelStatus;

pub fn health_check_router(
    state: Arc<State>,
    path_override: Option<String>,
) -> (Vec<RouteDoc>, Router) {
    let path = path_override.unwrap_or_else(|| "/health".to_string());

    let docs: Vec<RouteDoc> = vec![RouteDoc::new(Method::GET, &path)];

    let router = Router::new()
        .route(&path, get(health_handler))
        .with_state(state);

    (docs, router)
}

// 503 until the model is ready
async fn health_handler(extract::State(state): extract::State<Arc<State>>) -> impl IntoResponse {
    let status = state.model().status();
    let code = match status {
        ModelStatus::Ready => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    };
    (code, Json(json!({ "status": status })))
}

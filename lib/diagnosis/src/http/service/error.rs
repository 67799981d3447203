// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::model::DiagnosisError;

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub detail: String,
}

#[derive(Debug)]
pub struct HttpError {
    pub code: StatusCode,
    pub detail: String,
}

impl HttpError {
    pub fn new(code: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_ready(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl From<DiagnosisError> for HttpError {
    fn from(err: DiagnosisError) -> Self {
        match err {
            DiagnosisError::NotReady(status) => {
                HttpError::not_ready(format!("Model not trained (status: {status})"))
            }
            DiagnosisError::EmptySymptoms => {
                HttpError::bad_request(DiagnosisError::EmptySymptoms.to_string())
            }
            DiagnosisError::InvalidInput(detail) => HttpError::bad_request(detail),
            other => {
                tracing::error!(error = %other, "prediction failed");
                HttpError::internal(format!("Prediction failed: {other}"))
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (
            self.code,
            Json(ErrorResponse {
                detail: self.detail,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::ClassifierError;
    use crate::model::ModelStatus;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                DiagnosisError::NotReady(ModelStatus::Training),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (DiagnosisError::EmptySymptoms, StatusCode::BAD_REQUEST),
            (
                DiagnosisError::InvalidInput("age".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DiagnosisError::Classifier(ClassifierError::InvalidDistribution("nan".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, code) in cases {
            assert_eq!(HttpError::from(err).code, code);
        }
    }

    #[test]
    fn test_empty_symptoms_detail() {
        let err = HttpError::from(DiagnosisError::EmptySymptoms);
        assert_eq!(err.detail, "No symptoms provided");
    }
}

// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! JSON body extractor whose rejections are [`HttpError`]s.
//!
//! Deserialization goes through `serde_path_to_error`, so the `detail` names the offending
//! field.

use axum::{
    body::{to_bytes, Body},
    extract::FromRequest,
    http::{Request, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::Deserializer;

use super::HttpError;

#[derive(Debug)]
pub struct JsonPath<T>(pub T);

impl<S, T> FromRequest<S, Body> for JsonPath<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        let bytes = to_bytes(req.into_body(), usize::MAX)
            .await
            .map_err(|e| HttpError::bad_request(format!("Failed to read request body: {e}")))?;

        match serde_path_to_error::deserialize(&mut Deserializer::from_slice(&bytes)) {
            Ok(v) => Ok(JsonPath(v)),
            Err(e) => {
                let field = e.path().to_string().trim_start_matches('.').to_string();
                let detail = format!(
                    "Invalid argument for parameter '{}': {}",
                    if field.is_empty() { "request body" } else { &field },
                    e.inner()
                );
                Err(HttpError::new(StatusCode::UNPROCESSABLE_ENTITY, detail))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    struct TestRequest {
        #[allow(dead_code)]
        symptoms: Vec<String>,
        #[allow(dead_code)]
        age: Option<i64>,
    }

    async fn extract(body: &'static str) -> Result<JsonPath<TestRequest>, HttpError> {
        let req = Request::builder().body(Body::from(body)).unwrap();
        JsonPath::<TestRequest>::from_request(req, &()).await
    }

    #[tokio::test]
    async fn test_valid_request() {
        assert!(extract(r#"{"symptoms": ["cough"], "age": 4}"#).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_type_names_field() {
        let err = extract(r#"{"symptoms": ["cough"], "age": "x"}"#)
            .await
            .unwrap_err();
        assert_eq!(err.code, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.detail.contains("'age'"), "{}", err.detail);
    }

    #[tokio::test]
    async fn test_missing_field_and_truncated_body() {
        let err = extract("{}").await.unwrap_err();
        assert_eq!(err.code, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.detail.contains("symptoms"), "{}", err.detail);

        let err = extract(r#"{"symptoms": "#).await.unwrap_err();
        assert_eq!(err.code, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.detail.starts_with("Invalid argument for parameter"));
    }
}

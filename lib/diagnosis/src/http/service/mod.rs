// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface of the prediction service.
//!
//! Each route module exposes a `*_router(state, path_override)` function returning the
//! docs for its routes and an axum [`axum::Router`] with the state already applied;
//! [`HttpService`] merges them.

pub mod error;
pub mod health;
pub mod json_path;
pub mod model_info;
pub mod predict;
pub mod server;

use std::fmt;

use axum::http::Method;

pub use error::{ErrorResponse, HttpError};
pub use json_path::JsonPath;
pub use server::{HttpService, State};

/// Method and path of one registered route, logged at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDoc {
    method: Method,
    path: String,
}

impl RouteDoc {
    pub fn new<T: Into<String>>(method: Method, path: T) -> Self {
        RouteDoc {
            method,
            path: path.into(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for RouteDoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

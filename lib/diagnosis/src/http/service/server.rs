// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use axum::Router;
use medpredict_runtime::{error, CancellationToken, Result};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{health, model_info, predict, RouteDoc};
use crate::config::HttpConfig;
use crate::model::ModelHandle;

/// Shared by every handler.
#[derive(Debug)]
pub struct State {
    model: ModelHandle,
    preview_limit: usize,
}

impl State {
    pub fn new(model: ModelHandle, preview_limit: usize) -> Self {
        Self {
            model,
            preview_limit,
        }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn preview_limit(&self) -> usize {
        self.preview_limit
    }
}

#[derive(Clone)]
pub struct HttpService {
    router: Router,
    route_docs: Vec<RouteDoc>,
    state: Arc<State>,
    host: String,
    port: u16,
}

impl HttpService {
    pub fn new(model: ModelHandle, config: &HttpConfig) -> Self {
        let state = Arc::new(State::new(model, config.preview_limit));

        let routes = [
            predict::predict_router(state.clone(), None),
            model_info::model_info_router(state.clone(), None),
            model_info::symptoms_router(state.clone(), None),
            model_info::root_router(None),
            health::health_check_router(state.clone(), None),
        ];

        let mut route_docs = Vec::new();
        let mut router = Router::new();
        for (docs, route) in routes {
            route_docs.extend(docs);
            router = router.merge(route);
        }

        let router = if config.cors_permissive {
            router.layer(CorsLayer::permissive())
        } else {
            router
        };
        let router = router.layer(TraceLayer::new_for_http());

        Self {
            router,
            route_docs,
            state,
            host: config.host.clone(),
            port: config.port,
        }
    }

    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn route_docs(&self) -> &[RouteDoc] {
        &self.route_docs
    }

    pub fn state(&self) -> &Arc<State> {
        &self.state
    }

    /// Bind the configured address and serve until `cancel_token` fires.
    pub async fn run(&self, cancel_token: CancellationToken) -> Result<()> {
        let address = format!("{}:{}", self.host, self.port);
        let listener = match TcpListener::bind(&address).await {
            Ok(listener) => listener,
            Err(e) => {
                tracing::error!("Failed to bind to address {}: {}", address, e);
                return Err(error!("Failed to bind to address {address}: {e}"));
            }
        };
        self.serve(listener, cancel_token).await
    }

    /// Serve on an already bound listener.
    pub async fn serve(&self, listener: TcpListener, cancel_token: CancellationToken) -> Result<()> {
        let local = listener.local_addr()?;
        tracing::info!(address = %local, "HTTP service listening");
        for doc in &self.route_docs {
            tracing::debug!(route = %doc, "registered route");
        }

        let observer = cancel_token.child_token();
        axum::serve(listener, self.app())
            .with_graceful_shutdown(observer.cancelled_owned())
            .await
            .inspect_err(|e| tracing::error!("HTTP server error: {e}"))?;

        tracing::info!("HTTP service stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[test]
    fn test_route_docs() {
        let service = HttpService::new(ModelHandle::new(), &HttpConfig::default());
        let docs: Vec<String> = service.route_docs().iter().map(|d| d.to_string()).collect();
        assert_eq!(
            docs,
            vec![
                "POST /predict",
                "GET /model-info",
                "GET /symptoms",
                "GET /",
                "GET /health",
            ]
        );
    }

    #[tokio::test]
    async fn test_serve_stops_on_cancel() {
        let service = HttpService::new(ModelHandle::new(), &HttpConfig::default());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let token = CancellationToken::new();

        let server = tokio::spawn({
            let token = token.clone();
            async move { service.serve(listener, token).await }
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();

        let result = timeout(Duration::from_secs(5), server).await;
        assert!(result.is_ok(), "server should stop once cancelled");
        assert!(result.unwrap().unwrap().is_ok());
    }
}

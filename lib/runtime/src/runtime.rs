// SPDX-FileCopyrightText: Copyright (c) 2024-2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0

//! The [Runtime] is the interface services use to access shared process resources: the
//! tokio handle the service was started on and the primary [`CancellationToken`].
//!
//! Cancelling the primary token stops every task that observes a child token, which is how the
//! HTTP service is shut down on Ctrl-C or SIGTERM.

use std::future::Future;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::Result;

pub use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct Runtime {
    id: Arc<String>,
    handle: tokio::runtime::Handle,
    cancellation_token: CancellationToken,
}

impl Runtime {
    /// Create a [`Runtime`] bound to the tokio runtime of the calling task.
    pub fn from_current() -> Result<Runtime> {
        let handle = tokio::runtime::Handle::try_current()?;
        Ok(Runtime::from_handle(handle))
    }

    pub fn from_handle(handle: tokio::runtime::Handle) -> Runtime {
        let id = Arc::new(format!(
            "{:x}-{:x}",
            std::process::id(),
            chrono::Utc::now().timestamp_millis()
        ));
        Runtime {
            id,
            handle,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Returns the identifier for this [`Runtime`]
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn handle(&self) -> tokio::runtime::Handle {
        self.handle.clone()
    }

    /// Access the primary [`CancellationToken`] for the [`Runtime`]
    pub fn primary_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Creates a child [`CancellationToken`] tied to the life-cycle of the [`Runtime`]'s root token.
    pub fn child_token(&self) -> CancellationToken {
        self.cancellation_token.child_token()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Spawn a future on the runtime's handle.
    pub fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.handle.spawn(future)
    }

    /// Shuts down the [`Runtime`] instance
    pub fn shutdown(&self) {
        tracing::debug!(runtime_id = %self.id, "runtime shutdown requested");
        self.cancellation_token.cancel();
    }

    /// Cancel the primary token when the process receives Ctrl-C or SIGTERM.
    pub fn shutdown_on_signal(&self) -> JoinHandle<()> {
        let runtime = self.clone();
        self.handle.spawn(async move {
            tokio::select! {
                _ = wait_for_signal() => {
                    tracing::info!("Shutdown signal received");
                    runtime.shutdown();
                }
                _ = runtime.cancellation_token.cancelled() => {}
            }
        })
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("id", &self.id)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let ctrl_c = tokio::signal::ctrl_c();
    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = ctrl_c => {}
                _ = sigterm.recv() => {}
            }
        }
        Err(e) => {
            tracing::warn!("Failed to install SIGTERM handler: {e}");
            let _ = ctrl_c.await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

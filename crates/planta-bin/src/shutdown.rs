// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Graceful shutdown coordination.
//!
//! The [`ShutdownCoordinator`] fans a single shutdown decision out to any
//! number of waiting tasks. Shutdown is initiated either programmatically
//! or by an OS signal (SIGTERM, SIGINT, SIGQUIT on Unix).

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use tokio::sync::broadcast;

// =============================================================================
// ShutdownCoordinator
// =============================================================================

/// Broadcasts a shutdown request to all subscribed tasks.
#[derive(Debug, Clone)]
pub struct ShutdownCoordinator {
    sender: broadcast::Sender<()>,
    initiated: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Create a new coordinator.
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            initiated: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to shutdown notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.sender.subscribe()
    }

    /// A future that resolves when shutdown is initiated.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        let mut receiver = self.subscribe();
        let already = self.is_initiated();
        ShutdownSignal {
            inner: Box::pin(async move {
                if !already {
                    // A lagged or closed channel still means shutdown.
                    let _ = receiver.recv().await;
                }
            }),
        }
    }

    /// Initiate shutdown. Idempotent.
    pub fn initiate_shutdown(&self) {
        if self
            .initiated
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            tracing::info!("shutdown initiated");
            let _ = self.sender.send(());
        }
    }

    /// Whether shutdown has been initiated.
    pub fn is_initiated(&self) -> bool {
        self.initiated.load(Ordering::SeqCst)
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ShutdownSignal
// =============================================================================

/// A future that completes once shutdown has been requested.
pub struct ShutdownSignal {
    inner: Pin<Box<dyn Future<Output = ()> + Send>>,
}

impl Future for ShutdownSignal {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.inner.as_mut().poll(cx)
    }
}

// =============================================================================
// OS Signal Handling
// =============================================================================

/// Wait for an OS termination signal and initiate shutdown.
#[cfg(unix)]
pub async fn wait_for_shutdown(coordinator: ShutdownCoordinator) {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGTERM handler");
            return;
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGINT handler");
            return;
        }
    };
    let mut sigquit = match signal(SignalKind::quit()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "failed to install SIGQUIT handler");
            return;
        }
    };

    tokio::select! {
        _ = sigterm.recv() => tracing::info!("received SIGTERM"),
        _ = sigint.recv() => tracing::info!("received SIGINT"),
        _ = sigquit.recv() => tracing::info!("received SIGQUIT"),
    }

    coordinator.initiate_shutdown();
}

/// Wait for Ctrl+C and initiate shutdown.
#[cfg(windows)]
pub async fn wait_for_shutdown(coordinator: ShutdownCoordinator) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl+C");
        return;
    }
    tracing::info!("received Ctrl+C");
    coordinator.initiate_shutdown();
}

// =============================================================================
// Tests
// =============================================================================

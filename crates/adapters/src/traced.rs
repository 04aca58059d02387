// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::navigator::Navigator;
use crate::remote::{RemoteError, ResourceApi};
use async_trait::async_trait;
use dg_core::ResourceId;
use tracing::Instrument;

/// Wrapper that adds tracing to any ResourceApi
#[derive(Clone)]
pub struct TracedResourceApi<A> {
    inner: A,
}

impl<A> TracedResourceApi<A> {
    pub fn new(inner: A) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

fn empty_id_error() -> RemoteError {
    RemoteError::Rejected {
        status: 400,
        detail: "resource id is empty".to_string(),
    }
}

#[async_trait]
impl<A: ResourceApi> ResourceApi for TracedResourceApi<A> {
    async fn save(&self, id: &ResourceId) -> Result<(), RemoteError> {
        let span = tracing::info_span!("remote.save", id = %id);

        async {
            tracing::info!("saving");

            // Precondition: the remote addresses drafts by id
            if id.as_str().is_empty() {
                tracing::error!("resource id is empty");
                return Err(empty_id_error());
            }

            let start = std::time::Instant::now();
            let result = self.inner.save(id).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "saved"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "save failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn delete(&self, id: &ResourceId) -> Result<(), RemoteError> {
        let span = tracing::info_span!("remote.delete", id = %id);

        async {
            tracing::info!("deleting");

            if id.as_str().is_empty() {
                tracing::error!("resource id is empty");
                return Err(empty_id_error());
            }

            let start = std::time::Instant::now();
            let result = self.inner.delete(id).await;
            let elapsed = start.elapsed();

            // 404 is often acceptable (draft already gone)
            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "deleted"),
                Err(e) if e.is_not_found() => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "delete failed (may be expected)"
                ),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "delete failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }
}

/// Wrapper that adds tracing to any Navigator
#[derive(Clone)]
pub struct TracedNavigator<N> {
    inner: N,
}

impl<N> TracedNavigator<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }
}

impl<N: Navigator> Navigator for TracedNavigator<N> {
    fn push(&self, to: &str) {
        tracing::debug!(to, "navigator.push");
        self.inner.push(to);
    }

    fn replace(&self, to: &str) {
        tracing::debug!(to, "navigator.replace");
        self.inner.replace(to);
    }

    fn back(&self) {
        tracing::debug!("navigator.back");
        self.inner.back();
    }

    fn forward(&self) {
        tracing::debug!("navigator.forward");
        self.inner.forward();
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op resource API that accepts every call

use super::{RemoteError, ResourceApi};
use async_trait::async_trait;
use dg_core::ResourceId;

/// Resource API that succeeds immediately without doing anything
#[derive(Clone, Debug, Default)]
pub struct NoOpResourceApi;

impl NoOpResourceApi {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResourceApi for NoOpResourceApi {
    async fn save(&self, _id: &ResourceId) -> Result<(), RemoteError> {
        Ok(())
    }

    async fn delete(&self, _id: &ResourceId) -> Result<(), RemoteError> {
        Ok(())
    }
}

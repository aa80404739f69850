// SPDX-FileCopyrightText: 2026 Voxbrief Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that every pipeline adapter implements.

use async_trait::async_trait;

use crate::error::VoxbriefError;
use crate::types::{AdapterType, HealthStatus};

/// Identity, lifecycle, and health check shared by transports, backends and transcoders.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Human-readable name of this adapter instance.
    fn name(&self) -> &str;

    fn version(&self) -> semver::Version;

    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, VoxbriefError>;

    /// Releases any held resources.
    async fn shutdown(&self) -> Result<(), VoxbriefError>;
}

//! Remote z/VM SDK capability
//!
//! [`GuestApi`] is everything the inspection engine needs from the SDK
//! server. The production implementation is [`SdkRequestHandler`] on top
//! of a [`TcpSdkClient`].

mod client;
mod handler;

pub use client::{SdkClient, TcpSdkClient};
pub use handler::{SdkRequestHandler, OVERALL_RC_NOT_EXIST};

use crate::error::RemoteError;
use crate::metrics::{CpuRecord, MemRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Authoritative power state reported by the SDK for a powered-off guest
pub const POWER_STATE_OFF: &str = "off";

/// Guest queries offered by the SDK server.
///
/// Inspection responses are keyed by upper-cased guest identifier.
#[async_trait]
pub trait GuestApi: Send + Sync {
    async fn query_cpu(&self, name: &str) -> Result<HashMap<String, CpuRecord>, RemoteError>;

    async fn query_mem(&self, name: &str) -> Result<HashMap<String, MemRecord>, RemoteError>;

    /// Returns `"off"`, `"on"` or whatever other literal the SDK reports.
    async fn query_power_state(&self, name: &str) -> Result<String, RemoteError>;
}

#[async_trait]
impl<T: GuestApi + ?Sized> GuestApi for Arc<T> {
    async fn query_cpu(&self, name: &str) -> Result<HashMap<String, CpuRecord>, RemoteError> {
        (**self).query_cpu(name).await
    }

    async fn query_mem(&self, name: &str) -> Result<HashMap<String, MemRecord>, RemoteError> {
        (**self).query_mem(name).await
    }

    async fn query_power_state(&self, name: &str) -> Result<String, RemoteError> {
        (**self).query_power_state(name).await
    }
}

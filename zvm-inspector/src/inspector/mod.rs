//! Guest inspector capability
//!
//! Two variants implement [`Inspector`]:
//! - [`ZvmInspector`]: queries the z/VM SDK server
//! - [`CachingInspector`]: performs no inspection, every operation is unsupported
//!
//! [`InspectorFactory`] picks one from configuration at startup.

mod caching;
mod zvm;

pub use caching::CachingInspector;
pub use zvm::{MetricRecord, ZvmInspector};

use crate::config::{InspectorBackend, InspectorConfig};
use crate::error::InspectError;
use crate::identity::GuestInstance;
use crate::metrics::{CpuStats, MemoryUsageStats, VnicStats};
use crate::sdk::{GuestApi, SdkRequestHandler, TcpSdkClient};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Metric family requested from the SDK
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectKind {
    Cpu,
    Mem,
}

/// Per-guest statistics a telemetry pipeline can ask for.
///
/// Every failure is one of the [`InspectError`] variants; callers are
/// expected to match on all of them.
#[async_trait]
pub trait Inspector: Send + Sync {
    async fn inspect_cpus(&self, instance: &GuestInstance) -> Result<CpuStats, InspectError>;

    async fn inspect_memory_usage(
        &self,
        instance: &GuestInstance,
    ) -> Result<MemoryUsageStats, InspectError>;

    /// Not implemented by any z/VM variant.
    async fn inspect_vnics(&self, _instance: &GuestInstance) -> Result<Vec<VnicStats>, InspectError> {
        Err(InspectError::NotSupported {
            operation: "inspect_vnics",
        })
    }

    /// Inspector name (for logging)
    fn name(&self) -> &str;
}

/// Factory for creating inspectors from configuration
pub struct InspectorFactory;

impl InspectorFactory {
    /// Build the configured inspector, talking to the SDK server over TCP
    pub fn create(config: &InspectorConfig) -> Arc<dyn Inspector> {
        match config.inspector.backend {
            InspectorBackend::Zvm => {
                let client = TcpSdkClient::new(config.sdk.server_addr.clone(), config.sdk.request_timeout());
                info!("Using z/VM inspector, SDK server at {}", client.addr());
                Arc::new(ZvmInspector::new(SdkRequestHandler::new(client)))
            }
            InspectorBackend::Caching => {
                info!("Using caching inspector, guest inspection disabled");
                Arc::new(CachingInspector::new())
            }
        }
    }

    /// Build the configured inspector over an existing SDK capability
    pub fn with_api(backend: InspectorBackend, api: Arc<dyn GuestApi>) -> Arc<dyn Inspector> {
        match backend {
            InspectorBackend::Zvm => Arc::new(ZvmInspector::new(api)),
            InspectorBackend::Caching => Arc::new(CachingInspector::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_selects_backend() {
        let mut config = InspectorConfig::default();
        assert_eq!(InspectorFactory::create(&config).name(), "zvm");

        config.inspector.backend = InspectorBackend::Caching;
        assert_eq!(InspectorFactory::create(&config).name(), "caching");
    }

    #[tokio::test]
    async fn test_vnics_unsupported_on_zvm() {
        let inspector = InspectorFactory::create(&InspectorConfig::default());
        let err = inspector
            .inspect_vnics(&GuestInstance::new("FAKEINST", 1))
            .await
            .unwrap_err();
        assert_eq!(err, InspectError::NotSupported { operation: "inspect_vnics" });
    }
}

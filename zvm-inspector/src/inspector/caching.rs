use super::Inspector;
use crate::error::InspectError;
use crate::identity::GuestInstance;
use crate::metrics::{CpuStats, MemoryUsageStats};
use async_trait::async_trait;

/// Inspector variant that performs no inspection
#[derive(Debug, Default)]
pub struct CachingInspector;

impl CachingInspector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Inspector for CachingInspector {
    async fn inspect_cpus(&self, _instance: &GuestInstance) -> Result<CpuStats, InspectError> {
        Err(InspectError::NotSupported {
            operation: "inspect_cpus",
        })
    }

    async fn inspect_memory_usage(
        &self,
        _instance: &GuestInstance,
    ) -> Result<MemoryUsageStats, InspectError> {
        Err(InspectError::NotSupported {
            operation: "inspect_memory_usage",
        })
    }

    fn name(&self) -> &str {
        "caching"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_operation_unsupported() {
        let inspector = CachingInspector::new();
        let instance = GuestInstance::new("FAKEINST", 1);

        assert!(matches!(
            inspector.inspect_cpus(&instance).await,
            Err(InspectError::NotSupported { operation: "inspect_cpus" })
        ));
        assert!(matches!(
            inspector.inspect_memory_usage(&instance).await,
            Err(InspectError::NotSupported { .. })
        ));
        assert!(matches!(
            inspector.inspect_vnics(&instance).await,
            Err(InspectError::NotSupported { operation: "inspect_vnics" })
        ));
    }
}

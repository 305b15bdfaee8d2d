use super::{InspectKind, Inspector};
use crate::error::{InspectError, RemoteError};
use crate::identity::{self, power_state, GuestInstance};
use crate::metrics::{CpuRecord, CpuStats, MemRecord, MemoryUsageStats};
use crate::sdk::{GuestApi, POWER_STATE_OFF};
use async_trait::async_trait;
use std::collections::HashMap;

/// Raw per-guest record returned by [`ZvmInspector::fetch`]
#[derive(Debug, Clone, PartialEq)]
pub enum MetricRecord {
    Cpu(CpuRecord),
    Mem(MemRecord),
}

/// Inspector backed by the z/VM SDK server.
///
/// Each fetch issues at most two SDK requests: the inspection itself and,
/// when the guest is missing from its result, a power-state query that
/// tells a shut-off guest apart from missing data. Nothing is retried.
pub struct ZvmInspector<A> {
    api: A,
}

impl<A: GuestApi> ZvmInspector<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the raw record of `kind` for one guest
    pub async fn fetch(&self, instance: &GuestInstance, kind: InspectKind) -> Result<MetricRecord, InspectError> {
        match kind {
            InspectKind::Cpu => self.fetch_cpu(instance).await.map(MetricRecord::Cpu),
            InspectKind::Mem => self.fetch_mem(instance).await.map(MetricRecord::Mem),
        }
    }

    pub async fn fetch_cpu(&self, instance: &GuestInstance) -> Result<CpuRecord, InspectError> {
        let name = Self::queryable_name(instance)?;
        let data = self.api.query_cpu(name).await;
        self.select(name, data).await
    }

    pub async fn fetch_mem(&self, instance: &GuestInstance) -> Result<MemRecord, InspectError> {
        let name = Self::queryable_name(instance)?;
        let data = self.api.query_mem(name).await;
        self.select(name, data).await
    }

    // Cached state is checked first and may be stale; a shut-off guest
    // never reaches the SDK.
    fn queryable_name(instance: &GuestInstance) -> Result<&str, InspectError> {
        let name = identity::name_of(instance);
        if identity::power_state_of(instance) == Some(power_state::SHUTDOWN) {
            return Err(InspectError::shut_off(name));
        }
        name.ok_or_else(|| InspectError::no_data(None))
    }

    async fn select<R: Send>(
        &self,
        name: &str,
        data: Result<HashMap<String, R>, RemoteError>,
    ) -> Result<R, InspectError> {
        let mut data = data.map_err(|e| classify(name, e))?;
        match data.remove(&name.to_uppercase()) {
            Some(record) => Ok(record),
            None => Err(self.disambiguate(name).await),
        }
    }

    /// Find out why the SDK returned nothing for `name`
    async fn disambiguate(&self, name: &str) -> InspectError {
        match self.api.query_power_state(name).await {
            Ok(state) if state == POWER_STATE_OFF => InspectError::shut_off(Some(name)),
            Ok(_) => InspectError::no_data(Some(name)),
            Err(e) => classify(name, e),
        }
    }
}

fn classify(name: &str, err: RemoteError) -> InspectError {
    if err.is_not_exist() {
        InspectError::not_found(Some(name))
    } else {
        InspectError::no_data(Some(name))
    }
}

#[async_trait]
impl<A: GuestApi> Inspector for ZvmInspector<A> {
    async fn inspect_cpus(&self, instance: &GuestInstance) -> Result<CpuStats, InspectError> {
        let record = self.fetch_cpu(instance).await?;
        CpuStats::from_record(&record)
            .ok_or_else(|| InspectError::no_data(identity::name_of(instance)))
    }

    async fn inspect_memory_usage(
        &self,
        instance: &GuestInstance,
    ) -> Result<MemoryUsageStats, InspectError> {
        let record = self.fetch_mem(instance).await?;
        Ok(MemoryUsageStats::from(&record))
    }

    fn name(&self) -> &str {
        "zvm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeApi {
        cpu: Mutex<Option<Result<HashMap<String, CpuRecord>, RemoteError>>>,
        power: Mutex<Option<Result<String, RemoteError>>>,
        calls: Mutex<Vec<&'static str>>,
    }

    #[async_trait]
    impl GuestApi for FakeApi {
        async fn query_cpu(&self, _name: &str) -> Result<HashMap<String, CpuRecord>, RemoteError> {
            self.calls.lock().unwrap().push("cpu");
            self.cpu.lock().unwrap().take().unwrap_or_else(|| Ok(HashMap::new()))
        }

        async fn query_mem(&self, _name: &str) -> Result<HashMap<String, MemRecord>, RemoteError> {
            self.calls.lock().unwrap().push("mem");
            Ok(HashMap::from([("FAKEINST".to_string(), MemRecord::new(390232))]))
        }

        async fn query_power_state(&self, _name: &str) -> Result<String, RemoteError> {
            self.calls.lock().unwrap().push("power");
            self.power.lock().unwrap().take().unwrap_or_else(|| Ok("on".to_string()))
        }
    }

    fn inspector(
        cpu: Result<HashMap<String, CpuRecord>, RemoteError>,
        power: Result<String, RemoteError>,
    ) -> ZvmInspector<FakeApi> {
        let api = FakeApi::default();
        *api.cpu.lock().unwrap() = Some(cpu);
        *api.power.lock().unwrap() = Some(power);
        ZvmInspector::new(api)
    }

    fn calls(inspector: &ZvmInspector<FakeApi>) -> Vec<&'static str> {
        inspector.api().calls.lock().unwrap().clone()
    }

    fn running() -> GuestInstance {
        GuestInstance::new("FakeInst", power_state::RUNNING)
    }

    #[tokio::test]
    async fn test_key_is_upper_cased_name() {
        let cpu = HashMap::from([("FAKEINST".to_string(), CpuRecord::new(1, 7185838))]);
        let inspector = inspector(Ok(cpu), Ok("on".into()));

        let record = inspector.fetch(&running(), InspectKind::Cpu).await.unwrap();
        assert_eq!(record, MetricRecord::Cpu(CpuRecord::new(1, 7185838)));
        assert_eq!(calls(&inspector), vec!["cpu"]);
    }

    #[tokio::test]
    async fn test_cached_shutdown_skips_sdk() {
        let inspector = inspector(Ok(HashMap::new()), Ok("on".into()));
        let instance = GuestInstance::new("FAKEINST", power_state::SHUTDOWN);

        let err = inspector.fetch(&instance, InspectKind::Mem).await.unwrap_err();
        assert!(matches!(err, InspectError::ShutOff { .. }));
        assert!(calls(&inspector).is_empty());
    }

    #[tokio::test]
    async fn test_missing_name_is_no_data_without_sdk() {
        let inspector = inspector(Ok(HashMap::new()), Ok("off".into()));
        let instance = GuestInstance {
            instance_name: None,
            power_state: Some(power_state::RUNNING),
        };

        let err = inspector.fetch(&instance, InspectKind::Cpu).await.unwrap_err();
        assert!(matches!(err, InspectError::NoData { .. }));
        assert!(calls(&inspector).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_power_state_still_queries() {
        let cpu = HashMap::from([("FAKEINST".to_string(), CpuRecord::new(2, 5))]);
        let inspector = inspector(Ok(cpu), Ok("on".into()));
        let instance = GuestInstance {
            instance_name: Some("fakeinst".into()),
            power_state: None,
        };

        let stats = inspector.inspect_cpus(&instance).await.unwrap();
        assert_eq!(stats, CpuStats { number: 2, time: 5000 });
    }

    #[tokio::test]
    async fn test_empty_result_then_off() {
        let inspector = inspector(Ok(HashMap::new()), Ok("off".into()));

        let err = inspector.inspect_cpus(&running()).await.unwrap_err();
        assert_eq!(err, InspectError::ShutOff { guest: "FakeInst".into() });
        assert_eq!(calls(&inspector), vec!["cpu", "power"]);
    }

    #[tokio::test]
    async fn test_transport_error_during_inspection_is_no_data() {
        let inspector = inspector(Err(RemoteError::Timeout), Ok("off".into()));

        let err = inspector.inspect_cpus(&running()).await.unwrap_err();
        assert!(matches!(err, InspectError::NoData { .. }));
        assert_eq!(calls(&inspector), vec!["cpu"]);
    }

    #[tokio::test]
    async fn test_memory_usage() {
        let inspector = inspector(Ok(HashMap::new()), Ok("on".into()));
        let instance = GuestInstance::new("fakeinst", power_state::RUNNING);

        let stats = inspector.inspect_memory_usage(&instance).await.unwrap();
        assert_eq!(stats.usage, 390232.0 / 1024.0);
        assert_eq!(calls(&inspector), vec!["mem"]);
    }
}

//! Guest metrics records and statistics
//!
//! Two layers:
//! - raw per-guest records as returned by the z/VM SDK
//! - normalized stats handed to the telemetry pipeline (CPU count + time
//!   in nanoseconds, memory usage in MiB)

use serde::{Deserialize, Serialize};

const NANOS_PER_MICRO: u64 = 1000;
const KIB_PER_MIB: f64 = 1024.0;

/// Per-guest CPU record from `guest_inspect_cpus`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuRecord {
    pub guest_cpus: u64,
    pub used_cpu_time_us: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_cpu_time_us: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_cpu_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cpu_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples_cpu_in_use: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub samples_cpu_delay: Option<u64>,
}

/// Per-guest memory record from `guest_inspect_mem`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemRecord {
    pub used_mem_kb: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mem_kb: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_mem_kb: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_mem_kb: Option<u64>,
}

/// CPU statistics (number of vCPUs, cumulative CPU time in ns)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpuStats {
    pub number: u64,
    pub time: u64,
}

/// Memory usage in MiB
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MemoryUsageStats {
    pub usage: f64,
}

/// Network interface statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VnicStats {
    pub name: String,
    pub mac: Option<String>,
    pub rx_bytes: u64,
    pub tx_bytes: u64,
    pub rx_packets: u64,
    pub tx_packets: u64,
}

impl CpuRecord {
    pub fn new(guest_cpus: u64, used_cpu_time_us: u64) -> Self {
        Self {
            guest_cpus,
            used_cpu_time_us,
            elapsed_cpu_time_us: None,
            min_cpu_count: None,
            max_cpu_limit: None,
            samples_cpu_in_use: None,
            samples_cpu_delay: None,
        }
    }
}

impl MemRecord {
    pub fn new(used_mem_kb: u64) -> Self {
        Self {
            used_mem_kb,
            max_mem_kb: None,
            min_mem_kb: None,
            shared_mem_kb: None,
        }
    }
}

impl CpuStats {
    /// Scale a CPU record to nanoseconds; `None` when the time does not fit in `u64`
    pub fn from_record(record: &CpuRecord) -> Option<Self> {
        let time = record.used_cpu_time_us.checked_mul(NANOS_PER_MICRO)?;
        Some(CpuStats {
            number: record.guest_cpus,
            time,
        })
    }
}

impl From<&MemRecord> for MemoryUsageStats {
    fn from(record: &MemRecord) -> Self {
        // KiB -> MiB, fractional
        MemoryUsageStats {
            usage: record.used_mem_kb as f64 / KIB_PER_MIB,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cpu_time_scaled_to_nanoseconds() {
        let stats = CpuStats::from_record(&CpuRecord::new(1, 7185838)).unwrap();
        assert_eq!(stats.number, 1);
        assert_eq!(stats.time, 7185838000);
    }

    #[test]
    fn test_cpu_time_overflow_is_rejected() {
        let max = u64::MAX / NANOS_PER_MICRO;
        assert_eq!(
            CpuStats::from_record(&CpuRecord::new(1, max)).map(|s| s.time),
            Some(max * NANOS_PER_MICRO)
        );
        assert_eq!(CpuStats::from_record(&CpuRecord::new(1, max + 1)), None);
    }

    #[test]
    fn test_memory_usage_in_mib() {
        let stats = MemoryUsageStats::from(&MemRecord::new(390232));
        assert_eq!(stats.usage, 381.0859375);
        assert_eq!(stats.usage as u64, 381);
    }

    #[test]
    fn test_cpu_record_keeps_sdk_extras() {
        let record: CpuRecord = serde_json::from_value(serde_json::json!({
            "guest_cpus": 1,
            "used_cpu_time_us": 7185838,
            "elapsed_cpu_time_us": 35232895,
            "min_cpu_count": 2,
            "max_cpu_limit": 10000,
            "samples_cpu_in_use": 0,
            "samples_cpu_delay": 0
        }))
        .unwrap();
        assert_eq!(record.elapsed_cpu_time_us, Some(35232895));
        assert_eq!(record.max_cpu_limit, Some(10000));
    }

    #[test]
    fn test_mem_record_requires_used_mem() {
        let missing = serde_json::from_value::<MemRecord>(serde_json::json!({"max_mem_kb": 1}));
        assert!(missing.is_err());
    }
}

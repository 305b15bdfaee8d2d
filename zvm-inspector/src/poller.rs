//! Periodic inspection of configured guests
//!
//! One pass inspects every guest concurrently and turns each successful
//! inspection into a [`GuestSample`]. Failures are logged, never retried.

use crate::error::InspectError;
use crate::identity::{self, GuestInstance};
use crate::inspector::{InspectKind, Inspector};
use crate::metrics::{CpuStats, MemoryUsageStats};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Statistics collected for one guest in one pass
#[derive(Debug, Clone, Serialize)]
pub struct GuestSample {
    pub guest: String,
    pub cpu: Option<CpuStats>,
    pub memory: Option<MemoryUsageStats>,
    pub timestamp: DateTime<Utc>,
}

pub struct Poller {
    inspector: Arc<dyn Inspector>,
    guests: Vec<GuestInstance>,
}

impl Poller {
    pub fn new(inspector: Arc<dyn Inspector>, guests: Vec<GuestInstance>) -> Self {
        Self { inspector, guests }
    }

    pub fn guests(&self) -> &[GuestInstance] {
        &self.guests
    }

    /// Inspect every guest once; guests with no statistics at all are left out
    pub async fn poll_once(&self) -> Vec<GuestSample> {
        let samples = join_all(self.guests.iter().map(|guest| self.poll_guest(guest))).await;
        let samples: Vec<_> = samples.into_iter().flatten().collect();
        debug!(
            "Poll pass done with {} inspector: {}/{} guests sampled",
            self.inspector.name(),
            samples.len(),
            self.guests.len()
        );
        samples
    }

    async fn poll_guest(&self, instance: &GuestInstance) -> Option<GuestSample> {
        let guest = identity::name_of(instance).unwrap_or("<unnamed>").to_string();

        let (cpu, memory) = futures::join!(
            self.inspector.inspect_cpus(instance),
            self.inspector.inspect_memory_usage(instance)
        );
        let cpu = cpu.map_err(|e| log_failure(&guest, InspectKind::Cpu, &e)).ok();
        let memory = memory.map_err(|e| log_failure(&guest, InspectKind::Mem, &e)).ok();

        if cpu.is_none() && memory.is_none() {
            return None;
        }

        Some(GuestSample {
            guest,
            cpu,
            memory,
            timestamp: Utc::now(),
        })
    }
}

fn log_failure(guest: &str, kind: InspectKind, err: &InspectError) {
    if err.is_expected() {
        debug!("Skipping {:?} sample for {}: {}", kind, guest, err)
    } else {
        warn!("No {:?} sample for {}: {}", kind, guest, err)
    }
}

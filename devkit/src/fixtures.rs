/*!
Fixtures pour les tests d'inspection

Construit des instances, des réponses d'inspection keyées comme le SDK
(nom d'invité en majuscules) et des RequestResults.
*/

use serde_json::Value;
use std::collections::HashMap;
use zvm_inspector::error::RequestResults;
use zvm_inspector::identity::power_state;
use zvm_inspector::sdk::OVERALL_RC_NOT_EXIST;
use zvm_inspector::{CpuRecord, GuestInstance, MemRecord};

pub fn running(name: &str) -> GuestInstance {
    GuestInstance::new(name, power_state::RUNNING)
}

pub fn shut_off(name: &str) -> GuestInstance {
    GuestInstance::new(name, power_state::SHUTDOWN)
}

/// Réponse `guest_inspect_cpus` pour un invité
pub fn cpu_data(name: &str, guest_cpus: u64, used_cpu_time_us: u64) -> HashMap<String, CpuRecord> {
    HashMap::from([(name.to_uppercase(), CpuRecord::new(guest_cpus, used_cpu_time_us))])
}

/// Réponse `guest_inspect_mem` pour un invité
pub fn mem_data(name: &str, used_mem_kb: u64) -> HashMap<String, MemRecord> {
    HashMap::from([(name.to_uppercase(), MemRecord::new(used_mem_kb))])
}

/// Enregistrement CPU complet tel que renvoyé par le SDK
pub fn full_cpu_record() -> CpuRecord {
    CpuRecord {
        guest_cpus: 1,
        used_cpu_time_us: 7185838,
        elapsed_cpu_time_us: Some(35232895),
        min_cpu_count: Some(2),
        max_cpu_limit: Some(10000),
        samples_cpu_in_use: Some(0),
        samples_cpu_delay: Some(0),
    }
}

pub fn ok_results(output: Value) -> RequestResults {
    RequestResults {
        overall_rc: 0,
        mod_id: None,
        output,
        ..Default::default()
    }
}

pub fn failed_results(overall_rc: i64, errmsg: &str) -> RequestResults {
    RequestResults {
        overall_rc,
        rc: overall_rc,
        errmsg: errmsg.to_string(),
        ..Default::default()
    }
}

pub fn not_exist_results(name: &str) -> RequestResults {
    failed_results(
        OVERALL_RC_NOT_EXIST,
        &format!("Guest '{}' does not exist.", name.to_uppercase()),
    )
}

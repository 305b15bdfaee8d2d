//! Guest identity and cached power state
//!
//! The compute API hands us a server record; only two of its attributes
//! matter here. Both may be absent.

use serde::{Deserialize, Serialize};

/// Power state codes as cached on the compute server record
pub mod power_state {
    pub const NOSTATE: i32 = 0x00;
    pub const RUNNING: i32 = 0x01;
    pub const PAUSED: i32 = 0x03;
    pub const SHUTDOWN: i32 = 0x04;
    pub const CRASHED: i32 = 0x06;
    pub const SUSPENDED: i32 = 0x07;
}

/// Guest instance as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestInstance {
    #[serde(rename = "OS-EXT-SRV-ATTR:instance_name", alias = "instance_name", default)]
    pub instance_name: Option<String>,
    // Populated when the caller built the record, may be stale
    #[serde(rename = "OS-EXT-STS:power_state", alias = "power_state", default)]
    pub power_state: Option<i32>,
}

impl GuestInstance {
    pub fn new(instance_name: impl Into<String>, power_state: i32) -> Self {
        Self {
            instance_name: Some(instance_name.into()),
            power_state: Some(power_state),
        }
    }
}

/// System identifier of the guest, if the record carries one
pub fn name_of(instance: &GuestInstance) -> Option<&str> {
    instance.instance_name.as_deref()
}

/// Locally cached power state code, if the record carries one
pub fn power_state_of(instance: &GuestInstance) -> Option<i32> {
    instance.power_state
}

//! Error taxonomy for guest inspection
//!
//! [`InspectError`] is what callers of an inspector see. [`RemoteError`]
//! is what the SDK transport reports; the engine folds it into
//! `InspectError` and never hands it to callers directly.

use serde::{Deserialize, Serialize};

/// Outcome of a failed inspection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InspectError {
    /// Guest confirmed powered off, either from the cached instance state
    /// or from the SDK power-state query.
    #[error("Can not get vm info in shutdown state for {guest}")]
    ShutOff { guest: String },
    /// The SDK reported that the guest does not exist.
    #[error("Can not get vm info for {guest}, vm not exist")]
    NotFound { guest: String },
    #[error("Failed to get vm info for {guest}")]
    NoData { guest: String },
    /// The inspector variant does not implement this operation.
    #[error("{operation} is not supported by this inspector")]
    NotSupported { operation: &'static str },
}

impl InspectError {
    pub(crate) fn shut_off(guest: Option<&str>) -> Self {
        Self::ShutOff { guest: display_name(guest) }
    }

    pub(crate) fn not_found(guest: Option<&str>) -> Self {
        Self::NotFound { guest: display_name(guest) }
    }

    pub(crate) fn no_data(guest: Option<&str>) -> Self {
        Self::NoData { guest: display_name(guest) }
    }

    /// Shut-off guests and unsupported operations are expected during
    /// metrics collection; the other outcomes deserve a warning
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::ShutOff { .. } | Self::NotSupported { .. })
    }
}

fn display_name(guest: Option<&str>) -> String {
    guest.unwrap_or("<unnamed>").to_string()
}

/// Result structure returned by the SDK server for every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestResults {
    #[serde(default)]
    pub rs: i64,
    #[serde(rename = "overallRC")]
    pub overall_rc: i64,
    #[serde(rename = "modID", default)]
    pub mod_id: Option<i64>,
    #[serde(default)]
    pub rc: i64,
    #[serde(default)]
    pub output: serde_json::Value,
    #[serde(default)]
    pub errmsg: String,
}

impl Default for RequestResults {
    fn default() -> Self {
        Self {
            rs: 0,
            overall_rc: 1,
            mod_id: Some(0),
            rc: 0,
            output: serde_json::Value::String(String::new()),
            errmsg: String::new(),
        }
    }
}

/// Failure reported by the remote SDK capability.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("z/VM guest {guest} does not exist")]
    NotExist { guest: String },
    #[error("z/VM SDK request failed: {}", .0.errmsg)]
    RequestFailed(RequestResults),
    #[error("SDK transport error: {0}")]
    Transport(String),
    #[error("SDK request timed out")]
    Timeout,
    #[error("SDK response decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RemoteError {
    pub fn is_not_exist(&self) -> bool {
        matches!(self, Self::NotExist { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_guest() {
        let err = InspectError::shut_off(Some("FAKEINST"));
        assert_eq!(err.to_string(), "Can not get vm info in shutdown state for FAKEINST");

        let err = InspectError::not_found(Some("FAKEINST"));
        assert_eq!(err.to_string(), "Can not get vm info for FAKEINST, vm not exist");

        let err = InspectError::no_data(None);
        assert_eq!(err.to_string(), "Failed to get vm info for <unnamed>");
    }

    #[test]
    fn test_default_results_are_a_failure() {
        let results = RequestResults::default();
        assert_eq!(results.overall_rc, 1);
        assert_eq!(results.rs, 0);
        assert!(results.errmsg.is_empty());
    }

    #[test]
    fn test_results_deserialize_sdk_field_names() {
        let results: RequestResults = serde_json::from_str(
            r#"{"rs": 0, "overallRC": 0, "modID": null, "rc": 0, "output": "on", "errmsg": ""}"#,
        )
        .unwrap();
        assert_eq!(results.overall_rc, 0);
        assert_eq!(results.mod_id, None);
        assert_eq!(results.output, serde_json::json!("on"));
    }

    #[test]
    fn test_expected_outcomes() {
        assert!(InspectError::shut_off(Some("a")).is_expected());
        assert!(!InspectError::no_data(Some("a")).is_expected());
        assert!(!InspectError::not_found(Some("a")).is_expected());
        assert!(InspectError::NotSupported { operation: "inspect_vnics" }.is_expected());
    }
}

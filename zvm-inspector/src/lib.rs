//! zvm-inspector - z/VM guest inspection for telemetry pipelines
//!
//! Queries the z/VM SDK server for per-guest CPU and memory figures and
//! reduces every remote failure to one of three outcomes:
//! - guest not found
//! - guest shut off
//! - no data
//!
//! The telemetry caller picks an [`Inspector`] variant through
//! [`InspectorFactory`] and converts the returned stats into its own samples.

pub mod config;
pub mod error;
pub mod identity;
pub mod inspector;
pub mod metrics;
pub mod poller;
pub mod sdk;

pub use error::{InspectError, RemoteError};
pub use identity::GuestInstance;
pub use inspector::{Inspector, InspectorFactory, InspectKind};
pub use metrics::{CpuRecord, CpuStats, MemRecord, MemoryUsageStats, VnicStats};
pub use sdk::GuestApi;

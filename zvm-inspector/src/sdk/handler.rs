use super::{GuestApi, SdkClient};
use crate::error::{RemoteError, RequestResults};
use crate::metrics::{CpuRecord, MemRecord};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// overallRC the SDK server uses for "guest does not exist"
pub const OVERALL_RC_NOT_EXIST: i64 = 404;

/// Sends named SDK requests and checks their overall result code
pub struct SdkRequestHandler<C> {
    client: C,
}

impl<C: SdkClient> SdkRequestHandler<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Send `func_name(args)` and return its `output` on success
    pub async fn call(&self, func_name: &str, args: &[Value]) -> Result<Value, RemoteError> {
        let results = self.client.send_request(func_name, args).await?;
        if results.overall_rc == 0 {
            return Ok(results.output);
        }

        debug!(
            "SDK request {} failed with parameters: {:?} . Error messages: {}",
            func_name, args, results.errmsg
        );
        Err(RemoteError::RequestFailed(results))
    }

    async fn guest_call(&self, func_name: &str, userid: &str) -> Result<Value, RemoteError> {
        match self.call(func_name, &[Value::from(userid)]).await {
            Err(RemoteError::RequestFailed(RequestResults { overall_rc, .. }))
                if overall_rc == OVERALL_RC_NOT_EXIST =>
            {
                Err(RemoteError::NotExist { guest: userid.to_string() })
            }
            other => other,
        }
    }
}

#[async_trait]
impl<C: SdkClient> GuestApi for SdkRequestHandler<C> {
    async fn query_cpu(&self, name: &str) -> Result<HashMap<String, CpuRecord>, RemoteError> {
        let output = self.guest_call("guest_inspect_cpus", name).await?;
        Ok(serde_json::from_value(output)?)
    }

    async fn query_mem(&self, name: &str) -> Result<HashMap<String, MemRecord>, RemoteError> {
        let output = self.guest_call("guest_inspect_mem", name).await?;
        Ok(serde_json::from_value(output)?)
    }

    async fn query_power_state(&self, name: &str) -> Result<String, RemoteError> {
        let output = self.guest_call("guest_get_power_state", name).await?;
        Ok(match output {
            Value::String(state) => state,
            other => other.to_string(),
        })
    }
}

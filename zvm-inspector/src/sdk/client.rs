use crate::error::{RemoteError, RequestResults};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// Sends one named request to the SDK server and returns its raw results
#[async_trait]
pub trait SdkClient: Send + Sync {
    async fn send_request(&self, func_name: &str, args: &[Value]) -> Result<RequestResults, RemoteError>;
}

/// SDK server client over a plain TCP socket.
///
/// One connection per request: the client writes `[func_name, args, kwargs]`
/// as JSON, closes its write half, then reads the JSON results until the
/// server closes the connection.
#[derive(Debug, Clone)]
pub struct TcpSdkClient {
    addr: String,
    request_timeout: Duration,
}

impl TcpSdkClient {
    pub fn new(addr: impl Into<String>, request_timeout: Duration) -> Self {
        Self {
            addr: addr.into(),
            request_timeout,
        }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn exchange(&self, payload: &[u8]) -> Result<Vec<u8>, RemoteError> {
        let mut stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| RemoteError::Transport(format!("connect to {} failed: {}", self.addr, e)))?;

        stream.write_all(payload).await?;
        stream.shutdown().await?;

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await?;
        Ok(response)
    }
}

#[async_trait]
impl SdkClient for TcpSdkClient {
    async fn send_request(&self, func_name: &str, args: &[Value]) -> Result<RequestResults, RemoteError> {
        let payload = serde_json::to_vec(&(func_name, args, serde_json::Map::new()))?;
        debug!("Sending SDK request {} to {}", func_name, self.addr);

        let response = timeout(self.request_timeout, self.exchange(&payload))
            .await
            .map_err(|_| RemoteError::Timeout)??;

        if response.is_empty() {
            return Err(RemoteError::Transport(format!(
                "empty response from SDK server for {}",
                func_name
            )));
        }

        Ok(serde_json::from_slice(&response)?)
    }
}

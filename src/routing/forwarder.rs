use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::types::ForwardError;
use crate::config::ClusterConfig;
use crate::storage::protocol::*;

/// Outbound half of routing: relays one operation to the node owning the key.
///
/// Single hop only. There is exactly one owner per key, so a failed call is
/// reported, never retried or redirected.
pub struct Forwarder {
    config: Arc<ClusterConfig>,
    http_client: reqwest::Client,
}

impl Forwarder {
    pub fn new(config: Arc<ClusterConfig>) -> Result<Self, ForwardError> {
        // No idle pool: the connection is released as soon as the call ends.
        let http_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.forward_timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(ForwardError::Client)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub async fn get(&self, node: usize, req: GetRequest) -> Result<GetResponse, ForwardError> {
        self.call(node, ENDPOINT_RPC_GET, &req).await
    }

    pub async fn set(&self, node: usize, req: SetRequest) -> Result<SetResponse, ForwardError> {
        self.call(node, ENDPOINT_RPC_SET, &req).await
    }

    pub async fn delete(
        &self,
        node: usize,
        req: DeleteRequest,
    ) -> Result<DeleteResponse, ForwardError> {
        self.call(node, ENDPOINT_RPC_DELETE, &req).await
    }

    async fn call<Req, Resp>(
        &self,
        node: usize,
        endpoint: &str,
        payload: &Req,
    ) -> Result<Resp, ForwardError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let addr = self
            .config
            .rpc_endpoint(node)
            .ok_or(ForwardError::UnknownNode(node))?;
        let url = format!("http://{}{}", addr, endpoint);

        tracing::debug!("Forwarding {} to node {} at {}", endpoint, node, addr);

        let response = self
            .http_client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify(node, &addr.to_string(), e))?;

        if !response.status().is_success() {
            return Err(ForwardError::Status {
                node,
                status: response.status(),
            });
        }

        response
            .json::<Resp>()
            .await
            .map_err(|e| self.classify(node, &addr.to_string(), e))
    }

    /// The bound that fired: connect timeouts are reported as connect errors too.
    pub(crate) fn timeout_for(&self, connecting: bool) -> Duration {
        if connecting {
            self.config.connect_timeout
        } else {
            self.config.forward_timeout
        }
    }

    fn classify(&self, node: usize, addr: &str, err: reqwest::Error) -> ForwardError {
        if err.is_timeout() {
            ForwardError::Timeout {
                node,
                timeout: self.timeout_for(err.is_connect()),
            }
        } else if err.is_connect() {
            ForwardError::Connect {
                node,
                addr: addr.to_string(),
                source: err,
            }
        } else if err.is_decode() {
            ForwardError::Decode { node, source: err }
        } else {
            ForwardError::Transport { node, source: err }
        }
    }
}

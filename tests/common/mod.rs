//! Shared helpers for integration tests.

#![allow(dead_code)]

use partitioned_cache::config::{ClusterConfig, NodeEndpoint};
use partitioned_cache::server::CacheNode;
use partitioned_cache::storage::partitioner::owner_of;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Forward timeout used by test clusters.
pub const FORWARD_TIMEOUT: Duration = Duration::from_secs(2);

/// A cluster of in-process nodes on loopback ports.
pub struct TestCluster {
    pub nodes: Vec<NodeEndpoint>,
    pub rpc_port_offset: u16,
    pub client: reqwest::Client,
    handles: Vec<JoinHandle<()>>,
}

impl TestCluster {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Base URL of the client-facing surface of node `index`.
    pub fn url(&self, index: usize) -> String {
        format!("http://{}", self.nodes[index])
    }

    pub fn rpc_url(&self, index: usize) -> String {
        let node = &self.nodes[index];
        format!("http://{}:{}", node.host, node.port + self.rpc_port_offset)
    }

    pub fn owner_of(&self, key: &str) -> usize {
        owner_of(key, self.node_count())
    }

    /// First `key-N` that is owned by `owner`.
    pub fn key_owned_by(&self, owner: usize) -> String {
        (0..)
            .map(|i| format!("key-{}", i))
            .find(|key| self.owner_of(key) == owner)
            .unwrap()
    }

    pub async fn get(&self, index: usize, key: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/{}", self.url(index), key))
            .send()
            .await
            .unwrap()
    }

    pub async fn post(&self, index: usize, body: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/", self.url(index)))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .unwrap()
    }

    pub async fn delete(&self, index: usize, key: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}/{}", self.url(index), key))
            .send()
            .await
            .unwrap()
    }

    pub async fn entries(&self, index: usize) -> usize {
        let stats: serde_json::Value = self
            .client
            .get(format!("{}/rpc/stats", self.rpc_url(index)))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        stats["entries"].as_u64().unwrap() as usize
    }
}

impl Drop for TestCluster {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

/// Binds `count` client listeners plus their peer listeners at a shared offset.
async fn bind_listeners(count: usize) -> (u16, Vec<(TcpListener, TcpListener)>) {
    for attempt in 0..50u16 {
        let offset = 1000 + attempt * 37;
        let mut pairs = Vec::with_capacity(count);

        for _ in 0..count {
            let client = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let port = client.local_addr().unwrap().port();
            let Some(rpc_port) = port.checked_add(offset) else {
                break;
            };
            match TcpListener::bind(("127.0.0.1", rpc_port)).await {
                Ok(rpc) => pairs.push((client, rpc)),
                Err(_) => break,
            }
        }

        if pairs.len() == count {
            return (offset, pairs);
        }
    }
    panic!("could not bind {} listener pairs", count);
}

/// Starts a cluster of `count` nodes. Nodes listed in `down` are configured
/// but never started, so both of their surfaces refuse connections.
pub async fn spawn_cluster_with_down(count: usize, down: &[usize]) -> TestCluster {
    let (offset, pairs) = bind_listeners(count).await;
    let nodes: Vec<NodeEndpoint> = pairs
        .iter()
        .map(|(client, _)| NodeEndpoint::new("127.0.0.1", client.local_addr().unwrap().port()))
        .collect();

    let mut handles = Vec::new();
    for (index, (client_listener, rpc_listener)) in pairs.into_iter().enumerate() {
        if down.contains(&index) {
            continue;
        }

        let config = ClusterConfig::new(nodes.clone(), index, offset)
            .unwrap()
            .with_timeouts(Duration::from_millis(500), FORWARD_TIMEOUT);
        let node = CacheNode::new(config).unwrap();

        handles.push(tokio::spawn(async move {
            node.serve(client_listener, rpc_listener, std::future::pending())
                .await
                .unwrap();
        }));
    }

    TestCluster {
        nodes,
        rpc_port_offset: offset,
        client: reqwest::Client::new(),
        handles,
    }
}

pub async fn spawn_cluster(count: usize) -> TestCluster {
    spawn_cluster_with_down(count, &[]).await
}

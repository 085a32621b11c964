//! Cluster Configuration
//!
//! Every node is started with the same ordered node list and the same peer port
//! offset. Together with the node's own index these form an immutable
//! [`ClusterConfig`] that is built once at startup and shared by `Arc` with the
//! routing layer. Nothing in here changes after the process starts.

use clap::Parser;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_NODES: [&str; 3] = ["localhost:9527", "localhost:9528", "localhost:9529"];
pub const DEFAULT_RPC_PORT_OFFSET: u16 = 1000;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_FORWARD_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("node list is empty")]
    EmptyNodeList,
    #[error("invalid node index {index}: cluster has {node_count} node(s)")]
    NodeIndexOutOfRange { index: usize, node_count: usize },
    #[error("invalid node endpoint '{0}': expected host:port")]
    InvalidEndpoint(String),
    #[error("peer port for {endpoint} overflows with offset {offset}")]
    PeerPortOverflow { endpoint: String, offset: u16 },
}

/// Client-facing address of one node, as listed in the shared node list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeEndpoint {
    pub host: String,
    pub port: u16,
}

impl NodeEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Peer-facing address, derived from the client port and the cluster offset.
    pub fn rpc_endpoint(&self, offset: u16) -> Result<NodeEndpoint, ConfigError> {
        let port = self
            .port
            .checked_add(offset)
            .ok_or_else(|| ConfigError::PeerPortOverflow {
                endpoint: self.to_string(),
                offset,
            })?;
        Ok(NodeEndpoint::new(self.host.clone(), port))
    }
}

impl fmt::Display for NodeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for NodeEndpoint {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| ConfigError::InvalidEndpoint(s.to_string()))?;
        if host.is_empty() {
            return Err(ConfigError::InvalidEndpoint(s.to_string()));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidEndpoint(s.to_string()))?;
        Ok(NodeEndpoint::new(host, port))
    }
}

/// Immutable, validated view of the cluster shared by every component that routes.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    nodes: Vec<NodeEndpoint>,
    node_index: usize,
    rpc_port_offset: u16,
    pub connect_timeout: Duration,
    pub forward_timeout: Duration,
}

impl ClusterConfig {
    /// Validates the node list, the own index and every derived peer port.
    pub fn new(
        nodes: Vec<NodeEndpoint>,
        node_index: usize,
        rpc_port_offset: u16,
    ) -> Result<Self, ConfigError> {
        if nodes.is_empty() {
            return Err(ConfigError::EmptyNodeList);
        }
        if node_index >= nodes.len() {
            return Err(ConfigError::NodeIndexOutOfRange {
                index: node_index,
                node_count: nodes.len(),
            });
        }
        for node in &nodes {
            node.rpc_endpoint(rpc_port_offset)?;
        }

        Ok(Self {
            nodes,
            node_index,
            rpc_port_offset,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            forward_timeout: DEFAULT_FORWARD_TIMEOUT,
        })
    }

    pub fn with_timeouts(mut self, connect_timeout: Duration, forward_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self.forward_timeout = forward_timeout;
        self
    }

    pub fn nodes(&self) -> &[NodeEndpoint] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_index(&self) -> usize {
        self.node_index
    }

    pub fn rpc_port_offset(&self) -> u16 {
        self.rpc_port_offset
    }

    pub fn local_endpoint(&self) -> &NodeEndpoint {
        &self.nodes[self.node_index]
    }

    /// Peer-facing address of the node at `index`, if such a node exists.
    pub fn rpc_endpoint(&self, index: usize) -> Option<NodeEndpoint> {
        self.nodes
            .get(index)
            .and_then(|node| node.rpc_endpoint(self.rpc_port_offset).ok())
    }

    pub fn local_rpc_endpoint(&self) -> NodeEndpoint {
        // Offsets are checked for every node in `new`.
        let node = self.local_endpoint();
        NodeEndpoint::new(
            node.host.clone(),
            node.port.saturating_add(self.rpc_port_offset),
        )
    }
}

/// Command line options for running one cache node.
#[derive(Parser, Debug)]
#[command(name = "partitioned-cache", version, about)]
pub struct NodeArgs {
    /// Index of this node in `--nodes`.
    #[arg(long, env = "CACHE_NODE_INDEX", default_value_t = 0)]
    pub index: usize,

    /// Comma-separated client-facing addresses, identical on every node.
    #[arg(
        long,
        env = "CACHE_NODES",
        value_delimiter = ',',
        default_values = DEFAULT_NODES
    )]
    pub nodes: Vec<NodeEndpoint>,

    /// Added to a node's client port to get its peer-facing port.
    #[arg(long, env = "CACHE_RPC_PORT_OFFSET", default_value_t = DEFAULT_RPC_PORT_OFFSET)]
    pub rpc_port_offset: u16,

    #[arg(long, env = "CACHE_CONNECT_TIMEOUT_MS", default_value_t = 1000)]
    pub connect_timeout_ms: u64,

    /// Upper bound for one forwarded call, connect included.
    #[arg(long, env = "CACHE_FORWARD_TIMEOUT_MS", default_value_t = 5000)]
    pub forward_timeout_ms: u64,

    /// Interval of the local stats log line. `0` disables it.
    #[arg(long, env = "CACHE_STATS_INTERVAL_SECS", default_value_t = 30)]
    pub stats_interval_secs: u64,

    #[arg(long, short)]
    pub verbose: bool,
}

impl NodeArgs {
    pub fn cluster_config(&self) -> Result<ClusterConfig, ConfigError> {
        Ok(
            ClusterConfig::new(self.nodes.clone(), self.index, self.rpc_port_offset)?
                .with_timeouts(
                    Duration::from_millis(self.connect_timeout_ms),
                    Duration::from_millis(self.forward_timeout_ms),
                ),
        )
    }
}

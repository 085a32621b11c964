//! Peer Network Protocol
//!
//! Defines the RPC endpoints and Data Transfer Objects (DTOs) of the
//! peer-facing Node Service surface.
//!
//! Every call is a JSON `POST` to the owner's peer port. A node only ever
//! calls these when it received a client request for a key it does not own.

use serde::{Deserialize, Serialize};

// --- RPC Endpoints ---

/// Reads one key from the callee's local store.
pub const ENDPOINT_RPC_GET: &str = "/rpc/get";
/// Writes one key into the callee's local store.
pub const ENDPOINT_RPC_SET: &str = "/rpc/set";
/// Removes one key from the callee's local store.
pub const ENDPOINT_RPC_DELETE: &str = "/rpc/delete";
/// Local entry count of the callee (diagnostics only, never forwarded).
pub const ENDPOINT_RPC_STATS: &str = "/rpc/stats";

// --- Data Transfer Objects ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetRequest {
    pub key: String,
}

/// Result of a read. A miss is `found: false` with an empty `value`,
/// never an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetResponse {
    pub value: String,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetRequest {
    pub key: String,
    pub value: String,
}

/// Acknowledgement only.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SetResponse {}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteRequest {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    /// 0 if the key was absent, 1 if it was removed.
    pub deleted_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub node_index: usize,
    pub entries: usize,
}

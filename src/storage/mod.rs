//! Node Storage Module
//!
//! Everything one node needs to hold and serve the keys it owns.
//!
//! ## Core Concepts
//! - **Partitioning**: `owner_of` maps every key to exactly one node index with a stable FNV-1a hash.
//! - **Local Store**: `LocalStore` is the per-node table; each operation is atomic per key.
//! - **Node Service**: `NodeService` wraps the store with Get/Set/Delete request/response contracts.
//! - **Peer Surface**: `handlers` expose the Node Service to other nodes as JSON RPC endpoints.

pub mod handlers;
pub mod memory;
pub mod partitioner;
pub mod protocol;
pub mod service;

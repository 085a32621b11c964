use crate::config::ClusterConfig;
use std::sync::Arc;

const FNV_OFFSET_BASIS: u32 = 0x811c9dc5;
const FNV_PRIME: u32 = 0x01000193;

/// 32-bit FNV-1a over the raw key bytes. Must be identical on every node.
pub fn key_hash(key: &str) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for b in key.bytes() {
        hash ^= b as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Index of the node owning `key` in a cluster of `node_count` nodes.
///
/// Panics if `node_count` is zero; a validated [`ClusterConfig`] never has an
/// empty node list.
pub fn owner_of(key: &str, node_count: usize) -> usize {
    assert!(node_count > 0, "owner_of called with an empty cluster");
    (key_hash(key) as usize) % node_count
}

/// Static partition map bound to this node's view of the cluster.
#[derive(Debug, Clone)]
pub struct PartitionMap {
    config: Arc<ClusterConfig>,
}

impl PartitionMap {
    pub fn new(config: Arc<ClusterConfig>) -> Self {
        Self { config }
    }

    pub fn owner_of(&self, key: &str) -> usize {
        owner_of(key, self.config.node_count())
    }

    pub fn is_local(&self, key: &str) -> bool {
        self.owner_of(key) == self.config.node_index()
    }
}

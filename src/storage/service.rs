use super::memory::LocalStore;
use super::protocol::*;

/// Request/response facade over one node's [`LocalStore`].
///
/// This is the unit peers address over the RPC surface, and the one the local
/// router calls for keys this node owns. It exclusively owns the store.
#[derive(Debug)]
pub struct NodeService {
    node_index: usize,
    store: LocalStore,
}

impl NodeService {
    pub fn new(node_index: usize) -> Self {
        Self {
            node_index,
            store: LocalStore::new(),
        }
    }

    pub fn get(&self, req: GetRequest) -> GetResponse {
        match self.store.get(&req.key) {
            Some(value) => GetResponse { value, found: true },
            None => GetResponse {
                value: String::new(),
                found: false,
            },
        }
    }

    pub fn set(&self, req: SetRequest) -> SetResponse {
        self.store.set(req.key, req.value);
        SetResponse {}
    }

    pub fn delete(&self, req: DeleteRequest) -> DeleteResponse {
        DeleteResponse {
            deleted_count: self.store.delete(&req.key),
        }
    }

    pub fn stats(&self) -> StatsResponse {
        StatsResponse {
            node_index: self.node_index,
            entries: self.store.len(),
        }
    }
}

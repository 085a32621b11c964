use std::sync::Arc;

use super::forwarder::Forwarder;
use super::types::{ForwardError, Route};
use crate::config::ClusterConfig;
use crate::storage::partitioner::PartitionMap;
use crate::storage::protocol::*;
use crate::storage::service::NodeService;

/// Decides, per key, whether this node serves a request or forwards it.
///
/// Local requests go straight to the [`NodeService`]; everything else goes
/// through the [`Forwarder`] to the owning node. Either way the caller gets
/// the same Node Service response types back.
pub struct CacheRouter {
    partitions: PartitionMap,
    service: Arc<NodeService>,
    forwarder: Forwarder,
}

impl CacheRouter {
    pub fn new(config: Arc<ClusterConfig>, service: Arc<NodeService>) -> Result<Self, ForwardError> {
        let forwarder = Forwarder::new(config.clone())?;
        Ok(Self {
            partitions: PartitionMap::new(config),
            service,
            forwarder,
        })
    }

    pub fn route(&self, key: &str) -> Route {
        if self.partitions.is_local(key) {
            Route::Local
        } else {
            Route::Remote(self.partitions.owner_of(key))
        }
    }

    pub async fn get(&self, key: String) -> Result<GetResponse, ForwardError> {
        let req = GetRequest { key };
        match self.route(&req.key) {
            Route::Local => Ok(self.service.get(req)),
            Route::Remote(owner) => self.forwarder.get(owner, req).await,
        }
    }

    pub async fn set(&self, key: String, value: String) -> Result<SetResponse, ForwardError> {
        let req = SetRequest { key, value };
        match self.route(&req.key) {
            Route::Local => Ok(self.service.set(req)),
            Route::Remote(owner) => self.forwarder.set(owner, req).await,
        }
    }

    pub async fn delete(&self, key: String) -> Result<DeleteResponse, ForwardError> {
        let req = DeleteRequest { key };
        match self.route(&req.key) {
            Route::Local => Ok(self.service.delete(req)),
            Route::Remote(owner) => self.forwarder.delete(owner, req).await,
        }
    }
}

//! Node Server
//!
//! Wires one node together: a single [`NodeService`] shared by the peer-facing
//! RPC surface and the client-facing router, each on its own listener.

use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::config::ClusterConfig;
use crate::routing::handlers::{
    handle_delete, handle_delete_root, handle_get, handle_get_root, handle_method_not_allowed,
    handle_set,
};
use crate::routing::router::CacheRouter;
use crate::routing::types::ForwardError;
use crate::storage::handlers::{handle_rpc_delete, handle_rpc_get, handle_rpc_set, handle_rpc_stats};
use crate::storage::protocol::*;
use crate::storage::service::NodeService;

/// Client-facing routes. Methods other than the ones listed answer 405.
pub fn client_app(router: Arc<CacheRouter>) -> Router {
    Router::new()
        .route(
            "/",
            post(handle_set)
                .get(handle_get_root)
                .head(handle_method_not_allowed)
                .delete(handle_delete_root),
        )
        .route(
            "/*key",
            get(handle_get)
                .head(handle_method_not_allowed)
                .delete(handle_delete),
        )
        .layer(Extension(router))
}

/// Peer-facing Node Service routes.
pub fn rpc_app(service: Arc<NodeService>) -> Router {
    Router::new()
        .route(ENDPOINT_RPC_GET, post(handle_rpc_get))
        .route(ENDPOINT_RPC_SET, post(handle_rpc_set))
        .route(ENDPOINT_RPC_DELETE, post(handle_rpc_delete))
        .route(ENDPOINT_RPC_STATS, get(handle_rpc_stats))
        .layer(Extension(service))
}

pub struct CacheNode {
    config: Arc<ClusterConfig>,
    service: Arc<NodeService>,
    router: Arc<CacheRouter>,
}

impl CacheNode {
    pub fn new(config: ClusterConfig) -> Result<Self, ForwardError> {
        let config = Arc::new(config);
        let service = Arc::new(NodeService::new(config.node_index()));
        let router = Arc::new(CacheRouter::new(config.clone(), service.clone())?);

        Ok(Self {
            config,
            service,
            router,
        })
    }

    pub fn service(&self) -> Arc<NodeService> {
        self.service.clone()
    }

    /// Binds the client-facing and peer-facing listeners of this node.
    pub async fn bind(&self) -> std::io::Result<(TcpListener, TcpListener)> {
        let client = TcpListener::bind(self.config.local_endpoint().to_string()).await?;
        let rpc = TcpListener::bind(self.config.local_rpc_endpoint().to_string()).await?;
        Ok((client, rpc))
    }

    /// Serves both surfaces until `shutdown` resolves or one of them fails.
    pub async fn serve<F>(
        self,
        client_listener: TcpListener,
        rpc_listener: TcpListener,
        shutdown: F,
    ) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, stop_rx) = watch::channel(());
        tokio::spawn(async move {
            shutdown.await;
            let _ = stop_tx.send(());
        });

        tracing::info!(
            "Node {} serving clients on {} and peers on {}",
            self.config.node_index(),
            client_listener.local_addr()?,
            rpc_listener.local_addr()?
        );

        let client = axum::serve(client_listener, client_app(self.router.clone()))
            .with_graceful_shutdown(stopped(stop_rx.clone()));
        let rpc = axum::serve(rpc_listener, rpc_app(self.service.clone()))
            .with_graceful_shutdown(stopped(stop_rx));

        tokio::try_join!(
            async { client.await },
            async { rpc.await }
        )?;

        tracing::info!("Node {} stopped", self.config.node_index());
        Ok(())
    }
}

async fn stopped(mut rx: watch::Receiver<()>) {
    let _ = rx.changed().await;
}

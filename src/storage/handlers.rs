use axum::{Json, extract::Extension, http::StatusCode};
use std::sync::Arc;

use super::protocol::{
    DeleteRequest, DeleteResponse, GetRequest, GetResponse, SetRequest, SetResponse,
    StatsResponse,
};
use super::service::NodeService;

// Peer-facing handlers. Callers already decided this node owns the key, so
// none of these route again.

pub async fn handle_rpc_get(
    Extension(service): Extension<Arc<NodeService>>,
    Json(req): Json<GetRequest>,
) -> (StatusCode, Json<GetResponse>) {
    tracing::debug!("RPC get: {}", req.key);
    (StatusCode::OK, Json(service.get(req)))
}

pub async fn handle_rpc_set(
    Extension(service): Extension<Arc<NodeService>>,
    Json(req): Json<SetRequest>,
) -> (StatusCode, Json<SetResponse>) {
    tracing::debug!("RPC set: {}", req.key);
    (StatusCode::OK, Json(service.set(req)))
}

pub async fn handle_rpc_delete(
    Extension(service): Extension<Arc<NodeService>>,
    Json(req): Json<DeleteRequest>,
) -> (StatusCode, Json<DeleteResponse>) {
    tracing::debug!("RPC delete: {}", req.key);
    (StatusCode::OK, Json(service.delete(req)))
}

pub async fn handle_rpc_stats(
    Extension(service): Extension<Arc<NodeService>>,
) -> (StatusCode, Json<StatsResponse>) {
    (StatusCode::OK, Json(service.stats()))
}

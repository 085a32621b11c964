use axum::{
    Json,
    body::Bytes,
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::sync::Arc;

use super::router::CacheRouter;
use super::types::{ForwardError, WriteRequest};

const INTERNAL_ERROR_BODY: &str = "internal error";

fn forward_failure(op: &str, key: &str, err: ForwardError) -> Response {
    tracing::error!("Failed to {} '{}': {}", op, key, err);
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
}

/// `GET /<key>`: `200 {"<key>": "<value>"}` or `404`.
pub async fn handle_get(
    Extension(router): Extension<Arc<CacheRouter>>,
    Path(key): Path<String>,
) -> Response {
    read_key(&router, key).await
}

/// `GET /`: a read of the empty key, which is never stored.
pub async fn handle_get_root(Extension(router): Extension<Arc<CacheRouter>>) -> Response {
    read_key(&router, String::new()).await
}

async fn read_key(router: &CacheRouter, key: String) -> Response {
    tracing::debug!("Received GET request for '{}'", key);

    match router.get(key.clone()).await {
        Ok(res) if res.found => {
            let body: HashMap<String, String> = HashMap::from([(key, res.value)]);
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(_) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => forward_failure("get", &key, e),
    }
}

/// `POST /` with `{"<key>": "<value>"}`: `200` with no body, or `400`.
pub async fn handle_set(Extension(router): Extension<Arc<CacheRouter>>, body: Bytes) -> Response {
    let req = match WriteRequest::from_body(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!("Rejected POST request: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    tracing::debug!("Received POST request for '{}'", req.key);

    let key = req.key.clone();
    match router.set(req.key, req.value).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => forward_failure("set", &key, e),
    }
}

/// `DELETE /<key>`: `200 <count>`.
pub async fn handle_delete(
    Extension(router): Extension<Arc<CacheRouter>>,
    Path(key): Path<String>,
) -> Response {
    delete_key(&router, key).await
}

/// `DELETE /`: always `200 0`, the empty key is never stored.
pub async fn handle_delete_root(Extension(router): Extension<Arc<CacheRouter>>) -> Response {
    delete_key(&router, String::new()).await
}

async fn delete_key(router: &CacheRouter, key: String) -> Response {
    tracing::debug!("Received DELETE request for '{}'", key);

    match router.delete(key.clone()).await {
        Ok(res) => (StatusCode::OK, Json(res.deleted_count)).into_response(),
        Err(e) => forward_failure("delete", &key, e),
    }
}

/// Registered for HEAD, which axum would otherwise serve with the GET handler.
pub async fn handle_method_not_allowed() -> StatusCode {
    StatusCode::METHOD_NOT_ALLOWED
}

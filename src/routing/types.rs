use std::collections::HashMap;
use std::time::Duration;

/// Why a forwarded call failed. Clients only ever see a generic 500 for any of these.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("node {0} is not part of the cluster")]
    UnknownNode(usize),
    #[error("failed to connect to node {node} at {addr}: {source}")]
    Connect {
        node: usize,
        addr: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("call to node {node} timed out after {timeout:?}")]
    Timeout { node: usize, timeout: Duration },
    #[error("node {node} answered {status}")]
    Status {
        node: usize,
        status: reqwest::StatusCode,
    },
    #[error("invalid response from node {node}: {source}")]
    Decode {
        node: usize,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to node {node} failed: {source}")]
    Transport {
        node: usize,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to build peer client: {0}")]
    Client(#[source] reqwest::Error),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WriteRequestError {
    #[error("body is not a JSON object of string values: {0}")]
    InvalidBody(String),
    #[error("body must contain exactly one key, got {0}")]
    WrongEntryCount(usize),
    #[error("key must not be empty")]
    EmptyKey,
}

/// A decoded client write: exactly one key and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRequest {
    pub key: String,
    pub value: String,
}

impl WriteRequest {
    /// Decodes a `{"key": "value"}` body.
    ///
    /// Bodies with zero or several pairs are rejected instead of picking one.
    pub fn from_body(body: &[u8]) -> Result<Self, WriteRequestError> {
        let data: HashMap<String, String> = serde_json::from_slice(body)
            .map_err(|e| WriteRequestError::InvalidBody(e.to_string()))?;

        if data.len() != 1 {
            return Err(WriteRequestError::WrongEntryCount(data.len()));
        }

        let Some((key, value)) = data.into_iter().next() else {
            return Err(WriteRequestError::WrongEntryCount(0));
        };
        if key.is_empty() {
            return Err(WriteRequestError::EmptyKey);
        }

        Ok(Self { key, value })
    }
}

/// Where a key is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Local,
    Remote(usize),
}

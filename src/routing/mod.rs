//! Request Routing Module
//!
//! The client-facing half of a node. Any node accepts a request for any key;
//! this module makes the cluster look like one cache.
//!
//! ## Flow
//! - **Router**: `CacheRouter` computes the owner of the key and serves it locally or forwards it.
//! - **Forwarder**: `Forwarder` makes exactly one bounded RPC call to the owner's Node Service.
//! - **Client Surface**: `handlers` translate HTTP requests into router calls and results back into
//!   status codes. Forwarding failures surface as a generic 500.

pub mod forwarder;
pub mod handlers;
pub mod router;
pub mod types;

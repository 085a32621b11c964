//! Partitioned Cache Library
//!
//! A horizontally partitioned, in-memory key-value cache. A fixed list of nodes
//! owns the key space together; every key lives on exactly one node, and any
//! node accepts requests for any key, forwarding them to the owner when needed.
//!
//! ## Modules
//! - **`config`**: The immutable cluster view (node list, own index, peer port offset, timeouts)
//!   and the command line options it is built from.
//! - **`storage`**: Key ownership (`owner_of`), the per-node `LocalStore`, and the `NodeService`
//!   exposed to peers over a JSON RPC surface.
//! - **`routing`**: The client-facing `CacheRouter` and the `Forwarder` that relays requests
//!   to the owning node.
//! - **`server`**: Runs both surfaces of one node on their own listeners.

pub mod config;
pub mod routing;
pub mod server;
pub mod storage;

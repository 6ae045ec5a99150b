//! Network Module
//!
//! HTTP server hosting the task API.
//!
//! ## Architecture
//! - Tokio listener, one task per connection
//! - Store calls run on the blocking pool, one per request
//! - Graceful shutdown drains in-flight requests

mod server;

pub use server::{shutdown_signal, Server};

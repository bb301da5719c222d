pub use client::*;
pub use config::*;
pub use stream_factory::*;
pub use write::*;

/// HTTP and HTTPS client.
mod client;
/// Config for client.
mod config;
/// Stream factories for opening new connections to a server.
mod stream_factory;
/// Serializing requests onto a connection.
mod write;

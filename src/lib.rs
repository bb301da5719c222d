/// Pluggable logging with feature-gated level macros.
#[macro_use]
pub mod log;
/// HTTP data types: headers, methods, requests, body publishers and responses.
pub mod common;
/// Components for communicating with an HTTP server.
pub mod client;
/// Components for parsing HTTP responses.
pub mod parse;

/// Utility components.
pub(crate) mod util;

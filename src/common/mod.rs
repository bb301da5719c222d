/// The only HTTP version this client speaks.
pub const HTTP_VERSION: &str = "HTTP/1.1";
/// Version token accepted in a response status line besides `HTTP_VERSION`. Nothing beyond the token is supported.
pub const HTTP_2_VERSION: &str = "HTTP/2.0";

/// Errors raised while building a request.
pub mod error;
/// HTTP header table and frozen header snapshots.
pub mod header;
/// HTTP method data type.
pub mod method;
/// Request body publishers.
pub mod body;
/// HTTP request data type and builder.
pub mod request;
/// HTTP response data type and body handlers.
pub mod response;

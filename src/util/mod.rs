/// TLS stream that closes its session when dropped.
pub mod tls_stream;

#[cfg(test)]
pub mod mock;

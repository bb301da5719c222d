use std::sync::Arc;

use rustls::ClientConfig;

/// Redirect policy of a client. Stored but never acted on: redirects are not followed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Redirect {
    Always,
    #[default]
    Never,
    Normal,
}

/// The config for an HTTP client.
#[derive(Clone, Default)]
pub struct Config {
    /// Redirect policy.
    pub follow_redirects: Redirect,
    /// Config for TLS encryption used for "https" URIs. If this is not set then a config trusting
    /// the Mozilla root certificates is used.
    pub tls_config: Option<Arc<ClientConfig>>,
}

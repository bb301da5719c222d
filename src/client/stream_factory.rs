use std::io::{Error, ErrorKind, Read, Write};
use std::net::TcpStream;
use std::sync::Arc;

use rustls::ClientConfig;
use url::Url;

use crate::util::tls_stream::{default_tls_config, TlsStream};

/// A byte stream a request can be written to and a response read from.
pub trait Transport: Read + Write + Send {}

impl<T: Read + Write + Send> Transport for T {}

/// A factory that opens new streams to the server a URI points at.
pub trait StreamFactory<T>: Send + Sync {
    fn create(&self, uri: &Url) -> std::io::Result<T>;
}

/// A stream factory for producing plain TCP streams.
#[derive(Debug, Copy, Clone, Default)]
pub struct TcpStreamFactory;

impl StreamFactory<TcpStream> for TcpStreamFactory {
    fn create(&self, uri: &Url) -> std::io::Result<TcpStream> {
        let host = host(uri)?;
        let port = uri.port_or_known_default()
            .ok_or_else(|| Error::new(ErrorKind::InvalidInput, format!("no port for {}", uri)))?;

        TcpStream::connect((host, port))
    }
}

/// A stream factory for producing TLS encrypted streams to a server.
pub struct TlsStreamFactory {
    tcp_stream_factory: TcpStreamFactory,
    tls_config: Arc<ClientConfig>,
}

impl TlsStreamFactory {
    /// Creates a new TLS stream factory with the given config.
    pub fn new(tls_config: Arc<ClientConfig>) -> TlsStreamFactory {
        TlsStreamFactory { tcp_stream_factory: TcpStreamFactory, tls_config }
    }
}

impl StreamFactory<TlsStream> for TlsStreamFactory {
    fn create(&self, uri: &Url) -> std::io::Result<TlsStream> {
        let stream = self.tcp_stream_factory.create(uri)?;
        TlsStream::new(stream, &self.tls_config, host(uri)?)
    }
}

/// A stream factory that uses TLS for "https" URIs and plain TCP for everything else.
pub struct SchemeStreamFactory {
    tcp: TcpStreamFactory,
    tls: TlsStreamFactory,
}

impl SchemeStreamFactory {
    /// Creates a new factory. If no TLS config is given, the Mozilla root certificates are trusted.
    pub fn new(tls_config: Option<Arc<ClientConfig>>) -> SchemeStreamFactory {
        let tls_config = tls_config.unwrap_or_else(|| Arc::new(default_tls_config()));
        SchemeStreamFactory { tcp: TcpStreamFactory, tls: TlsStreamFactory::new(tls_config) }
    }
}

impl StreamFactory<Box<dyn Transport>> for SchemeStreamFactory {
    fn create(&self, uri: &Url) -> std::io::Result<Box<dyn Transport>> {
        if uri.scheme() == "https" {
            Ok(Box::new(self.tls.create(uri)?))
        } else {
            Ok(Box::new(self.tcp.create(uri)?))
        }
    }
}

fn host(uri: &Url) -> std::io::Result<&str> {
    uri.host_str().ok_or_else(|| Error::new(ErrorKind::InvalidInput, format!("no host in {}", uri)))
}

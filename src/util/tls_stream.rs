use std::io::{Error, ErrorKind, Read, Result, Write};
use std::net::TcpStream;
use std::sync::Arc;

use rustls::{ClientConfig, ClientSession, Session, StreamOwned};

/// A client TLS session running over a TCP stream. Currently uses Rustls under the hood.
/// When dropped, a close_notify alert is sent so the server sees the connection end properly.
pub struct TlsStream(StreamOwned<ClientSession, TcpStream>);

impl TlsStream {
    /// Starts a TLS session with the given host over an already connected TCP stream.
    /// The handshake happens lazily on the first read or write.
    pub fn new(inner: TcpStream, tls_config: &Arc<ClientConfig>, host: &str) -> Result<TlsStream> {
        let dns_name = webpki::DNSNameRef::try_from_ascii_str(host)
            .map_err(|_| Error::new(ErrorKind::InvalidInput, format!("invalid DNS name: {}", host)))?;
        let session = ClientSession::new(tls_config, dns_name);
        Ok(TlsStream(StreamOwned::new(session, inner)))
    }
}

/// Gets a client TLS config trusting the Mozilla root certificates.
pub fn default_tls_config() -> ClientConfig {
    let mut config = ClientConfig::new();
    config.root_store.add_server_trust_anchors(&webpki_roots::TLS_SERVER_ROOTS);
    config
}

impl Read for TlsStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.0.read(buf)
    }
}

impl Write for TlsStream {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> Result<()> {
        self.0.flush()
    }
}

impl Drop for TlsStream {
    fn drop(&mut self) {
        self.0.sess.send_close_notify();
        self.0.flush().unwrap_or_default();
    }
}

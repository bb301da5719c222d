use std::fmt::{Display, Formatter};
use std::io::{BufReader, BufWriter, Error, Read, Write};
use std::marker::PhantomData;
use std::sync::Arc;

use rustls::ClientConfig;

use crate::client::config::{Config, Redirect};
use crate::client::stream_factory::{SchemeStreamFactory, StreamFactory, Transport};
use crate::client::write::write_request;
use crate::common::request::Request;
use crate::common::response::{BodyHandler, Response};
pub use crate::parse::error::ParsingError;
use crate::parse::read_response;

/// Client for making HTTP requests. Every request is sent on a new connection that is closed
/// once the response has been read.
pub struct Client<S = Box<dyn Transport>, F = SchemeStreamFactory> {
    /// The config the client uses.
    pub config: Config,
    /// Factory for opening connections.
    stream_factory: F,
    _stream: PhantomData<fn() -> S>,
}

/// Error when making an HTTP request.
#[derive(Debug)]
pub enum RequestError {
    /// Error opening a connection to the server.
    Connecting(Error),
    /// Error sending the request to the server.
    Sending(Error),
    /// Error with parsing the response received from the server.
    ParsingResponse(ParsingError),
}

impl From<ParsingError> for RequestError {
    fn from(err: ParsingError) -> Self {
        RequestError::ParsingResponse(err)
    }
}

impl Display for RequestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::Connecting(err) => write!(f, "failed to connect: {}", err),
            RequestError::Sending(err) => write!(f, "failed to send request: {}", err),
            RequestError::ParsingResponse(err) => write!(f, "failed to parse response: {}", err),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Connecting(err) | RequestError::Sending(err) => Some(err),
            RequestError::ParsingResponse(err) => Some(err),
        }
    }
}

impl Client {
    /// Creates a new client with the given config, using TLS for "https" URIs and plain TCP otherwise.
    pub fn new(config: Config) -> Client {
        let stream_factory = SchemeStreamFactory::new(config.tls_config.clone());
        Client::with_stream_factory(config, stream_factory)
    }

    /// Creates a builder for a client with the default config.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }
}

impl<S: Read + Write, F: StreamFactory<S>> Client<S, F> {
    /// Creates a new client that opens its connections with the given factory.
    pub fn with_stream_factory(config: Config, stream_factory: F) -> Client<S, F> {
        Client { config, stream_factory, _stream: PhantomData }
    }

    /// Sends the request on a new connection and reads the response, handing its body to the
    /// handler. The connection is closed before this returns, whether or not it succeeded.
    pub fn send<H: BodyHandler>(&self, request: Request, handler: H) -> Result<Response<H::Output>, RequestError> {
        let method = request.method();
        let uri = request.uri().clone();

        let mut stream = self.stream_factory.create(&uri).map_err(|err| {
            error!("Error connecting to {}: {}", uri, err);
            RequestError::Connecting(err)
        })?;
        debug!("Opened connection to {}", uri);

        write(&mut stream, request).map_err(|err| {
            error!("Error sending {} request to {}: {}", method, uri, err);
            RequestError::Sending(err)
        })?;
        info!("Sent {} request to {}", method, uri);

        let response = read_response(&mut BufReader::new(&mut stream), handler).map_err(|err| {
            error!("Error reading response from {}: {}", uri, err);
            err
        })?;
        info!("Received {} {} from {}", response.version(), response.status_code(), uri);

        drop(stream);
        debug!("Closed connection to {}", uri);

        Ok(response)
    }
}

/// Writes the request through a buffer and flushes it to the stream.
fn write(stream: &mut impl Write, request: Request) -> std::io::Result<()> {
    let mut writer = BufWriter::new(stream);
    write_request(&mut writer, request)?;
    writer.flush()
}

/// Builder for a `Client`.
#[derive(Default)]
pub struct ClientBuilder {
    config: Config,
}

impl ClientBuilder {
    /// Sets the redirect policy. Redirects are never followed regardless of the policy.
    pub fn follow_redirects(mut self, policy: Redirect) -> ClientBuilder {
        self.config.follow_redirects = policy;
        self
    }

    /// Sets the TLS config used for "https" URIs.
    pub fn tls_config(mut self, tls_config: ClientConfig) -> ClientBuilder {
        self.config.tls_config = Some(Arc::new(tls_config));
        self
    }

    pub fn build(self) -> Client {
        Client::new(self.config)
    }
}

use url::Url;

use crate::common::body::BodyPublisher;
use crate::common::error::BuildError;
use crate::common::header::{ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION, CONTENT_LENGTH, HeaderTable, Headers, HOST, UPGRADE_INSECURE_REQUESTS, USER_AGENT};
use crate::common::method::Method;

/// Value of the User-Agent header sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("scratch-http/", env!("CARGO_PKG_VERSION"));

/// Headers added whenever a URI is set on a builder, besides Host and User-Agent.
const DEFAULT_HEADERS: [(&str, &str); 5] = [
    (ACCEPT, "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8"),
    (ACCEPT_LANGUAGE, "en-US,en;q=0.5"),
    (ACCEPT_ENCODING, "identity"),
    (CONNECTION, "close"),
    (UPGRADE_INSECURE_REQUESTS, "1"),
];

/// An HTTP request. Can only be made with a `RequestBuilder` and can't be changed afterwards.
#[derive(Debug)]
pub struct Request {
    method: Method,
    uri: Url,
    headers: Headers,
    body: BodyPublisher,
}

impl Request {
    /// Creates a builder with no URI set yet.
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Creates a builder targeting the given URI.
    pub fn new_builder(uri: Url) -> Result<RequestBuilder, BuildError> {
        Request::builder().uri(uri)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &BodyPublisher {
        &self.body
    }

    /// Splits the request into its parts for transmission.
    pub(crate) fn into_parts(self) -> (Method, Url, Headers, BodyPublisher) {
        (self.method, self.uri, self.headers, self.body)
    }
}

/// Builder for a `Request`.
#[derive(Debug, Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    uri: Option<Url>,
    headers: HeaderTable,
    body: BodyPublisher,
}

impl RequestBuilder {
    /// Sets the target URI, then adds the Host header and the default headers.
    /// Setting a URI more than once adds the headers again.
    pub fn uri(mut self, uri: Url) -> Result<RequestBuilder, BuildError> {
        check_scheme(&uri)?;
        self.headers.add(HOST, authority(&uri));
        for (name, value) in DEFAULT_HEADERS.iter() {
            self.headers.add(*name, *value);
        }
        self.headers.add(USER_AGENT, USER_AGENT_VALUE);
        self.uri = Some(uri);
        Ok(self)
    }

    pub fn get(self) -> RequestBuilder {
        self.without_body(Method::Get)
    }

    pub fn delete(self) -> RequestBuilder {
        self.without_body(Method::Delete)
    }

    pub fn post(self, body: BodyPublisher) -> RequestBuilder {
        self.with_body(Method::Post, body)
    }

    pub fn put(self, body: BodyPublisher) -> RequestBuilder {
        self.with_body(Method::Put, body)
    }

    /// Adds a value to a header.
    pub fn header(mut self, name: &str, value: &str) -> Result<RequestBuilder, BuildError> {
        check_not_restricted(name)?;
        self.headers.add(name, value);
        Ok(self)
    }

    /// Sets a header to a single value, discarding the values it had.
    pub fn set_header(mut self, name: &str, value: &str) -> Result<RequestBuilder, BuildError> {
        check_not_restricted(name)?;
        self.headers.replace(name, value);
        Ok(self)
    }

    /// Adds headers from a flat list of alternating names and values.
    pub fn headers(self, pairs: &[&str]) -> Result<RequestBuilder, BuildError> {
        if pairs.len() % 2 != 0 {
            return Err(BuildError::OddHeaderCount(pairs.len()));
        }

        pairs.chunks(2).try_fold(self, |builder, pair| builder.header(pair[0], pair[1]))
    }

    /// Finishes the request. Uses GET if no method was set.
    pub fn build(self) -> Result<Request, BuildError> {
        let uri = self.uri.ok_or(BuildError::UriNotSet)?;

        Ok(Request {
            method: self.method.unwrap_or(Method::Get),
            uri,
            headers: self.headers.freeze(),
            body: self.body,
        })
    }

    fn without_body(mut self, method: Method) -> RequestBuilder {
        self.method = Some(method);
        self.body = BodyPublisher::NoBody;
        self.headers.remove(CONTENT_LENGTH);
        self
    }

    fn with_body(mut self, method: Method, body: BodyPublisher) -> RequestBuilder {
        self.method = Some(method);
        self.headers.replace(CONTENT_LENGTH, body.content_length().to_string());
        self.body = body;
        self
    }
}

fn check_scheme(uri: &Url) -> Result<(), BuildError> {
    let raw = uri.as_str();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        Ok(())
    } else {
        Err(BuildError::InvalidScheme(raw.to_string()))
    }
}

fn check_not_restricted(name: &str) -> Result<(), BuildError> {
    if name == CONTENT_LENGTH {
        return Err(BuildError::RestrictedHeader(name.to_string()));
    }
    Ok(())
}

/// Host of the URI, with the port if one is given explicitly.
fn authority(uri: &Url) -> String {
    let host = uri.host_str().unwrap_or_default();
    match uri.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}

/// Host header.
pub const HOST: &str = "Host";
/// Accept header.
pub const ACCEPT: &str = "Accept";
/// Accept-Language header.
pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
/// Accept-Encoding header.
pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
/// Connection header.
pub const CONNECTION: &str = "Connection";
/// Upgrade-Insecure-Requests header.
pub const UPGRADE_INSECURE_REQUESTS: &str = "Upgrade-Insecure-Requests";
/// User-Agent header.
pub const USER_AGENT: &str = "User-Agent";
/// Content-Length header. Only the body publishing logic may set it.
pub const CONTENT_LENGTH: &str = "Content-Length";
/// Content-Type header.
pub const CONTENT_TYPE: &str = "Content-Type";

/// A multimap of header names to values.
/// Names are kept exactly as given, no case folding is done. Keys keep the order they were first
/// added in, and values keep the order they were added under their key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    entries: Vec<(String, Vec<String>)>,
}

impl HeaderTable {
    /// Creates an empty table.
    pub fn new() -> HeaderTable {
        HeaderTable::default()
    }

    /// Gets a header table from the given vector of header name and value pairs.
    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: Vec<(K, V)>) -> HeaderTable {
        pairs.into_iter().fold(HeaderTable::new(), |mut table, (name, value)| {
            table.add(name, value);
            table
        })
    }

    /// Appends a value to the values of the given header.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(i) => self.entries[i].1.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// Discards all values of the given header and sets it to the single given value.
    pub fn replace(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let values = vec![value.into()];
        match self.position(&name) {
            Some(i) => self.entries[i].1 = values,
            None => self.entries.push((name, values)),
        }
    }

    /// Removes the given header and all of its values.
    pub(crate) fn remove(&mut self, name: &str) {
        self.entries.retain(|(k, _)| k != name);
    }

    /// Gets all values of the given header.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.position(name).map(|i| self.entries[i].1.as_slice())
    }

    /// Gets the first value of the given header.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)?.first().map(String::as_str)
    }

    /// Checks if the table contains the given header and corresponding header value.
    pub fn contains_value(&self, name: &str, value: &str) -> bool {
        self.get(name).map(|values| values.iter().any(|v| v == value)).unwrap_or(false)
    }

    /// Iterates over header names and their values.
    pub fn iter(&self) -> impl Iterator<Item=(&str, &[String])> {
        self.entries.iter().map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a read-only copy of the table.
    pub fn snapshot(&self) -> Headers {
        Headers(self.clone())
    }

    /// Turns the table into a read-only one.
    pub fn freeze(self) -> Headers {
        Headers(self)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == name)
    }
}

/// A header table that can no longer be changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(HeaderTable);

impl Headers {
    /// Gets all values of the given header.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(name)
    }

    /// Gets the first value of the given header.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.0.first(name)
    }

    pub fn contains_value(&self, name: &str, value: &str) -> bool {
        self.0.contains_value(name, value)
    }

    pub fn iter(&self) -> impl Iterator<Item=(&str, &[String])> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Hands the table back for the writer, which owns the final Content-Length value.
    pub(crate) fn thaw(self) -> HeaderTable {
        self.0
    }
}

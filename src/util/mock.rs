use std::cmp::min;
use std::io::{Error, ErrorKind, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use url::Url;

use crate::client::StreamFactory;

/// Reader that hands out its data in the given fragments, one fragment at most per read.
pub struct MockReader {
    pub data: Vec<Vec<u8>>
}

impl MockReader {
    pub fn new(data: Vec<&str>) -> MockReader {
        MockReader::from_bytes(data.into_iter().map(|s| s.as_bytes().to_vec()).collect())
    }

    pub fn from_bytes(data: Vec<Vec<u8>>) -> MockReader {
        MockReader { data: data.into_iter().filter(|d| !d.is_empty()).collect() }
    }
}

impl Read for MockReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.data.is_empty() {
            return Ok(0);
        }

        let next = &mut self.data[0];

        let amount = min(buf.len(), next.len());
        buf[..amount].copy_from_slice(&next[..amount]);
        next.drain(0..amount);

        if next.is_empty() {
            self.data.remove(0);
        }

        Ok(amount)
    }
}

/// Writer that records every write, and moves recorded writes to `flushed` on flush.
pub struct MockWriter {
    pub data: Vec<Vec<u8>>,
    pub flushed: Vec<Vec<u8>>,
}

impl MockWriter {
    pub fn new() -> MockWriter {
        MockWriter { data: vec![], flushed: vec![] }
    }

    /// Everything written so far, flushed or not, as one string.
    pub fn written(&self) -> String {
        let bytes: Vec<u8> = self.flushed.iter().chain(self.data.iter()).flatten().copied().collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.data.push(Vec::from(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushed.append(&mut self.data);
        Ok(())
    }
}

/// Writer that fails every write.
pub struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(Error::new(ErrorKind::BrokenPipe, "mock write failure"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// In-memory connection. Reads come from a canned response, writes are recorded in a buffer
/// shared with the test. Dropping the stream marks it closed.
pub struct MockStream {
    reader: MockReader,
    written: Arc<Mutex<Vec<u8>>>,
    closed: Arc<Mutex<bool>>,
}

impl Read for MockStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for MockStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.written.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        *self.closed.lock().unwrap() = true;
    }
}

/// Factory producing a single `MockStream` per call, all answering with the same response.
pub struct MockStreamFactory {
    response: String,
    pub written: Arc<Mutex<Vec<u8>>>,
    pub closed: Arc<Mutex<bool>>,
    pub created_for: Arc<Mutex<Vec<String>>>,
}

impl MockStreamFactory {
    pub fn new(response: &str) -> MockStreamFactory {
        MockStreamFactory {
            response: response.to_string(),
            written: Arc::new(Mutex::new(vec![])),
            closed: Arc::new(Mutex::new(false)),
            created_for: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn written(&self) -> String {
        String::from_utf8_lossy(&self.written.lock().unwrap()).into_owned()
    }
}

impl StreamFactory<MockStream> for MockStreamFactory {
    fn create(&self, uri: &Url) -> std::io::Result<MockStream> {
        self.created_for.lock().unwrap().push(uri.to_string());
        Ok(MockStream {
            reader: MockReader::new(vec![&self.response]),
            written: Arc::clone(&self.written),
            closed: Arc::clone(&self.closed),
        })
    }
}

/// Gets a path in the temp directory unique to this process and call.
pub fn temp_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("scratch_http_{}_{}_{}", std::process::id(), n, name))
}

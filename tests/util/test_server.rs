use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::{JoinHandle, spawn};

/// Starts a server that accepts a single connection, reads one request from it and answers with
/// the given raw response. Returns the server's address and a handle yielding the raw request.
pub fn serve_once(response: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();

    let handle = spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut request = String::new();
        let mut content_length = 0;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            request.push_str(&line);

            if let Some(value) = line.strip_prefix("Content-Length: ") {
                content_length = value.trim().parse().unwrap();
            }

            if line == "\r\n" || line.is_empty() {
                break;
            }
        }

        let mut body = vec![0; content_length];
        reader.read_exact(&mut body).unwrap();
        request.push_str(&String::from_utf8_lossy(&body));

        reader.get_mut().write_all(response.as_bytes()).unwrap();
        request
    });

    (addr, handle)
}

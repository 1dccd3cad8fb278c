//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// State of the mock remote keyword origin.
pub struct OriginState {
    doc: Mutex<(String, String)>,
    hits: AtomicUsize,
    not_modified_hits: AtomicUsize,
}

#[allow(dead_code)]
impl OriginState {
    pub fn new(body: &str, etag: &str) -> Arc<Self> {
        Arc::new(Self {
            doc: Mutex::new((body.to_string(), etag.to_string())),
            hits: AtomicUsize::new(0),
            not_modified_hits: AtomicUsize::new(0),
        })
    }

    /// Replace the served document and its entity tag.
    pub fn set_document(&self, body: &str, etag: &str) {
        *self.doc.lock().unwrap() = (body.to_string(), etag.to_string());
    }

    /// Total requests served.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Requests answered with 304 Not Modified.
    pub fn not_modified_hits(&self) -> usize {
        self.not_modified_hits.load(Ordering::SeqCst)
    }
}

/// Start a mock keyword origin that understands `If-None-Match`.
///
/// Serves the current document with an `ETag` header, or 304 when the
/// request's validator matches.
#[allow(dead_code)]
pub async fn start_keyword_origin(state: Arc<OriginState>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let state = state.clone();
                    tokio::spawn(async move {
                        serve_origin_request(socket, state).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn serve_origin_request(mut socket: TcpStream, state: Arc<OriginState>) {
    let request = match read_request(&mut socket).await {
        Some(req) => req,
        None => return,
    };

    state.hits.fetch_add(1, Ordering::SeqCst);
    let (body, etag) = state.doc.lock().unwrap().clone();

    let response = if header_value(&request, "if-none-match").as_deref() == Some(etag.as_str()) {
        state.not_modified_hits.fetch_add(1, Ordering::SeqCst);
        format!(
            "HTTP/1.1 304 Not Modified\r\nETag: {}\r\nConnection: close\r\n\r\n",
            etag
        )
    } else {
        format!(
            "HTTP/1.1 200 OK\r\nETag: {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            etag,
            body.len(),
            body
        )
    };

    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

/// Start a mock alert webhook sink; received request bodies are pushed to
/// the returned vector.
#[allow(dead_code)]
pub async fn start_webhook_sink() -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));
    let sink = received.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let sink = sink.clone();
                    tokio::spawn(async move {
                        if let Some(request) = read_request(&mut socket).await {
                            sink.lock().unwrap().push(request_body(&request));
                        }
                        let response =
                            "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, received)
}

/// Read one HTTP request (headers plus Content-Length-delimited body).
async fn read_request(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let headers_end = loop {
        if let Some(pos) = find_headers_end(&buf) {
            break pos;
        }
        match socket.read(&mut chunk).await {
            Ok(0) => return None,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(_) => return None,
        }
    };

    let header_text = String::from_utf8_lossy(&buf[..headers_end]).to_string();
    let content_length = header_value(&header_text, "content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    let body_start = headers_end + 4;
    while buf.len() < body_start + content_length {
        match socket.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
            Err(_) => break,
        }
    }

    Some(String::from_utf8_lossy(&buf).to_string())
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn header_value(request: &str, name: &str) -> Option<String> {
    request.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        if key.trim().eq_ignore_ascii_case(name) {
            Some(value.trim().to_string())
        } else {
            None
        }
    })
}

fn request_body(request: &str) -> String {
    match request.split_once("\r\n\r\n") {
        Some((_, body)) => body.to_string(),
        None => String::new(),
    }
}

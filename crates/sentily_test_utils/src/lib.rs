//! Sentily Test Utilities
//!
//! A fake feedback backend for tests: a blocking HTTP/1.1 responder on a
//! `std::net::TcpListener` serving canned JSON per path. Every request is
//! recorded so tests can assert on the query string and headers that were
//! actually sent.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sentily_test_utils::FakeBackend;
//!
//! let backend = FakeBackend::builder()
//!     .json("/api/feedback", serde_json::json!([{"username": "ana"}]))
//!     .status("/api/summary", 500, "{}")
//!     .start()
//!     .unwrap();
//!
//! let base = backend.api_base(); // http://127.0.0.1:PORT/api
//! // ... run the client against `base` ...
//! assert_eq!(backend.requests()[0].path, "/api/feedback");
//! // Server thread stops on drop
//! ```

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

/// Path prefix the fake server mounts the API under.
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
struct Route {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

/// A request as seen by the fake server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: Option<String>,
    /// Header names lower-cased
    pub headers: HashMap<String, String>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Decoded `(key, value)` pairs of the query string, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let query = self.query.as_deref().unwrap_or("");
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct FakeBackendBuilder {
    routes: HashMap<String, Route>,
}

impl FakeBackendBuilder {
    /// Serve `body` with status 200 on `path`.
    pub fn json(self, path: &str, body: Value) -> Self {
        self.status(path, 200, &body.to_string())
    }

    /// Serve a raw body with an arbitrary status on `path`.
    pub fn status(mut self, path: &str, status: u16, body: &str) -> Self {
        self.routes.insert(
            path.to_string(),
            Route {
                status,
                body: body.to_string(),
                delay: None,
            },
        );
        self
    }

    /// Hold the response for `path` back by `delay`.
    pub fn delay(mut self, path: &str, delay: Duration) -> Self {
        if let Some(route) = self.routes.get_mut(path) {
            route.delay = Some(delay);
        }
        self
    }

    pub fn start(self) -> Result<FakeBackend> {
        let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind fake backend")?;
        let port = listener.local_addr()?.port();
        listener
            .set_nonblocking(true)
            .context("Cannot set non-blocking")?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(self.routes);

        let shutdown_flag = shutdown.clone();
        let recorded = requests.clone();
        let handle = thread::spawn(move || {
            while !shutdown_flag.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let routes = routes.clone();
                        let recorded = recorded.clone();
                        thread::spawn(move || {
                            if let Err(e) = serve(stream, &routes, &recorded) {
                                tracing::debug!("fake backend connection error: {:#}", e);
                            }
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(e) => {
                        tracing::warn!("fake backend accept error: {}", e);
                        break;
                    }
                }
            }
        });

        Ok(FakeBackend {
            port,
            shutdown,
            requests,
            handle: Some(handle),
        })
    }
}

/// Running fake backend. Stops when dropped.
#[derive(Debug)]
pub struct FakeBackend {
    port: u16,
    shutdown: Arc<AtomicBool>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl FakeBackend {
    pub fn builder() -> FakeBackendBuilder {
        FakeBackendBuilder::default()
    }

    /// `http://127.0.0.1:PORT`
    pub fn origin(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// `http://127.0.0.1:PORT/api`, suitable as the client's base URL.
    pub fn api_base(&self) -> String {
        format!("{}{}", self.origin(), API_PREFIX)
    }

    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Drop for FakeBackend {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Base URL on which nothing is listening, for connection-refused tests.
pub fn unreachable_api_base() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").context("Failed to bind a free local port")?;
    let port = listener.local_addr()?.port();
    drop(listener);
    Ok(format!("http://127.0.0.1:{}{}", port, API_PREFIX))
}

fn serve(
    mut stream: TcpStream,
    routes: &HashMap<String, Route>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;

    let request = read_request(&stream)?;
    let route = routes.get(&request.path).cloned();
    if let Ok(mut guard) = recorded.lock() {
        guard.push(request);
    }

    let route = route.unwrap_or(Route {
        status: 404,
        body: r#"{"detail":"Not Found"}"#.to_string(),
        delay: None,
    });
    if let Some(delay) = route.delay {
        thread::sleep(delay);
    }

    let response = format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        route.status,
        reason_phrase(route.status),
        route.body.len(),
        route.body
    );
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

fn read_request(stream: &TcpStream) -> Result<RecordedRequest> {
    let mut reader = BufReader::new(stream.try_clone()?);
    let mut request_line = String::new();
    reader.read_line(&mut request_line)?;

    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default();
    let (path, query) = match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.to_string(), None),
    };

    let mut headers = HashMap::new();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 || line == "\r\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
        }
    }

    Ok(RecordedRequest {
        method,
        path,
        query,
        headers,
    })
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    }
}

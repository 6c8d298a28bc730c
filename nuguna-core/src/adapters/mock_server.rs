//! Mock HTTP server for testing
//!
//! Simulates the inference endpoints and the warehouse API without network access.
//! Each route replays a scripted list of replies in order; once one reply is
//! left it is repeated for every further request. Unknown paths get a 404.
//! Every request is recorded so tests can assert on call order, headers and
//! bodies.

use std::collections::{HashMap, VecDeque};
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value as JsonValue};

/// A scripted HTTP reply
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
}

impl MockReply {
    pub fn json(status: u16, body: JsonValue) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn translation(text: &str) -> Self {
        Self::json(200, json!([{ "translation_text": text }]))
    }

    pub fn generated(sql: &str) -> Self {
        Self::json(200, json!([{ "generated_text": sql }]))
    }

    /// Model still loading
    pub fn unavailable() -> Self {
        Self::json(503, json!({ "error": "Model is currently loading" }))
    }
}

/// A request the server received
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: JsonValue,
}

type Routes = Arc<Mutex<HashMap<String, VecDeque<MockReply>>>>;
type Requests = Arc<Mutex<Vec<RecordedRequest>>>;

/// Builder for the mock server's routes
#[derive(Debug, Default)]
pub struct MockServerBuilder {
    routes: HashMap<String, VecDeque<MockReply>>,
}

impl MockServerBuilder {
    pub fn route(mut self, path: &str, replies: Vec<MockReply>) -> Self {
        self.routes.insert(path.to_string(), replies.into());
        self
    }

    /// Start the server on a random available port
    pub fn start(self) -> std::io::Result<MockHttpServer> {
        MockHttpServer::start_with(self.routes)
    }
}

/// Mock HTTP server for testing
pub struct MockHttpServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Requests,
    thread_handle: Option<thread::JoinHandle<()>>,
}

impl MockHttpServer {
    pub fn builder() -> MockServerBuilder {
        MockServerBuilder::default()
    }

    fn start_with(routes: HashMap<String, VecDeque<MockReply>>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let actual_port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let routes: Routes = Arc::new(Mutex::new(routes));
        let requests: Requests = Arc::new(Mutex::new(Vec::new()));
        let requests_clone = requests.clone();

        // Set listener to non-blocking for graceful shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        // Requests are served one at a time so the recorded
                        // order matches the order the client sent them in.
                        handle_connection(stream, &routes, &requests_clone);
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port: actual_port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Paths of requests received so far, in arrival order
    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockHttpServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, routes: &Routes, requests: &Requests) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }

    let Some(raw) = read_request(&mut stream) else {
        send_response(&mut stream, 400, r#"{"error": "Invalid request"}"#);
        return;
    };

    let (head, body) = match raw.split_once("\r\n\r\n") {
        Some(parts) => parts,
        None => (raw.as_str(), ""),
    };
    let first_line = head.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, 400, r#"{"error": "Invalid request"}"#);
        return;
    }

    let authorization = head.lines().find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.eq_ignore_ascii_case("authorization")
            .then(|| value.trim().to_string())
    });

    let path = parts[1].split('?').next().unwrap_or(parts[1]).to_string();
    requests.lock().unwrap().push(RecordedRequest {
        method: parts[0].to_string(),
        path: path.clone(),
        authorization,
        body: serde_json::from_str(body).unwrap_or(JsonValue::Null),
    });

    let reply = {
        let mut routes = routes.lock().unwrap();
        routes.get_mut(&path).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        })
    };

    match reply {
        Some(reply) => send_response(&mut stream, reply.status, &reply.body),
        None => send_response(&mut stream, 404, r#"{"error": "Not found"}"#),
    }
}

/// Read headers, then as many body bytes as Content-Length announces
fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut data = Vec::new();
    let mut buffer = [0; 4096];

    loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);

        let text = String::from_utf8_lossy(&data);
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if data.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    if data.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&data).into_owned())
    }
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

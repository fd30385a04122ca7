// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Shared helpers: a stub Gemini upstream and router drivers

use analyze_relay::{api::create_app, AppState, RelayConfig};
use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderMap, Method, Request, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::util::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";

pub const PNG_DATA_URL: &str = "data:image/png;base64,AAAA";

/// A request as seen by the stub upstream
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub uri: Uri,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("upstream body should be JSON")
    }

    pub fn query_param(&self, name: &str) -> Option<String> {
        self.uri.query()?.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key == name).then(|| value.to_string())
        })
    }
}

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    body: Bytes,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// HTTP server standing in for the Gemini API; answers every request with a
/// fixed status and body and records what it received.
pub struct StubUpstream {
    pub base_url: String,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl StubUpstream {
    pub async fn start(status: StatusCode, body: &str) -> Self {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            status,
            body: Bytes::from(body.to_string()),
            captured: captured.clone(),
        };

        let app = Router::new()
            .fallback(stub_handler)
            .layer(DefaultBodyLimit::disable())
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            captured,
        }
    }

    pub async fn answering(text: &str) -> Self {
        let body = serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}], "role": "model"}}]
        });
        Self::start(StatusCode::OK, &body.to_string()).await
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.captured.lock().unwrap().clone()
    }
}

async fn stub_handler(
    State(state): State<StubState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.captured.lock().unwrap().push(CapturedRequest {
        method,
        uri,
        content_type,
        body,
    });

    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body.clone(),
    )
}

/// Base URL of a port nothing listens on
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

/// Upstream that sends headers promising more body than it delivers, then
/// closes the connection.
pub async fn start_truncating_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request(&mut socket).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\n\
                          Content-Type: application/json\r\n\
                          Content-Length: 1000\r\n\
                          \r\n\
                          {\"candidates\"",
                    )
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Upstream that writes `head` (possibly empty), then holds the connection
/// open for `stall` without sending anything more.
pub async fn start_stalling_upstream(head: &'static [u8], stall: Duration) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                read_request(&mut socket).await;
                if !head.is_empty() {
                    let _ = socket.write_all(head).await;
                    let _ = socket.flush().await;
                }
                tokio::time::sleep(stall).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

/// Router whose upstream calls give up after `timeout`
pub fn app_with_timeout(base_url: &str, timeout: Duration) -> Router {
    let mut config = RelayConfig::new(TEST_API_KEY);
    config.gemini_base_url = base_url.to_string();
    config.request_timeout = Some(timeout);
    create_app(AppState::new(config).unwrap())
}

async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        if buf.len() >= header_end + 4 + content_length {
            return;
        }
    }
}

pub fn app_for(base_url: &str) -> Router {
    let mut config = RelayConfig::new(TEST_API_KEY);
    config.gemini_base_url = base_url.to_string();
    create_app(AppState::new(config).unwrap())
}

pub fn analyze_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

/// Send a request through the router and decode the JSON response
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub async fn post_analyze(app: Router, body: &str) -> (StatusCode, serde_json::Value) {
    send(app, analyze_request(body.to_string())).await
}

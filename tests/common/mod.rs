//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use uptime_monitor::notifier::{Message, Notifier, NotifyError};

/// Start a programmable mock backend on an ephemeral port.
///
/// `f` is called once per connection and returns the status to answer with.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = u16> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let status = f().await;
                        let reason = match status {
                            200 => "OK",
                            404 => "Not Found",
                            500 => "Internal Server Error",
                            502 => "Bad Gateway",
                            503 => "Service Unavailable",
                            _ => "Unknown",
                        };
                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status, reason
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Backend that always answers with `status`.
pub async fn start_fixed_backend(status: u16) -> SocketAddr {
    start_programmable_backend(move || async move { status }).await
}

/// Backend that accepts connections and never answers.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// A local port with nothing listening on it.
pub fn closed_port_addr() -> SocketAddr {
    std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap()
}

/// Webhook receiver recording every JSON body it gets.
#[derive(Clone, Default)]
pub struct WebhookSink {
    pub received: Arc<Mutex<Vec<serde_json::Value>>>,
    /// Statuses to answer with, in order; 200 once exhausted.
    pub script: Arc<Mutex<Vec<u16>>>,
    pub hits: Arc<AtomicU32>,
}

impl WebhookSink {
    pub fn received(&self) -> Vec<serde_json::Value> {
        self.received.lock().unwrap().clone()
    }

    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Start a webhook receiver; returns its URL and the recorder.
pub async fn start_webhook_sink(script: Vec<u16>) -> (String, WebhookSink) {
    let sink = WebhookSink {
        script: Arc::new(Mutex::new(script)),
        ..WebhookSink::default()
    };

    async fn receive(
        State(sink): State<WebhookSink>,
        Json(body): Json<serde_json::Value>,
    ) -> StatusCode {
        sink.hits.fetch_add(1, Ordering::SeqCst);
        let status = {
            let mut script = sink.script.lock().unwrap();
            if script.is_empty() { 200 } else { script.remove(0) }
        };
        if status == 200 {
            sink.received.lock().unwrap().push(body);
        }
        StatusCode::from_u16(status).unwrap()
    }

    let app = Router::new()
        .route("/hook", post(receive))
        .with_state(sink.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}/hook", addr), sink)
}

/// Notifier that records instead of delivering.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Message>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    fn channel(&self) -> &'static str {
        "recording"
    }
}

pub const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

pub fn temp_ledger_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("{}-{}.json", name, uuid::Uuid::new_v4()))
}

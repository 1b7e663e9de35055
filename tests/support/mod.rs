//! In-process stand-in for the analysis backend plus recording collaborators.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use assessment_telemetry::{RecommendationDisplay, ScenarioQueue};
use serde_json::{json, Value};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl CannedResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

pub fn analysis(careers: &[&str], scenarios: &[&str]) -> Value {
    json!({
        "status": "success",
        "session_id": "echo",
        "analysis": "Consistent, deliberate problem solving.",
        "cognitive_profile": {
            "problem_solving": 0.82,
            "response_speed": 0.64,
            "attention_focus": 0.9,
            "motor_precision": 0.71,
            "persistence": 0.88
        },
        "recommended_careers": careers,
        "next_vr_scenarios": scenarios,
        "confidence_score": 86.5,
        "processing_time_ms": 132,
        "timestamp": "2026-03-14T09:00:43.000Z"
    })
}

pub struct StubBackend {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    response: Arc<Mutex<CannedResponse>>,
}

impl StubBackend {
    pub async fn start(response: CannedResponse) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let response = Arc::new(Mutex::new(response));

        let requests_clone = requests.clone();
        let response_clone = response.clone();
        tokio::spawn(async move {
            loop {
                let Ok((stream, _)) = listener.accept().await else {
                    break;
                };
                let requests = requests_clone.clone();
                let response = response_clone.clone();
                tokio::spawn(async move {
                    let _ = serve(stream, requests, response).await;
                });
            }
        });

        Self {
            addr,
            requests,
            response,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_response(&self, response: CannedResponse) {
        *self.response.lock().unwrap() = response;
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub async fn wait_for_requests(&self, count: usize, timeout: Duration) -> Vec<RecordedRequest> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let seen = self.requests();
            if seen.len() >= count || tokio::time::Instant::now() >= deadline {
                return seen;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn serve(
    mut stream: TcpStream,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    response: Arc<Mutex<CannedResponse>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0usize;
    let mut content_type = None;
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            let value = value.trim();
            match name.trim().to_ascii_lowercase().as_str() {
                "content-length" => content_length = value.parse().unwrap_or(0),
                "content-type" => content_type = Some(value.to_string()),
                _ => {}
            }
        }
    }

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body_end = buf.len().min(body_start + content_length);
    let body = serde_json::from_slice(&buf[body_start..body_end]).unwrap_or(Value::Null);

    requests.lock().unwrap().push(RecordedRequest {
        method,
        path,
        content_type,
        body,
    });

    let canned = response.lock().unwrap().clone();
    if !canned.delay.is_zero() {
        tokio::time::sleep(canned.delay).await;
    }

    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        canned.status,
        if canned.status < 400 { "OK" } else { "Error" },
        canned.body.len(),
        canned.body
    );
    stream.write_all(reply.as_bytes()).await?;
    stream.shutdown().await
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub careers: Mutex<Vec<Vec<String>>>,
    pub analyses: Mutex<Vec<String>>,
}

impl RecommendationDisplay for RecordingDisplay {
    fn update_recommendations(&self, careers: &[String]) {
        self.careers.lock().unwrap().push(careers.to_vec());
    }

    fn show_analysis(&self, text: &str) {
        self.analyses.lock().unwrap().push(text.to_string());
    }
}

#[derive(Default)]
pub struct RecordingQueue {
    pub queued: Mutex<Vec<String>>,
}

impl ScenarioQueue for RecordingQueue {
    fn queue_next_scenario(&self, scenario_id: &str) {
        self.queued.lock().unwrap().push(scenario_id.to_string());
    }
}

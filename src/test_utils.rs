//! Scriptable host bridge and HTTP client doubles shared by the
//! integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gfcore::net::{HttpClient, HttpRequest, HttpResponse};
use serde_json::Value;
use tokio::sync::Semaphore;

use crate::app::App;
use crate::bridge::{HostBridge, InvoiceStatus};
use crate::config::ClientConfig;

pub const TEST_API_BASE: &str = "https://giftflow.test/api";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
}

impl RecordedRequest {
    /// The endpoint path, without base URL and query string.
    pub fn endpoint(&self) -> String {
        let path = self.url.strip_prefix(TEST_API_BASE).unwrap_or(&self.url);
        path.split('?').next().unwrap_or(path).to_string()
    }
}

enum Scripted {
    Response(u16, String),
    TransportError(String),
}

/// Replays scripted responses in order and records every request. Without a
/// script, every call answers `200 {"status":"ok"}`. A gated client holds
/// each request until [`MockHttpClient::release`] is called, which lets
/// tests observe state between publishing and fetch completion.
pub struct MockHttpClient {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RecordedRequest>>,
    gate: Option<Semaphore>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    /// Lets one held request through a gated client.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn push_ok(&self, body: &str) {
        self.push_response(200, body);
    }

    pub fn push_response(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::Response(status, body.to_string()));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Scripted::TransportError(message.to_string()));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.requests().iter().map(|r| r.endpoint()).collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn execute(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        if let Some(gate) = &self.gate {
            gate.acquire().await?.forget();
        }

        let body = request
            .body
            .as_deref()
            .and_then(|b| serde_json::from_slice(b).ok())
            .unwrap_or(Value::Null);
        self.requests.lock().unwrap().push(RecordedRequest {
            url: request.url.clone(),
            body,
        });

        match self.responses.lock().unwrap().pop_front() {
            Some(Scripted::Response(status, body)) => Ok(HttpResponse {
                status_code: status,
                body: body.into_bytes(),
            }),
            Some(Scripted::TransportError(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(HttpResponse {
                status_code: 200,
                body: br#"{"status":"ok"}"#.to_vec(),
            }),
        }
    }
}

/// Records every host interaction and answers dialogs from a script.
/// Defaults: no user id (the fallback id applies), confirms accepted,
/// invoices paid.
pub struct MockBridge {
    user_id: Mutex<Option<i64>>,
    start_param: Mutex<Option<String>>,
    confirm_answer: AtomicBool,
    invoice_status: Mutex<InvoiceStatus>,
    alerts: Mutex<Vec<String>>,
    confirms: Mutex<Vec<String>>,
    opened_links: Mutex<Vec<String>>,
    opened_invoices: Mutex<Vec<String>>,
    progress_depth: AtomicI32,
}

impl MockBridge {
    pub fn new() -> Self {
        Self {
            user_id: Mutex::new(None),
            start_param: Mutex::new(None),
            confirm_answer: AtomicBool::new(true),
            invoice_status: Mutex::new(InvoiceStatus::Paid),
            alerts: Mutex::new(Vec::new()),
            confirms: Mutex::new(Vec::new()),
            opened_links: Mutex::new(Vec::new()),
            opened_invoices: Mutex::new(Vec::new()),
            progress_depth: AtomicI32::new(0),
        }
    }

    pub fn set_user_id(&self, id: Option<i64>) {
        *self.user_id.lock().unwrap() = id;
    }

    pub fn set_start_param(&self, param: Option<&str>) {
        *self.start_param.lock().unwrap() = param.map(str::to_string);
    }

    pub fn set_confirm_answer(&self, answer: bool) {
        self.confirm_answer.store(answer, Ordering::SeqCst);
    }

    pub fn set_invoice_status(&self, status: InvoiceStatus) {
        *self.invoice_status.lock().unwrap() = status;
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.lock().unwrap().clone()
    }

    pub fn opened_links(&self) -> Vec<String> {
        self.opened_links.lock().unwrap().clone()
    }

    pub fn opened_invoices(&self) -> Vec<String> {
        self.opened_invoices.lock().unwrap().clone()
    }

    /// Show/hide progress calls must balance out to zero after every action.
    pub fn progress_depth(&self) -> i32 {
        self.progress_depth.load(Ordering::SeqCst)
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostBridge for MockBridge {
    fn user_id(&self) -> Option<i64> {
        *self.user_id.lock().unwrap()
    }

    fn start_param(&self) -> Option<String> {
        self.start_param.lock().unwrap().clone()
    }

    fn show_alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    async fn show_confirm(&self, message: &str) -> bool {
        self.confirms.lock().unwrap().push(message.to_string());
        self.confirm_answer.load(Ordering::SeqCst)
    }

    async fn open_invoice(&self, url: &str) -> InvoiceStatus {
        self.opened_invoices.lock().unwrap().push(url.to_string());
        *self.invoice_status.lock().unwrap()
    }

    fn open_telegram_link(&self, url: &str) {
        self.opened_links.lock().unwrap().push(url.to_string());
    }

    fn show_progress(&self) {
        self.progress_depth.fetch_add(1, Ordering::SeqCst);
    }

    fn hide_progress(&self) {
        self.progress_depth.fetch_sub(1, Ordering::SeqCst);
    }
}

pub fn build_test_app(http: Arc<MockHttpClient>, bridge: Arc<MockBridge>) -> App {
    App::builder()
        .with_http_client(http as Arc<dyn HttpClient>)
        .with_bridge(bridge as Arc<dyn HostBridge>)
        .with_config(ClientConfig::new(TEST_API_BASE))
        .build()
        .expect("test app should build")
}

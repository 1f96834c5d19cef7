//! The JSON API client.
//!
//! Every endpoint is a POST with a JSON body carrying the caller's identity,
//! answered with the `{status, error}` envelope. Any failure (transport,
//! HTTP status, parse, or application envelope) collapses into one
//! [`RequestFailed`] which has already been surfaced as a host alert by the
//! time the caller sees it. No retries, no timeout, no cancellation: the
//! first failure is terminal for the triggering action.

use std::sync::Arc;

use gfcore::envelope::unwrap_envelope;
use gfcore::multipart::MultipartForm;
use gfcore::net::{HttpClient, HttpRequest};
use log::{debug, error};
use serde_json::{Map, Value, json};

use crate::bridge::HostBridge;
use crate::config::ClientConfig;
use crate::error::RequestFailed;

pub struct ApiClient {
    http: Arc<dyn HttpClient>,
    bridge: Arc<dyn HostBridge>,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(
        http: Arc<dyn HttpClient>,
        bridge: Arc<dyn HostBridge>,
        config: ClientConfig,
    ) -> Self {
        Self {
            http,
            bridge,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The id sent as `chat_id` on every call. The backend reads the caller's
    /// user id from this field on all endpoints.
    pub fn effective_user_id(&self) -> i64 {
        self.bridge
            .user_id()
            .unwrap_or(self.config.fallback_user_id)
    }

    /// Calls an endpoint, toggling the host progress indicator around the
    /// request.
    pub async fn call(&self, endpoint: &str, payload: Value) -> Result<Value, RequestFailed> {
        self.call_inner(endpoint, payload, true).await
    }

    /// Like [`ApiClient::call`] but without the progress indicator.
    pub async fn call_silent(
        &self,
        endpoint: &str,
        payload: Value,
    ) -> Result<Value, RequestFailed> {
        self.call_inner(endpoint, payload, false).await
    }

    async fn call_inner(
        &self,
        endpoint: &str,
        payload: Value,
        show_loader: bool,
    ) -> Result<Value, RequestFailed> {
        if show_loader {
            self.bridge.show_progress();
        }
        // The indicator must clear on every exit path, before any alert.
        let guard = scopeguard::guard((), |_| {
            if show_loader {
                self.bridge.hide_progress();
            }
        });

        let result = self.execute_json(endpoint, payload).await;
        drop(guard);

        match result {
            Ok(value) => Ok(value),
            Err(message) => {
                error!(target: "Api", "{} failed: {}", endpoint, message);
                self.bridge.show_alert(&format!("Error:\n{message}"));
                Err(RequestFailed::new(message))
            }
        }
    }

    async fn execute_json(&self, endpoint: &str, payload: Value) -> Result<Value, String> {
        let url = format!(
            "{}{}?v={}",
            self.config.api_base, endpoint, self.config.app_version
        );

        let mut body = match payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => return Err(format!("payload must be a JSON object, got {other}")),
        };
        // A payload-provided chat_id wins, matching the original wire shape.
        body.entry("chat_id")
            .or_insert_with(|| json!(self.effective_user_id()));

        let request = HttpRequest::post(url)
            .with_header("Content-Type", "application/json")
            .with_body(serde_json::to_vec(&Value::Object(body)).map_err(|e| e.to_string())?);

        debug!(target: "Api", "POST {}", endpoint);
        let response = self.http.execute(request).await.map_err(|e| e.to_string())?;

        unwrap_envelope(response.status_code, &response.body_string()).map_err(|e| e.to_string())
    }

    /// Uploads an image through the multipart side-channel and returns the
    /// hosted URL. This endpoint sits outside the JSON convention: failures
    /// are returned to the caller for inline status text and never alerted.
    pub async fn upload_image(&self, filename: &str, data: &[u8]) -> Result<String, RequestFailed> {
        let mut form = MultipartForm::new();
        form.add_file("image", filename, data);
        let content_type = form.content_type();

        let request = HttpRequest::post(format!("{}/upload", self.config.api_base))
            .with_header("Content-Type", content_type)
            .with_body(form.finish());

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| RequestFailed::new(e.to_string()))?;
        let doc: Value = serde_json::from_slice(&response.body)
            .map_err(|_| RequestFailed::new("Invalid JSON response"))?;

        if doc.get("status").and_then(Value::as_str) == Some("ok")
            && let Some(url) = doc.get("url").and_then(Value::as_str)
        {
            return Ok(url.to_string());
        }
        Err(RequestFailed::new("Upload failed"))
    }
}

//! In-memory transport for request-shape assertions

use std::sync::{Arc, Mutex};

use serde_json::Value;
use transport::{BoxFuture, Method, Request, Transport, TransportError};

use crate::client::Client;
use crate::config::{Configuration, Options};

/// One call as seen by the transport.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub request: Request,
}

impl RecordedCall {
    /// Request body parsed back into JSON.
    pub fn body_json(&self) -> Value {
        serde_json::from_str(self.request.body.as_deref().expect("request has a body"))
            .expect("request body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.request
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
    }
}

/// Records every call and answers with a canned response.
pub struct RecordingTransport {
    calls: Mutex<Vec<RecordedCall>>,
    response: Value,
    fail_with_status: Option<u16>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::responding(serde_json::json!({"ok": true}))
    }
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn responding(response: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response,
            fail_with_status: None,
        }
    }

    /// Every call fails with `status` and an OAuth-style error body.
    pub fn failing(status: u16) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            response: Value::Null,
            fail_with_status: Some(status),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one call was made")
    }
}

impl Transport for RecordingTransport {
    fn base_uri(&self) -> &str {
        "https://api.join.me/v1/"
    }

    fn send<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        request: Request,
    ) -> BoxFuture<'a, transport::Result<Value>> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            request,
        });
        let result = match self.fail_with_status {
            Some(status) => Err(TransportError::Status {
                status,
                body: "{\"error\":\"invalid_client\"}".to_string(),
            }),
            None => Ok(self.response.clone()),
        };
        Box::pin(async move { result })
    }
}

/// Client over a fresh recording transport, configured with `options`.
pub fn recording_client(options: &Options) -> (Client, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::new());
    let client = Client::new(
        "tok_test",
        Configuration::default().merge(options),
        transport.clone(),
    )
    .expect("test token is a valid header value");
    (client, transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn default_transport_answers_ok_and_records() {
        let transport = RecordingTransport::default();
        let response = transport.get("/user", Request::default()).await.unwrap();
        assert_eq!(response, serde_json::json!({"ok": true}));
        assert_eq!(transport.calls().len(), 1);
        assert_eq!(transport.last_call().path, "/user");
    }

    #[tokio::test]
    async fn failing_transport_reports_status() {
        let transport = RecordingTransport::failing(401);
        let err = transport.post("/meetings", Request::default()).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 401, .. }));
    }
}

//! One-shot HTTP probes against a running backend.
//!
//! Probes are fired strictly sequentially, each with its own bounded timeout
//! and no retries. Transport failures become data on the outcome, so one
//! dead endpoint never aborts the probes queued after it.
use std::time::Duration;

use serde_json::Value;

/// One request to fire.
#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub method: reqwest::Method,
    pub url: String,
    /// JSON body, sent when present.
    pub body: Option<Value>,
    /// Status the caller considers a pass.
    pub expect: u16,
}

/// What came back, network failures included.
#[derive(Debug)]
pub struct ProbeOutcome {
    /// Response status, or `None` when the request never completed.
    pub status: Option<u16>,
    /// Response body decoded as JSON, `Null` when absent or not JSON.
    pub data: Value,
    /// Transport-level failure, when there was one.
    pub error: Option<String>,
}

impl ProbeOutcome {
    pub fn passed(&self, expect: u16) -> bool {
        self.status == Some(expect)
    }
}

/// Build the shared client: bounded total request timeout, no retries.
pub fn client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Fire one probe and report whatever happened.
pub async fn fire(client: &reqwest::Client, probe: &ProbeRequest) -> ProbeOutcome {
    let mut request = client.request(probe.method.clone(), &probe.url);
    if let Some(body) = &probe.body {
        request = request.json(body);
    }

    match request.send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let data = response.json::<Value>().await.unwrap_or(Value::Null);
            ProbeOutcome {
                status: Some(status),
                data,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(url = %probe.url, error = %e, "probe failed to complete");
            ProbeOutcome {
                status: None,
                data: Value::Null,
                error: Some(e.to_string()),
            }
        }
    }
}

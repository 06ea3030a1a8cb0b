//! Response classification shared by every request the fetcher sends.
//!
//! Maps transport errors, status codes and body shapes onto
//! [`FailureReason`] so callers only ever see an `Outcome`:
//! - **send/body transport error** → [`FailureReason::Network`]
//! - **non-2xx status** → `Http(Code(status))`
//! - **unparseable or wrongly-shaped JSON** → `Http(Invalid)`

use serde_json::{Map, Value};
use settle_core::{FailureReason, HttpStatus};

/// Classify a transport-level `reqwest` error.
pub fn network_failure(error: &reqwest::Error) -> FailureReason {
    let kind = if error.is_timeout() {
        "timed out"
    } else if error.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    FailureReason::Network(format!("{kind}: {error}"))
}

/// Reject any non-2xx response.
pub fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, FailureReason> {
    let status = resp.status();
    if !status.is_success() {
        return Err(FailureReason::Http(HttpStatus::Code(status.as_u16())));
    }
    Ok(resp)
}

async fn read_json(resp: reqwest::Response) -> Result<Value, FailureReason> {
    let body = resp.bytes().await.map_err(|e| network_failure(&e))?;
    serde_json::from_slice(&body).map_err(|_| FailureReason::Http(HttpStatus::Invalid))
}

/// Read a 2xx body that must be a JSON array.
pub async fn read_json_array(resp: reqwest::Response) -> Result<Vec<Value>, FailureReason> {
    match read_json(resp).await? {
        Value::Array(items) => Ok(items),
        _ => Err(FailureReason::Http(HttpStatus::Invalid)),
    }
}

/// Read a 2xx body that must be a JSON object.
pub async fn read_json_object(
    resp: reqwest::Response,
) -> Result<Map<String, Value>, FailureReason> {
    match read_json(resp).await? {
        Value::Object(object) => Ok(object),
        _ => Err(FailureReason::Http(HttpStatus::Invalid)),
    }
}

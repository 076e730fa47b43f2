use crate::{ClientError, ClientResult};

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Response};
use serde_json::Value;

pub(crate) fn build_client(timeout: Duration) -> ClientResult<ReqwestClient> {
    Ok(ReqwestClient::builder().timeout(timeout).build()?)
}

/// Read a JSON body, turning non-2xx responses into [`ClientError::Api`].
///
/// The error message comes from the body's `error` field (a string or an
/// object with `message`) when present.
pub(crate) async fn read_json(response: Response) -> ClientResult<Value> {
    let status = response.status();
    let text = response.text().await?;

    let body = if text.trim().is_empty() {
        Value::Null
    } else if status.is_success() {
        serde_json::from_str(&text)?
    } else {
        serde_json::from_str(&text).unwrap_or(Value::Null)
    };

    if !status.is_success() {
        let message = error_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
        return Err(ClientError::api(status.as_u16(), message));
    }

    Ok(body)
}

fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(message) => Some(message.clone()),
        error => error
            .get("message")
            .and_then(|v| v.as_str())
            .map(String::from),
    }
}

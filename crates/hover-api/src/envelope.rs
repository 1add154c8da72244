//! The `{succeeded, error_code, error}` wrapper shared by every response.
//!
//! Responses are decoded in two passes over the same body: first the
//! envelope, then (only if the call succeeded) the call-specific payload. A
//! failed call therefore never fails on a malformed payload it carried along.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use crate::error::{ApiError, DecodeError, HoverError, Result};

const BODY_SNIPPET_LEN: usize = 512;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub succeeded: bool,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Envelope {
    fn into_api_error(self, status: StatusCode) -> ApiError {
        ApiError {
            status_code: status.as_u16(),
            error_code: self.error_code.unwrap_or_default(),
            error_msg: self.error.unwrap_or_default(),
        }
    }
}

/// Checks the envelope of a response, turning a failed call into an error.
pub(crate) fn check_envelope(status: StatusCode, body: &[u8]) -> Result<Envelope> {
    let envelope: Envelope = serde_json::from_slice(body).map_err(|e| {
        warn!(status = status.as_u16(), "Hover API response is not a JSON envelope");
        DecodeError::new(
            "response envelope",
            body_snippet(body),
            format!("HTTP status {}: {e}", status.as_u16()),
        )
    })?;

    if !envelope.succeeded || !status.is_success() {
        let err = envelope.into_api_error(status);
        warn!(
            status = err.status_code,
            error_code = %err.error_code,
            "Hover API call failed: {}",
            err.error_msg
        );
        return Err(HoverError::Api(err));
    }
    Ok(envelope)
}

/// Checks the envelope and decodes the payload fields of a successful call.
pub(crate) fn decode_response<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T> {
    check_envelope(status, body)?;
    serde_json::from_slice(body).map_err(|e| {
        DecodeError::new(std::any::type_name::<T>(), body_snippet(body), e.to_string()).into()
    })
}

fn body_snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.into_owned(),
    }
}

//! Error taxonomy for the Hover client.
//!
//! Every failure a call can produce is a distinct [`HoverError`] variant so
//! callers can branch on the kind (an [`ApiError`] with a given code versus a
//! transport outage) instead of matching on message text.

use thiserror::Error;

/// A wire value did not have the shape its target type expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to parse a {target} from {raw:?}: {reason}")]
pub struct DecodeError {
    /// The raw input that was rejected.
    pub raw: String,
    /// Name of the type the input was decoded into.
    pub target: &'static str,
    /// What was wrong with the input.
    pub reason: String,
}

impl DecodeError {
    pub(crate) fn new(
        target: &'static str,
        raw: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            raw: raw.into(),
            target,
            reason: reason.into(),
        }
    }
}

/// The Hover API answered but reported the operation as failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Hover API returned error code {error_code:?}: {error_msg}")]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// The `error_code` field of the response envelope.
    pub error_code: String,
    /// The `error` field of the response envelope.
    pub error_msg: String,
}

impl ApiError {
    /// Whether the server reported the given error code.
    pub fn has_code(&self, code: &str) -> bool {
        self.error_code == code
    }
}

#[derive(Debug, Error)]
pub enum HoverError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request cancelled before a response was received")]
    Cancelled,
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid login: {0}")]
    InvalidLogin(String),
    #[error("precondition failed: {0}")]
    Precondition(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl HoverError {
    /// True for failures below the JSON layer, including caller cancellation.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Cancelled)
    }

    /// True when the caller's cancellation signal ended the call.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The structured API error, if the server rejected the call.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T, E = HoverError> = std::result::Result<T, E>;

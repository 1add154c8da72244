//! Login handshake.
//!
//! Hover has no token endpoint: logging in sets a `hoverauth` cookie, and
//! that cookie's value is the session credential for every later call.

use std::fmt;
use std::future::Future;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};

use crate::client::{cancellable, endpoint, DEFAULT_BASE_URL};
use crate::error::{HoverError, Result};

/// Name of the cookie carrying the session credential.
pub const AUTH_COOKIE: &str = "hoverauth";

/// Opaque session token produced by [`login`].
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a token obtained earlier, e.g. one the caller kept from a
    /// previous login.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub(crate) fn cookie_header(&self) -> String {
        format!("{AUTH_COOKIE}={}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Logs in against the default Hover endpoint.
///
/// `cancel` aborts the request when it resolves first; pass
/// `std::future::pending()` to never cancel.
pub async fn login<C>(
    http: &Client,
    username: &str,
    password: &str,
    cancel: C,
) -> Result<Credential>
where
    C: Future<Output = ()>,
{
    login_at(http, DEFAULT_BASE_URL, username, password, cancel).await
}

/// Logs in against the API rooted at `base_url`.
pub async fn login_at<C>(
    http: &Client,
    base_url: &str,
    username: &str,
    password: &str,
    cancel: C,
) -> Result<Credential>
where
    C: Future<Output = ()>,
{
    let url = endpoint(base_url, &["login"])?;
    debug!(path = url.path(), "logging in");
    let request = http
        .get(url)
        .query(&[("username", username), ("password", password)]);
    let response = cancellable(cancel, async move {
        request.send().await.map_err(HoverError::from)
    })
    .await?;
    credential_from_response(&response)
}

fn credential_from_response(response: &Response) -> Result<Credential> {
    let status = response.status();
    if status != StatusCode::OK {
        warn!(status = status.as_u16(), "login rejected");
        return Err(HoverError::InvalidLogin(format!(
            "login HTTP status code was {}",
            status.as_u16()
        )));
    }
    response
        .cookies()
        .find(|cookie| cookie.name() == AUTH_COOKIE && !cookie.value().is_empty())
        .map(|cookie| Credential::new(cookie.value()))
        .ok_or_else(|| {
            HoverError::InvalidLogin(format!(
                "unable to find '{AUTH_COOKIE}' cookie with data in response"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_is_redacted() {
        let credential = Credential::new("s3cret");
        assert_eq!(format!("{credential:?}"), "Credential(<redacted>)");
        assert_eq!(credential.token(), "s3cret");
    }

    #[test]
    fn test_cookie_header() {
        assert_eq!(Credential::new("abc123").cookie_header(), "hoverauth=abc123");
    }
}

//! Hover API client.
//!
//! Each operation sends exactly one request with the session cookie attached,
//! checks the response envelope and decodes the payload. Nothing is retried,
//! cached or batched, and the client holds no mutable state, so a single
//! instance can serve concurrent calls.
//!
//! Every operation takes a `cancel` future. If it resolves before the
//! response has been read, the request is dropped and the call fails with
//! [`HoverError::Cancelled`]. Use `tokio::time::sleep(..)` for a deadline or
//! `std::future::pending()` for none.

use std::future::Future;

use reqwest::header::COOKIE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::envelope::{check_envelope, decode_response};
use crate::error::{HoverError, Result};
use crate::session::{self, Credential};
use crate::types::{null_as_default, DnsDomain, DnsRecordId, Domain, DomainId, NewDnsRecord};

pub const DEFAULT_BASE_URL: &str = "https://www.hover.com/api";

#[derive(Deserialize)]
struct DomainsPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    domains: Vec<Domain>,
}

#[derive(Deserialize)]
struct DomainPayload {
    domain: Domain,
}

#[derive(Deserialize)]
struct DnsDomainsPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    domains: Vec<DnsDomain>,
}

/// Builds the URL of an API path below `base_url`, percent-encoding each
/// segment.
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| HoverError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| HoverError::Config(format!("base URL {base_url:?} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Runs `work` unless `cancel` resolves first.
pub(crate) async fn cancellable<T, F, C>(cancel: C, work: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
    C: Future<Output = ()>,
{
    tokio::select! {
        biased;
        () = cancel => {
            debug!("request cancelled by caller");
            Err(HoverError::Cancelled)
        }
        result = work => result,
    }
}

fn require_id(id: &str, what: &str) -> Result<()> {
    if id.is_empty() {
        return Err(HoverError::Precondition(format!("empty {what}")));
    }
    Ok(())
}

/// Client for the unofficial Hover API, bound to one session credential.
#[derive(Debug, Clone)]
pub struct HoverClient {
    http: Client,
    credential: Credential,
    base_url: String,
}

impl HoverClient {
    pub fn new(http: Client, credential: Credential) -> Self {
        Self {
            http,
            credential,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a client for an API rooted somewhere other than
    /// [`DEFAULT_BASE_URL`].
    pub fn with_base_url(http: Client, credential: Credential, base_url: &str) -> Result<Self> {
        endpoint(base_url, &[])?;
        Ok(Self {
            http,
            credential,
            base_url: base_url.to_string(),
        })
    }

    /// Logs in and returns a client using the new session.
    pub async fn connect<C>(
        http: Client,
        base_url: &str,
        username: &str,
        password: &str,
        cancel: C,
    ) -> Result<Self>
    where
        C: Future<Output = ()>,
    {
        let credential = session::login_at(&http, base_url, username, password, cancel).await?;
        Self::with_base_url(http, credential, base_url)
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Lists the account's domains, without DNS records.
    pub async fn list_domains<C>(&self, cancel: C) -> Result<Vec<Domain>>
    where
        C: Future<Output = ()>,
    {
        let url = endpoint(&self.base_url, &["domains"])?;
        let payload: DomainsPayload = self.call(Method::GET, url, cancel).await?;
        Ok(payload.domains)
    }

    pub async fn get_domain<C>(&self, domain_id: &DomainId, cancel: C) -> Result<Domain>
    where
        C: Future<Output = ()>,
    {
        require_id(domain_id.as_str(), "domain ID")?;
        let url = endpoint(&self.base_url, &["domains", domain_id.as_str()])?;
        let payload: DomainPayload = self.call(Method::GET, url, cancel).await?;
        Ok(payload.domain)
    }

    /// Lists the DNS view of every domain in the account.
    pub async fn list_dns_domains<C>(&self, cancel: C) -> Result<Vec<DnsDomain>>
    where
        C: Future<Output = ()>,
    {
        let url = endpoint(&self.base_url, &["dns"])?;
        let payload: DnsDomainsPayload = self.call(Method::GET, url, cancel).await?;
        Ok(payload.domains)
    }

    /// Returns the DNS view of a single domain.
    pub async fn get_dns_domains<C>(&self, domain_id: &DomainId, cancel: C) -> Result<Vec<DnsDomain>>
    where
        C: Future<Output = ()>,
    {
        require_id(domain_id.as_str(), "domain ID")?;
        let url = endpoint(&self.base_url, &["domains", domain_id.as_str(), "dns"])?;
        let payload: DnsDomainsPayload = self.call(Method::GET, url, cancel).await?;
        Ok(payload.domains)
    }

    /// Adds a DNS record to a domain.
    ///
    /// Not idempotent: calling this twice with the same record creates two
    /// records.
    pub async fn add_dns_record<C>(
        &self,
        domain_id: &DomainId,
        record: &NewDnsRecord,
        cancel: C,
    ) -> Result<()>
    where
        C: Future<Output = ()>,
    {
        require_id(domain_id.as_str(), "domain ID")?;
        if record.content.is_empty() {
            return Err(HoverError::Precondition(
                "record content can't be empty".to_string(),
            ));
        }
        let mut url = endpoint(&self.base_url, &["domains", domain_id.as_str(), "dns"])?;
        url.query_pairs_mut().extend_pairs(record.query_pairs());
        self.call_unit(Method::POST, url, cancel).await
    }

    /// Deletes a DNS record. There is no undo.
    pub async fn delete_dns_record<C>(&self, record_id: &DnsRecordId, cancel: C) -> Result<()>
    where
        C: Future<Output = ()>,
    {
        require_id(record_id.as_str(), "DNS record ID")?;
        let url = endpoint(&self.base_url, &["dns", record_id.as_str()])?;
        self.call_unit(Method::DELETE, url, cancel).await
    }

    async fn call<T, C>(&self, method: Method, url: Url, cancel: C) -> Result<T>
    where
        T: DeserializeOwned,
        C: Future<Output = ()>,
    {
        let (status, body) = self.execute(method, url, cancel).await?;
        decode_response(status, &body)
    }

    async fn call_unit<C>(&self, method: Method, url: Url, cancel: C) -> Result<()>
    where
        C: Future<Output = ()>,
    {
        let (status, body) = self.execute(method, url, cancel).await?;
        check_envelope(status, &body).map(|_| ())
    }

    /// Sends one request and reads the whole body.
    async fn execute<C>(&self, method: Method, url: Url, cancel: C) -> Result<(StatusCode, Vec<u8>)>
    where
        C: Future<Output = ()>,
    {
        let path = url.path().to_string();
        debug!(%method, path = %path, "sending Hover API request");
        let request = self
            .http
            .request(method.clone(), url)
            .header(COOKIE, self.credential.cookie_header());

        let (status, body) = cancellable(cancel, async move {
            let response = request.send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, HoverError>((status, body.to_vec()))
        })
        .await?;

        debug!(
            %method,
            path = %path,
            status = status.as_u16(),
            bytes = body.len(),
            "Hover API response"
        );
        Ok((status, body))
    }
}

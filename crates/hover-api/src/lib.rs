//! Client for Hover's unofficial domain and DNS management API.
//!
//! Log in with [`login`] to obtain a [`Credential`], wrap it in a
//! [`HoverClient`], and call the domain and DNS operations on it:
//!
//! ```no_run
//! use std::future::pending;
//! use std::time::Duration;
//!
//! use hover_api::{login, HoverClient, NewDnsRecord, RecordType};
//!
//! # async fn run() -> hover_api::Result<()> {
//! let http = reqwest::Client::new();
//! let credential = login(&http, "user", "password", pending()).await?;
//! let client = HoverClient::new(http, credential);
//!
//! for dns in client.list_dns_domains(tokio::time::sleep(Duration::from_secs(30))).await? {
//!     println!("{} has {} records", dns.domain_name, dns.entries.len());
//! }
//!
//! let domains = client.list_domains(pending()).await?;
//! let record = NewDnsRecord::new(RecordType::TXT, "@", "hello", Duration::from_secs(900));
//! client.add_dns_record(&domains[0].id, &record, pending()).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod codec;
mod envelope;
pub mod error;
pub mod session;
pub mod types;

pub use client::{HoverClient, DEFAULT_BASE_URL};
pub use codec::WireScalar;
pub use error::{ApiError, DecodeError, HoverError, Result};
pub use session::{login, login_at, Credential, AUTH_COOKIE};
pub use types::{
    Billing, Contact, Contacts, Date, DnsDomain, DnsRecord, DnsRecordId, Domain, DomainId,
    NewDnsRecord, RecordType, Ttl, User, YearMonth,
};

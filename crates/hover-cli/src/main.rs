//! `hover-dns`: command-line front end for the Hover DNS client.
//!
//! Reads credentials from flags or the environment (`HOVER_USERNAME`,
//! `HOVER_PASSWORD`), logs in, runs a single operation and prints the result
//! as JSON on stdout. Logs go to stderr and follow `RUST_LOG`.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hover_api::{DnsRecordId, DomainId, HoverClient, NewDnsRecord, RecordType, DEFAULT_BASE_URL};
use serde_json::json;
use tracing::{debug, info, warn};

#[derive(Debug, Parser)]
#[command(name = "hover-dns", version, about = "Manage Hover domains and DNS records")]
struct Cli {
    /// Hover account username
    #[arg(long, env = "HOVER_USERNAME")]
    username: String,

    /// Hover account password
    #[arg(long, env = "HOVER_PASSWORD", hide_env_values = true)]
    password: String,

    /// Root of the Hover API
    #[arg(long, env = "HOVER_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Deadline for each request, in seconds
    #[arg(long, env = "HOVER_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the domains in the account
    Domains,
    /// Show a single domain
    Domain { domain_id: String },
    /// List DNS records of every domain, or of one domain
    Dns {
        #[arg(long)]
        domain: Option<String>,
    },
    /// Add a DNS record. Running this twice creates two records.
    Add {
        domain_id: String,
        #[arg(long = "type", default_value = "A")]
        record_type: String,
        #[arg(long, default_value = "@")]
        name: String,
        #[arg(long)]
        content: String,
        /// TTL in seconds
        #[arg(long, default_value_t = 900)]
        ttl: u64,
    },
    /// Delete a DNS record
    Delete { record_id: String },
}

fn init_logging(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

/// Resolves when the request deadline passes or the user hits Ctrl-C.
async fn cancel_signal(deadline: Duration) {
    tokio::select! {
        () = tokio::time::sleep(deadline) => {
            warn!(?deadline, "deadline reached, cancelling request");
        }
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("interrupted, cancelling request"),
            Err(e) => {
                warn!(error = %e, "unable to listen for Ctrl-C");
                tokio::time::sleep(deadline).await;
            }
        },
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let deadline = Duration::from_secs(cli.timeout_secs);
    let http = reqwest::Client::builder()
        .user_agent(concat!("hover-dns/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")?;

    debug!(base_url = %cli.base_url, "logging in");
    let client = HoverClient::connect(
        http,
        &cli.base_url,
        &cli.username,
        &cli.password,
        cancel_signal(deadline),
    )
    .await
    .context("logging in to Hover")?;
    info!("logged in");

    match cli.command {
        Command::Domains => {
            let domains = client
                .list_domains(cancel_signal(deadline))
                .await
                .context("listing domains")?;
            print_json(&domains)
        }
        Command::Domain { domain_id } => {
            let domain = client
                .get_domain(&DomainId::new(domain_id), cancel_signal(deadline))
                .await
                .context("fetching domain")?;
            print_json(&domain)
        }
        Command::Dns { domain: None } => {
            let dns = client
                .list_dns_domains(cancel_signal(deadline))
                .await
                .context("listing DNS records")?;
            print_json(&dns)
        }
        Command::Dns {
            domain: Some(domain_id),
        } => {
            let dns = client
                .get_dns_domains(&DomainId::new(domain_id), cancel_signal(deadline))
                .await
                .context("listing DNS records")?;
            print_json(&dns)
        }
        Command::Add {
            domain_id,
            record_type,
            name,
            content,
            ttl,
        } => {
            let record = NewDnsRecord::new(
                RecordType::new(record_type.to_uppercase()),
                name,
                content,
                Duration::from_secs(ttl),
            );
            let domain_id = DomainId::new(domain_id);
            client
                .add_dns_record(&domain_id, &record, cancel_signal(deadline))
                .await
                .context("adding DNS record")?;
            info!(domain_id = %domain_id, record_type = %record.record_type, "DNS record added");
            print_json(&json!({"succeeded": true}))
        }
        Command::Delete { record_id } => {
            let record_id = DnsRecordId::new(record_id);
            client
                .delete_dns_record(&record_id, cancel_signal(deadline))
                .await
                .context("deleting DNS record")?;
            info!(record_id = %record_id, "DNS record deleted");
            print_json(&json!({"succeeded": true}))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);
    run(cli).await
}

//! Command-line entry points for `pubmed-citation` and `pubmed-url`

use std::io::Write;

use anyhow::Result;
use clap::{Args, Parser};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ClientConfig;
use crate::pubmed::{PubMedClient, PubMedLookup, Publication, resolve_article_url};

/// Options shared by both commands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Email sent to NCBI with each request
    #[arg(short, long, env = "NCBI_EMAIL", default_value = "")]
    pub email: String,

    /// API key for NCBI E-utilities
    #[arg(long, env = "NCBI_API_KEY")]
    pub api_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new().with_email(self.email.as_str());

        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.as_str());
        }

        config
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "pubmed-citation",
    about = "Get a citation using a PubMed ID or PubMed URL"
)]
pub struct PubmedCitation {
    /// PubMed ID or PubMed URL
    pub query: String,

    /// Print a mini citation
    #[arg(short, long)]
    pub mini: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl PubmedCitation {
    pub async fn execute<W: Write>(&self, out: &mut W) -> Result<()> {
        let client = PubMedClient::with_config(self.common.client_config());
        self.execute_with_client(&client, out).await
    }

    pub async fn execute_with_client<W: Write>(&self, client: &PubMedClient, out: &mut W) -> Result<()> {
        let lookup = PubMedLookup::new(&self.query, client).await?;
        let publication = Publication::new(&lookup, client, false).await?;

        let citation = if self.mini {
            publication.cite_mini()
        } else {
            publication.cite()
        };

        writeln!(out, "{}", citation)?;
        Ok(())
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "pubmed-url",
    about = "Get a publication URL using a PubMed ID or PubMed URL"
)]
pub struct PubmedUrl {
    /// PubMed ID or PubMed URL
    pub query: String,

    /// Print the DOI resolver link instead of following it
    #[arg(short, long)]
    pub doi: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl PubmedUrl {
    pub async fn execute<W: Write>(&self, out: &mut W) -> Result<()> {
        let client = PubMedClient::with_config(self.common.client_config());
        self.execute_with_client(&client, out).await
    }

    pub async fn execute_with_client<W: Write>(&self, client: &PubMedClient, out: &mut W) -> Result<()> {
        let lookup = PubMedLookup::new(&self.query, client).await?;
        let url = resolve_article_url(client, lookup.record(), !self.doi).await;

        writeln!(out, "{}", url)?;
        Ok(())
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the level
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

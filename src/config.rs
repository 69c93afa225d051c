//! Configuration and CLI argument handling

use anyhow::{anyhow, Context};
use clap::Parser;

use crate::game::{
    delay::{DEFAULT_MAX_DELAY_MS, DEFAULT_MIN_DELAY_MS},
    share::{DEFAULT_PRODUCT_NAME, DEFAULT_SHARE_ENDPOINT},
    DelayRange, ShareTarget,
};

/// CLI argument parsing structure
#[derive(Parser, Debug, Clone)]
#[command(name = "reaction-nano")]
#[command(about = "A reaction-time mini-game served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Shortest delay before the go cue, in milliseconds
    #[arg(long, default_value_t = DEFAULT_MIN_DELAY_MS)]
    pub min_delay_ms: u64,

    /// Longest delay before the go cue (exclusive), in milliseconds
    #[arg(long, default_value_t = DEFAULT_MAX_DELAY_MS)]
    pub max_delay_ms: u64,

    /// Product name used in the share message
    #[arg(long, default_value = DEFAULT_PRODUCT_NAME)]
    pub product_name: String,

    /// Canonical page address included in shares [default: http://<host>:<port>/]
    #[arg(long)]
    pub public_url: Option<String>,

    /// Social posting endpoint receiving the share intent
    #[arg(long, default_value = DEFAULT_SHARE_ENDPOINT)]
    pub share_endpoint: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Page address advertised in share intents
    pub fn page_url(&self) -> String {
        self.public_url
            .clone()
            .unwrap_or_else(|| format!("http://{}/", self.address()))
    }

    pub fn delay_range(&self) -> anyhow::Result<DelayRange> {
        DelayRange::new(self.min_delay_ms, self.max_delay_ms).map_err(|e| anyhow!(e))
    }

    pub fn share_target(&self) -> ShareTarget {
        ShareTarget::new(
            self.product_name.clone(),
            self.page_url(),
            self.share_endpoint.clone(),
        )
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> anyhow::Result<()> {
        self.delay_range()?;
        self.share_target()
            .intent(0)
            .map_err(|e| anyhow!(e))
            .context("Share endpoint is not usable")?;
        Ok(())
    }
}

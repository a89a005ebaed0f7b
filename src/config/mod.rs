pub mod santa_config;
#[cfg(feature = "sns")]
pub mod sns;

#[cfg(feature = "cli")]
use crate::core::dispatch::FailurePolicy;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "secret-santa")]
#[command(about = "Draw secret santa pairings and text everyone their match")]
pub struct CliConfig {
    /// Send Secret Santas SMS message of recipient
    #[arg(short, long)]
    pub send: bool,

    /// Use a specific AWS profile from your credential file
    #[arg(short = 'p', long, default_value = "default")]
    pub aws_profile: String,

    /// Use a specific AWS region to publish SMS messages to
    #[arg(short = 'r', long, default_value = "us-west-2")]
    pub aws_region: String,

    /// Use a specific config file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: String,

    /// Seed the draw for a reproducible result
    #[arg(long)]
    pub seed: Option<u64>,

    /// Milliseconds to wait between SMS messages
    #[arg(long, default_value = "1000")]
    pub delay_ms: u64,

    /// Keep sending after a failed message instead of aborting
    #[arg(long)]
    pub continue_on_failure: bool,

    /// Print the dry-run pairings as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.continue_on_failure {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        }
    }
}

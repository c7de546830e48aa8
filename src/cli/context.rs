//! Command execution context
//!
//! Loads configuration once, applies flag and environment overrides, and
//! builds the API clients a command needs. Credentials are checked when a
//! client is requested so a command fails before any network traffic.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{DirectoryClient, RequestExecutor, RetryPolicy, Throttle, TicketingClient};
use crate::config::Config;
use crate::error::Result;

const PROGRESS_TEMPLATE: &str = "{spinner:.green} {msg} [{bar:40.cyan/blue}] {pos}/{len}";

/// Context for command execution containing config, executor, and runtime options.
pub struct CommandContext {
    /// Loaded configuration with overrides applied
    pub config: Config,
    /// Output format preference
    pub format: OutputFormat,
    executor: RequestExecutor,
}

impl CommandContext {
    /// Load config from path (or default location) and apply overrides.
    ///
    /// # Errors
    /// Returns error if the config file is unreadable or its limits are invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;
        opts.apply_to(&mut config);
        config.validate_limits()?;

        let policy = RetryPolicy::new(config.limits.max_retries, config.limits.backoff_base());
        debug!("Retry backoff schedule: {:?}", policy.schedule());
        let executor = RequestExecutor::new(policy)?;
        debug!(
            "IT Glue at {}, Autotask at {}",
            config.directory.base_url, config.ticketing.base_url
        );

        Ok(Self {
            config,
            format: opts.format,
            executor,
        })
    }

    /// IT Glue client, or an error if no API key is configured
    pub fn directory(&self) -> Result<DirectoryClient> {
        let api_key = self.config.require_api_key()?;
        DirectoryClient::new(
            self.executor.clone(),
            &self.config.directory.base_url,
            api_key,
        )
    }

    /// Autotask client, or an error naming the missing credential
    pub fn ticketing(&self) -> Result<TicketingClient> {
        let credentials = self.config.require_ticketing()?;
        TicketingClient::new(
            self.executor.clone(),
            &self.config.ticketing.base_url,
            &credentials,
        )
    }

    /// Shared pacing for IT Glue contact detail requests
    pub fn throttle(&self) -> Result<Throttle> {
        let throttle = Throttle::new(self.config.limits.requests_per_second)?;
        debug!("Contact detail requests spaced {:?} apart", throttle.interval());
        Ok(throttle)
    }

    pub fn workers(&self) -> usize {
        self.config.limits.workers
    }

    /// Progress bar on stderr, hidden for JSON output or a non-terminal stderr
    pub fn progress_bar(&self) -> ProgressBar {
        if !self.format.is_interactive() || !std::io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

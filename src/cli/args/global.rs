//! Global CLI options shared across all commands
//!
//! Consolidates the global flags so handlers take one argument instead of
//! a growing parameter list.

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; [`GlobalOptions::apply_to`] lays it over the
/// loaded config file.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (pretty, table, json)
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.gluesync/config.yaml)
    pub config: Option<String>,

    pub api_key: Option<String>,
    pub at_username: Option<String>,
    pub at_secret: Option<String>,
    pub at_integration_code: Option<String>,

    /// Custom IT Glue base URL for development/testing
    pub directory_url: Option<String>,

    /// Custom Autotask base URL for development/testing
    pub ticketing_url: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_key: cli.api_key.clone(),
            at_username: cli.at_username.clone(),
            at_secret: cli.at_secret.clone(),
            at_integration_code: cli.at_integration_code.clone(),
            directory_url: cli.directory_url.clone(),
            ticketing_url: cli.ticketing_url.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Overlay flag and environment values onto a loaded config
    pub fn apply_to(&self, config: &mut Config) {
        fn overlay(target: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        overlay(&mut config.directory.api_key, &self.api_key);
        overlay(&mut config.ticketing.username, &self.at_username);
        overlay(&mut config.ticketing.secret, &self.at_secret);
        overlay(&mut config.ticketing.integration_code, &self.at_integration_code);

        if let Some(url) = &self.directory_url {
            config.directory.base_url.clone_from(url);
        }
        if let Some(url) = &self.ticketing_url {
            config.ticketing.base_url.clone_from(url);
        }
    }
}

//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod init;
pub mod orgs;
pub mod plan;
pub mod sync;

pub use args::{OutputFormat, RunArgs};
pub use context::CommandContext;

/// GlueSync - push Microsoft-synced IT Glue contacts into Autotask
#[derive(Parser, Debug)]
#[command(name = "gluesync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "GLUESYNC_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "GLUESYNC_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "GLUESYNC_DEBUG", hide_env = true)]
    pub debug: bool,

    /// IT Glue API key (overrides config file)
    #[arg(long, global = true, env = "GLUESYNC_API_KEY", hide = true)]
    pub api_key: Option<String>,

    /// Autotask API user name (overrides config file)
    #[arg(long, global = true, env = "GLUESYNC_AT_USERNAME", hide = true)]
    pub at_username: Option<String>,

    /// Autotask API secret (overrides config file)
    #[arg(long, global = true, env = "GLUESYNC_AT_SECRET", hide = true)]
    pub at_secret: Option<String>,

    /// Autotask API integration code (overrides config file)
    #[arg(long, global = true, env = "GLUESYNC_AT_INTEGRATION_CODE", hide = true)]
    pub at_integration_code: Option<String>,

    /// IT Glue API base URL for development/testing
    #[arg(long, global = true, env = "GLUESYNC_DIRECTORY_URL", hide = true)]
    pub directory_url: Option<String>,

    /// Autotask API base URL for development/testing
    #[arg(long, global = true, env = "GLUESYNC_TICKETING_URL", hide = true)]
    pub ticketing_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize GlueSync configuration
    Init,

    /// List IT Glue organizations actively synced with Autotask
    Orgs,

    /// Show the contacts a sync would create, without creating them
    Plan {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Create missing Microsoft contacts in Autotask
    #[command(after_help = "EXAMPLES:\n  \
            gluesync sync                                  # Prompt for filter and exclusions\n  \
            gluesync sync --license licensed               # Licensed contacts only\n  \
            gluesync sync --license unlicensed -x 12,34    # Skip orgs 12 and 34\n  \
            gluesync sync --license licensed --yes         # No confirmation prompt")]
    Sync {
        #[command(flatten)]
        run: RunArgs,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Display version information
    Version,
}

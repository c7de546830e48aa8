//! Orgs command: IT Glue organizations actively synced with Autotask

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::OrgDisplay;
use crate::output::Formattable;
use crate::sync::scan_syncing_organizations;

/// Run the orgs command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let directory = ctx.directory()?;

    let orgs = scan_syncing_organizations(&directory, &ctx.progress_bar()).await;
    debug!("{} organizations sync with Autotask", orgs.len());

    if ctx.format == OutputFormat::Pretty {
        println!(
            "{} {}\n",
            "Organizations syncing with Autotask:".bold(),
            orgs.len().to_string().cyan()
        );
    }

    let rows: Vec<OrgDisplay> = orgs.iter().map(OrgDisplay::from).collect();
    rows.print(ctx.format)
}

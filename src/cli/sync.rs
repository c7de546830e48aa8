//! Sync command: create missing Microsoft contacts in Autotask

use std::io::IsTerminal;

use colored::Colorize;
use dialoguer::{Confirm, theme::ColorfulTheme};
use log::info;

use crate::cli::args::GlobalOptions;
use crate::cli::plan::{collect, print_skipped_orgs};
use crate::cli::{CommandContext, OutputFormat, RunArgs};
use crate::error::{ConfigError, Result};
use crate::models::SkippedDisplay;
use crate::output::{Formattable, json};
use crate::sync::{CreationPipeline, SyncReport};

/// Ask before the first write; `--yes` skips the prompt
fn confirm(count: usize, yes: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(ConfigError::Invalid(
            "use --yes to confirm when not running interactively".to_string(),
        )
        .into());
    }

    let proceed = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Create up to {} contacts in Autotask?", count))
        .default(false)
        .interact()?;
    Ok(proceed)
}

fn print_report(report: &SyncReport, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", json::format_json(report)?);
        return Ok(());
    }

    let created = format!("Created {}/{} contacts.", report.created, report.total);
    if report.created == report.total {
        println!("\n{}", created.green().bold());
    } else {
        println!("\n{}", created.yellow().bold());
    }

    if report.skipped.is_empty() {
        println!("0 contacts skipped or failed.");
        return Ok(());
    }

    println!("{} skipped or failed:", report.skipped.len());
    let rows: Vec<SkippedDisplay> = report.skipped.iter().map(SkippedDisplay::from).collect();
    rows.print(format)
}

/// Run the sync command
pub async fn run(opts: &GlobalOptions, args: &RunArgs, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    // Fail on missing Autotask credentials before any IT Glue traffic
    let ticketing = ctx.ticketing()?;
    let options = args.resolve()?;

    let plan = collect(&ctx, &options).await?;

    if ctx.format == OutputFormat::Pretty {
        print_skipped_orgs(&plan);
    }
    let total = plan.candidates.len();
    if ctx.format != OutputFormat::Json {
        println!(
            "\n{} {}",
            "Total contacts to create (before duplicates filtered):".bold(),
            total.to_string().cyan()
        );
    }

    if !confirm(total, yes)? {
        info!("Sync cancelled before creating contacts");
        eprintln!("{}", "Cancelled by user.".yellow());
        return Ok(());
    }

    let mut pipeline = CreationPipeline::new(&ticketing);
    let report = pipeline.run(&plan.candidates, &ctx.progress_bar()).await;

    print_report(&report, ctx.format)
}

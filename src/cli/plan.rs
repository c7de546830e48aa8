//! Plan command: list the contacts a sync would create

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, RunArgs};
use crate::error::Result;
use crate::models::CandidateDisplay;
use crate::output::{Formattable, json};
use crate::sync::{ContactFilter, Plan, SyncOptions, build_candidates, scan_syncing_organizations};

/// Scan, filter and extract without touching Autotask
pub async fn collect(ctx: &CommandContext, options: &SyncOptions) -> Result<Plan> {
    let directory = ctx.directory()?;
    let throttle = ctx.throttle()?;

    let orgs = scan_syncing_organizations(&directory, &ctx.progress_bar()).await;
    if ctx.format == OutputFormat::Pretty {
        println!("{} {}", "Active Autotask orgs:".bold(), orgs.len());
    }

    let filter = ContactFilter::new(&directory, &throttle, ctx.workers());
    Ok(build_candidates(&filter, &orgs, options, &ctx.progress_bar()).await)
}

/// Print the organizations a plan passed over
pub fn print_skipped_orgs(plan: &Plan) {
    for org in &plan.skipped_orgs {
        println!(
            "  {} Org '{}' (ID: {}): {}",
            "-".yellow(),
            org.name,
            org.id,
            org.reason
        );
    }
}

/// Run the plan command
pub async fn run(opts: &GlobalOptions, args: &RunArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let options = args.resolve()?;

    let plan = collect(&ctx, &options).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&plan)?),
        format => {
            if format == OutputFormat::Pretty {
                print_skipped_orgs(&plan);
                println!(
                    "\n{} {}\n",
                    "Contacts to create (before duplicates filtered):".bold(),
                    plan.candidates.len().to_string().cyan()
                );
            }
            let rows: Vec<CandidateDisplay> =
                plan.candidates.iter().map(CandidateDisplay::from).collect();
            rows.print(format)?;
        }
    }

    Ok(())
}

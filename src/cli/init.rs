//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Prompt for a value, keeping the current one when left blank
fn input_keeping(prompt: &str, current: Option<&str>) -> Result<Option<String>> {
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
    if let Some(current) = current {
        input = input.default(current.to_string());
    }

    let value = input.interact_text()?;
    Ok(Some(value.trim().to_string()).filter(|v| !v.is_empty()))
}

/// Prompt for a secret, keeping the current one when left blank
fn password_keeping(prompt: &str, current: Option<&str>) -> Result<Option<String>> {
    let value = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(if current.is_some() {
            format!("{} (blank keeps current)", prompt)
        } else {
            prompt.to_string()
        })
        .allow_empty_password(current.is_some())
        .interact()?;

    if value.trim().is_empty() {
        Ok(current.map(str::to_string))
    } else {
        Ok(Some(value.trim().to_string()))
    }
}

/// Run the init command
///
/// Base URLs and limits keep their current values; edit the config file to
/// change them.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to GlueSync!".bold().green());
    println!("Let's set up your IT Glue and Autotask credentials.\n");

    let mut config = Config::load_at(opts.config_ref())?;

    config.directory.api_key =
        password_keeping("IT Glue API key", config.directory.api_key.as_deref())?;

    let ticketing = &mut config.ticketing;
    ticketing.username = input_keeping("Autotask API username", ticketing.username.as_deref())?;
    ticketing.secret = password_keeping("Autotask API secret", ticketing.secret.as_deref())?;
    ticketing.integration_code = password_keeping(
        "Autotask API integration code",
        ticketing.integration_code.as_deref(),
    )?;

    let path = config.save_at(opts.config_ref())?;
    println!("\n{} Configuration saved to: {}", "✓".green(), path.display());

    let ready = config.require_api_key().is_ok() && config.require_ticketing().is_ok();
    if !ready {
        println!(
            "{}",
            "⚠ Some credentials are still missing; run init again or set GLUESYNC_* variables."
                .yellow()
        );
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - List synced organizations", "gluesync orgs".cyan());
    println!("  {} - Preview contacts to create", "gluesync plan".cyan());
    println!("  {} - Create missing contacts", "gluesync sync".cyan());

    Ok(())
}

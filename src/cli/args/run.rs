//! Arguments shared by the plan and sync commands

use std::io::IsTerminal;

use clap::Args;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::error::{ConfigError, Result};
use crate::sync::{LicenseFilter, SyncOptions};

/// License filter and organization exclusions for a run.
///
/// Both are prompted for when omitted on an interactive terminal.
#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Which contacts to push (licensed, unlicensed)
    #[arg(long, short = 'l', value_enum)]
    pub license: Option<LicenseFilter>,

    /// Comma-separated IT Glue organization IDs to skip
    #[arg(long, short = 'x')]
    pub exclude: Option<String>,
}

impl RunArgs {
    /// Resolve flags and prompts into run options.
    pub fn resolve(&self) -> Result<SyncOptions> {
        self.resolve_with(std::io::stdin().is_terminal())
    }

    fn resolve_with(&self, interactive: bool) -> Result<SyncOptions> {
        let license = match self.license {
            Some(license) => license,
            None if interactive => prompt_license()?,
            None => {
                return Err(ConfigError::Invalid(
                    "--license is required when not running interactively".to_string(),
                )
                .into());
            }
        };

        let exclude = match &self.exclude {
            Some(csv) => csv.clone(),
            None if interactive => prompt_exclusions()?,
            None => String::new(),
        };

        Ok(SyncOptions::new(license).exclude_csv(&exclude))
    }
}

fn prompt_license() -> Result<LicenseFilter> {
    let choices = ["Licensed users", "Unlicensed users"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which Microsoft contacts should be pushed?")
        .items(&choices)
        .default(0)
        .interact()?;

    Ok(if selection == 0 {
        LicenseFilter::Licensed
    } else {
        LicenseFilter::Unlicensed
    })
}

fn prompt_exclusions() -> Result<String> {
    let csv: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Organization IDs to exclude (comma-separated, blank for none)")
        .allow_empty(true)
        .interact_text()?;
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_from_flags() {
        let args = RunArgs {
            license: Some(LicenseFilter::Licensed),
            exclude: Some("7, 9".to_string()),
        };

        let options = args.resolve_with(false).unwrap();

        assert_eq!(options.license, LicenseFilter::Licensed);
        assert!(options.is_excluded("7"));
        assert!(options.is_excluded("9"));
    }

    #[test]
    fn test_missing_license_non_interactive_is_error() {
        let args = RunArgs::default();
        let err = args.resolve_with(false).unwrap_err();
        assert!(err.to_string().contains("--license"));
    }

    #[test]
    fn test_missing_exclude_non_interactive_is_empty() {
        let args = RunArgs {
            license: Some(LicenseFilter::Unlicensed),
            exclude: None,
        };

        let options = args.resolve_with(false).unwrap();
        assert!(options.excluded_org_ids.is_empty());
    }
}

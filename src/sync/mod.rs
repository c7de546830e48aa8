//! Contact reconciliation between IT Glue and Autotask
//!
//! The flow is: [`scanner`] finds organizations actively synced with
//! Autotask, [`filter`] picks the Microsoft-only contacts of each one,
//! [`extract`] normalizes their emails and phones, [`plan`] turns them into
//! creation candidates, and [`pipeline`] creates what Autotask lacks.

use std::collections::BTreeSet;

use serde::Serialize;

pub mod extract;
pub mod filter;
pub mod pipeline;
pub mod plan;
pub mod scanner;

pub use filter::ContactFilter;
pub use pipeline::{CreationCandidate, CreationPipeline, SyncReport};
pub use plan::{Plan, build_candidates};
pub use scanner::scan_syncing_organizations;

/// Which Microsoft contacts to push, by license tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LicenseFilter {
    /// Contacts tagged with a Microsoft license
    Licensed,
    /// Contacts without a Microsoft license tag
    Unlicensed,
}

impl LicenseFilter {
    /// Whether a contact with or without a license tag passes
    pub fn admits(self, has_license_tag: bool) -> bool {
        match self {
            LicenseFilter::Licensed => has_license_tag,
            LicenseFilter::Unlicensed => !has_license_tag,
        }
    }
}

/// Run-level choices made before any contact traffic
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub license: LicenseFilter,
    pub excluded_org_ids: BTreeSet<String>,
}

impl SyncOptions {
    pub fn new(license: LicenseFilter) -> Self {
        Self {
            license,
            excluded_org_ids: BTreeSet::new(),
        }
    }

    /// Add ids from a comma-separated list, ignoring blanks
    pub fn exclude_csv(mut self, csv: &str) -> Self {
        self.excluded_org_ids.extend(
            csv.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    pub fn is_excluded(&self, org_id: &str) -> bool {
        self.excluded_org_ids.contains(org_id)
    }
}

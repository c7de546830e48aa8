//! Organization scanning
//!
//! Lists every IT Glue organization, then fetches each one's adapter
//! relationships one at a time and keeps the ones actively synced with
//! Autotask.

use indicatif::ProgressBar;
use log::{info, warn};

use crate::client::DirectoryApi;
use crate::client::models::Organization;

/// Organizations with an active, non-orphaned Autotask relationship.
///
/// An organization whose detail cannot be fetched is skipped with a warning.
pub async fn scan_syncing_organizations(
    directory: &dyn DirectoryApi,
    progress: &ProgressBar,
) -> Vec<Organization> {
    let summaries = directory.list_organizations().await;
    info!("Found {} organizations", summaries.len());

    progress.set_length(summaries.len() as u64);
    progress.set_message("Checking organizations");

    let mut syncing = Vec::new();
    for summary in summaries {
        match directory.get_organization(&summary.id).await {
            Ok(org) if org.syncs_with_ticketing() => syncing.push(org),
            Ok(_) => {}
            Err(err) => warn!(
                "Failed to check org {} ({}): {}",
                summary.attributes.name, summary.id, err
            ),
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!("Active Autotask orgs: {}", syncing.len());
    syncing
}

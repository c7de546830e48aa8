//! Contact filtering
//!
//! Fetches every contact of an organization concurrently, paced by a shared
//! [`Throttle`], and keeps the ones that sync with Microsoft, do not sync
//! with Autotask, and match the requested license state.

use indicatif::ProgressBar;
use log::{debug, warn};

use super::LicenseFilter;
use crate::client::models::{
    ContactDetail, IDENTITY_PROVIDER_ADAPTER, Included, LICENSE_TAG_TYPE, TICKETING_ADAPTER,
};
use crate::client::{DirectoryApi, Throttle, fan_out};

/// Default size of the contact detail worker pool
pub const DEFAULT_WORKERS: usize = 10;

/// Whether any included relationship is an actively syncing `adapter`
pub fn syncs_with(included: &[Included], adapter: &str) -> bool {
    included
        .iter()
        .filter_map(Included::as_adapter)
        .any(|a| a.adapter_type_name == adapter && a.sync)
}

/// Whether a Microsoft Licenses tag is attached
pub fn has_license_tag(included: &[Included]) -> bool {
    included.iter().any(|item| {
        matches!(item, Included::Tag(tag) if tag.resource_type_name == LICENSE_TAG_TYPE)
    })
}

/// Derived sync and license state of one contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub identity_provider: bool,
    pub ticketing: bool,
    pub licensed: bool,
}

impl Classification {
    pub fn of(contact: &ContactDetail) -> Self {
        Self {
            identity_provider: syncs_with(&contact.included, IDENTITY_PROVIDER_ADAPTER),
            ticketing: syncs_with(&contact.included, TICKETING_ADAPTER),
            licensed: has_license_tag(&contact.included),
        }
    }

    /// Synced from Microsoft, missing from Autotask, license state as requested.
    ///
    /// Relationships with adapters other than Autotask do not disqualify.
    pub fn wanted(&self, license: LicenseFilter) -> bool {
        self.identity_provider && !self.ticketing && license.admits(self.licensed)
    }
}

/// Concurrent contact fetch-and-classify for one organization at a time
pub struct ContactFilter<'a> {
    directory: &'a dyn DirectoryApi,
    throttle: &'a Throttle,
    workers: usize,
}

impl<'a> ContactFilter<'a> {
    pub fn new(directory: &'a dyn DirectoryApi, throttle: &'a Throttle, workers: usize) -> Self {
        Self {
            directory,
            throttle,
            workers,
        }
    }

    /// Contacts of `org_id` that should be created in Autotask.
    ///
    /// Contacts whose detail cannot be fetched are logged and left out.
    /// Results come back in completion order.
    pub async fn filter(
        &self,
        org_id: &str,
        license: LicenseFilter,
        progress: &ProgressBar,
    ) -> Vec<ContactDetail> {
        let contact_ids = self.directory.list_contact_ids(org_id).await;
        debug!("Org {} has {} contacts", org_id, contact_ids.len());

        progress.reset();
        progress.set_length(contact_ids.len() as u64);
        progress.set_message(format!("Filtering contacts for org {}", org_id));

        let directory = self.directory;
        let throttle = self.throttle;
        let fetched = fan_out(
            contact_ids,
            move |contact_id: String| async move {
                throttle.acquire().await;
                let result = directory.get_contact(org_id, &contact_id).await;
                progress.inc(1);
                (contact_id, result)
            },
            self.workers,
        )
        .await;

        let mut wanted = Vec::new();
        for (contact_id, result) in fetched {
            match result {
                Ok(contact) => {
                    let class = Classification::of(&contact);
                    if class.wanted(license) {
                        debug!("Keeping contact {} of org {}", contact.id, org_id);
                        wanted.push(contact);
                    } else {
                        debug!("Passing over contact {}: {:?}", contact.id, class);
                    }
                }
                Err(err) => warn!("Failed to fetch contact {}: {}", contact_id, err),
            }
        }

        progress.finish_and_clear();
        wanted
    }
}

//! Creation planning
//!
//! Turns the syncing organizations into an ordered list of contacts to
//! create. Nothing here writes to Autotask.

use indicatif::ProgressBar;
use log::info;
use serde::Serialize;

use super::extract::extract;
use super::filter::ContactFilter;
use super::pipeline::{ContactPayload, CreationCandidate};
use super::SyncOptions;
use crate::client::models::{ContactDetail, Organization};

/// An organization left out of the plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedOrg {
    pub id: String,
    pub name: String,
    pub reason: String,
}

/// Contacts to create plus the organizations that were passed over
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub candidates: Vec<CreationCandidate>,
    pub skipped_orgs: Vec<SkippedOrg>,
}

/// Payload for a filtered contact, or `None` when it has no email
pub fn payload_for(contact: &ContactDetail) -> Option<ContactPayload> {
    let fields = extract(contact);
    let email = fields.primary_email()?.to_string();
    let attrs = &contact.attributes;

    Some(ContactPayload {
        first_name: attrs.first_name.clone().unwrap_or_default(),
        last_name: attrs.last_name.clone().unwrap_or_default(),
        email,
        phone: fields.primary_phone().unwrap_or_default().to_string(),
    })
}

/// Build creation candidates for every syncing organization
pub async fn build_candidates(
    filter: &ContactFilter<'_>,
    orgs: &[Organization],
    options: &SyncOptions,
    progress: &ProgressBar,
) -> Plan {
    if !options.excluded_org_ids.is_empty() {
        let ids: Vec<&str> = options.excluded_org_ids.iter().map(String::as_str).collect();
        info!("Excluding {} org(s): {}", ids.len(), ids.join(", "));
    }

    let mut plan = Plan::default();

    for org in orgs {
        if options.is_excluded(&org.id) {
            info!("Org '{}' (ID: {}) is in exclude list, skipping", org.name, org.id);
            plan.skipped_orgs.push(SkippedOrg {
                id: org.id.clone(),
                name: org.name.clone(),
                reason: "excluded".to_string(),
            });
            continue;
        }

        let Some(company_id) = org.ticketing_company_id() else {
            info!("Org '{}' (ID: {}) has no Autotask ID, skipping", org.name, org.id);
            plan.skipped_orgs.push(SkippedOrg {
                id: org.id.clone(),
                name: org.name.clone(),
                reason: "no Autotask ID".to_string(),
            });
            continue;
        };

        info!("Org: {} (ID: {}) - Autotask ID: {}", org.name, org.id, company_id);

        let contacts = filter.filter(&org.id, options.license, progress).await;
        plan.candidates
            .extend(contacts.iter().filter_map(payload_for).map(|payload| CreationCandidate {
                company_id: company_id.to_string(),
                org_name: org.name.clone(),
                payload,
            }));
    }

    info!(
        "Total contacts to create (before duplicates filtered): {}",
        plan.candidates.len()
    );
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Throttle;
    use crate::client::mock::{ContactBuilder, MockDirectory, MockTicketing, adapter, organization};
    use crate::sync::pipeline::CreationPipeline;
    use crate::sync::scanner::scan_syncing_organizations;
    use crate::sync::LicenseFilter;

    fn acme() -> MockDirectory {
        MockDirectory::new()
            .with_organization(organization(
                "1",
                "Acme",
                vec![adapter("Autotask", true, false, Some("500"))],
            ))
            .with_contact(
                "1",
                ContactBuilder::new("c1")
                    .name("Jane", "Doe")
                    .email("jane@acme.test")
                    .phone("555-0100")
                    .syncing_with("Microsoft")
                    .tagged("Microsoft Licenses")
                    .build(),
            )
    }

    async fn plan_for(directory: &MockDirectory, options: &SyncOptions) -> Plan {
        let throttle = Throttle::new(1000).unwrap();
        let filter = ContactFilter::new(directory, &throttle, 10);
        let orgs = scan_syncing_organizations(directory, &ProgressBar::hidden()).await;
        build_candidates(&filter, &orgs, options, &ProgressBar::hidden()).await
    }

    #[tokio::test]
    async fn test_acme_licensed_contact_is_planned() {
        let directory = acme();

        let plan = plan_for(&directory, &SyncOptions::new(LicenseFilter::Licensed)).await;

        assert_eq!(plan.candidates.len(), 1);
        let candidate = &plan.candidates[0];
        assert_eq!(candidate.company_id, "500");
        assert_eq!(candidate.org_name, "Acme");
        assert_eq!(
            candidate.payload,
            ContactPayload {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@acme.test".to_string(),
                phone: "555-0100".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_acme_licensed_contact_excluded_when_unlicensed_requested() {
        let directory = acme();

        let plan = plan_for(&directory, &SyncOptions::new(LicenseFilter::Unlicensed)).await;

        assert!(plan.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_acme_end_to_end_creates_once() {
        let directory = acme();
        let ticketing = MockTicketing::new();

        let plan = plan_for(&directory, &SyncOptions::new(LicenseFilter::Licensed)).await;
        let mut pipeline = CreationPipeline::new(&ticketing);
        let report = pipeline.run(&plan.candidates, &ProgressBar::hidden()).await;

        assert_eq!(report.created, 1);
        assert_eq!(report.total, 1);
        let created = ticketing.created().await;
        assert_eq!(created[0].0, "500");
        assert_eq!(created[0].1.email_address, "jane@acme.test");
    }

    #[tokio::test]
    async fn test_contact_without_email_never_queued() {
        let directory = MockDirectory::new()
            .with_organization(organization(
                "1",
                "Acme",
                vec![adapter("Autotask", true, false, Some("500"))],
            ))
            .with_contact(
                "1",
                ContactBuilder::new("c1")
                    .name("Jane", "Doe")
                    .phone("555-0100")
                    .syncing_with("Microsoft")
                    .build(),
            );

        let plan = plan_for(&directory, &SyncOptions::new(LicenseFilter::Unlicensed)).await;

        assert!(plan.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_excluded_org_skipped_without_contact_traffic() {
        let directory = acme();
        let options = SyncOptions::new(LicenseFilter::Licensed).exclude_csv("1");

        let plan = plan_for(&directory, &options).await;

        assert!(plan.candidates.is_empty());
        assert_eq!(plan.skipped_orgs.len(), 1);
        assert_eq!(plan.skipped_orgs[0].reason, "excluded");
        assert_eq!(directory.contact_fetches(), 0);
    }

    #[tokio::test]
    async fn test_org_without_remote_id_skipped() {
        let directory = MockDirectory::new()
            .with_organization(organization(
                "2",
                "Nameless",
                vec![adapter("Autotask", true, false, None)],
            ))
            .with_contact(
                "2",
                ContactBuilder::new("c1")
                    .name("Jane", "Doe")
                    .email("jane@nameless.test")
                    .syncing_with("Microsoft")
                    .build(),
            );

        let plan = plan_for(&directory, &SyncOptions::new(LicenseFilter::Unlicensed)).await;

        assert!(plan.candidates.is_empty());
        assert_eq!(plan.skipped_orgs[0].reason, "no Autotask ID");
    }

    #[test]
    fn test_payload_defaults_missing_names_and_phone() {
        let contact = ContactBuilder::new("c1").email("solo@acme.test").build();

        let payload = payload_for(&contact).unwrap();

        assert_eq!(payload.first_name, "");
        assert_eq!(payload.last_name, "");
        assert_eq!(payload.phone, "");
        assert_eq!(payload.email, "solo@acme.test");
    }
}

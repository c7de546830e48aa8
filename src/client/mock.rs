//! In-memory IT Glue and Autotask clients for testing
//!
//! Configure expected responses via builder methods, then hand the mocks to
//! the sync logic in place of the HTTP clients.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{DirectoryApi, TicketingApi};
use super::models::directory::{
    AdapterRelationship, ContactAttributes, ContactListEntry, ContactMethod,
    OrganizationAttributes, Tag,
};
use super::models::{ContactDetail, Included, NewContact, Organization, OrganizationSummary};
use crate::error::{ApiError, Result};

/// Build an adapter relationship record
pub fn adapter(name: &str, sync: bool, orphaned: bool, remote_id: Option<&str>) -> AdapterRelationship {
    AdapterRelationship {
        adapter_type_name: name.to_string(),
        sync,
        orphaned,
        remote_id: remote_id.map(str::to_string),
    }
}

/// Build an organization with the given adapters
pub fn organization(id: &str, name: &str, adapters: Vec<AdapterRelationship>) -> Organization {
    Organization {
        id: id.to_string(),
        name: name.to_string(),
        adapters,
    }
}

/// Builder for contact fixtures
#[derive(Debug, Clone)]
pub struct ContactBuilder {
    contact: ContactDetail,
}

impl ContactBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            contact: ContactDetail {
                id: id.to_string(),
                attributes: ContactAttributes::default(),
                included: Vec::new(),
            },
        }
    }

    pub fn name(mut self, first: &str, last: &str) -> Self {
        self.contact.attributes.first_name = Some(first.to_string());
        self.contact.attributes.last_name = Some(last.to_string());
        self
    }

    pub fn email(mut self, value: &str) -> Self {
        self.contact.attributes.contact_emails.push(ContactListEntry {
            value: Some(value.to_string()),
        });
        self
    }

    pub fn phone(mut self, value: &str) -> Self {
        self.contact.attributes.contact_phones.push(ContactListEntry {
            value: Some(value.to_string()),
        });
        self
    }

    pub fn syncing_with(mut self, adapter_name: &str) -> Self {
        self.contact
            .included
            .push(Included::Adapter(adapter(adapter_name, true, false, None)));
        self
    }

    pub fn linked_to(mut self, adapter_name: &str) -> Self {
        self.contact
            .included
            .push(Included::Adapter(adapter(adapter_name, false, false, None)));
        self
    }

    pub fn tagged(mut self, resource_type_name: &str) -> Self {
        self.contact.included.push(Included::Tag(Tag {
            resource_type_name: resource_type_name.to_string(),
        }));
        self
    }

    pub fn method(mut self, label: &str, value: &str) -> Self {
        self.contact.included.push(Included::ContactMethod(ContactMethod {
            label: label.to_string(),
            value: value.to_string(),
        }));
        self
    }

    pub fn build(self) -> ContactDetail {
        self.contact
    }
}

/// Mock IT Glue client.
///
/// # Example
/// ```ignore
/// let mock = MockDirectory::new()
///     .with_organization(organization("1", "Acme", vec![adapter("Autotask", true, false, Some("500"))]))
///     .with_contact("1", ContactBuilder::new("c1").syncing_with("Microsoft").build());
/// ```
#[derive(Default)]
pub struct MockDirectory {
    organizations: Vec<Organization>,
    failing_organizations: HashSet<String>,
    contacts: HashMap<String, Vec<ContactDetail>>,
    failing_contacts: HashSet<String>,
    contact_fetches: Arc<AtomicUsize>,
    organization_fetches: Arc<AtomicUsize>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(mut self, org: Organization) -> Self {
        self.organizations.push(org);
        self
    }

    /// List the organization but fail its detail fetch
    pub fn with_failing_organization(mut self, org: Organization) -> Self {
        self.failing_organizations.insert(org.id.clone());
        self.organizations.push(org);
        self
    }

    pub fn with_contact(mut self, org_id: &str, contact: ContactDetail) -> Self {
        self.contacts.entry(org_id.to_string()).or_default().push(contact);
        self
    }

    /// List the contact id but fail its detail fetch
    pub fn with_failing_contact(mut self, org_id: &str, contact_id: &str) -> Self {
        self.failing_contacts.insert(contact_id.to_string());
        self.contacts
            .entry(org_id.to_string())
            .or_default()
            .push(ContactBuilder::new(contact_id).build());
        self
    }

    pub fn contact_fetches(&self) -> usize {
        self.contact_fetches.load(Ordering::SeqCst)
    }

    pub fn organization_fetches(&self) -> usize {
        self.organization_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryApi for MockDirectory {
    async fn list_organizations(&self) -> Vec<OrganizationSummary> {
        self.organizations
            .iter()
            .map(|o| OrganizationSummary {
                id: o.id.clone(),
                attributes: OrganizationAttributes {
                    name: o.name.clone(),
                },
            })
            .collect()
    }

    async fn get_organization(&self, org_id: &str) -> Result<Organization> {
        self.organization_fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing_organizations.contains(org_id) {
            return Err(ApiError::Forbidden.into());
        }
        self.organizations
            .iter()
            .find(|o| o.id == org_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Organization {}", org_id)).into())
    }

    async fn list_contact_ids(&self, org_id: &str) -> Vec<String> {
        self.contacts
            .get(org_id)
            .map(|cs| cs.iter().map(|c| c.id.clone()).collect())
            .unwrap_or_default()
    }

    async fn get_contact(&self, org_id: &str, contact_id: &str) -> Result<ContactDetail> {
        self.contact_fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing_contacts.contains(contact_id) {
            return Err(ApiError::RetriesExhausted {
                method: "GET".to_string(),
                url: format!("/organizations/{}/relationships/contacts/{}", org_id, contact_id),
                attempts: 5,
                last_status: Some(503),
            }
            .into());
        }
        self.contacts
            .get(org_id)
            .and_then(|cs| cs.iter().find(|c| c.id == contact_id))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Contact {}", contact_id)).into())
    }
}

/// Mock Autotask client recording every create request.
#[derive(Default)]
pub struct MockTicketing {
    existing: HashMap<String, HashSet<String>>,
    unreadable_companies: HashSet<String>,
    reject_emails: HashSet<String>,
    created: Mutex<Vec<(String, NewContact)>>,
    email_reads: Mutex<Vec<String>>,
}

impl MockTicketing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing contact email for a company (stored lower-cased)
    pub fn with_existing(mut self, company_id: &str, email: &str) -> Self {
        self.existing
            .entry(company_id.to_string())
            .or_default()
            .insert(email.trim().to_lowercase());
        self
    }

    /// Make the existing-email read for this company fail
    pub fn with_unreadable_company(mut self, company_id: &str) -> Self {
        self.unreadable_companies.insert(company_id.to_string());
        self
    }

    /// Make creates for this email fail
    pub fn rejecting(mut self, email: &str) -> Self {
        self.reject_emails.insert(email.to_string());
        self
    }

    pub async fn created(&self) -> Vec<(String, NewContact)> {
        self.created.lock().await.clone()
    }

    /// Company ids whose existing contacts were read, in call order
    pub async fn email_reads(&self) -> Vec<String> {
        self.email_reads.lock().await.clone()
    }
}

#[async_trait]
impl TicketingApi for MockTicketing {
    async fn list_contact_emails(&self, company_id: &str) -> Result<HashSet<String>> {
        self.email_reads.lock().await.push(company_id.to_string());
        if self.unreadable_companies.contains(company_id) {
            return Err(ApiError::RetriesExhausted {
                method: "GET".to_string(),
                url: format!("/Companies/{}/Contacts", company_id),
                attempts: 5,
                last_status: Some(503),
            }
            .into());
        }
        Ok(self.existing.get(company_id).cloned().unwrap_or_default())
    }

    async fn create_contact(&self, company_id: &str, contact: &NewContact) -> Result<Option<i64>> {
        if self.reject_emails.contains(&contact.email_address) {
            return Err(ApiError::BadRequest("EmailAddress is invalid".to_string()).into());
        }
        let mut created = self.created.lock().await;
        created.push((company_id.to_string(), contact.clone()));
        Ok(Some(created.len() as i64))
    }
}

//! API trait definitions
//!
//! The sync logic talks to both services only through these traits:
//! - [`DirectoryApi`] - IT Glue organizations and contacts (read-only)
//! - [`TicketingApi`] - Autotask company contacts (read and create)
//!
//! IT Glue collection reads are best-effort and return whatever could be
//! gathered. Everything else returns a `Result`, including the Autotask email
//! read, because de-duplication cannot work from a partial list.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::client::models::{ContactDetail, NewContact, Organization, OrganizationSummary};
use crate::error::Result;

/// Read access to IT Glue
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Every organization visible to the API key
    async fn list_organizations(&self) -> Vec<OrganizationSummary>;

    /// Organization detail with its adapter relationships
    async fn get_organization(&self, org_id: &str) -> Result<Organization>;

    /// Ids of every contact in an organization
    async fn list_contact_ids(&self, org_id: &str) -> Vec<String>;

    /// Contact detail with adapters, contact methods and related items
    async fn get_contact(&self, org_id: &str, contact_id: &str) -> Result<ContactDetail>;
}

/// Contact access to Autotask
#[async_trait]
pub trait TicketingApi: Send + Sync {
    /// Lower-cased, trimmed, non-blank emails of a company's existing contacts.
    ///
    /// Fails if any page of the collection could not be read.
    async fn list_contact_emails(&self, company_id: &str) -> Result<HashSet<String>>;

    /// Create a contact under a company, returning the new item id if reported
    async fn create_contact(&self, company_id: &str, contact: &NewContact) -> Result<Option<i64>>;
}

//! API data models
//!
//! Models are organized by the service that produces or consumes them.

pub mod directory;
pub mod ticketing;

pub use directory::{
    ContactDetail, ContactRefPage, ContactResource, Document, IDENTITY_PROVIDER_ADAPTER, Included,
    LICENSE_TAG_TYPE, Organization, OrganizationPage, OrganizationResource, OrganizationSummary,
    TICKETING_ADAPTER,
};
pub use ticketing::{CompanyContactPage, CreateResponse, NewContact};

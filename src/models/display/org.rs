//! Organization display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Organization;

/// An IT Glue organization and the Autotask company it maps to.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct OrgDisplay {
    #[tabled(rename = "ORG ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// Autotask company id, "-" when the relationship carries none
    #[tabled(rename = "AUTOTASK ID")]
    pub company_id: String,
}

impl From<&Organization> for OrgDisplay {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id.clone(),
            name: org.name.clone(),
            company_id: org.ticketing_company_id().unwrap_or("-").to_string(),
        }
    }
}

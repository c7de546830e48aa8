//! Autotask REST models

use serde::{Deserialize, Serialize};

use crate::client::pagination::CursorPage;

/// Existing company contact; only the email matters for dedup
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyContact {
    #[serde(rename = "emailAddress", default)]
    pub email_address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageDetails {
    #[serde(rename = "nextPageUrl", default)]
    pub next_page_url: Option<String>,
}

/// One page of `/Companies/{id}/Contacts`
#[derive(Debug, Deserialize)]
pub struct CompanyContactPage {
    #[serde(default)]
    pub items: Vec<CompanyContact>,
    #[serde(rename = "pageDetails", default)]
    pub page_details: Option<PageDetails>,
}

impl CursorPage for CompanyContactPage {
    type Item = CompanyContact;

    fn into_parts(self) -> (Vec<CompanyContact>, Option<String>) {
        let next = self.page_details.and_then(|p| p.next_page_url);
        (self.items, next)
    }
}

/// Body of a contact create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewContact {
    pub is_active: u8,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone: String,
}

/// Response of a successful create
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResponse {
    #[serde(rename = "itemId", default)]
    pub item_id: Option<i64>,
}

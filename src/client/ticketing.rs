//! Autotask REST API client

use std::collections::HashSet;

use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use super::api::TicketingApi;
use super::executor::RequestExecutor;
use super::models::{CompanyContactPage, CreateResponse, NewContact};
use super::pagination::walk_cursor;
use crate::config::TicketingCredentials;
use crate::error::{ApiError, Result};

/// Autotask REST API client
pub struct TicketingClient {
    executor: RequestExecutor,
    base_url: String,
    headers: HeaderMap,
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        ApiError::BadRequest(format!("{} contains invalid header characters", name)).into()
    })
}

impl TicketingClient {
    /// Create a client authenticating with the API user headers
    pub fn new(
        executor: RequestExecutor,
        base_url: &str,
        credentials: &TicketingCredentials,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Header names are case-insensitive; `http` requires them lower-cased
        headers.insert(
            "apiintegrationcode",
            header_value("integration code", &credentials.integration_code)?,
        );
        headers.insert("username", header_value("username", &credentials.username)?);
        headers.insert("secret", header_value("secret", &credentials.secret)?);

        Ok(Self {
            executor,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    fn contacts_url(&self, company_id: &str) -> String {
        format!("{}/Companies/{}/Contacts", self.base_url, company_id)
    }
}

#[async_trait]
impl TicketingApi for TicketingClient {
    async fn list_contact_emails(&self, company_id: &str) -> Result<HashSet<String>> {
        let contacts = walk_cursor::<CompanyContactPage>(
            &self.executor,
            &self.contacts_url(company_id),
            &self.headers,
        )
        .await
        .complete()?;

        Ok(contacts
            .into_iter()
            .filter_map(|c| c.email_address)
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect())
    }

    async fn create_contact(&self, company_id: &str, contact: &NewContact) -> Result<Option<i64>> {
        let body = serde_json::to_value(contact)?;
        let response = self
            .executor
            .execute(
                Method::POST,
                &self.contacts_url(company_id),
                &self.headers,
                Some(&body),
                None,
            )
            .await?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(ApiError::from_status(status, text).into());
        }

        let item_id = serde_json::from_str::<CreateResponse>(&text)
            .ok()
            .and_then(|r| r.item_id);
        debug!("Created contact {:?} under company {}", item_id, company_id);
        Ok(item_id)
    }
}

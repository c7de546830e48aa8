//! IT Glue API client

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use super::api::DirectoryApi;
use super::executor::RequestExecutor;
use super::models::{
    ContactDetail, ContactRefPage, ContactResource, Document, Organization, OrganizationPage,
    OrganizationResource, OrganizationSummary,
};
use super::pagination::{DIRECTORY_PAGE_SIZE, walk_cursor, walk_numbered};
use crate::error::{ApiError, Result};

/// JSON:API media type required by IT Glue
const JSON_API: &str = "application/vnd.api+json";

/// Expansions requested with every contact detail
const CONTACT_INCLUDES: &str = "adapters_resources,contact_methods,related_items";

/// IT Glue API client
pub struct DirectoryClient {
    executor: RequestExecutor,
    base_url: String,
    headers: HeaderMap,
}

impl DirectoryClient {
    /// Create a client authenticating with `api_key`
    pub fn new(executor: RequestExecutor, base_url: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key)
                .map_err(|_| ApiError::BadRequest("API key contains invalid characters".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_API));

        Ok(Self {
            executor,
            base_url: base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    /// GET a single document and decode it
    async fn get_document<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .executor
            .execute(Method::GET, url, &self.headers, None, None)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, body).into());
        }

        let doc = response
            .json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse {}: {}", url, e)))?;
        Ok(doc)
    }
}

#[async_trait]
impl DirectoryApi for DirectoryClient {
    async fn list_organizations(&self) -> Vec<OrganizationSummary> {
        let url = format!("{}/organizations", self.base_url);
        walk_numbered::<OrganizationPage>(&self.executor, &url, &self.headers).await
    }

    async fn get_organization(&self, org_id: &str) -> Result<Organization> {
        let url = format!(
            "{}/organizations/{}?include=adapters_resources",
            self.base_url, org_id
        );
        let doc: Document<OrganizationResource> = self.get_document(&url).await?;
        Ok(Organization::from(doc))
    }

    async fn list_contact_ids(&self, org_id: &str) -> Vec<String> {
        let url = format!(
            "{}/organizations/{}/relationships/contacts?page[size]={}",
            self.base_url, org_id, DIRECTORY_PAGE_SIZE
        );
        walk_cursor::<ContactRefPage>(&self.executor, &url, &self.headers)
            .await
            .items
            .into_iter()
            .map(|r| r.id)
            .collect()
    }

    async fn get_contact(&self, org_id: &str, contact_id: &str) -> Result<ContactDetail> {
        let url = format!(
            "{}/organizations/{}/relationships/contacts/{}?include={}",
            self.base_url, org_id, contact_id, CONTACT_INCLUDES
        );
        let doc: Document<ContactResource> = self.get_document(&url).await?;
        Ok(ContactDetail::from(doc))
    }
}

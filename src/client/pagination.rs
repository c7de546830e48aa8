//! Pagination walkers
//!
//! Two conventions are in play:
//! - cursor style, where every page carries the URL of the next one
//!   (IT Glue `links.next`, Autotask `pageDetails.nextPageUrl`)
//! - numbered style, where `page[number]` is incremented until an empty page
//!   comes back (IT Glue organization list)
//!
//! Both walkers are best-effort: a page that cannot be fetched or decoded ends
//! the walk with a warning and the items gathered so far are returned. The
//! cursor walker also hands back the error that ended it, so callers that
//! cannot act on a partial list can tell it apart from a complete one.

use log::{debug, warn};
use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use super::executor::RequestExecutor;
use crate::error::ApiError;

/// Page size requested from IT Glue collection endpoints
pub const DIRECTORY_PAGE_SIZE: usize = 100;

/// A decoded page of a cursor-paginated collection.
pub trait CursorPage: DeserializeOwned {
    type Item;

    /// Split the page into its items and the next-page URL, if any
    fn into_parts(self) -> (Vec<Self::Item>, Option<String>);
}

/// A decoded page of a number-paginated collection.
pub trait NumberedPage: DeserializeOwned {
    type Item;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Items gathered by a cursor walk, and the error that cut it short if any
#[derive(Debug)]
pub struct CursorWalk<T> {
    pub items: Vec<T>,
    pub truncated_by: Option<ApiError>,
}

impl<T> CursorWalk<T> {
    /// Every item, or the error if the walk stopped early
    pub fn complete(self) -> Result<Vec<T>, ApiError> {
        match self.truncated_by {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

/// Follow next-page links from `seed_url` until they run out.
///
/// Items are returned in response order, pages concatenated as fetched.
pub async fn walk_cursor<P: CursorPage>(
    executor: &RequestExecutor,
    seed_url: &str,
    headers: &HeaderMap,
) -> CursorWalk<P::Item> {
    let mut items = Vec::new();
    let mut next = Some(seed_url.to_string());
    let mut page_count = 0usize;
    let mut truncated_by = None;

    while let Some(url) = next.take() {
        let page = match fetch_page::<P>(executor, &url, headers, None).await {
            Ok(page) => page,
            Err(err) => {
                warn!(
                    "Stopping pagination at {} after {} page(s): {}",
                    url, page_count, err
                );
                truncated_by = Some(err);
                break;
            }
        };

        let (page_items, next_url) = page.into_parts();
        page_count += 1;
        debug!("Page {} of {} returned {} items", page_count, seed_url, page_items.len());
        items.extend(page_items);
        next = next_url.filter(|u| !u.is_empty());
    }

    CursorWalk {
        items,
        truncated_by,
    }
}

/// Request `page[number]=1, 2, ...` from `url` until a page comes back empty.
pub async fn walk_numbered<P: NumberedPage>(
    executor: &RequestExecutor,
    url: &str,
    headers: &HeaderMap,
) -> Vec<P::Item> {
    let mut items = Vec::new();
    let mut page_number = 1usize;

    loop {
        let params = [("page[number]", page_number.to_string())];
        let page_items = match fetch_page::<P>(executor, url, headers, Some(&params)).await {
            Ok(page) => page.into_items(),
            Err(err) => {
                warn!("Failed to fetch {} (page {}): {}", url, page_number, err);
                break;
            }
        };

        if page_items.is_empty() {
            break;
        }
        debug!("Page {} of {} returned {} items", page_number, url, page_items.len());
        items.extend(page_items);
        page_number += 1;
    }

    items
}

async fn fetch_page<P: DeserializeOwned>(
    executor: &RequestExecutor,
    url: &str,
    headers: &HeaderMap,
    params: Option<&[(&str, String)]>,
) -> Result<P, ApiError> {
    let response = executor
        .execute(Method::GET, url, headers, None, params)
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::from_status(status, body));
    }

    response
        .json::<P>()
        .await
        .map_err(|e| ApiError::InvalidResponse(format!("undecodable page: {}", e)))
}

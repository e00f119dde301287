//! Query utilities for the NSX manager API
//!
//! Provides a helper for list endpoints, which wrap their results in the
//! manager's `ListResult` envelope.

use crate::common::HttpClient;
use crate::error::NsxError;
use crate::models::ListResult;
use serde::Deserialize;

/// List resources from an endpoint with optional filtering
pub async fn list_resources<T: for<'de> Deserialize<'de>>(
    http: &HttpClient,
    path: &str,
    filters: &[(&str, &str)],
) -> Result<Vec<T>, NsxError> {
    let mut url = path.to_string();

    if !filters.is_empty() {
        let query_string = http.build_query_string(filters);
        url = format!("{}?{}", url, query_string);
    }

    let response: ListResult<T> = http.get(&url).await?;
    Ok(response.results)
}

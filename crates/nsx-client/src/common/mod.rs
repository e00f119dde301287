//! Common utilities for the NSX manager API client
//!
//! Provides the HTTP wrapper shared by all API modules. The manager's
//! status contract is enforced here once: 200/201 are success, 404 maps to
//! [`NsxError::NotFound`], and every other code becomes
//! [`NsxError::UnexpectedStatus`].

pub mod query;

use crate::error::NsxError;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// HTTP client wrapper with basic-auth credentials
pub struct HttpClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, username: String, password: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password))
            .header("Accept", "application/json")
    }

    /// Make a GET request returning the raw status and body.
    ///
    /// Used for credential validation, where the caller inspects the status
    /// itself instead of going through the normal contract.
    pub async fn get_status(&self, path: &str) -> Result<(StatusCode, String), NsxError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(NsxError::Http)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok((status, body))
    }

    /// Make a GET request
    pub async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, NsxError> {
        let url = self.build_url(path);
        debug!("GET {}", url);

        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(NsxError::Http)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(NsxError::NotFound(format!(
                "object not found: {} - {}",
                path, body
            )));
        }

        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(NsxError::UnexpectedStatus {
                status: status.as_u16(),
                body: format!("GET {} failed: {}", path, body),
            });
        }

        response.json().await.map_err(NsxError::Http)
    }

    /// Make a POST request. The manager replies 201 Created on success.
    pub async fn post<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, NsxError> {
        let url = self.build_url(path);
        debug!("POST {}", url);

        let response = self
            .request(reqwest::Method::POST, &url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(NsxError::Http)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body_text = response.text().await.unwrap_or_default();
            return Err(NsxError::NotFound(format!(
                "parent not found: {} - {}",
                path, body_text
            )));
        }

        if status != StatusCode::CREATED {
            let body_text = response.text().await.unwrap_or_default();
            return Err(NsxError::UnexpectedStatus {
                status: status.as_u16(),
                body: format!("POST {} failed: {}", path, body_text),
            });
        }

        response.json().await.map_err(NsxError::Http)
    }

    /// Make a PUT request (full-object update, `_revision` included)
    pub async fn put<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, NsxError> {
        let url = self.build_url(path);
        debug!("PUT {}", url);

        let response = self
            .request(reqwest::Method::PUT, &url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(NsxError::Http)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body_text = response.text().await.unwrap_or_default();
            return Err(NsxError::NotFound(format!(
                "object not found: {} - {}",
                path, body_text
            )));
        }

        if status != StatusCode::OK {
            let body_text = response.text().await.unwrap_or_default();
            return Err(NsxError::UnexpectedStatus {
                status: status.as_u16(),
                body: format!("PUT {} failed: {}", path, body_text),
            });
        }

        response.json().await.map_err(NsxError::Http)
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), NsxError> {
        let url = self.build_url(path);
        debug!("DELETE {}", url);

        let response = self
            .request(reqwest::Method::DELETE, &url)
            .send()
            .await
            .map_err(NsxError::Http)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(NsxError::NotFound(format!(
                "object not found: {} - {}",
                path, body
            )));
        }

        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            let body = response.text().await.unwrap_or_default();
            return Err(NsxError::UnexpectedStatus {
                status: status.as_u16(),
                body: format!("DELETE {} failed: {}", path, body),
            });
        }

        Ok(())
    }

    /// Build query string from filters
    pub fn build_query_string(&self, filters: &[(&str, &str)]) -> String {
        if filters.is_empty() {
            String::new()
        } else {
            filters
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect::<Vec<_>>()
                .join("&")
        }
    }
}

// src/api/client.rs
//! Thin HTTP client for the catalog page endpoint.
//!
//! Handles request construction and response capture. Parsing lives in
//! `parser`, and the decision of *when* to fetch lives in the scheduler.

use crate::error::{AppError, FetchError};
use crate::model::PageResult;
use crate::types::{PageIndex, ValidatedUrl};
use reqwest::{header, Client, Response};
use std::time::Duration;

/// A thin wrapper around reqwest Client for catalog page requests.
#[derive(Clone)]
pub struct CatalogHttpClient {
    client: Client,
    base_url: ValidatedUrl,
}

impl CatalogHttpClient {
    /// Creates a new HTTP client rooted at `base_url`.
    pub fn new(base_url: ValidatedUrl, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .timeout(timeout)
            .build()?;
        Ok(Self { client, base_url })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Location of a page: `{base}/page{n}.json`.
    pub fn page_url(&self, page_index: PageIndex) -> String {
        self.base_url.join_segment(&page_index.file_name())
    }

    /// Makes a GET request to the given absolute URL.
    pub async fn get(&self, url: &str) -> Result<Response, reqwest::Error> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        log::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::PageSource for CatalogHttpClient {
    async fn fetch_page(&self, page_index: PageIndex) -> Result<PageResult, FetchError> {
        let url = self.page_url(page_index);
        let response = self
            .get(&url)
            .await
            .map_err(|e| FetchError::transport(page_index, e.to_string()))?;
        let result = extract_response_text(response)
            .await
            .map_err(|e| FetchError::transport(page_index, e.to_string()))?;
        super::parser::parse_page_response(result, page_index)
    }

    fn describe(&self) -> String {
        self.base_url.to_string()
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(
    response: Response,
) -> Result<ApiResponse<String>, reqwest::Error> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

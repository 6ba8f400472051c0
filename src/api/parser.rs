// src/api/parser.rs
//! Turns raw page responses into domain pages.
//!
//! Both the HTTP client and the fixture directory funnel their bodies
//! through here, so a page decodes the same way wherever it came from.

use super::client::ApiResponse;
use super::responses::{PageEnvelope, ToDomain};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::FetchError;
use crate::model::PageResult;
use crate::types::PageIndex;

/// Parse an HTTP page response, treating any non-2xx status as a failure.
pub fn parse_page_response(
    result: ApiResponse<String>,
    page_index: PageIndex,
) -> Result<PageResult, FetchError> {
    if !result.status.is_success() {
        log::warn!("HTTP {} from {}", result.status, result.url);
        return Err(FetchError::transport(
            page_index,
            format!(
                "HTTP {} from {}: {}",
                result.status,
                result.url,
                preview(&result.data)
            ),
        ));
    }
    parse_page_body(&result.data, page_index, &result.url)
}

/// Parse a page document body. `origin` names where it came from, for logs.
pub fn parse_page_body(
    body: &str,
    page_index: PageIndex,
    origin: &str,
) -> Result<PageResult, FetchError> {
    let envelope: PageEnvelope = serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse page {} from {}: {}", page_index, origin, e);
        FetchError::decode(page_index, format!("{} (body: {})", e, preview(body)))
    })?;

    let page = envelope.to_domain();
    log::debug!(
        "Parsed page {} '{}' with {} items",
        page_index,
        page.title,
        page.items.len()
    );
    Ok(page)
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

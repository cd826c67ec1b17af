// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::{Client, Response, redirect};
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::PortalConfig;

/// Create the HTTP client used for a whole run.
///
/// The client keeps cookies between requests and never follows redirects: the
/// login step has to see the portal's 302 itself.
pub fn create_client(config: &PortalConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .cookie_store(true)
        .redirect(redirect::Policy::none())
        .build()?;
    Ok(client)
}

/// Fail with a fetch error unless the response status is 2xx.
pub fn ensure_success(response: Response, endpoint: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::fetch(endpoint, format!("unexpected status {status}")))
    }
}

/// Fetch a page and parse it as HTML.
pub async fn fetch_page(client: &Client, url: url::Url, endpoint: &str) -> Result<Html> {
    let response = ensure_success(client.get(url).send().await?, endpoint)?;
    let text = response.text().await?;
    Ok(Html::parse_document(&text))
}

//! Bing image search scraping.
//!
//! Bing's image results page embeds per-result metadata as JSON in the `m`
//! attribute of `a.iusc` anchors; `murl` inside it is the full-size image
//! URL. No API key needed, but markup changes will surface as empty result
//! lists.

use crate::error::{Result, SlidecastError};
use crate::images::ImageProvider;
use async_trait::async_trait;
use scraper::{Html, Selector};

const SEARCH_URL: &str = "https://www.bing.com/images/search";

// Bing serves a degraded page to clients without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:140.0) Gecko/20100101 Firefox/140.0";

pub struct BingImageProvider {
    client: reqwest::Client,
}

impl BingImageProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for BingImageProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageProvider for BingImageProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>> {
        let search_error = |message: String| SlidecastError::ImageSearch {
            query: query.to_string(),
            message,
        };

        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", query), ("count", &limit.to_string())])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| search_error(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(search_error(format!(
                "search returned status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| search_error(format!("failed to read response body: {e}")))?;

        Ok(extract_image_urls(&body, limit))
    }
}

/// Pull full-size image URLs out of a Bing image results page, in page order.
fn extract_image_urls(html: &str, limit: usize) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a.iusc") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|anchor| {
            let metadata = anchor.value().attr("m")?;
            let value: serde_json::Value = serde_json::from_str(metadata).ok()?;
            value.get("murl")?.as_str().map(str::to_string)
        })
        .take(limit)
        .collect()
}

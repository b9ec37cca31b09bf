use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use tracing::info;

const USER_AGENT: &str = concat!("jarchive_scraper/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetch one game page and return its raw HTML.
pub async fn fetch_page(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("failed to build HTTP client")?;

    let start = Instant::now();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {url} failed"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("GET {url} returned {status}");
    }

    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read body of {url}"))?;

    info!(
        "Fetched {} ({} bytes in {} ms)",
        url,
        body.len(),
        start.elapsed().as_millis()
    );
    Ok(body)
}

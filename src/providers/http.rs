//! Shared HTTP plumbing for the real providers

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Result, SkateFinderError};

/// Build the client shared by every HTTP provider
pub fn build_client(timeout: Duration, user_agent: &str) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
}

/// GET `url` and decode the JSON body.
///
/// Transport failures, non-2xx statuses and undecodable bodies all become
/// `Provider` errors tagged with `provider`. No retries.
pub async fn get_json<T: DeserializeOwned>(
    client: &Client,
    provider: &'static str,
    url: &str,
) -> Result<T> {
    debug!(provider, url, "Sending request");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SkateFinderError::provider(provider, format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SkateFinderError::provider(
            provider,
            format!("unexpected status {status}"),
        ));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| SkateFinderError::provider(provider, format!("invalid response: {e}")))
}

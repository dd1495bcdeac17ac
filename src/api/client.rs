use anyhow::{anyhow, Result};
use reqwest::Client;

use super::models::*;

#[derive(Clone)]
pub struct PodcastrClient {
    client: Client,
    base_url: String,
}

impl PodcastrClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    pub async fn get<T>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let url = self.url_for(endpoint);
        log::debug!("GET {} {:?}", url, query);

        let response = self.client
            .get(&url)
            .query(query)
            .send()
            .await?;

        if response.status().is_success() {
            let response_text = response.text().await?;
            let data: T = serde_json::from_str(&response_text)?;
            Ok(data)
        } else {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            Err(anyhow!("API request failed ({}): {}", status, error_text))
        }
    }
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

/// Query for the newest `limit` episodes, newest first.
pub fn latest_episodes_query(limit: usize) -> Vec<(&'static str, String)> {
    vec![
        ("_limit", limit.to_string()),
        ("_sort", "published_at".to_string()),
        ("_order", "desc".to_string()),
    ]
}

impl PodcastrClient {
    pub async fn get_raw_latest_episodes(&self, limit: usize) -> Result<Vec<ApiEpisode>> {
        self.get("episodes", &latest_episodes_query(limit)).await
    }

    pub async fn get_raw_episode(&self, id: &str) -> Result<ApiEpisode> {
        let endpoint = format!("episodes/{}", urlencoding::encode(id));
        self.get(&endpoint, &[]).await
    }
}

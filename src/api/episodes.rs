use super::{Episode, EpisodeDetails, HomeListing, PodcastrClient};
use anyhow::Result;

impl PodcastrClient {
    /// Newest `limit` episodes, mapped for display.
    pub async fn get_latest_episodes(&self, limit: usize) -> Result<Vec<Episode>> {
        let raw = self.get_raw_latest_episodes(limit).await?;
        log::info!("Fetched {} episodes", raw.len());
        Ok(raw.iter().map(Episode::from).collect())
    }

    /// Home page listing: the first `latest_count` episodes are the latest
    /// releases, the rest fill the table.
    pub async fn get_home_listing(&self, limit: usize, latest_count: usize) -> Result<HomeListing> {
        let episodes = self.get_latest_episodes(limit).await?;
        Ok(HomeListing::split(episodes, latest_count))
    }

    /// A single episode with its description.
    pub async fn get_episode_details(&self, id: &str) -> Result<EpisodeDetails> {
        let raw = self.get_raw_episode(id).await?;
        Ok(EpisodeDetails::from(raw))
    }
}

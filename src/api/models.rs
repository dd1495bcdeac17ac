use serde::{Deserialize, Deserializer, Serialize};

use crate::helpers::{convert_duration_to_time_string, format_published_at};

/// A playable episode as the rest of the application sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    pub id: String,
    pub title: String,
    pub members: String,
    pub thumbnail: String,
    /// Length in whole seconds.
    pub duration: u64,
    pub url: String,
    /// Already formatted for display, e.g. `22 Jan 21`.
    pub published_at: String,
}

impl Episode {
    pub fn duration_as_string(&self) -> String {
        convert_duration_to_time_string(self.duration)
    }
}

/// An episode plus the fields only the episode page needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeDetails {
    pub episode: Episode,
    /// HTML as served by the API.
    pub description: String,
    pub duration_as_string: String,
}

// Raw API shapes

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEpisodeFile {
    pub url: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub duration: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEpisode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub published_at: String,
    pub file: ApiEpisodeFile,
}

impl From<&ApiEpisode> for Episode {
    fn from(raw: &ApiEpisode) -> Self {
        Self {
            id: raw.id.clone(),
            title: raw.title.clone(),
            members: raw.members.clone(),
            thumbnail: raw.thumbnail.clone(),
            duration: raw.file.duration,
            url: raw.file.url.clone(),
            published_at: format_published_at(&raw.published_at),
        }
    }
}

impl From<ApiEpisode> for EpisodeDetails {
    fn from(raw: ApiEpisode) -> Self {
        let episode = Episode::from(&raw);
        let duration_as_string = episode.duration_as_string();
        Self {
            episode,
            description: raw.description,
            duration_as_string,
        }
    }
}

// The mock API stores durations as numbers, some dumps as numeric strings.
fn deserialize_duration<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDuration {
        Int(u64),
        Float(f64),
        Text(String),
    }

    match RawDuration::deserialize(deserializer)? {
        RawDuration::Int(secs) => Ok(secs),
        RawDuration::Float(secs) if secs >= 0.0 => Ok(secs.floor() as u64),
        RawDuration::Float(secs) => Err(serde::de::Error::custom(format!(
            "negative duration: {}",
            secs
        ))),
        RawDuration::Text(text) => text
            .trim()
            .parse::<u64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid duration '{}': {}", text, e))),
    }
}

/// Home page data: the newest releases get cards, the rest a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeListing {
    pub latest_episodes: Vec<Episode>,
    pub all_episodes: Vec<Episode>,
}

impl HomeListing {
    pub fn split(mut episodes: Vec<Episode>, latest_count: usize) -> Self {
        let rest = episodes.split_off(latest_count.min(episodes.len()));
        Self {
            latest_episodes: episodes,
            all_episodes: rest,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.latest_episodes.is_empty() && self.all_episodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.latest_episodes.len() + self.all_episodes.len()
    }

    /// Both sections in display order; this is the list handed to the player,
    /// so a row of the table sits at `latest_episodes.len() + row`.
    pub fn playable(&self) -> Vec<Episode> {
        self.latest_episodes
            .iter()
            .chain(self.all_episodes.iter())
            .cloned()
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&Episode> {
        self.latest_episodes
            .iter()
            .chain(self.all_episodes.iter())
            .nth(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "id": "a-importancia-da-contribuicao-em-open-source",
        "title": "Faladev #30 | A importância da contribuição em Open Source",
        "members": "Diego Fernandes, João Pedro, Diego Haz e Bruno Lemos",
        "published_at": "2021-01-22 10:00:00",
        "thumbnail": "https://example.com/opensource.jpg",
        "description": "<p>Nesse episódio...</p>",
        "file": {
            "url": "https://example.com/opensource.m4a",
            "type": "audio/x-m4a",
            "duration": 3981
        }
    }"#;

    #[test]
    fn maps_api_record_into_episode() {
        let raw: ApiEpisode = serde_json::from_str(SAMPLE).unwrap();
        let details = EpisodeDetails::from(raw);

        assert_eq!(details.episode.id, "a-importancia-da-contribuicao-em-open-source");
        assert_eq!(details.episode.duration, 3981);
        assert_eq!(details.episode.url, "https://example.com/opensource.m4a");
        assert_eq!(details.episode.published_at, "22 Jan 21");
        assert_eq!(details.duration_as_string, "01:06:21");
        assert_eq!(details.description, "<p>Nesse episódio...</p>");
    }

    #[test]
    fn numeric_string_durations_are_accepted() {
        let json = SAMPLE.replace("\"duration\": 3981", "\"duration\": \"3981\"");
        let raw: ApiEpisode = serde_json::from_str(&json).unwrap();
        assert_eq!(raw.file.duration, 3981);
    }

    #[test]
    fn negative_durations_are_rejected() {
        let json = SAMPLE.replace("\"duration\": 3981", "\"duration\": -1.5");
        assert!(serde_json::from_str::<ApiEpisode>(&json).is_err());
    }

    fn episode(id: &str) -> Episode {
        Episode {
            id: id.to_string(),
            title: id.to_uppercase(),
            members: String::new(),
            thumbnail: String::new(),
            duration: 60,
            url: format!("https://example.com/{}.mp3", id),
            published_at: String::new(),
        }
    }

    #[test]
    fn listing_offsets_table_rows_by_latest_count() {
        let listing = HomeListing::split(
            vec![episode("a"), episode("b"), episode("c"), episode("d")],
            2,
        );

        assert_eq!(listing.latest_episodes.len(), 2);
        assert_eq!(listing.all_episodes.len(), 2);

        let playable = listing.playable();
        let first_row = &listing.all_episodes[0];
        assert_eq!(&playable[listing.latest_episodes.len()], first_row);
        assert_eq!(listing.get(2).map(|e| e.id.as_str()), Some("c"));
    }

    #[test]
    fn listing_with_fewer_episodes_than_latest_count() {
        let listing = HomeListing::split(vec![episode("a")], 2);
        assert_eq!(listing.latest_episodes.len(), 1);
        assert!(listing.all_episodes.is_empty());
        assert_eq!(listing.len(), 1);
    }
}

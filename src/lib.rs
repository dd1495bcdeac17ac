pub mod api;
pub mod audio;
pub mod helpers;
pub mod logging;
pub mod player;
pub mod settings;
pub mod theme;
pub mod tui;

pub use api::{Episode, EpisodeDetails, HomeListing, PodcastrClient};
pub use player::{EpisodeEnd, PlaybackSession, PlayerSurface};

pub mod episode;
pub mod home;
pub mod player;

pub use episode::{EpisodeAction, EpisodePage};
pub use home::{HomeAction, HomePage};
pub use player::{Control, PlayerPage};

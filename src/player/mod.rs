pub mod session;
pub mod shuffle;
pub mod surface;

pub use session::{EpisodeEnd, PlaybackSession};
pub use surface::PlayerSurface;

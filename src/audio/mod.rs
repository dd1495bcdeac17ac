pub mod media;
pub mod player;

pub use media::{LoadToken, MediaElement, MediaEvent};
pub use player::AudioPlayer;

#[cfg(test)]
pub(crate) mod test_support;

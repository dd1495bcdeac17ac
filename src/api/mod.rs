pub mod client;
pub mod models;
pub mod episodes;

pub use client::PodcastrClient;
pub use models::*;

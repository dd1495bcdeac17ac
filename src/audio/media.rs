use std::time::Duration;

/// Identifies one `load` of a media element. Events carry the token of the
/// load they belong to so late events from a replaced episode can be told
/// apart from current ones.
pub type LoadToken = u64;

/// Notifications coming back from a media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// The source is decoded and ready; its position is at the start.
    LoadedMetadata { token: LoadToken },
    /// Periodic position report while audio is running.
    TimeUpdate { token: LoadToken, position: Duration },
    /// Output started, whether requested or not.
    Playing { token: LoadToken },
    /// Output paused, whether requested or not.
    Paused { token: LoadToken },
    /// The source played through to its end.
    Ended { token: LoadToken },
    Error { token: LoadToken, message: String },
}

impl MediaEvent {
    pub fn token(&self) -> LoadToken {
        match self {
            Self::LoadedMetadata { token }
            | Self::TimeUpdate { token, .. }
            | Self::Playing { token }
            | Self::Paused { token }
            | Self::Ended { token }
            | Self::Error { token, .. } => *token,
        }
    }
}

/// The capabilities the player needs from something that actually makes
/// sound. Commands are fire-and-forget; outcomes arrive later as
/// [`MediaEvent`]s.
pub trait MediaElement {
    /// Replace the current source. Loading starts paused at position zero.
    fn load(&mut self, url: &str, token: LoadToken);
    fn play(&mut self);
    fn pause(&mut self);
    fn set_current_time(&mut self, position: Duration);
}

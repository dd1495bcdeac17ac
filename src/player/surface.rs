use std::time::Duration;

use crate::audio::{LoadToken, MediaElement, MediaEvent};
use crate::helpers::convert_duration_to_time_string;
use super::session::{EpisodeEnd, PlaybackSession};

/// Binds a [`PlaybackSession`] to a [`MediaElement`].
///
/// State flows one way through [`sync`](Self::sync), which turns session
/// changes into media commands. Media notifications flow back through
/// [`handle_event`](Self::handle_event), which updates the progress and calls
/// into the session. Neither calls the other, so the loop never re-enters.
pub struct PlayerSurface<M: MediaElement> {
    media: M,
    progress_seconds: u64,
    duration_seconds: u64,

    // Which session revision is loaded into the media element.
    loaded_revision: Option<u64>,
    token: LoadToken,
    // Time updates only count once the current load reported its metadata.
    listening: bool,
    was_playing: bool,
    // Autoplay was issued for a fresh source and the element has not
    // confirmed it yet.
    autoplay_pending: bool,
}

impl<M: MediaElement> PlayerSurface<M> {
    pub fn new(media: M) -> Self {
        Self {
            media,
            progress_seconds: 0,
            duration_seconds: 0,
            loaded_revision: None,
            token: 0,
            listening: false,
            was_playing: false,
            autoplay_pending: false,
        }
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Bring the media element in line with the session.
    ///
    /// Every new source autoplays. A paused session catches up once the
    /// element reports [`MediaEvent::Playing`].
    pub fn sync(&mut self, session: &PlaybackSession) {
        let Some(episode) = session.current_episode() else {
            return;
        };

        if self.loaded_revision != Some(session.revision()) {
            self.token += 1;
            self.loaded_revision = Some(session.revision());
            self.listening = false;
            self.progress_seconds = 0;
            self.duration_seconds = episode.duration;

            log::info!("Loading '{}' as source {}", episode.title, self.token);
            self.media.load(&episode.url, self.token);
            self.media.play();
            self.was_playing = true;
            self.autoplay_pending = !session.is_playing();
            return;
        }

        if self.autoplay_pending {
            if !session.is_playing() {
                return;
            }
            self.autoplay_pending = false;
        }

        if session.is_playing() != self.was_playing {
            if session.is_playing() {
                self.media.play();
            } else {
                self.media.pause();
            }
            self.was_playing = session.is_playing();
        }
    }

    /// Apply a notification from the media element.
    pub fn handle_event(&mut self, session: &mut PlaybackSession, event: MediaEvent) {
        if event.token() != self.token {
            log::debug!("Dropping stale media event {:?}", event);
            return;
        }

        match event {
            MediaEvent::LoadedMetadata { .. } => {
                self.media.set_current_time(Duration::ZERO);
                self.progress_seconds = 0;
                self.listening = true;
            }
            MediaEvent::TimeUpdate { position, .. } => {
                if self.listening {
                    self.progress_seconds = position.as_secs().min(self.duration_seconds);
                }
            }
            MediaEvent::Playing { .. } => {
                session.set_playing_state(true);
                self.was_playing = true;
                self.autoplay_pending = false;
            }
            MediaEvent::Paused { .. } => {
                session.set_playing_state(false);
                self.was_playing = false;
                self.autoplay_pending = false;
            }
            MediaEvent::Ended { .. } => match session.finish_episode() {
                EpisodeEnd::Replay => {
                    log::debug!("Looping current episode");
                    self.media.set_current_time(Duration::ZERO);
                    self.progress_seconds = 0;
                    self.media.play();
                    self.was_playing = true;
                }
                EpisodeEnd::Advance => {
                    self.sync(session);
                }
                EpisodeEnd::Stop => {
                    log::info!("Reached the end of the queue");
                    // The element already stopped on its own.
                    self.was_playing = false;
                    self.autoplay_pending = false;
                }
            },
            MediaEvent::Error { message, .. } => {
                log::error!("Media error: {}", message);
                session.set_playing_state(false);
                self.was_playing = false;
                self.autoplay_pending = false;
            }
        }
    }

    /// Jump to `amount` seconds into the active episode.
    ///
    /// Progress updates immediately instead of waiting for the next time
    /// update from the element.
    pub fn seek(&mut self, amount: u64) {
        if self.loaded_revision.is_none() {
            return;
        }
        let amount = amount.min(self.duration_seconds);
        self.media.set_current_time(Duration::from_secs(amount));
        self.progress_seconds = amount;
    }

    /// Seek relative to the current progress.
    pub fn skip(&mut self, delta_seconds: i64) {
        let target = if delta_seconds.is_negative() {
            self.progress_seconds.saturating_sub(delta_seconds.unsigned_abs())
        } else {
            self.progress_seconds.saturating_add(delta_seconds as u64)
        };
        self.seek(target);
    }

    /// Token of the most recent load; events carrying any other are stale.
    pub fn load_token(&self) -> LoadToken {
        self.token
    }

    pub fn progress_seconds(&self) -> u64 {
        self.progress_seconds
    }

    pub fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    pub fn progress_ratio(&self) -> f64 {
        if self.duration_seconds == 0 {
            0.0
        } else {
            (self.progress_seconds as f64 / self.duration_seconds as f64).clamp(0.0, 1.0)
        }
    }

    /// `(elapsed, total)` as `HH:MM:SS`.
    pub fn time_display(&self) -> (String, String) {
        (
            convert_duration_to_time_string(self.progress_seconds),
            convert_duration_to_time_string(self.duration_seconds),
        )
    }
}

use rand::Rng;

use crate::api::Episode;
use super::shuffle::shuffle_after;

/// What happened when the active episode reached its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEnd {
    /// Looping is on: the same episode starts again from zero.
    Replay,
    /// Moved on to the next episode in the queue.
    Advance,
    /// Nothing left to play; the session is paused on the last episode.
    Stop,
}

/// The playback queue and its flags.
///
/// There is one session per application. Every change goes through the
/// methods below; the player surface watches [`PlaybackSession::revision`]
/// and [`PlaybackSession::is_playing`] to drive the media element.
#[derive(Debug, Clone, Default)]
pub struct PlaybackSession {
    queue: Vec<Episode>,
    original_order: Vec<Episode>,
    current_index: Option<usize>,
    is_playing: bool,
    is_looping: bool,
    is_shuffling: bool,
    revision: u64,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    // Queue replacement

    /// Play a single episode on its own.
    pub fn play(&mut self, episode: Episode) {
        log::info!("Playing episode: {}", episode.title);
        self.queue = vec![episode.clone()];
        self.original_order = vec![episode];
        self.set_current(0);
        self.is_playing = true;
    }

    /// Play `episodes` starting at `start_index`.
    ///
    /// # Panics
    ///
    /// Panics if `start_index` is out of range; callers only pass indices of
    /// rows they rendered.
    pub fn play_list(&mut self, episodes: Vec<Episode>, start_index: usize) {
        assert!(
            start_index < episodes.len(),
            "play_list start index {} out of range for {} episodes",
            start_index,
            episodes.len()
        );
        log::info!(
            "Playing list of {} episodes from index {}",
            episodes.len(),
            start_index
        );
        self.original_order = episodes.clone();
        self.queue = episodes;
        self.set_current(start_index);
        self.is_playing = true;
    }

    // Flags

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Mirror a play/pause reported by the media element.
    pub fn set_playing_state(&mut self, state: bool) {
        self.is_playing = state;
    }

    pub fn toggle_loop(&mut self) {
        self.is_looping = !self.is_looping;
    }

    pub fn toggle_shuffle(&mut self) {
        self.toggle_shuffle_with(&mut rand::thread_rng());
    }

    /// [`toggle_shuffle`](Self::toggle_shuffle) with a caller-supplied RNG.
    pub fn toggle_shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.is_shuffling {
            self.disable_shuffle();
        } else {
            self.enable_shuffle(rng);
        }
    }

    fn enable_shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        // Snapshot the order we are leaving so it can be restored later.
        self.original_order = self.queue.clone();
        if let Some(current) = self.current_index {
            shuffle_after(&mut self.queue, current, rng);
        }
        self.is_shuffling = true;
        log::debug!("Shuffle enabled, queue: {:?}", self.queue_ids());
    }

    fn disable_shuffle(&mut self) {
        let current_id = self.current_episode_id().map(str::to_owned);
        self.queue = self.original_order.clone();

        if let Some(id) = current_id {
            // Same episode, new position; the active episode does not change.
            self.current_index = self.queue.iter().position(|e| e.id == id);
            debug_assert!(self.current_index.is_some());
        }
        self.is_shuffling = false;
        log::debug!("Shuffle disabled, queue: {:?}", self.queue_ids());
    }

    // Navigation

    pub fn play_next(&mut self) {
        if let Some(current) = self.current_index {
            if current + 1 < self.queue.len() {
                self.set_current(current + 1);
            }
        }
    }

    pub fn play_previous(&mut self) {
        if let Some(current) = self.current_index {
            if current > 0 {
                self.set_current(current - 1);
            }
        }
    }

    /// Decide what follows the end of the active episode: replay when looping,
    /// otherwise advance when possible, otherwise stop.
    pub fn finish_episode(&mut self) -> EpisodeEnd {
        if self.is_looping {
            EpisodeEnd::Replay
        } else if self.has_next() {
            self.play_next();
            EpisodeEnd::Advance
        } else {
            self.is_playing = false;
            EpisodeEnd::Stop
        }
    }

    fn set_current(&mut self, index: usize) {
        self.current_index = Some(index);
        self.revision = self.revision.wrapping_add(1);
    }

    // Read-only views

    pub fn queue(&self) -> &[Episode] {
        &self.queue
    }

    pub fn original_order(&self) -> &[Episode] {
        &self.original_order
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.current_index.and_then(|i| self.queue.get(i))
    }

    pub fn current_episode_id(&self) -> Option<&str> {
        self.current_episode().map(|e| e.id.as_str())
    }

    /// Whether `id` is the active episode and audio is meant to be playing.
    pub fn is_episode_playing(&self, id: &str) -> bool {
        self.is_playing && self.current_episode_id() == Some(id)
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_looping(&self) -> bool {
        self.is_looping
    }

    pub fn is_shuffling(&self) -> bool {
        self.is_shuffling
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.current_index, Some(i) if i > 0)
    }

    pub fn has_next(&self) -> bool {
        matches!(self.current_index, Some(i) if i + 1 < self.queue.len())
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Bumped whenever a different queue slot becomes active.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn queue_ids(&self) -> Vec<&str> {
        self.queue.iter().map(|e| e.id.as_str()).collect()
    }
}

//! Player surface driven headless
//!
//! A recording media element stands in for rodio; events are fed back the
//! way the event loop feeds them.

use std::time::Duration;

use podcastr::audio::{LoadToken, MediaElement, MediaEvent};
use podcastr::{Episode, PlaybackSession, PlayerSurface};

// ===== Test Helpers =====

#[derive(Debug, Clone, PartialEq)]
enum Sent {
    Load(String),
    Play,
    Pause,
    Seek(u64),
}

#[derive(Default)]
struct RecordingMedia {
    sent: Vec<Sent>,
    tokens: Vec<LoadToken>,
}

impl RecordingMedia {
    fn drain(&mut self) -> Vec<Sent> {
        std::mem::take(&mut self.sent)
    }

    fn last_token(&self) -> LoadToken {
        self.tokens.last().copied().unwrap_or_default()
    }
}

impl MediaElement for RecordingMedia {
    fn load(&mut self, url: &str, token: LoadToken) {
        self.tokens.push(token);
        self.sent.push(Sent::Load(url.to_string()));
    }

    fn play(&mut self) {
        self.sent.push(Sent::Play);
    }

    fn pause(&mut self) {
        self.sent.push(Sent::Pause);
    }

    fn set_current_time(&mut self, position: Duration) {
        self.sent.push(Sent::Seek(position.as_secs()));
    }
}

fn create_episode(id: &str, duration: u64) -> Episode {
    Episode {
        id: id.to_string(),
        title: format!("Episode {}", id),
        members: String::new(),
        thumbnail: String::new(),
        duration,
        url: format!("https://example.com/{}.mp3", id),
        published_at: String::new(),
    }
}

fn url(id: &str) -> String {
    format!("https://example.com/{}.mp3", id)
}

// ===== Scenarios =====

#[test]
fn test_full_queue_plays_through_and_stops() {
    let mut session = PlaybackSession::new();
    let mut surface = PlayerSurface::new(RecordingMedia::default());

    session.play_list(vec![create_episode("a", 60), create_episode("b", 90)], 0);
    surface.sync(&session);
    assert_eq!(surface.media_mut().drain(), vec![Sent::Load(url("a")), Sent::Play]);

    let token = surface.media().last_token();
    surface.handle_event(&mut session, MediaEvent::LoadedMetadata { token });
    surface.handle_event(&mut session, MediaEvent::Ended { token });

    assert_eq!(session.current_episode_id(), Some("b"));
    assert_eq!(surface.duration_seconds(), 90);
    assert_eq!(
        surface.media_mut().drain(),
        vec![Sent::Seek(0), Sent::Load(url("b")), Sent::Play]
    );

    let token = surface.media().last_token();
    surface.handle_event(&mut session, MediaEvent::LoadedMetadata { token });
    surface.handle_event(&mut session, MediaEvent::Ended { token });

    assert_eq!(session.current_episode_id(), Some("b"));
    assert!(!session.is_playing());
    surface.sync(&session);
    assert_eq!(surface.media_mut().drain(), vec![Sent::Seek(0)]);
}

#[test]
fn test_loop_keeps_replaying_the_same_source() {
    let mut session = PlaybackSession::new();
    let mut surface = PlayerSurface::new(RecordingMedia::default());

    session.play_list(vec![create_episode("a", 60), create_episode("b", 60)], 0);
    session.toggle_loop();
    surface.sync(&session);
    surface.media_mut().drain();
    let token = surface.media().last_token();

    for _ in 0..3 {
        surface.handle_event(&mut session, MediaEvent::Ended { token });
        assert_eq!(surface.media_mut().drain(), vec![Sent::Seek(0), Sent::Play]);
    }

    assert_eq!(session.current_episode_id(), Some("a"));
    assert_eq!(surface.media().tokens.len(), 1);
}

#[test]
fn test_progress_from_previous_episode_is_ignored() {
    let mut session = PlaybackSession::new();
    let mut surface = PlayerSurface::new(RecordingMedia::default());

    session.play_list(vec![create_episode("a", 600), create_episode("b", 600)], 0);
    surface.sync(&session);
    let first = surface.media().last_token();
    surface.handle_event(&mut session, MediaEvent::LoadedMetadata { token: first });

    session.play_next();
    surface.sync(&session);
    let second = surface.media().last_token();
    assert_ne!(first, second);

    surface.handle_event(&mut session, MediaEvent::TimeUpdate {
        token: first,
        position: Duration::from_secs(300),
    });
    surface.handle_event(&mut session, MediaEvent::LoadedMetadata { token: second });
    surface.handle_event(&mut session, MediaEvent::TimeUpdate {
        token: second,
        position: Duration::from_secs(12),
    });

    assert_eq!(surface.progress_seconds(), 12);
    assert_eq!(surface.time_display(), ("00:00:12".to_string(), "00:10:00".to_string()));
}

#[test]
fn test_replaying_same_episode_reloads_it() {
    let mut session = PlaybackSession::new();
    let mut surface = PlayerSurface::new(RecordingMedia::default());

    session.play(create_episode("a", 60));
    surface.sync(&session);
    session.play(create_episode("a", 60));
    surface.sync(&session);

    assert_eq!(
        surface.media_mut().drain(),
        vec![Sent::Load(url("a")), Sent::Play, Sent::Load(url("a")), Sent::Play]
    );
}

#[test]
fn test_progress_ratio_tracks_seek() {
    let mut session = PlaybackSession::new();
    let mut surface = PlayerSurface::new(RecordingMedia::default());
    assert_eq!(surface.progress_ratio(), 0.0);

    session.play(create_episode("a", 200));
    surface.sync(&session);
    surface.seek(50);

    assert!((surface.progress_ratio() - 0.25).abs() < f64::EPSILON);
}

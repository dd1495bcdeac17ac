//! Playback session scenarios
//!
//! Queue creation, navigation at the edges, looping and shuffle, driven the
//! way the pages and the player surface drive them.

use podcastr::{Episode, EpisodeEnd, PlaybackSession};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ===== Test Helpers =====

fn create_episode(id: &str) -> Episode {
    Episode {
        id: id.to_string(),
        title: format!("Episode {}", id),
        members: "Diego Fernandes".to_string(),
        thumbnail: format!("https://example.com/{}.jpg", id),
        duration: 1800,
        url: format!("https://example.com/{}.mp3", id),
        published_at: "22 Jan 21".to_string(),
    }
}

fn create_episodes(ids: &[&str]) -> Vec<Episode> {
    ids.iter().map(|id| create_episode(id)).collect()
}

fn queue_ids(session: &PlaybackSession) -> Vec<&str> {
    session.queue().iter().map(|e| e.id.as_str()).collect()
}

// ===== Queue Creation =====

#[test]
fn test_play_list_flags_follow_start_index() {
    let episodes = create_episodes(&["a", "b", "c", "d", "e"]);

    for i in 0..episodes.len() {
        let mut session = PlaybackSession::new();
        session.play_list(episodes.clone(), i);

        assert_eq!(session.current_index(), Some(i));
        assert_eq!(session.has_next(), i < episodes.len() - 1, "has_next at {}", i);
        assert_eq!(session.has_previous(), i > 0, "has_previous at {}", i);
        assert!(session.is_playing());
    }
}

#[test]
fn test_play_single_episode_replaces_queue() {
    let mut session = PlaybackSession::new();
    session.play_list(create_episodes(&["a", "b", "c"]), 2);

    session.play(create_episode("z"));

    assert_eq!(queue_ids(&session), vec!["z"]);
    assert_eq!(session.current_index(), Some(0));
    assert!(!session.has_next());
    assert!(!session.has_previous());
}

#[test]
#[should_panic(expected = "out of range")]
fn test_play_list_rejects_out_of_range_index() {
    let mut session = PlaybackSession::new();
    session.play_list(create_episodes(&["a", "b"]), 2);
}

// ===== Navigation Boundaries =====

#[test]
fn test_next_on_last_index_is_noop() {
    let mut session = PlaybackSession::new();
    session.play_list(create_episodes(&["a", "b", "c"]), 2);
    let revision = session.revision();

    session.play_next();

    assert_eq!(session.current_index(), Some(2));
    assert_eq!(session.revision(), revision);
}

#[test]
fn test_previous_on_first_index_is_noop() {
    let mut session = PlaybackSession::new();
    session.play_list(create_episodes(&["a", "b", "c"]), 0);

    session.play_previous();

    assert_eq!(session.current_index(), Some(0));
    assert_eq!(session.current_episode_id(), Some("a"));
}

#[test]
fn test_empty_queue_is_inert() {
    let mut session = PlaybackSession::new();

    assert!(!session.has_next());
    assert!(!session.has_previous());
    assert!(session.is_empty());

    session.play_next();
    session.play_previous();

    assert_eq!(session.current_index(), None);
    assert!(session.current_episode().is_none());
    assert!(!session.is_playing());
}

// ===== Loop And Advance =====

#[test]
fn test_loop_replays_then_advance_after_unloop() {
    let mut session = PlaybackSession::new();
    session.play_list(create_episodes(&["a", "b", "c"]), 0);

    session.play_next();
    assert_eq!(session.current_episode_id(), Some("b"));

    session.toggle_loop();
    assert_eq!(session.finish_episode(), EpisodeEnd::Replay);
    assert_eq!(session.current_index(), Some(1));

    session.toggle_loop();
    assert_eq!(session.finish_episode(), EpisodeEnd::Advance);
    assert_eq!(session.current_index(), Some(2));
    assert_eq!(session.current_episode_id(), Some("c"));
}

#[test]
fn test_end_of_queue_stops_playback() {
    let mut session = PlaybackSession::new();
    session.play_list(create_episodes(&["a", "b"]), 1);

    assert_eq!(session.finish_episode(), EpisodeEnd::Stop);

    assert_eq!(session.current_index(), Some(1));
    assert!(!session.is_playing());
}

// ===== Shuffle =====

#[test]
fn test_shuffle_keeps_played_prefix_and_restores_order() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut session = PlaybackSession::new();
    session.play_list(create_episodes(&["a", "b", "c", "d"]), 1);

    session.toggle_shuffle_with(&mut rng);
    assert!(session.is_shuffling());

    let shuffled = queue_ids(&session);
    assert_eq!(&shuffled[..2], &["a", "b"]);
    let mut tail = shuffled[2..].to_vec();
    tail.sort_unstable();
    assert_eq!(tail, vec!["c", "d"]);
    assert_eq!(session.current_index(), Some(1));

    session.toggle_shuffle_with(&mut rng);
    assert!(!session.is_shuffling());
    assert_eq!(queue_ids(&session), vec!["a", "b", "c", "d"]);
    assert_eq!(session.current_index(), Some(1));
}

#[test]
fn test_unshuffle_follows_episode_moved_by_navigation() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut session = PlaybackSession::new();
    session.play_list(create_episodes(&["a", "b", "c", "d", "e", "f"]), 0);

    session.toggle_shuffle_with(&mut rng);
    session.play_next();
    session.play_next();
    let playing = session.current_episode_id().map(str::to_owned);

    session.toggle_shuffle_with(&mut rng);

    assert_eq!(queue_ids(&session), vec!["a", "b", "c", "d", "e", "f"]);
    assert_eq!(session.current_episode_id().map(str::to_owned), playing);
}

#[test]
fn test_shuffle_does_not_change_active_episode() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut session = PlaybackSession::new();
    session.play_list(create_episodes(&["a", "b", "c", "d"]), 2);
    let revision = session.revision();

    session.toggle_shuffle_with(&mut rng);
    session.toggle_shuffle_with(&mut rng);

    assert_eq!(session.revision(), revision);
    assert_eq!(session.current_episode_id(), Some("c"));
}

#[test]
fn test_shuffle_on_empty_queue_only_flips_flag() {
    let mut session = PlaybackSession::new();

    session.toggle_shuffle();
    assert!(session.is_shuffling());
    assert!(session.is_empty());

    session.toggle_shuffle();
    assert!(!session.is_shuffling());
    assert_eq!(session.current_index(), None);
}

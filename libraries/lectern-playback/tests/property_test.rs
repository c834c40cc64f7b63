//! Property-based tests for AudioPlayer
//!
//! Random command and notification sequences must never break the snapshot
//! invariants the rendering layer relies on.


use lectern_playback::{
    Generation, MediaNotification, PlaybackRate, PlaybackStatus, RejectionReason, ToggleAction,
};
use proptest::prelude::*;
use test_helpers::*;

#[derive(Debug, Clone)]
enum Step {
    Bind(u8),
    Toggle,
    SeekFraction(f64),
    SeekBy(f64),
    SetRate(f64),
    Key(bool),
    Notify { stale: bool, notification: MediaNotification },
}

fn arbitrary_notification() -> impl Strategy<Value = MediaNotification> {
    prop_oneof![
        (0.0f64..600.0).prop_map(|duration| MediaNotification::MetadataResolved { duration }),
        (-50.0f64..700.0)
            .prop_map(|current_time| MediaNotification::PositionUpdate { current_time }),
        Just(MediaNotification::PlaybackEnded),
        Just(MediaNotification::Error { detail: None }),
        Just(MediaNotification::BufferingStart),
        Just(MediaNotification::CanResume),
        Just(MediaNotification::PlayStarted),
        Just(MediaNotification::PlayRejected {
            reason: RejectionReason::AutoplayBlocked
        }),
    ]
}

fn arbitrary_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0u8..4).prop_map(Step::Bind),
        Just(Step::Toggle),
        (-0.5f64..1.5).prop_map(Step::SeekFraction),
        (-200.0f64..200.0).prop_map(Step::SeekBy),
        prop_oneof![
            Just(0.5),
            Just(1.0),
            Just(1.5),
            Just(2.0),
            Just(3.0),
            Just(0.1)
        ]
        .prop_map(Step::SetRate),
        any::<bool>().prop_map(Step::Key),
        (any::<bool>(), arbitrary_notification())
            .prop_map(|(stale, notification)| Step::Notify { stale, notification }),
    ]
}

/// Book 0 has no audio, the others resolve to distinct files
fn bind_target(n: u8) -> (String, Option<String>) {
    let audio = (n != 0).then(|| format!("book{}.mp3", n));
    (n.to_string(), audio)
}

proptest! {
    /// Property: Snapshot invariants hold after every step
    #[test]
    fn snapshot_invariants_hold(steps in prop::collection::vec(arbitrary_step(), 1..60)) {
        let mut player = new_player();
        let mut play_requests = 0usize;

        for step in steps {
            match step {
                Step::Bind(n) => {
                    let (id, audio) = bind_target(n);
                    player.bind_book(&book(&id, audio.as_deref())).ok();
                }
                Step::Toggle => {
                    if player.toggle() == Ok(ToggleAction::PlayRequested) {
                        play_requests += 1;
                    }
                }
                Step::SeekFraction(f) => { player.seek_to_fraction(f).ok(); }
                Step::SeekBy(delta) => { player.seek_by(delta).ok(); }
                Step::SetRate(rate) => { player.set_rate(rate).ok(); }
                Step::Key(forward) => {
                    player.handle_seek_key(if forward { "ArrowRight" } else { "ArrowLeft" }).ok();
                }
                Step::Notify { stale, notification } => {
                    let current = player.generation();
                    let generation = if stale && current.value() > 0 {
                        Generation::new(current.value() - 1)
                    } else {
                        current
                    };
                    player.handle_notification(generation, notification);
                }
            }

            let snapshot = player.snapshot();

            prop_assert!(PlaybackRate::ALL.contains(&snapshot.playback_rate));
            prop_assert!(
                snapshot.current_time >= 0.0,
                "negative position {}",
                snapshot.current_time
            );
            prop_assert!(snapshot.duration >= 0.0 && snapshot.duration.is_finite());
            if snapshot.duration > 0.0 {
                prop_assert!(
                    snapshot.current_time <= snapshot.duration,
                    "position {} beyond duration {}",
                    snapshot.current_time,
                    snapshot.duration
                );
            }
            prop_assert!((0.0..=1.0).contains(&snapshot.progress_fraction));

            prop_assert_eq!(snapshot.is_source_available, snapshot.status != PlaybackStatus::Idle);
            if snapshot.status == PlaybackStatus::Idle {
                prop_assert!(!snapshot.is_playing && !snapshot.is_play_pending);
            }
            if snapshot.status == PlaybackStatus::Error {
                prop_assert!(!snapshot.is_play_pending);
                prop_assert!(snapshot.failure.is_some());
            }
            prop_assert!(!(snapshot.is_playing && snapshot.is_play_pending));
        }

        prop_assert_eq!(player.media().play_count(), play_requests);
    }

    /// Property: Stale notifications never change the snapshot
    #[test]
    fn stale_notifications_are_inert(
        duration in 1.0f64..600.0,
        notifications in prop::collection::vec(arbitrary_notification(), 1..30)
    ) {
        let mut player = ready_player(duration);
        let stale = player.generation();
        player.bind_book(&book("2", Some("other.mp3"))).unwrap();
        let before = player.snapshot();

        for notification in notifications {
            prop_assert!(!player.handle_notification(stale, notification));
        }

        prop_assert_eq!(player.snapshot(), before);
    }
}

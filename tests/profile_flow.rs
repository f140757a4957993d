//! Profile Screen Integration Tests
//!
//! End-to-end flows through the controller, feed, follow machine, and
//! stat formatting, driven by a scripted in-memory service.

use std::sync::Arc;

use app_core::{
    ErrorKind, FollowState, ProfileController, ProfileEvent, ProfileSource, Viewer,
};
use i18n::{CountFormatter, StatKind};
use shots_api::test_utils::{profile, shot, StubApi};
use shots_api::ApiError;
use tokio::sync::mpsc::{self, UnboundedReceiver};

fn drain(rx: &mut UnboundedReceiver<ProfileEvent>) -> Vec<ProfileEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Visit someone else's profile, scroll, and follow them.
#[tokio::test]
async fn test_visit_scroll_and_follow() {
    let api = Arc::new(
        StubApi::new()
            .with_profile(Ok(profile(12, 60)))
            .with_relationship(Ok(false))
            .with_shot_page(Ok(vec![shot(3, 0), shot(2, 1), shot(1, 2)]))
            .with_shot_page(Ok(Vec::new())),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = ProfileController::new(
        api.clone(),
        Viewer::LoggedIn { user_id: 99 },
        ProfileSource::ByHandle {
            handle: "user12".to_string(),
            display_name: None,
        },
        tx,
    );

    controller.initialize().await;

    let events = drain(&mut rx);
    assert!(matches!(events[0], ProfileEvent::ProfileUpdated(_)));
    assert!(events.iter().any(|e| matches!(
        e,
        ProfileEvent::FollowStateChanged {
            state: FollowState::NotFollowing,
            follower_count: 42,
        }
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, ProfileEvent::ItemsAppended(items) if items.len() == 3)));
    assert!(controller.shows_follow_affordance());

    // Follow: optimistic state and counter land immediately.
    controller.toggle_follow().await;
    assert_eq!(
        drain(&mut rx),
        vec![ProfileEvent::FollowStateChanged {
            state: FollowState::Following,
            follower_count: 43,
        }]
    );

    let formatter = CountFormatter::default();
    assert_eq!(
        formatter.label(StatKind::Followers, controller.follow().follower_count()),
        "43 followers"
    );

    // The empty second page ends the feed; further scrolls are no-ops.
    controller.load_more().await;
    assert!(controller.feed().reached_end());
    controller.load_more().await;
    assert_eq!(api.shots_calls(), 2);
}

/// Visiting your own profile asks no relationship question and shows
/// no follow affordance.
#[tokio::test]
async fn test_own_profile_has_no_follow_surface() {
    let api = Arc::new(StubApi::new().with_shot_page(Ok(vec![shot(1, 0)])));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = ProfileController::new(
        api.clone(),
        Viewer::LoggedIn { user_id: 12 },
        ProfileSource::Loaded(profile(12, 5)),
        tx,
    );

    controller.initialize().await;

    assert_eq!(api.relationship_calls(), 0);
    assert!(!controller.shows_follow_affordance());
    assert!(!drain(&mut rx)
        .iter()
        .any(|e| matches!(e, ProfileEvent::FollowStateChanged { .. })));
}

/// A logged-out viewer browses freely but is sent to login on follow.
#[tokio::test]
async fn test_anonymous_viewer_is_redirected_to_login() {
    let api = Arc::new(StubApi::new().with_shot_page(Ok(vec![shot(1, 0)])));
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = ProfileController::new(
        api.clone(),
        Viewer::Anonymous,
        ProfileSource::Loaded(profile(12, 5)),
        tx,
    );

    controller.initialize().await;
    assert_eq!(api.relationship_calls(), 0);
    drain(&mut rx);

    controller.toggle_follow().await;

    assert_eq!(drain(&mut rx), vec![ProfileEvent::LoginRequired]);
    assert_eq!(api.follow_calls(), 0);
    assert_eq!(
        controller.follow().snapshot(),
        (FollowState::Unknown, false, 42)
    );
}

/// A profile that cannot be resolved reports once and stays quiet.
#[tokio::test]
async fn test_unresolvable_profile_reports_once() {
    let api = Arc::new(
        StubApi::new().with_profile(Err(ApiError::NotFound("users/missing".to_string()))),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let controller = ProfileController::new(
        api.clone(),
        Viewer::LoggedIn { user_id: 99 },
        ProfileSource::ByHandle {
            handle: "missing".to_string(),
            display_name: Some("Missing Person".to_string()),
        },
        tx,
    );

    controller.initialize().await;
    controller.initialize().await;
    controller.load_more().await;
    controller.toggle_follow().await;

    assert_eq!(
        drain(&mut rx),
        vec![ProfileEvent::Error(ErrorKind::ProfileUnavailable)]
    );
    assert_eq!(api.profile_calls(), 1);
    assert_eq!(api.shots_calls(), 0);
    assert_eq!(api.follow_calls(), 0);
    assert_eq!(
        controller.display_name().as_deref(),
        Some("Missing Person")
    );
}

//! Follow relationship state with optimistic toggling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::controller::Viewer;
use crate::events::{EventSender, ProfileEvent};
use shots_api::ProfileApi;

/// Tri-state follow relationship between the viewer and the profile
/// subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowState {
    /// Not yet determined.
    Unknown,
    /// The viewer does not follow the subject.
    NotFollowing,
    /// The viewer follows the subject.
    Following,
}

#[derive(Debug)]
struct FollowInner {
    subject: Option<u64>,
    state: FollowState,
    pending_toggle: bool,
    follower_count: u32,
}

/// Owns the viewer-to-subject relationship and the locally adjusted
/// follower counter.
///
/// The counter is the single source of truth for the follower figure
/// on screen; display strings are derived from it on demand. The
/// pending flag serializes toggles: it is set atomically with issuing
/// a request and cleared only when that request's response is
/// processed.
pub struct FollowStateMachine {
    api: Arc<dyn ProfileApi>,
    events: EventSender,
    active: Arc<AtomicBool>,
    inner: Mutex<FollowInner>,
}

impl FollowStateMachine {
    pub(crate) fn new(api: Arc<dyn ProfileApi>, events: EventSender, active: Arc<AtomicBool>) -> Self {
        Self {
            api,
            events,
            active,
            inner: Mutex::new(FollowInner {
                subject: None,
                state: FollowState::Unknown,
                pending_toggle: false,
                follower_count: 0,
            }),
        }
    }

    /// Attach the machine to a resolved profile and seed the counter
    /// from the server-reported figure.
    pub(crate) fn bind(&self, subject: u64, follower_count: u32) {
        let mut inner = self.inner.lock();
        inner.subject = Some(subject);
        inner.follower_count = follower_count;
    }

    /// Current `(state, pending flag, follower counter)`.
    pub fn snapshot(&self) -> (FollowState, bool, u32) {
        let inner = self.inner.lock();
        (inner.state, inner.pending_toggle, inner.follower_count)
    }

    /// Locally adjusted follower counter.
    pub fn follower_count(&self) -> u32 {
        self.inner.lock().follower_count
    }

    /// Re-query the relationship from the service.
    ///
    /// The answer is applied only while no toggle is pending: an
    /// optimistic toggle reflects newer user intent than a check that
    /// was issued earlier. A failed check leaves the state unknown and
    /// emits nothing; the question can be asked again at any time.
    pub async fn refresh(&self) {
        let Some(subject) = self.inner.lock().subject else { return };

        let outcome = self.api.is_following(subject).await;

        if !self.active.load(Ordering::Acquire) {
            return;
        }

        let event = {
            let mut inner = self.inner.lock();
            match outcome {
                Ok(_) if inner.pending_toggle => {
                    tracing::debug!(subject, "relationship check lost to a pending toggle");
                    None
                }
                Ok(following) => {
                    inner.state = if following {
                        FollowState::Following
                    } else {
                        FollowState::NotFollowing
                    };
                    Some(ProfileEvent::FollowStateChanged {
                        state: inner.state,
                        follower_count: inner.follower_count,
                    })
                }
                Err(err) => {
                    tracing::debug!(subject, error = %err, "relationship check failed");
                    None
                }
            }
        };

        if let Some(event) = event {
            let _ = self.events.send(event);
        }
    }

    /// Toggle the relationship with optimistic local feedback.
    ///
    /// The state flip and counter adjustment are applied and announced
    /// before the network call resolves. A failed call clears the
    /// pending flag but leaves the optimistic state in place, matching
    /// the long-standing behavior of the screen this backs.
    pub async fn toggle(&self, viewer: &Viewer) {
        {
            let inner = self.inner.lock();
            if inner.subject.is_none() {
                return;
            }
        }

        if !viewer.is_logged_in() {
            let _ = self.events.send(ProfileEvent::LoginRequired);
            return;
        }

        let (subject, unfollowing, event) = {
            let mut inner = self.inner.lock();
            if inner.pending_toggle {
                return;
            }
            let Some(subject) = inner.subject else { return };
            inner.pending_toggle = true;

            let unfollowing = inner.state == FollowState::Following;
            if unfollowing {
                inner.state = FollowState::NotFollowing;
                inner.follower_count = inner.follower_count.saturating_sub(1);
            } else {
                // Unknown counts as not-following for the toggle.
                inner.state = FollowState::Following;
                inner.follower_count = inner.follower_count.saturating_add(1);
            }

            let event = ProfileEvent::FollowStateChanged {
                state: inner.state,
                follower_count: inner.follower_count,
            };
            (subject, unfollowing, event)
        };
        let _ = self.events.send(event);

        let outcome = if unfollowing {
            self.api.unfollow(subject).await
        } else {
            self.api.follow(subject).await
        };

        if !self.active.load(Ordering::Acquire) {
            return;
        }

        if let Err(err) = outcome {
            tracing::warn!(subject, error = %err, "follow toggle request failed");
        }
        self.inner.lock().pending_toggle = false;
    }
}

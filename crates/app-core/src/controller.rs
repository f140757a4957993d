//! Orchestration of profile resolution, feed pagination, and follow
//! state for one profile screen.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::events::{ErrorKind, EventSender, ProfileEvent};
use crate::feed::FeedPaginator;
use crate::follow::FollowStateMachine;
use shots_api::{Profile, ProfileApi};

/// How the controller learns which profile to display.
#[derive(Debug, Clone)]
pub enum ProfileSource {
    /// A complete profile record passed in by the caller; no resolving
    /// fetch is needed.
    Loaded(Profile),

    /// Resolve by server id. The display name, when given, is shown
    /// until the fetch completes.
    ById {
        /// Server-assigned profile id.
        id: u64,
        /// Pre-fetch display-name hint.
        display_name: Option<String>,
    },

    /// Resolve by handle.
    ByHandle {
        /// Profile handle.
        handle: String,
        /// Pre-fetch display-name hint.
        display_name: Option<String>,
    },
}

/// The viewing user, as reported by the hosting auth layer.
///
/// This core never manages login itself; it only needs to know whether
/// follow mutations are permitted and whether the viewer is looking at
/// their own profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    /// Not logged in; follow toggles request login instead of
    /// mutating.
    Anonymous,
    /// Logged in.
    LoggedIn {
        /// The viewer's own profile id.
        user_id: u64,
    },
}

impl Viewer {
    /// Whether follow mutations are permitted.
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Viewer::LoggedIn { .. })
    }

    /// Whether this viewer is the subject of the given profile.
    pub fn is_subject(&self, profile_id: u64) -> bool {
        matches!(self, Viewer::LoggedIn { user_id } if *user_id == profile_id)
    }
}

struct ControllerState {
    source: Option<ProfileSource>,
    display_hint: Option<String>,
    profile: Option<Profile>,
}

/// Drives the data behind one profile screen.
///
/// The controller exclusively owns its profile, paginator, and follow
/// machine; the shared piece is the stateless [`ProfileApi`] client.
/// Everything it wants the view to know arrives on the event channel.
pub struct ProfileController {
    api: Arc<dyn ProfileApi>,
    viewer: Viewer,
    events: EventSender,
    active: Arc<AtomicBool>,
    state: Mutex<ControllerState>,
    feed: FeedPaginator,
    follow: FollowStateMachine,
}

impl ProfileController {
    /// Create a controller. Nothing touches the network until
    /// [`ProfileController::initialize`].
    pub fn new(
        api: Arc<dyn ProfileApi>,
        viewer: Viewer,
        source: ProfileSource,
        events: EventSender,
    ) -> Self {
        let active = Arc::new(AtomicBool::new(true));
        let feed = FeedPaginator::new(Arc::clone(&api), events.clone(), Arc::clone(&active));
        let follow = FollowStateMachine::new(Arc::clone(&api), events.clone(), Arc::clone(&active));

        let display_hint = match &source {
            ProfileSource::Loaded(profile) => Some(profile.name.clone()),
            ProfileSource::ById { display_name, .. }
            | ProfileSource::ByHandle { display_name, .. } => display_name.clone(),
        };

        Self {
            api,
            viewer,
            events,
            active,
            state: Mutex::new(ControllerState {
                source: Some(source),
                display_hint,
                profile: None,
            }),
            feed,
            follow,
        }
    }

    /// Resolve the profile, then kick off the follow check and the
    /// first feed page.
    ///
    /// A failed resolving fetch is terminal for this controller: it
    /// emits [`ErrorKind::ProfileUnavailable`] and nothing retries
    /// automatically. Calling this a second time is a no-op.
    pub async fn initialize(&self) {
        let Some(source) = self.state.lock().source.take() else { return };

        let resolved = match source {
            ProfileSource::Loaded(profile) => Ok(profile),
            ProfileSource::ById { id, .. } => self.api.user_by_id(id).await,
            ProfileSource::ByHandle { handle, .. } => self.api.user_by_handle(&handle).await,
        };

        if !self.active.load(Ordering::Acquire) {
            return;
        }

        match resolved {
            Ok(profile) => self.commit(profile).await,
            Err(err) => {
                tracing::warn!(error = %err, "profile fetch failed");
                let _ = self.events.send(ProfileEvent::Error(ErrorKind::ProfileUnavailable));
            }
        }
    }

    async fn commit(&self, profile: Profile) {
        self.feed.bind(profile.id, profile.shots_count);
        self.follow.bind(profile.id, profile.followers_count);

        // The relationship question is only asked on someone else's
        // profile, and only when a viewer is logged in to ask it for.
        let check_wanted = self.viewer.is_logged_in() && !self.viewer.is_subject(profile.id);
        let load_wanted = profile.shots_count > 0;

        self.state.lock().profile = Some(profile.clone());
        let _ = self.events.send(ProfileEvent::ProfileUpdated(profile));

        // Independent operations: neither blocks the other, and the
        // outcome of one never affects the other.
        tokio::join!(
            async {
                if check_wanted {
                    self.follow.refresh().await;
                }
            },
            async {
                if load_wanted {
                    self.feed.load_more().await;
                }
            },
        );
    }

    /// Request the next feed page; see [`FeedPaginator::load_more`].
    /// Silently a no-op until initialization has committed a profile.
    pub async fn load_more(&self) {
        self.feed.load_more().await;
    }

    /// Toggle the follow relationship; see
    /// [`FollowStateMachine::toggle`].
    pub async fn toggle_follow(&self) {
        self.follow.toggle(&self.viewer).await;
    }

    /// The committed profile, once resolved.
    pub fn profile(&self) -> Option<Profile> {
        self.state.lock().profile.clone()
    }

    /// Name to display: the committed profile's name, or the pre-fetch
    /// hint while resolution is still in flight.
    pub fn display_name(&self) -> Option<String> {
        let state = self.state.lock();
        state
            .profile
            .as_ref()
            .map(|p| p.name.clone())
            .or_else(|| state.display_hint.clone())
    }

    /// Whether the follow affordance should be shown at all. It is
    /// hidden on the viewer's own profile; anonymous viewers still see
    /// it and get the login prompt on tap.
    pub fn shows_follow_affordance(&self) -> bool {
        match self.state.lock().profile {
            Some(ref profile) => !self.viewer.is_subject(profile.id),
            None => false,
        }
    }

    /// Read access to the feed for view snapshots.
    pub fn feed(&self) -> &FeedPaginator {
        &self.feed
    }

    /// Read access to the follow state for view snapshots.
    pub fn follow(&self) -> &FollowStateMachine {
        &self.follow
    }

    /// Tear the controller down. In-flight requests run to completion
    /// but their completions apply no state and emit no events;
    /// transport I/O is not cancelled.
    pub fn shutdown(&self) {
        self.active.store(false, Ordering::Release);
    }

    /// Whether the controller is still live.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

//! Change notifications emitted to the presentation layer.
//!
//! These events are the controller's only observable output. They are
//! delivered on an unbounded channel so emission never suspends; a
//! dropped receiver just means nobody is rendering any more.

use thiserror::Error;

use crate::follow::FollowState;
use shots_api::{Profile, Shot};

/// Error categories surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The profile fetch failed; terminal for this controller, no
    /// automatic retry.
    #[error("profile unavailable")]
    ProfileUnavailable,

    /// A feed page failed to load; a later load-more retries the same
    /// page.
    #[error("feed page failed to load")]
    FeedLoad,
}

/// Events the controller emits as its state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileEvent {
    /// The profile record is available, or was resolved in place over
    /// a placeholder.
    ProfileUpdated(Profile),

    /// Newly fetched shots joined the displayed sequence. Carries only
    /// the new items so the view can append instead of re-rendering
    /// everything.
    ItemsAppended(Vec<Shot>),

    /// The follow state or the locally adjusted follower counter
    /// changed.
    FollowStateChanged {
        /// Current relationship state.
        state: FollowState,
        /// Locally adjusted follower counter.
        follower_count: u32,
    },

    /// A follow toggle was attempted without a logged-in viewer.
    LoginRequired,

    /// An asynchronous operation failed.
    Error(ErrorKind),
}

/// Sender half of the controller's event channel.
pub type EventSender = tokio::sync::mpsc::UnboundedSender<ProfileEvent>;

//! Shotstream
//!
//! Client-side data layer for a shot-sharing profile screen: profile
//! resolution, feed pagination, and follow state. The member crates do
//! the work; this facade re-exports their public surface for hosts
//! that prefer a single dependency.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use app_core::{
    ErrorKind, EventSender, FeedPaginator, FollowState, FollowStateMachine, ProfileController,
    ProfileEvent, ProfileSource, Viewer,
};
pub use i18n::{negotiate_display_locale, CountFormatter, StatKind};
pub use shots_api::{ApiError, Profile, ProfileApi, RestClientConfig, RestProfileClient, Shot};

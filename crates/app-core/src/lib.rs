//! Core application logic for Shotstream
//!
//! This crate owns the asynchronous state behind a profile screen:
//! resolving the profile, paginating its shot feed, and toggling the
//! follow relationship with optimistic feedback. The presentation
//! layer drives it through [`ProfileController`] and renders from the
//! events it emits.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod controller;
pub mod events;
pub mod feed;
pub mod follow;

pub use controller::{ProfileController, ProfileSource, Viewer};
pub use events::{ErrorKind, EventSender, ProfileEvent};
pub use feed::FeedPaginator;
pub use follow::{FollowState, FollowStateMachine};

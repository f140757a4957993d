//! Internationalization for Shotstream
//!
//! This crate provides language negotiation and plural-aware
//! formatting for the stat labels shown on a profile screen.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod counts;
pub mod lang;

pub use counts::{CountFormatter, StatKind};
pub use lang::negotiate_display_locale;

//! Remote service client for Shotstream
//!
//! This crate talks to the shot-sharing service: profile lookup,
//! follow relationships, and paginated shot feeds. It is stateless and
//! safe to share across any number of profile controllers.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod rest;
pub mod test_utils;
pub mod types;

pub use client::{ProfileApi, RestProfileClient};
pub use rest::{ApiError, ApiRequest, Result, RestClientConfig};
pub use types::{Profile, Shot};

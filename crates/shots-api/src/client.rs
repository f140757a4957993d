//! Typed operations against the remote service.

use async_trait::async_trait;

use crate::rest::{ApiError, ApiRequest, Result, RestClient, RestClientConfig};
use crate::types::{Profile, Shot};

/// Remote operations the profile controller depends on.
///
/// [`RestProfileClient`] is the production implementation; tests use
/// [`crate::test_utils::StubApi`]. All methods are non-blocking and
/// must not be invoked before a profile id is known, except the two
/// identity-resolving fetches.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Fetch a profile by its server-assigned id.
    async fn user_by_id(&self, id: u64) -> Result<Profile>;

    /// Fetch a profile by handle.
    async fn user_by_handle(&self, handle: &str) -> Result<Profile>;

    /// Whether the authenticated viewer follows `user_id`.
    ///
    /// A missing relationship record is a valid "not following"
    /// answer, not an error.
    async fn is_following(&self, user_id: u64) -> Result<bool>;

    /// Create a follow relationship with `user_id`.
    async fn follow(&self, user_id: u64) -> Result<()>;

    /// Delete the follow relationship with `user_id`.
    async fn unfollow(&self, user_id: u64) -> Result<()>;

    /// Fetch one page of a user's shots, newest first. Pages are
    /// 1-based.
    async fn shots(&self, user_id: u64, page: u32, per_page: u32) -> Result<Vec<Shot>>;
}

/// Map the relationship probe's outcome onto a follow answer.
///
/// The endpoint answers 204 when a relationship exists and 404 when it
/// does not, so `NotFound` is data here rather than an error.
fn relationship_from(outcome: Result<()>) -> Result<bool> {
    match outcome {
        Ok(()) => Ok(true),
        Err(ApiError::NotFound(_)) => Ok(false),
        Err(e) => Err(e),
    }
}

/// REST-backed [`ProfileApi`] implementation.
///
/// Stateless; clone it or wrap it in an `Arc` to share one client
/// across several controllers.
#[derive(Debug, Clone)]
pub struct RestProfileClient {
    rest: RestClient,
}

impl RestProfileClient {
    /// Build a client from config.
    pub fn new(config: RestClientConfig) -> Self {
        Self { rest: RestClient::new(config) }
    }
}

#[async_trait]
impl ProfileApi for RestProfileClient {
    async fn user_by_id(&self, id: u64) -> Result<Profile> {
        self.rest.json(ApiRequest::get(format!("users/{id}"))).await
    }

    async fn user_by_handle(&self, handle: &str) -> Result<Profile> {
        self.rest.json(ApiRequest::get(format!("users/{handle}"))).await
    }

    async fn is_following(&self, user_id: u64) -> Result<bool> {
        let outcome = self
            .rest
            .send(ApiRequest::get(format!("user/following/{user_id}")))
            .await
            .map(|_| ());
        relationship_from(outcome)
    }

    async fn follow(&self, user_id: u64) -> Result<()> {
        self.rest
            .send(ApiRequest::put(format!("users/{user_id}/follow")))
            .await
            .map(|_| ())
    }

    async fn unfollow(&self, user_id: u64) -> Result<()> {
        self.rest
            .send(ApiRequest::delete(format!("users/{user_id}/follow")))
            .await
            .map(|_| ())
    }

    async fn shots(&self, user_id: u64, page: u32, per_page: u32) -> Result<Vec<Shot>> {
        self.rest
            .json(
                ApiRequest::get(format!("users/{user_id}/shots"))
                    .param("page", page)
                    .param("per_page", per_page),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relationship_exists() {
        assert_eq!(relationship_from(Ok(())), Ok(true));
    }

    #[test]
    fn relationship_missing_is_not_following() {
        let outcome = Err(ApiError::NotFound("user/following/12".to_string()));
        assert_eq!(relationship_from(outcome), Ok(false));
    }

    #[test]
    fn relationship_network_failure_stays_an_error() {
        let outcome = Err(ApiError::Network("HTTP 503 from user/following/12".to_string()));
        assert!(matches!(relationship_from(outcome), Err(ApiError::Network(_))));
    }
}

//! Test fixtures and a scriptable fake of [`ProfileApi`].
//!
//! Responses are queued per operation and consumed in call order.
//! Gates let a test hold a request open to observe in-flight state
//! such as a loading flag or a pending toggle.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::client::ProfileApi;
use crate::rest::{ApiError, Result};
use crate::types::{Profile, Shot};

/// Build a test profile with the given id and expected shot count.
pub fn profile(id: u64, shots_count: u32) -> Profile {
    Profile {
        id,
        username: format!("user{id}"),
        name: format!("User {id}"),
        avatar_url: Some(format!("https://cdn.example.test/{id}.png")),
        bio: Some("designer of things".to_string()),
        shots_count,
        followers_count: 42,
        likes_count: 7,
    }
}

/// Build a test shot; larger `age` values sort later in the feed.
pub fn shot(id: u64, age: i64) -> Shot {
    Shot {
        id,
        title: format!("shot {id}"),
        image_url: None,
        likes_count: 0,
        created_at: Utc.with_ymd_and_hms(2016, 3, 1, 12, 0, 0).unwrap()
            - Duration::minutes(age),
    }
}

/// Scriptable in-memory [`ProfileApi`].
#[derive(Default)]
pub struct StubApi {
    profiles: Mutex<VecDeque<Result<Profile>>>,
    relationships: Mutex<VecDeque<Result<bool>>>,
    follow_results: Mutex<VecDeque<Result<()>>>,
    unfollow_results: Mutex<VecDeque<Result<()>>>,
    shot_pages: Mutex<VecDeque<Result<Vec<Shot>>>>,
    requested_pages: Mutex<Vec<u32>>,
    profile_gate: Mutex<Option<Arc<Notify>>>,
    shots_gate: Mutex<Option<Arc<Notify>>>,
    toggle_gate: Mutex<Option<Arc<Notify>>>,
    profile_calls: AtomicUsize,
    relationship_calls: AtomicUsize,
    follow_calls: AtomicUsize,
    unfollow_calls: AtomicUsize,
    shots_calls: AtomicUsize,
}

impl StubApi {
    /// Create a stub with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a profile fetch outcome.
    pub fn with_profile(self, outcome: Result<Profile>) -> Self {
        self.profiles.lock().push_back(outcome);
        self
    }

    /// Queue a relationship check outcome.
    pub fn with_relationship(self, outcome: Result<bool>) -> Self {
        self.relationships.lock().push_back(outcome);
        self
    }

    /// Queue a follow call outcome.
    pub fn with_follow_result(self, outcome: Result<()>) -> Self {
        self.follow_results.lock().push_back(outcome);
        self
    }

    /// Queue an unfollow call outcome.
    pub fn with_unfollow_result(self, outcome: Result<()>) -> Self {
        self.unfollow_results.lock().push_back(outcome);
        self
    }

    /// Queue a shot page outcome. An exhausted queue answers with an
    /// empty page.
    pub fn with_shot_page(self, outcome: Result<Vec<Shot>>) -> Self {
        self.shot_pages.lock().push_back(outcome);
        self
    }

    /// Hold every profile fetch open until `gate` is notified.
    pub fn gate_profiles(self, gate: Arc<Notify>) -> Self {
        *self.profile_gate.lock() = Some(gate);
        self
    }

    /// Hold every shot-page fetch open until `gate` is notified.
    pub fn gate_shots(self, gate: Arc<Notify>) -> Self {
        *self.shots_gate.lock() = Some(gate);
        self
    }

    /// Hold every follow/unfollow call open until `gate` is notified.
    pub fn gate_toggles(self, gate: Arc<Notify>) -> Self {
        *self.toggle_gate.lock() = Some(gate);
        self
    }

    /// Number of profile fetches issued.
    pub fn profile_calls(&self) -> usize {
        self.profile_calls.load(Ordering::SeqCst)
    }

    /// Number of relationship checks issued.
    pub fn relationship_calls(&self) -> usize {
        self.relationship_calls.load(Ordering::SeqCst)
    }

    /// Number of follow calls issued.
    pub fn follow_calls(&self) -> usize {
        self.follow_calls.load(Ordering::SeqCst)
    }

    /// Number of unfollow calls issued.
    pub fn unfollow_calls(&self) -> usize {
        self.unfollow_calls.load(Ordering::SeqCst)
    }

    /// Number of shot-page fetches issued.
    pub fn shots_calls(&self) -> usize {
        self.shots_calls.load(Ordering::SeqCst)
    }

    /// Page numbers requested, in order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requested_pages.lock().clone()
    }

    async fn wait(gate: &Mutex<Option<Arc<Notify>>>) {
        let gate = gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn next_profile(&self) -> Result<Profile> {
        self.profiles
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted profile".to_string())))
    }
}

#[async_trait]
impl ProfileApi for StubApi {
    async fn user_by_id(&self, _id: u64) -> Result<Profile> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        Self::wait(&self.profile_gate).await;
        self.next_profile()
    }

    async fn user_by_handle(&self, _handle: &str) -> Result<Profile> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        Self::wait(&self.profile_gate).await;
        self.next_profile()
    }

    async fn is_following(&self, _user_id: u64) -> Result<bool> {
        self.relationship_calls.fetch_add(1, Ordering::SeqCst);
        self.relationships
            .lock()
            .pop_front()
            .unwrap_or(Ok(false))
    }

    async fn follow(&self, _user_id: u64) -> Result<()> {
        self.follow_calls.fetch_add(1, Ordering::SeqCst);
        Self::wait(&self.toggle_gate).await;
        self.follow_results.lock().pop_front().unwrap_or(Ok(()))
    }

    async fn unfollow(&self, _user_id: u64) -> Result<()> {
        self.unfollow_calls.fetch_add(1, Ordering::SeqCst);
        Self::wait(&self.toggle_gate).await;
        self.unfollow_results.lock().pop_front().unwrap_or(Ok(()))
    }

    async fn shots(&self, _user_id: u64, page: u32, _per_page: u32) -> Result<Vec<Shot>> {
        self.shots_calls.fetch_add(1, Ordering::SeqCst);
        self.requested_pages.lock().push(page);
        Self::wait(&self.shots_gate).await;
        self.shot_pages.lock().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stub_consumes_scripted_pages_in_order() {
        let api = StubApi::new()
            .with_shot_page(Ok(vec![shot(1, 0)]))
            .with_shot_page(Ok(vec![shot(2, 1)]));

        let first = api.shots(1, 1, 30).await.unwrap();
        let second = api.shots(1, 2, 30).await.unwrap();
        let third = api.shots(1, 3, 30).await.unwrap();

        assert_eq!(first[0].id, 1);
        assert_eq!(second[0].id, 2);
        assert!(third.is_empty());
        assert_eq!(api.requested_pages(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn stub_gate_releases_a_parked_call() {
        let gate = Arc::new(Notify::new());
        let api = StubApi::new().gate_shots(gate.clone());

        // A permit stored before the call is consumed by it.
        gate.notify_one();
        let page = api.shots(1, 1, 30).await.unwrap();
        assert!(page.is_empty());
        assert_eq!(api.shots_calls(), 1);
    }
}

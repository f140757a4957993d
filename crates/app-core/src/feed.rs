//! Infinite-scroll pagination of a profile's shot feed.

use std::cmp::Reverse;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::events::{ErrorKind, EventSender, ProfileEvent};
use shots_api::{ProfileApi, Shot};

/// Shots requested per page, the service default.
pub const PER_PAGE: u32 = 30;

#[derive(Debug, Default)]
struct FeedState {
    profile_id: Option<u64>,
    expected: u32,
    next_page: u32,
    is_loading: bool,
    reached_end: bool,
    seen: HashSet<u64>,
    items: Vec<Shot>,
}

impl FeedState {
    /// Merge a fetched batch: drop ids already shown, append the rest,
    /// re-sort newest first. The sort is stable, so items already on
    /// screen keep their relative order.
    fn merge(&mut self, batch: Vec<Shot>) -> Vec<Shot> {
        let mut added = Vec::new();
        for shot in batch {
            if self.seen.insert(shot.id) {
                added.push(shot);
            }
        }
        self.items.extend(added.iter().cloned());
        self.items.sort_by_key(|s| Reverse((s.created_at, s.id)));
        added
    }
}

/// Paginator for one profile's shot feed.
///
/// Methods take `&self`; the loading flag guarantees at most one page
/// fetch in flight, which is what makes repeated eager triggers from
/// scroll proximity safe.
pub struct FeedPaginator {
    api: Arc<dyn ProfileApi>,
    events: EventSender,
    active: Arc<AtomicBool>,
    state: Mutex<FeedState>,
}

impl FeedPaginator {
    pub(crate) fn new(api: Arc<dyn ProfileApi>, events: EventSender, active: Arc<AtomicBool>) -> Self {
        Self { api, events, active, state: Mutex::new(FeedState::default()) }
    }

    /// Attach the paginator to a resolved profile. Pages are 1-based.
    pub(crate) fn bind(&self, profile_id: u64, expected: u32) {
        let mut state = self.state.lock();
        state.profile_id = Some(profile_id);
        state.expected = expected;
        state.next_page = 1;
    }

    /// Request the next page.
    ///
    /// Silently ignored while a fetch is in flight, after the end of
    /// the feed, before the profile is bound, or when the profile has
    /// no shots to fetch.
    pub async fn load_more(&self) {
        let (profile_id, page) = {
            let mut state = self.state.lock();
            let Some(id) = state.profile_id else { return };
            if state.is_loading || state.reached_end || state.expected == 0 {
                return;
            }
            state.is_loading = true;
            (id, state.next_page)
        };

        tracing::debug!(profile_id, page, "requesting feed page");
        let outcome = self.api.shots(profile_id, page, PER_PAGE).await;

        if !self.active.load(Ordering::Acquire) {
            tracing::debug!(page, "feed page resolved after shutdown; dropping");
            self.state.lock().is_loading = false;
            return;
        }

        let event = {
            let mut state = self.state.lock();
            state.is_loading = false;
            match outcome {
                Ok(batch) if batch.is_empty() => {
                    state.reached_end = true;
                    None
                }
                Ok(batch) => {
                    let added = state.merge(batch);
                    state.next_page += 1;
                    if added.is_empty() {
                        None
                    } else {
                        Some(ProfileEvent::ItemsAppended(added))
                    }
                }
                Err(err) => {
                    // Cursor stays put so the next trigger retries
                    // this same page.
                    tracing::warn!(page, error = %err, "feed page failed");
                    Some(ProfileEvent::Error(ErrorKind::FeedLoad))
                }
            }
        };

        if let Some(event) = event {
            let _ = self.events.send(event);
        }
    }

    /// Snapshot of the displayed sequence.
    pub fn items(&self) -> Vec<Shot> {
        self.state.lock().items.clone()
    }

    /// Whether a page fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    /// Whether the feed has delivered its final page.
    pub fn reached_end(&self) -> bool {
        self.state.lock().reached_end
    }
}

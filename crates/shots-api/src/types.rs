//! Wire records returned by the remote service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A remote user profile.
///
/// Counter fields default to zero when the service omits them; the
/// follower counter displayed on screen is owned by the follow state
/// machine, not this record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Server-assigned id, immutable once known.
    pub id: u64,
    /// Handle, usable as an alternate lookup key.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Bio text, possibly containing markup.
    #[serde(default)]
    pub bio: Option<String>,
    /// Number of shots the feed is expected to contain.
    #[serde(default)]
    pub shots_count: u32,
    /// Follower count as last reported by the server.
    #[serde(default)]
    pub followers_count: u32,
    /// Total likes received.
    #[serde(default)]
    pub likes_count: u32,
}

/// One item in a profile's shot feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Stable identity used for deduplication across pages.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Primary image URL.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Like count at fetch time.
    #[serde(default)]
    pub likes_count: u32,
    /// Server sort key; feeds are ordered newest first.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_counters_default_to_zero() {
        let json = r#"{"id": 12, "username": "nickbutcher", "name": "Nick"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.id, 12);
        assert_eq!(profile.shots_count, 0);
        assert_eq!(profile.followers_count, 0);
        assert_eq!(profile.likes_count, 0);
        assert!(profile.bio.is_none());
    }

    #[test]
    fn profile_round_trips() {
        let profile = Profile {
            id: 7,
            username: "ada".to_string(),
            name: "Ada".to_string(),
            avatar_url: Some("https://cdn.example.com/ada.png".to_string()),
            bio: Some("makes things".to_string()),
            shots_count: 3,
            followers_count: 120,
            likes_count: 450,
        };

        let json = serde_json::to_string(&profile).unwrap();
        let back: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn shot_parses_service_timestamps() {
        let json = r#"{
            "id": 901,
            "title": "Launcher icon",
            "image_url": "https://cdn.example.com/901.png",
            "likes_count": 18,
            "created_at": "2016-03-01T12:30:00Z"
        }"#;

        let shot: Shot = serde_json::from_str(json).unwrap();
        assert_eq!(shot.id, 901);
        assert_eq!(shot.likes_count, 18);
        assert_eq!(shot.created_at.timestamp(), 1456835400);
    }
}

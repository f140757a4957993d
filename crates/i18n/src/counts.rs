//! Plural-aware stat labels.

use fluent::{FluentArgs, FluentBundle, FluentResource};
use unic_langid::LanguageIdentifier;

use crate::lang::fallback_locale;

const EN_STRINGS: &str = r#"
shots =
    { $count ->
        [one] { $count } shot
       *[other] { $count } shots
    }
followers =
    { $count ->
        [one] { $count } follower
       *[other] { $count } followers
    }
likes =
    { $count ->
        [one] { $count } like
       *[other] { $count } likes
    }
"#;

/// The profile stats that carry a formatted count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Published shots.
    Shots,
    /// Followers of the profile.
    Followers,
    /// Likes received across all shots.
    Likes,
}

impl StatKind {
    fn message_id(self) -> &'static str {
        match self {
            StatKind::Shots => "shots",
            StatKind::Followers => "followers",
            StatKind::Likes => "likes",
        }
    }
}

/// Formats stat counts with the plural rules of one locale.
pub struct CountFormatter {
    bundle: FluentBundle<FluentResource>,
}

impl CountFormatter {
    /// Build a formatter for the given locale.
    pub fn new(locale: LanguageIdentifier) -> Self {
        let resource = FluentResource::try_new(EN_STRINGS.to_string())
            .unwrap_or_else(|(resource, _errors)| resource);
        let mut bundle = FluentBundle::new(vec![locale]);
        // Keep output free of Unicode isolation marks; labels land in
        // plain text views.
        bundle.set_use_isolating(false);
        // The bundled resource has no duplicate ids, so this cannot
        // report overrides.
        let _ = bundle.add_resource(resource);
        Self { bundle }
    }

    /// Label for `count` of the given stat, e.g. "1 follower".
    pub fn label(&self, kind: StatKind, count: u32) -> String {
        let Some(message) = self.bundle.get_message(kind.message_id()) else {
            return count.to_string();
        };
        let Some(pattern) = message.value() else {
            return count.to_string();
        };
        let mut args = FluentArgs::new();
        args.set("count", count);
        let mut errors = Vec::new();
        self.bundle
            .format_pattern(pattern, Some(&args), &mut errors)
            .into_owned()
    }
}

impl Default for CountFormatter {
    fn default() -> Self {
        Self::new(fallback_locale())
    }
}

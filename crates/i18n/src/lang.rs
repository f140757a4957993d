//! Language negotiation.

use fluent_langneg::{negotiate_languages, NegotiationStrategy};
use unic_langid::LanguageIdentifier;

/// Locales the crate ships translations for.
pub fn available_locales() -> Vec<LanguageIdentifier> {
    vec![fallback_locale()]
}

/// The locale used when negotiation yields nothing usable.
pub fn fallback_locale() -> LanguageIdentifier {
    "en".parse().unwrap_or_default()
}

/// Pick the best available locale for the requested ones.
pub fn negotiate_display_locale(requested: &[LanguageIdentifier]) -> LanguageIdentifier {
    let available = available_locales();
    let fallback = fallback_locale();
    negotiate_languages(
        requested,
        &available,
        Some(&fallback),
        NegotiationStrategy::Filtering,
    )
    .first()
    .map(|locale| (*locale).clone())
    .unwrap_or(fallback)
}

//! Locale resolution against the configured locale set

use crate::config::LocaleConfig;
use tracing::debug;

/// The language component of a locale tag, i.e. everything before the
/// first hyphen. Script subtags and the like end up in the region part
/// and are never compared.
pub(crate) fn language_of(tag: &str) -> &str {
    match tag.split_once('-') {
        Some((language, _)) => language,
        None => tag,
    }
}

/// Resolve a requested locale tag to a configured locale.
///
/// Rules, in order:
/// - No locale requested: the default locale is returned as-is, even when
///   it is not itself configured (pass-through, not a validated lookup).
/// - A case-insensitive exact match returns the configured entry with its
///   original casing.
/// - Otherwise the tag is split on its first hyphen and a configured
///   locale sharing the language component is selected via
///   [`pick_for_lang`]: the default locale wins if its language matches
///   and it is itself configured, then a bare-language entry, then the
///   first configured variant in declaration order.
/// - Nothing matched: `None`.
///
/// A request for a specific region silently degrades to any configured
/// locale of the same language (`en-GB` can resolve to a configured
/// `en-US`). This is a good-enough language-family fallback, not strict
/// BCP-47 negotiation.
///
/// The reserved token [`crate::ALL_LOCALES`] is not handled here; callers
/// special-case it upstream.
pub fn resolve<'a>(requested: Option<&str>, config: &'a LocaleConfig) -> Option<&'a str> {
    let requested = match requested {
        Some(r) if !r.is_empty() => r,
        _ => {
            let default = config.default_locale();
            return if default.is_empty() { None } else { Some(default) };
        }
    };

    if let Some(exact) = config.canonical(requested) {
        return Some(exact);
    }

    let language = language_of(requested);
    if language.is_empty() {
        return None;
    }

    let picked = pick_for_lang(language, config);
    debug!(requested, resolved = ?picked, "resolved locale by language family");
    picked
}

/// Select the preferred configured locale for a bare language component.
fn pick_for_lang<'a>(language: &str, config: &'a LocaleConfig) -> Option<&'a str> {
    let default = config.default_locale();

    // Prefer the default locale if its language matches and it is configured
    if !default.is_empty() && language_of(default).eq_ignore_ascii_case(language) {
        if let Some(entry) = config.canonical(default) {
            return Some(entry);
        }
    }

    // Prefer the bare language entry (e.g. "en") if configured
    if let Some(bare) = config.canonical(language) {
        return Some(bare);
    }

    // Otherwise the first configured variant with that language
    config
        .locales()
        .iter()
        .find(|l| language_of(l).eq_ignore_ascii_case(language))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(locales: &[&str], default: &str) -> LocaleConfig {
        LocaleConfig::new(locales.iter().map(|l| l.to_string()).collect(), default)
    }

    #[test]
    fn exact_match_returns_configured_casing() {
        let cfg = config(&["en-US", "de-AT"], "en-US");
        assert_eq!(resolve(Some("EN-US"), &cfg), Some("en-US"));
        assert_eq!(resolve(Some("de-at"), &cfg), Some("de-AT"));
    }

    #[test]
    fn missing_request_passes_default_through_unvalidated() {
        let cfg = config(&["en"], "fr");
        assert_eq!(resolve(None, &cfg), Some("fr"));
        assert_eq!(resolve(Some(""), &cfg), Some("fr"));
    }

    #[test]
    fn empty_default_and_no_request_yields_none() {
        let cfg = config(&["en"], "");
        assert_eq!(resolve(None, &cfg), None);
    }

    #[test]
    fn default_language_preference_wins_over_bare_absence() {
        let cfg = config(&["en", "de-AT"], "de-AT");
        assert_eq!(resolve(Some("de"), &cfg), Some("de-AT"));
    }

    #[test]
    fn bare_language_entry_preferred_over_first_variant() {
        let cfg = config(&["de-CH", "de", "de-AT"], "en");
        assert_eq!(resolve(Some("de"), &cfg), Some("de"));
    }

    #[test]
    fn first_declared_variant_used_when_no_bare_or_default_match() {
        let cfg = config(&["de-CH", "de-AT"], "en");
        assert_eq!(resolve(Some("de"), &cfg), Some("de-CH"));
    }

    #[test]
    fn region_mismatch_degrades_to_language_family() {
        let cfg = config(&["en-US"], "en-US");
        assert_eq!(resolve(Some("en-GB"), &cfg), Some("en-US"));
    }

    #[test]
    fn unconfigured_language_yields_none() {
        let cfg = config(&["en", "de"], "en");
        assert_eq!(resolve(Some("fr"), &cfg), None);
    }

    #[test]
    fn default_must_be_configured_to_win_language_preference() {
        // Default "de-DE" shares the language but is not configured; the
        // bare entry wins instead.
        let cfg = config(&["de", "de-AT"], "de-DE");
        assert_eq!(resolve(Some("de"), &cfg), Some("de"));
    }

    #[test]
    fn multi_hyphen_tags_split_on_first_hyphen_only() {
        let cfg = config(&["zh-Hant-TW"], "en");
        assert_eq!(resolve(Some("zh-CN"), &cfg), Some("zh-Hant-TW"));
        assert_eq!(resolve(Some("zh"), &cfg), Some("zh-Hant-TW"));
    }

    #[test]
    fn empty_configuration_fails_everything_but_passthrough() {
        let cfg = config(&[], "en");
        assert_eq!(resolve(Some("en"), &cfg), None);
        assert_eq!(resolve(None, &cfg), Some("en"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let cfg = config(&["en", "de-AT"], "en");
        let first = resolve(Some("De"), &cfg);
        let second = resolve(Some("De"), &cfg);
        assert_eq!(first, second);
    }
}

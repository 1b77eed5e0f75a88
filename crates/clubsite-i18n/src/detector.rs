//! Locale detection from `Accept-Language` headers

use crate::config::LocaleConfig;
use crate::resolver::language_of;
use tracing::debug;

#[derive(Debug)]
struct Candidate {
    tag: String,
    weight: f32,
}

/// Parse an `Accept-Language` header value (e.g. `"en-US,en;q=0.9,de;q=0.8"`)
/// into lowercased candidates ordered by descending weight. Ties keep the
/// header order. Missing, unparsable, and zero weights count as full weight.
fn parse_header(header: &str) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next().unwrap_or("").trim().to_ascii_lowercase();
            if tag.is_empty() {
                return None;
            }
            let weight = pieces
                .next()
                .map(|q| q.trim().trim_start_matches("q=").trim())
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|w| *w != 0.0)
                .unwrap_or(1.0);
            Some(Candidate { tag, weight })
        })
        .collect();

    // sort_by is stable, so equal weights preserve header order
    candidates.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

/// Detect the best configured locale for an `Accept-Language` header.
///
/// Never fails: an absent or empty header, or one matching nothing, yields
/// the default locale. Candidates are tried in descending weight order;
/// each is matched case-insensitively against the configured set, first
/// exactly, then by language prefix (a configured locale matches when its
/// lowercased form equals the candidate's language component or starts
/// with `language + "-"`), scanning in declaration order.
///
/// The tie-break here is intentionally simpler than the resolver's
/// language-preference rule: the first configured locale encountered wins,
/// with no preference for the default locale. The two algorithms are tuned
/// separately and must stay distinct.
pub fn detect_from_header<'a>(header: Option<&str>, config: &'a LocaleConfig) -> &'a str {
    let header = match header {
        Some(h) if !h.trim().is_empty() => h,
        _ => return config.default_locale(),
    };

    for candidate in parse_header(header) {
        if let Some(exact) = config.canonical(&candidate.tag) {
            debug!(tag = %candidate.tag, detected = exact, "detected locale from header");
            return exact;
        }

        let language = language_of(&candidate.tag);
        for locale in config.locales() {
            let lower = locale.to_ascii_lowercase();
            if lower == language || lower.starts_with(&format!("{language}-")) {
                debug!(tag = %candidate.tag, detected = %locale, "detected locale from header");
                return locale;
            }
        }
    }

    config.default_locale()
}

//! Request-scoped locale normalization for content API routes
//!
//! The HTTP layer wires this into its request pipeline: it feeds in the
//! request path, the `locale` query parameter, and the `Accept-Language`
//! header, and stores the resulting [`LocaleDecision`] in request state
//! for downstream handlers.

use crate::config::LocaleConfig;
use crate::detector::detect_from_header;
use crate::resolver::resolve;
use crate::ALL_LOCALES;
use tracing::debug;

/// Routes outside this prefix (admin, static assets) are left untouched.
const CONTENT_API_PREFIX: &str = "/api";

/// Tunables for [`LocaleResolution`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionOptions {
    /// Consult the `Accept-Language` header when no locale parameter is
    /// present. Off by default.
    pub detect_from_header: bool,
}

/// Outcome of applying locale resolution to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocaleDecision {
    /// The request is left untouched: either the path is outside the
    /// content API, or nothing was requested and no default is configured.
    Skipped,
    /// The literal `"all"` token was requested; it bypasses resolution and
    /// downstream handlers must treat it as "every locale".
    All,
    /// The locale parameter normalized to a configured tag (or the default
    /// locale when nothing was requested).
    Resolved(String),
    /// A locale was requested but nothing configured matches. Downstream
    /// handlers decide whether that means "no content" or some fallback.
    Unresolved,
}

/// Applies detection and resolution to normalize an inbound locale
/// parameter before downstream handlers run.
#[derive(Debug, Clone)]
pub struct LocaleResolution {
    config: LocaleConfig,
    options: ResolutionOptions,
}

impl LocaleResolution {
    /// Create a resolution step with default options.
    pub fn new(config: LocaleConfig) -> Self {
        Self::with_options(config, ResolutionOptions::default())
    }

    /// Create a resolution step with explicit options.
    pub fn with_options(config: LocaleConfig, options: ResolutionOptions) -> Self {
        Self { config, options }
    }

    /// The locale configuration this step resolves against.
    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    /// Decide the request locale for one request.
    pub fn apply(
        &self,
        path: &str,
        locale_param: Option<&str>,
        accept_language: Option<&str>,
    ) -> LocaleDecision {
        if !path.starts_with(CONTENT_API_PREFIX) {
            return LocaleDecision::Skipped;
        }

        if locale_param == Some(ALL_LOCALES) {
            debug!(path, "locale 'all' requested, bypassing resolution");
            return LocaleDecision::All;
        }

        let requested = match locale_param {
            Some(p) if !p.is_empty() => Some(p),
            _ if self.options.detect_from_header && accept_language.is_some() => {
                Some(detect_from_header(accept_language, &self.config))
            }
            _ => None,
        };

        match resolve(requested, &self.config) {
            Some(tag) => {
                debug!(path, requested = ?requested, resolved = tag, "normalized request locale");
                LocaleDecision::Resolved(tag.to_string())
            }
            None if requested.is_some() => LocaleDecision::Unresolved,
            None => LocaleDecision::Skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(locales: &[&str], default: &str) -> LocaleResolution {
        LocaleResolution::new(LocaleConfig::new(
            locales.iter().map(|l| l.to_string()).collect(),
            default,
        ))
    }

    #[test]
    fn non_api_routes_are_skipped() {
        let step = resolution(&["en", "de"], "en");
        assert_eq!(
            step.apply("/admin/users", Some("de"), None),
            LocaleDecision::Skipped
        );
        assert_eq!(
            step.apply("/uploads/logo.png", None, None),
            LocaleDecision::Skipped
        );
    }

    #[test]
    fn all_token_bypasses_resolution() {
        let step = resolution(&["en", "de"], "en");
        assert_eq!(
            step.apply("/api/articles", Some("all"), None),
            LocaleDecision::All
        );
    }

    #[test]
    fn parameter_normalizes_to_configured_casing() {
        let step = resolution(&["en-US", "de-AT"], "en-US");
        assert_eq!(
            step.apply("/api/articles", Some("de-at"), None),
            LocaleDecision::Resolved("de-AT".into())
        );
    }

    #[test]
    fn absent_parameter_resolves_to_default() {
        let step = resolution(&["en", "de"], "en");
        assert_eq!(
            step.apply("/api/articles", None, None),
            LocaleDecision::Resolved("en".into())
        );
    }

    #[test]
    fn unresolvable_parameter_is_marked_unresolved() {
        let step = resolution(&["en", "de"], "en");
        assert_eq!(
            step.apply("/api/articles", Some("fr"), None),
            LocaleDecision::Unresolved
        );
    }

    #[test]
    fn header_detection_requires_opt_in() {
        let config = LocaleConfig::new(vec!["en".into(), "de".into()], "en");

        let without = LocaleResolution::new(config.clone());
        assert_eq!(
            without.apply("/api/articles", None, Some("de,en;q=0.5")),
            LocaleDecision::Resolved("en".into())
        );

        let with = LocaleResolution::with_options(
            config,
            ResolutionOptions {
                detect_from_header: true,
            },
        );
        assert_eq!(
            with.apply("/api/articles", None, Some("de,en;q=0.5")),
            LocaleDecision::Resolved("de".into())
        );
    }

    #[test]
    fn nothing_requested_and_no_default_is_skipped() {
        let step = resolution(&[], "");
        assert_eq!(step.apply("/api/articles", None, None), LocaleDecision::Skipped);
    }
}

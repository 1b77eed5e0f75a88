//! Locale switcher facade
//!
//! A thin read-only holder over the locale configuration, used by the
//! i18n endpoints to list locales and build locale-switching links.

use crate::config::LocaleConfig;
use crate::error::I18nResult;
use serde::Serialize;
use url::Url;

/// Descriptive information about a single locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    /// The locale tag.
    pub code: String,
    /// Human-readable display name.
    pub name: String,
    /// Whether this is the configured default locale.
    pub is_default: bool,
    /// Whether the tag appears in the configured set.
    pub is_available: bool,
}

/// Read-only access to the configured locales plus switching helpers.
#[derive(Debug, Clone)]
pub struct LocaleSwitcher {
    config: LocaleConfig,
}

impl LocaleSwitcher {
    /// Create a switcher over the given configuration.
    pub fn new(config: LocaleConfig) -> Self {
        Self { config }
    }

    /// All configured locales, in declaration order.
    pub fn available_locales(&self) -> &[String] {
        self.config.locales()
    }

    /// The configured default locale.
    pub fn default_locale(&self) -> &str {
        self.config.default_locale()
    }

    /// Exact membership check against the configured set.
    pub fn is_available(&self, locale: &str) -> bool {
        self.config.locales().iter().any(|l| l == locale)
    }

    /// Descriptive info for a locale tag.
    pub fn locale_info(&self, locale: &str) -> LocaleInfo {
        LocaleInfo {
            code: locale.to_string(),
            name: self.locale_name(locale).to_string(),
            is_default: locale == self.config.default_locale(),
            is_available: self.is_available(locale),
        }
    }

    /// Display name for a locale tag, falling back to the tag itself.
    pub fn locale_name<'a>(&self, locale: &'a str) -> &'a str {
        match locale {
            "de-AT" => "Deutsch (Österreich)",
            "en" => "English",
            "de" => "Deutsch",
            "en-US" => "English (US)",
            "en-GB" => "English (UK)",
            other => other,
        }
    }

    /// Rewrite a URL's `locale` query parameter to switch locales.
    ///
    /// Returns the path-and-query portion of the rewritten URL. An
    /// unavailable locale leaves the URL unchanged.
    pub fn localized_url(&self, current_url: &str, new_locale: &str) -> I18nResult<String> {
        if !self.is_available(new_locale) {
            return Ok(current_url.to_string());
        }

        let base = Url::parse("http://localhost")?;
        let url = base.join(current_url)?;

        let mut replaced = false;
        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                if k == "locale" {
                    replaced = true;
                    (k.into_owned(), new_locale.to_string())
                } else {
                    (k.into_owned(), v.into_owned())
                }
            })
            .collect();
        if !replaced {
            pairs.push(("locale".to_string(), new_locale.to_string()));
        }

        let mut rewritten = url.clone();
        rewritten
            .query_pairs_mut()
            .clear()
            .extend_pairs(pairs)
            .finish();

        let query = rewritten
            .query()
            .map(|q| format!("?{q}"))
            .unwrap_or_default();
        Ok(format!("{}{}", rewritten.path(), query))
    }
}

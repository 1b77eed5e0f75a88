//! Locale configuration

use serde::Deserialize;

fn default_locale() -> String {
    "en".to_string()
}

/// The deployment's locale configuration: the ordered set of supported
/// locale tags plus the designated default locale.
///
/// The configuration is read as-is from the deployment config; no schema
/// validation is performed. An empty locale set makes every resolution
/// attempt fail except the no-request pass-through, and the default locale
/// is not required to appear in `locales`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocaleConfig {
    locales: Vec<String>,
    default_locale: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            default_locale: default_locale(),
        }
    }
}

impl LocaleConfig {
    /// Create a configuration from a locale list and a default locale.
    pub fn new(locales: Vec<String>, default_locale: impl Into<String>) -> Self {
        Self {
            locales,
            default_locale: default_locale.into(),
        }
    }

    /// The configured locale tags, in declaration order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// The configured default locale tag.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Look up the configured entry matching `tag` case-insensitively,
    /// returning it with its original casing.
    pub fn canonical(&self, tag: &str) -> Option<&str> {
        self.locales
            .iter()
            .find(|l| l.eq_ignore_ascii_case(tag))
            .map(String::as_str)
    }
}

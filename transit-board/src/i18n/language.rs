//! UI language resolution.

use std::fmt;
use std::str::FromStr;

/// Language used for report vocabulary and, optionally, stop names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Bulgarian,
}

/// Error returned when parsing an unknown language code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language {0:?} (expected \"en\" or \"bg\")")]
pub struct UnknownLanguage(String);

/// Environment variables consulted for the locale, in priority order.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

impl Language {
    /// Two-letter language code, as used in upstream resource names.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Bulgarian => "bg",
        }
    }

    /// Resolve the language from a POSIX locale name such as `bg_BG.UTF-8`.
    ///
    /// Bulgarian locales select Bulgarian; everything else is English.
    pub fn from_locale(locale: &str) -> Self {
        if locale == "bg" || locale.starts_with("bg_") || locale.starts_with("bg.") {
            Language::Bulgarian
        } else {
            Language::English
        }
    }

    /// Resolve the language from the first non-empty locale variable.
    pub fn from_env_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        LOCALE_VARS
            .iter()
            .filter_map(|var| lookup(var))
            .find(|value| !value.is_empty())
            .map(|locale| Language::from_locale(&locale))
            .unwrap_or_default()
    }

    /// Resolve the language from the process environment.
    pub fn detect() -> Self {
        Self::from_env_lookup(|var| std::env::var(var).ok())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "bg" | "bulgarian" => Ok(Language::Bulgarian),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

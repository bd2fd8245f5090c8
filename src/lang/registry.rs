//! Static registry of candidate spoken languages.

use std::fmt;

use serde::Serialize;

/// A spoken language the recognizer will attempt.
///
/// Each language carries a fixed wire-format locale code (sent to the
/// recognition service) and a human-readable display name. The set is fixed
/// at compile time and never changes at runtime. Serializes as the display
/// name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Language {
    English,
    Spanish,
    French,
    Greek,
    German,
    Italian,
}

impl Language {
    /// All supported languages, in dispatch order.
    pub const ALL: [Language; 6] = [Language::English, Language::Spanish, Language::French, Language::Greek, Language::German, Language::Italian];

    /// The locale code the recognition service expects for this language.
    pub fn wire_code(&self) -> &'static str {
        match self {
            Language::English => "en-gb",
            Language::Spanish => "es-es",
            Language::French => "fr-fr",
            Language::Greek => "el",
            Language::German => "de-de",
            Language::Italian => "it-it",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "English"),
            Language::Spanish => write!(f, "Spanish"),
            Language::French => write!(f, "French"),
            Language::Greek => write!(f, "Greek"),
            Language::German => write!(f, "German"),
            Language::Italian => write!(f, "Italian"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_are_stable() {
        assert_eq!(Language::English.wire_code(), "en-gb");
        assert_eq!(Language::Greek.wire_code(), "el");
        assert_eq!(Language::German.wire_code(), "de-de");
    }

    #[test]
    fn all_lists_every_language_once() {
        assert_eq!(Language::ALL.len(), 6);
        for (i, a) in Language::ALL.iter().enumerate() {
            for b in &Language::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn serializes_as_display_name() {
        assert_eq!(serde_json::to_string(&Language::Spanish).unwrap(), "\"Spanish\"");
    }
}

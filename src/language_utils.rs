use isolang::Language;

use crate::errors::TranslationError;

/// Language utilities for the fixed target language table
///
/// The table maps human-readable names to the short codes that select the
/// translation direction and name the output files. Codes are kept exactly as
/// listed even when they are not the ISO 639 code of the language (`jap`),
/// callers can check with [`has_standard_code`] and warn.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("Japanese", "jap"),
    ("Spanish", "es"),
    ("German", "de"),
    ("French", "fr"),
    ("Italian", "it"),
];

/// A target language from the supported table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetLanguage {
    // @field: Human-readable name
    pub name: &'static str,
    // @field: Short code used for models and file names
    pub code: &'static str,
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// All supported target languages in table order
pub fn supported_languages() -> Vec<TargetLanguage> {
    SUPPORTED_LANGUAGES.iter()
        .map(|&(name, code)| TargetLanguage { name, code })
        .collect()
}

/// Resolve a language by name or code, both case-insensitive
pub fn resolve_language(name_or_code: &str) -> Result<TargetLanguage, TranslationError> {
    let wanted = name_or_code.trim();

    SUPPORTED_LANGUAGES.iter()
        .find(|(name, code)| name.eq_ignore_ascii_case(wanted) || code.eq_ignore_ascii_case(wanted))
        .map(|&(name, code)| TargetLanguage { name, code })
        .ok_or_else(|| TranslationError::UnknownLanguage(name_or_code.to_string()))
}

/// Resolve a whole user selection, failing on the first unknown entry
///
/// Duplicates are collapsed while the selection order is kept.
pub fn resolve_selection<S: AsRef<str>>(selection: &[S]) -> Result<Vec<TargetLanguage>, TranslationError> {
    let mut resolved: Vec<TargetLanguage> = Vec::with_capacity(selection.len());

    for entry in selection {
        let language = resolve_language(entry.as_ref())?;
        if !resolved.contains(&language) {
            resolved.push(language);
        }
    }

    Ok(resolved)
}

/// Check whether a language's code is the ISO 639 code of that same language
///
/// `jap` is a valid ISO 639-3 code, but of another language, so it does not
/// count as a standard code for Japanese.
pub fn has_standard_code(language: &TargetLanguage) -> bool {
    match get_language_name(language.code) {
        Ok(iso_name) => iso_name.starts_with(language.name),
        Err(_) => false,
    }
}

/// Get the English language name for an ISO 639-1 or ISO 639-3 code
pub fn get_language_name(code: &str) -> anyhow::Result<String> {
    let normalized = code.trim().to_lowercase();
    let language = match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => Language::from_639_3(&normalized),
        _ => None,
    };

    language
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow::anyhow!("Invalid language code: {}", code))
}

/*!
 * Tests for the target language table
 */

use docxlate::errors::TranslationError;
use docxlate::language_utils::{self, TargetLanguage};

#[test]
fn test_supported_languages_shouldKeepTableOrder() {
    let names: Vec<&str> = language_utils::supported_languages().iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["Japanese", "Spanish", "German", "French", "Italian"]);
}

#[test]
fn test_resolve_language_withName_shouldReturnCode() {
    assert_eq!(language_utils::resolve_language("Spanish").unwrap().code, "es");
    assert_eq!(language_utils::resolve_language("German").unwrap().code, "de");
    assert_eq!(language_utils::resolve_language("French").unwrap().code, "fr");
    assert_eq!(language_utils::resolve_language("Italian").unwrap().code, "it");
}

#[test]
fn test_resolve_language_withJapanese_shouldKeepTableCode() {
    let japanese = language_utils::resolve_language("Japanese").unwrap();
    assert_eq!(japanese.code, "jap");
}

#[test]
fn test_resolve_language_withLowercaseNameOrCode_shouldResolve() {
    assert_eq!(language_utils::resolve_language("spanish").unwrap().name, "Spanish");
    assert_eq!(language_utils::resolve_language("de").unwrap().name, "German");
    assert_eq!(language_utils::resolve_language(" it ").unwrap().name, "Italian");
}

#[test]
fn test_resolve_language_withUppercaseCode_shouldResolve() {
    assert_eq!(language_utils::resolve_language("ES").unwrap().name, "Spanish");
    assert_eq!(language_utils::resolve_language("JAP").unwrap().code, "jap");
}

#[test]
fn test_resolve_selection_withSameLanguageInDifferentCase_shouldCollapse() {
    let languages = language_utils::resolve_selection(&["DE", "german", "de"]).unwrap();
    assert_eq!(languages.len(), 1);
    assert_eq!(languages[0].code, "de");
}

#[test]
fn test_resolve_language_withUnknownName_shouldFail() {
    let result = language_utils::resolve_language("Klingon");
    assert!(matches!(result, Err(TranslationError::UnknownLanguage(ref name)) if name == "Klingon"));
}

#[test]
fn test_resolve_selection_withDuplicates_shouldKeepFirstOccurrenceOrder() {
    let selection = ["German", "es", "Spanish", "German"];
    let languages = language_utils::resolve_selection(&selection).unwrap();
    let codes: Vec<&str> = languages.iter().map(|l| l.code).collect();
    assert_eq!(codes, vec!["de", "es"]);
}

#[test]
fn test_resolve_selection_withOneUnknown_shouldFailWhole() {
    let result = language_utils::resolve_selection(&["Spanish", "Elvish"]);
    assert!(matches!(result, Err(TranslationError::UnknownLanguage(_))));
}

#[test]
fn test_has_standard_code_shouldFlagOnlyJapanese() {
    for language in language_utils::supported_languages() {
        let expected = language.code != "jap";
        assert_eq!(language_utils::has_standard_code(&language), expected, "{}", language);
    }
}

#[test]
fn test_get_language_name_withValidCodes_shouldReturnName() {
    assert_eq!(language_utils::get_language_name("en").unwrap(), "English");
    assert_eq!(language_utils::get_language_name("fra").unwrap(), "French");
}

#[test]
fn test_get_language_name_withInvalidCode_shouldFail() {
    assert!(language_utils::get_language_name("xx").is_err());
    assert!(language_utils::get_language_name("english").is_err());
}

#[test]
fn test_target_language_display_shouldShowNameAndCode() {
    let language = TargetLanguage { name: "French", code: "fr" };
    assert_eq!(language.to_string(), "French (fr)");
}

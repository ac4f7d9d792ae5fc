/*!
 * Tests for language utilities functionality
 */

use doctrans::language_utils::{get_language_name, language_codes_match, normalize_to_part2t};

#[test]
fn test_normalize_to_part2t_withTwoLetterCode_shouldConvert() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("ar").unwrap(), "ara");
    assert_eq!(normalize_to_part2t("fr").unwrap(), "fra");
}

#[test]
fn test_normalize_to_part2t_withPart2BCode_shouldConvertToPart2T() {
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("chi").unwrap(), "zho");
}

#[test]
fn test_normalize_to_part2t_withInvalidCode_shouldFail() {
    assert!(normalize_to_part2t("zz").is_err());
    assert!(normalize_to_part2t("").is_err());
    assert!(normalize_to_part2t("english").is_err());
}

#[test]
fn test_language_codes_match_acrossCodeFormats_shouldMatch() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("fre", "fr"));
    assert!(!language_codes_match("en", "fr"));
    assert!(!language_codes_match("en", "not-a-code"));
}

#[test]
fn test_get_language_name_shouldResolveNames() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("ar").unwrap(), "Arabic");
    assert!(get_language_name("xx").is_err());
}
